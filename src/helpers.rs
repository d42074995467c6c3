use std::str::FromStr;

use cosmwasm_std::Decimal;

use crate::error::ContractError;

/// Sentinel value meaning "leave this field unchanged" in update messages.
pub const DO_NOT_MODIFY: &str = "[do-not-modify]";

pub const MIN_ID_LEN: usize = 3;
pub const MAX_ID_LEN: usize = 64;
pub const MIN_SYMBOL_LEN: usize = 3;
pub const MAX_SYMBOL_LEN: usize = 12;
pub const MAX_URI_LEN: usize = 256;
pub const MIN_COMMUNITY_ID_LEN: usize = 5;

/// Trim and lowercase an id before validation or lookup, so stored and
/// queried keys always agree.
pub fn normalize_id(id: &str) -> String {
    id.trim().to_lowercase()
}

fn is_alphanumeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric())
}

fn begins_with_alpha(s: &str) -> bool {
    s.chars().next().map_or(false, |c| c.is_ascii_alphabetic())
}

/// Denom ids are lowercase alphanumeric, begin with a letter and are
/// [3, 64] characters long. Expects a normalized id.
pub fn validate_denom_id(id: &str) -> Result<(), ContractError> {
    if id.len() < MIN_ID_LEN || id.len() > MAX_ID_LEN {
        return Err(ContractError::InvalidDenomId {
            id: id.to_string(),
            reason: format!("length must be in [{}, {}]", MIN_ID_LEN, MAX_ID_LEN),
        });
    }
    if !begins_with_alpha(id) || !is_alphanumeric(id) {
        return Err(ContractError::InvalidDenomId {
            id: id.to_string(),
            reason: "only alphanumeric characters beginning with a letter".to_string(),
        });
    }
    Ok(())
}

/// Token ids follow the same charset rule as denom ids.
pub fn validate_token_id(id: &str) -> Result<(), ContractError> {
    if id.len() < MIN_ID_LEN || id.len() > MAX_ID_LEN {
        return Err(ContractError::InvalidTokenId {
            id: id.to_string(),
            reason: format!("length must be in [{}, {}]", MIN_ID_LEN, MAX_ID_LEN),
        });
    }
    if !begins_with_alpha(id) || !is_alphanumeric(id) {
        return Err(ContractError::InvalidTokenId {
            id: id.to_string(),
            reason: "only alphanumeric characters beginning with a letter".to_string(),
        });
    }
    Ok(())
}

pub fn validate_denom_symbol(symbol: &str) -> Result<(), ContractError> {
    let symbol = symbol.trim();
    if symbol.len() < MIN_SYMBOL_LEN || symbol.len() > MAX_SYMBOL_LEN {
        return Err(ContractError::InvalidDenomSymbol {
            symbol: symbol.to_string(),
        });
    }
    if !symbol.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ContractError::InvalidDenomSymbol {
            symbol: symbol.to_string(),
        });
    }
    Ok(())
}

pub fn validate_uri(uri: &str) -> Result<(), ContractError> {
    if uri.len() > MAX_URI_LEN {
        return Err(ContractError::InvalidTokenUri { max: MAX_URI_LEN });
    }
    Ok(())
}

/// Parse a royalty fraction and bound it to [0, 1].
pub fn parse_royalties(royalties: &str) -> Result<Decimal, ContractError> {
    let value = Decimal::from_str(royalties).map_err(|_| ContractError::InvalidRoyalties {
        royalties: royalties.to_string(),
    })?;
    if value > Decimal::one() {
        return Err(ContractError::InvalidRoyalties {
            royalties: royalties.to_string(),
        });
    }
    Ok(value)
}
