use cosmwasm_std::{entry_point, Addr, BankMsg, Coin, DepsMut, Env, MessageInfo, Response, Storage};
use cw2::set_contract_version;
use cw_utils::must_pay;

use crate::error::ContractError;
use crate::helpers::{
    normalize_id, parse_royalties, validate_denom_id, validate_denom_symbol, validate_token_id,
    validate_uri, DO_NOT_MODIFY,
};
use crate::msg::{ExecuteMsg, InstantiateMsg};
use crate::state::{
    Community, CommunityMembers, Config, Denom, MarketplaceOrder, Metadata, Nft, OrderPrice,
    PaymentInfo, COMMUNITIES, CONFIG, DENOMS, MEMBERS, NFTS, ORDERS, OWNED_TOKENS, SUPPLY,
};

const CONTRACT_NAME: &str = "crates.io:community-nft-marketplace";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let config = Config {
        owner: info.sender.clone(),
        denom_overwrite: msg.denom_overwrite,
    };
    CONFIG.save(deps.storage, &config)?;

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", info.sender.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateDenom {
            id,
            name,
            symbol,
            description,
            preview_uri,
            community_id,
            dependent_denoms,
            category,
            primary_sale,
            total_nfts,
            payment_info,
            data,
        } => execute_create_denom(
            deps,
            info,
            id,
            name,
            symbol,
            description,
            preview_uri,
            community_id,
            dependent_denoms,
            category,
            primary_sale,
            total_nfts,
            payment_info,
            data,
        ),
        ExecuteMsg::UpdateDenom {
            id,
            description,
            symbol,
        } => execute_update_denom(deps, info, id, description, symbol),
        ExecuteMsg::MintNft {
            denom_id,
            id,
            owner,
            royalties,
            transferable,
            metadata,
            data,
        } => execute_mint_nft(
            deps,
            env,
            info,
            denom_id,
            id,
            owner,
            royalties,
            transferable,
            metadata,
            data,
        ),
        ExecuteMsg::UpdateNft {
            denom_id,
            id,
            name,
            description,
            royalties,
        } => execute_update_nft(deps, info, denom_id, id, name, description, royalties),
        ExecuteMsg::TransferNft {
            denom_id,
            id,
            recipient,
        } => execute_transfer_nft(deps, info, denom_id, id, recipient),
        ExecuteMsg::SellNft {
            denom_id,
            id,
            price,
        } => execute_sell_nft(deps, info, denom_id, id, OrderPrice::Native(price)),
        ExecuteMsg::SellNftWithFiat {
            denom_id,
            id,
            currency,
            amount,
        } => execute_sell_nft(deps, info, denom_id, id, OrderPrice::Fiat { currency, amount }),
        ExecuteMsg::BuyNft { denom_id, id } => execute_buy_nft(deps, info, denom_id, id),
        ExecuteMsg::BuyNftWithFiat {
            denom_id,
            id,
            order_reference,
        } => execute_buy_nft_with_fiat(deps, info, denom_id, id, order_reference),
        ExecuteMsg::DeleteMarketplaceNft { denom_id, id } => {
            execute_delete_marketplace_nft(deps, info, denom_id, id)
        }
        ExecuteMsg::CreateCommunity {
            id,
            name,
            description,
            preview_uri,
            tags,
            data,
        } => execute_create_community(deps, info, id, name, description, preview_uri, tags, data),
        ExecuteMsg::JoinCommunity { community_id } => {
            execute_join_community(deps, info, community_id)
        }
        ExecuteMsg::UpdateCommunity {
            id,
            description,
            data,
            tags,
        } => execute_update_community(deps, info, id, description, data, tags),
    }
}

#[allow(clippy::too_many_arguments)]
fn execute_create_denom(
    deps: DepsMut,
    info: MessageInfo,
    id: String,
    name: String,
    symbol: String,
    description: String,
    preview_uri: String,
    community_id: String,
    dependent_denoms: Vec<String>,
    category: String,
    primary_sale: bool,
    total_nfts: u64,
    payment_info: Option<PaymentInfo>,
    data: String,
) -> Result<Response, ContractError> {
    let id = normalize_id(&id);
    validate_denom_id(&id)?;
    validate_denom_symbol(&symbol)?;
    validate_uri(&preview_uri)?;

    let community_id = community_id.trim().to_string();
    let community = COMMUNITIES
        .may_load(deps.storage, &community_id)?
        .ok_or_else(|| ContractError::CommunityNotFound {
            id: community_id.clone(),
        })?;
    if !authorized_community_member(deps.storage, &community, &info.sender)? {
        return Err(ContractError::Unauthorized {});
    }

    let dependent_denoms: Vec<String> = dependent_denoms
        .iter()
        .map(|d| normalize_id(d))
        .collect();
    for dependency in &dependent_denoms {
        if !DENOMS.has(deps.storage, dependency) {
            return Err(ContractError::UnknownCollection {
                id: dependency.clone(),
            });
        }
    }

    let config = CONFIG.load(deps.storage)?;
    if !config.denom_overwrite && DENOMS.has(deps.storage, &id) {
        return Err(ContractError::DenomAlreadyExists { id });
    }

    if primary_sale && total_nfts == 0 {
        return Err(ContractError::InvalidTotalNfts {});
    }

    let denom = Denom {
        id: id.clone(),
        name: name.trim().to_lowercase(),
        symbol: symbol.trim().to_string(),
        description,
        preview_uri,
        creator: info.sender.clone(),
        community_id,
        dependent_denoms,
        category,
        primary_sale,
        total_nfts,
        available_nfts: if primary_sale { total_nfts } else { 0 },
        data,
        payment_info: if primary_sale { payment_info } else { None },
    };
    DENOMS.save(deps.storage, &id, &denom)?;

    Ok(Response::new()
        .add_attribute("method", "create_denom")
        .add_attribute("denom_id", id)
        .add_attribute("creator", info.sender.to_string()))
}

fn execute_update_denom(
    deps: DepsMut,
    info: MessageInfo,
    id: String,
    description: String,
    symbol: String,
) -> Result<Response, ContractError> {
    let id = normalize_id(&id);
    let mut denom = DENOMS
        .may_load(deps.storage, &id)?
        .ok_or_else(|| ContractError::UnknownDenom { id: id.clone() })?;

    if denom.creator != info.sender {
        return Err(ContractError::Unauthorized {});
    }

    if description != DO_NOT_MODIFY {
        denom.description = description;
    }
    if symbol != DO_NOT_MODIFY {
        validate_denom_symbol(&symbol)?;
        denom.symbol = symbol.trim().to_string();
    }
    DENOMS.save(deps.storage, &id, &denom)?;

    Ok(Response::new()
        .add_attribute("method", "update_denom")
        .add_attribute("denom_id", id))
}

#[allow(clippy::too_many_arguments)]
fn execute_mint_nft(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    denom_id: String,
    id: String,
    owner: Option<String>,
    royalties: String,
    transferable: bool,
    metadata: Metadata,
    data: String,
) -> Result<Response, ContractError> {
    let denom_id = normalize_id(&denom_id);
    let mut denom = DENOMS
        .may_load(deps.storage, &denom_id)?
        .ok_or_else(|| ContractError::UnknownDenom {
            id: denom_id.clone(),
        })?;

    let id = normalize_id(&id);
    validate_token_id(&id)?;
    if NFTS.has(deps.storage, (&denom_id, &id)) {
        return Err(ContractError::NftAlreadyExists {
            id,
            denom_id,
        });
    }

    let royalties = parse_royalties(&royalties)?;
    validate_uri(&metadata.media_uri)?;
    validate_uri(&metadata.preview_uri)?;

    let owner = match owner {
        Some(addr) => deps.api.addr_validate(&addr)?,
        None => info.sender.clone(),
    };

    // Primary sale denoms are stock gated and open to anyone while supply
    // lasts; otherwise minting belongs to the denom creator alone.
    if denom.primary_sale {
        if denom.available_nfts == 0 {
            return Err(ContractError::NotEnoughNfts { denom_id });
        }
        denom.available_nfts -= 1;
        DENOMS.save(deps.storage, &denom_id, &denom)?;
    } else if denom.creator != info.sender {
        return Err(ContractError::Unauthorized {});
    }

    let nft = Nft {
        id: id.clone(),
        metadata,
        owner: owner.clone(),
        creator: info.sender.clone(),
        transferable,
        royalties,
        data,
        created_at: env.block.time,
        listed: false,
    };
    NFTS.save(deps.storage, (&denom_id, &id), &nft)?;
    OWNED_TOKENS.save(deps.storage, (&owner, &denom_id, &id), &true)?;
    increase_supply(deps.storage, &denom_id)?;

    Ok(Response::new()
        .add_attribute("method", "mint_nft")
        .add_attribute("denom_id", denom_id)
        .add_attribute("nft_id", id)
        .add_attribute("owner", owner.to_string()))
}

fn execute_update_nft(
    deps: DepsMut,
    info: MessageInfo,
    denom_id: String,
    id: String,
    name: String,
    description: String,
    royalties: String,
) -> Result<Response, ContractError> {
    let denom_id = normalize_id(&denom_id);
    let id = normalize_id(&id);
    let denom = DENOMS
        .may_load(deps.storage, &denom_id)?
        .ok_or_else(|| ContractError::UnknownDenom {
            id: denom_id.clone(),
        })?;

    // Token updates are frozen once minting is stock gated.
    if denom.primary_sale {
        return Err(ContractError::PrimarySaleUpdate { denom_id });
    }

    let mut nft = authorize(deps.storage, &denom_id, &id, &info.sender)?;

    if name != DO_NOT_MODIFY {
        nft.metadata.name = name;
    }
    if description != DO_NOT_MODIFY {
        nft.metadata.description = description;
    }
    if royalties != DO_NOT_MODIFY {
        nft.royalties = parse_royalties(&royalties)?;
    }
    NFTS.save(deps.storage, (&denom_id, &id), &nft)?;

    Ok(Response::new()
        .add_attribute("method", "update_nft")
        .add_attribute("denom_id", denom_id)
        .add_attribute("nft_id", id))
}

fn execute_transfer_nft(
    deps: DepsMut,
    info: MessageInfo,
    denom_id: String,
    id: String,
    recipient: String,
) -> Result<Response, ContractError> {
    let denom_id = normalize_id(&denom_id);
    let id = normalize_id(&id);
    if !DENOMS.has(deps.storage, &denom_id) {
        return Err(ContractError::UnknownDenom { id: denom_id });
    }

    let mut nft = authorize(deps.storage, &denom_id, &id, &info.sender)?;
    if !nft.transferable {
        return Err(ContractError::NotTransferable { id });
    }

    let recipient = deps.api.addr_validate(&recipient)?;

    nft.owner = recipient.clone();
    NFTS.save(deps.storage, (&denom_id, &id), &nft)?;
    swap_owner(deps.storage, &denom_id, &id, &info.sender, &recipient)?;

    Ok(Response::new()
        .add_attribute("method", "transfer_nft")
        .add_attribute("denom_id", denom_id)
        .add_attribute("nft_id", id)
        .add_attribute("sender", info.sender.to_string())
        .add_attribute("recipient", recipient.to_string()))
}

fn execute_sell_nft(
    deps: DepsMut,
    info: MessageInfo,
    denom_id: String,
    id: String,
    price: OrderPrice,
) -> Result<Response, ContractError> {
    let denom_id = normalize_id(&denom_id);
    let id = normalize_id(&id);
    if !DENOMS.has(deps.storage, &denom_id) {
        return Err(ContractError::UnknownDenom { id: denom_id });
    }
    if !NFTS.has(deps.storage, (&denom_id, &id)) {
        return Err(ContractError::UnknownNft { id, denom_id });
    }

    let mut nft = authorize(deps.storage, &denom_id, &id, &info.sender)?;
    if !nft.transferable {
        return Err(ContractError::NotTransferable { id });
    }

    nft.listed = true;
    NFTS.save(deps.storage, (&denom_id, &id), &nft)?;

    // The key is (denom, token), so re-listing an already listed token
    // replaces its order.
    let order = MarketplaceOrder {
        nft_id: id.clone(),
        denom_id: denom_id.clone(),
        price,
        seller: info.sender.clone(),
        buyer: None,
        filled: false,
        order_reference: None,
    };
    ORDERS.save(deps.storage, (&denom_id, &id), &order)?;

    Ok(Response::new()
        .add_attribute("method", "sell_nft")
        .add_attribute("denom_id", denom_id)
        .add_attribute("nft_id", id)
        .add_attribute("seller", info.sender.to_string()))
}

fn execute_buy_nft(
    deps: DepsMut,
    info: MessageInfo,
    denom_id: String,
    id: String,
) -> Result<Response, ContractError> {
    let denom_id = normalize_id(&denom_id);
    let id = normalize_id(&id);

    let mut order = ORDERS
        .may_load(deps.storage, (&denom_id, &id))?
        .ok_or_else(|| ContractError::UnknownOrder { id: id.clone() })?;
    if order.filled {
        return Err(ContractError::OrderFilled { id });
    }

    let price = match &order.price {
        OrderPrice::Native(coin) => coin.clone(),
        OrderPrice::Fiat { .. } => {
            return Err(ContractError::WrongSettlement {
                id,
                expected: "native coin".to_string(),
            })
        }
    };

    let sent = must_pay(&info, &price.denom)?;
    if sent < price.amount {
        return Err(ContractError::InsufficientFunds {
            sent: sent.to_string(),
            required: price.amount.to_string(),
            currency: price.denom.clone(),
        });
    }

    let mut nft = NFTS
        .may_load(deps.storage, (&denom_id, &id))?
        .ok_or_else(|| ContractError::UnknownNft {
            id: id.clone(),
            denom_id: denom_id.clone(),
        })?;

    // Royalty leg truncates toward zero; the remainder of the price goes
    // to the seller, so at most one minor unit moves from creator to
    // seller relative to exact arithmetic.
    let creator_amount = price.amount.mul_floor(nft.royalties);
    let seller_amount = price.amount - creator_amount;

    let mut messages: Vec<BankMsg> = vec![];
    if !creator_amount.is_zero() {
        messages.push(BankMsg::Send {
            to_address: nft.creator.to_string(),
            amount: vec![Coin {
                denom: price.denom.clone(),
                amount: creator_amount,
            }],
        });
    }
    if !seller_amount.is_zero() {
        messages.push(BankMsg::Send {
            to_address: nft.owner.to_string(),
            amount: vec![Coin {
                denom: price.denom.clone(),
                amount: seller_amount,
            }],
        });
    }

    // All checks and payment legs are in place; ownership and order
    // records change together from here on.
    let seller = nft.owner.clone();
    nft.owner = info.sender.clone();
    nft.listed = false;
    NFTS.save(deps.storage, (&denom_id, &id), &nft)?;

    order.buyer = Some(info.sender.clone());
    order.filled = true;
    ORDERS.save(deps.storage, (&denom_id, &id), &order)?;

    swap_owner(deps.storage, &denom_id, &id, &seller, &info.sender)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", "buy_nft")
        .add_attribute("denom_id", denom_id)
        .add_attribute("nft_id", id)
        .add_attribute("buyer", info.sender.to_string())
        .add_attribute("creator_amount", creator_amount.to_string())
        .add_attribute("seller_amount", seller_amount.to_string()))
}

fn execute_buy_nft_with_fiat(
    deps: DepsMut,
    info: MessageInfo,
    denom_id: String,
    id: String,
    order_reference: String,
) -> Result<Response, ContractError> {
    let denom_id = normalize_id(&denom_id);
    let id = normalize_id(&id);

    let mut order = ORDERS
        .may_load(deps.storage, (&denom_id, &id))?
        .ok_or_else(|| ContractError::UnknownOrder { id: id.clone() })?;
    if order.filled {
        return Err(ContractError::OrderFilled { id });
    }

    match &order.price {
        OrderPrice::Fiat { .. } => {}
        OrderPrice::Native(_) => {
            return Err(ContractError::WrongSettlement {
                id,
                expected: "fiat".to_string(),
            })
        }
    }

    let mut nft = NFTS
        .may_load(deps.storage, (&denom_id, &id))?
        .ok_or_else(|| ContractError::UnknownNft {
            id: id.clone(),
            denom_id: denom_id.clone(),
        })?;

    let seller = nft.owner.clone();
    nft.owner = info.sender.clone();
    nft.listed = false;
    NFTS.save(deps.storage, (&denom_id, &id), &nft)?;

    order.buyer = Some(info.sender.clone());
    order.filled = true;
    order.order_reference = Some(order_reference.clone());
    ORDERS.save(deps.storage, (&denom_id, &id), &order)?;

    swap_owner(deps.storage, &denom_id, &id, &seller, &info.sender)?;

    Ok(Response::new()
        .add_attribute("method", "buy_nft_with_fiat")
        .add_attribute("denom_id", denom_id)
        .add_attribute("nft_id", id)
        .add_attribute("buyer", info.sender.to_string())
        .add_attribute("order_reference", order_reference))
}

fn execute_delete_marketplace_nft(
    deps: DepsMut,
    info: MessageInfo,
    denom_id: String,
    id: String,
) -> Result<Response, ContractError> {
    let denom_id = normalize_id(&denom_id);
    let id = normalize_id(&id);

    let order = ORDERS
        .may_load(deps.storage, (&denom_id, &id))?
        .ok_or_else(|| ContractError::UnknownOrder { id: id.clone() })?;
    if order.filled {
        return Err(ContractError::OrderFilled { id });
    }

    let mut nft = NFTS
        .may_load(deps.storage, (&denom_id, &id))?
        .ok_or_else(|| ContractError::UnknownNft {
            id: id.clone(),
            denom_id: denom_id.clone(),
        })?;

    // Delisting belongs to the party that is both the current owner and
    // the recorded seller.
    if nft.owner != info.sender || order.seller != info.sender {
        return Err(ContractError::Unauthorized {});
    }

    ORDERS.remove(deps.storage, (&denom_id, &id));
    nft.listed = false;
    NFTS.save(deps.storage, (&denom_id, &id), &nft)?;

    Ok(Response::new()
        .add_attribute("method", "delete_marketplace_nft")
        .add_attribute("denom_id", denom_id)
        .add_attribute("nft_id", id))
}

#[allow(clippy::too_many_arguments)]
fn execute_create_community(
    deps: DepsMut,
    info: MessageInfo,
    id: String,
    name: String,
    description: String,
    preview_uri: String,
    tags: Vec<String>,
    data: String,
) -> Result<Response, ContractError> {
    let id = id.trim().to_string();
    if id.is_empty() {
        return Err(ContractError::InvalidCommunityId { id });
    }
    if COMMUNITIES.has(deps.storage, &id) {
        return Err(ContractError::CommunityAlreadyExists { id });
    }

    let community = Community {
        id: id.clone(),
        name,
        creator: info.sender.clone(),
        description,
        preview_uri,
        tags,
        data,
    };
    COMMUNITIES.save(deps.storage, &id, &community)?;

    Ok(Response::new()
        .add_attribute("method", "create_community")
        .add_attribute("community_id", id)
        .add_attribute("creator", info.sender.to_string()))
}

fn execute_join_community(
    deps: DepsMut,
    info: MessageInfo,
    community_id: String,
) -> Result<Response, ContractError> {
    let community_id = community_id.trim().to_string();
    if !COMMUNITIES.has(deps.storage, &community_id) {
        return Err(ContractError::CommunityNotFound { id: community_id });
    }

    let mut members = MEMBERS
        .may_load(deps.storage, &community_id)?
        .unwrap_or_else(|| CommunityMembers {
            community_id: community_id.clone(),
            addresses: vec![],
        });

    let candidate = info.sender.as_str().to_lowercase();
    if members
        .addresses
        .iter()
        .any(|a| a.as_str().to_lowercase() == candidate)
    {
        return Err(ContractError::MemberAlreadyExists {
            address: info.sender.to_string(),
            community_id,
        });
    }
    members.addresses.push(info.sender.clone());
    MEMBERS.save(deps.storage, &community_id, &members)?;

    Ok(Response::new()
        .add_attribute("method", "join_community")
        .add_attribute("community_id", community_id)
        .add_attribute("member", info.sender.to_string()))
}

fn execute_update_community(
    deps: DepsMut,
    info: MessageInfo,
    id: String,
    description: String,
    data: String,
    tags: Vec<String>,
) -> Result<Response, ContractError> {
    let id = id.trim().to_string();
    let mut community = COMMUNITIES
        .may_load(deps.storage, &id)?
        .ok_or_else(|| ContractError::CommunityNotFound { id: id.clone() })?;

    if community.creator != info.sender {
        return Err(ContractError::Unauthorized {});
    }

    community.description = description;
    community.data = data;
    community.tags = tags;
    COMMUNITIES.save(deps.storage, &id, &community)?;

    Ok(Response::new()
        .add_attribute("method", "update_community")
        .add_attribute("community_id", id))
}

/// Fetch a token and fail unless `owner` is its current owner. Every
/// owner-gated mutation goes through here.
fn authorize(
    storage: &dyn Storage,
    denom_id: &str,
    token_id: &str,
    owner: &Addr,
) -> Result<Nft, ContractError> {
    let nft = NFTS
        .may_load(storage, (denom_id, token_id))?
        .ok_or_else(|| ContractError::UnknownNft {
            id: token_id.to_string(),
            denom_id: denom_id.to_string(),
        })?;
    if nft.owner != *owner {
        return Err(ContractError::Unauthorized {});
    }
    Ok(nft)
}

/// A community's registered creator or any joined member may create
/// denoms under it.
fn authorized_community_member(
    storage: &dyn Storage,
    community: &Community,
    candidate: &Addr,
) -> Result<bool, ContractError> {
    if community.creator == *candidate {
        return Ok(true);
    }
    let members = MEMBERS.may_load(storage, &community.id)?;
    Ok(members
        .map(|m| m.addresses.iter().any(|a| a == candidate))
        .unwrap_or(false))
}

/// Move the owner-index entry for (denom, token) from `src` to `dst` in
/// the same handler invocation as the token record rewrite.
fn swap_owner(
    storage: &mut dyn Storage,
    denom_id: &str,
    token_id: &str,
    src: &Addr,
    dst: &Addr,
) -> Result<(), ContractError> {
    OWNED_TOKENS.remove(storage, (src, denom_id, token_id));
    OWNED_TOKENS.save(storage, (dst, denom_id, token_id), &true)?;
    Ok(())
}

fn increase_supply(storage: &mut dyn Storage, denom_id: &str) -> Result<(), ContractError> {
    let supply = SUPPLY.may_load(storage, denom_id)?.unwrap_or(0);
    SUPPLY.save(storage, denom_id, &(supply + 1))?;
    Ok(())
}
