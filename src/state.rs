use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Coin, Decimal, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    /// When true, re-creating an existing denom id silently replaces it
    /// instead of being rejected.
    pub denom_overwrite: bool,
}

pub const CONFIG: Item<Config> = Item::new("config");

#[cw_serde]
pub struct PaymentInfo {
    pub access_type: String,
    pub amount: Uint128,
    pub currency: String,
}

/// A named collection grouping NFTs under one creator and community.
#[cw_serde]
pub struct Denom {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub preview_uri: String,
    pub creator: Addr,
    pub community_id: String,
    pub dependent_denoms: Vec<String>,
    pub category: String,
    /// Stock-gated minting: anyone may mint while `available_nfts > 0`.
    pub primary_sale: bool,
    pub total_nfts: u64,
    pub available_nfts: u64,
    pub data: String,
    pub payment_info: Option<PaymentInfo>,
}

#[cw_serde]
pub struct Metadata {
    pub name: String,
    pub description: String,
    pub media_uri: String,
    pub preview_uri: String,
}

#[cw_serde]
pub struct Nft {
    pub id: String,
    pub metadata: Metadata,
    pub owner: Addr,
    pub creator: Addr,
    pub transferable: bool,
    /// Fraction of every sale paid to the creator, in [0, 1].
    pub royalties: Decimal,
    pub data: String,
    pub created_at: Timestamp,
    pub listed: bool,
}

/// Listing price: either an on-chain coin or an amount settled off-chain
/// in a fiat currency.
#[cw_serde]
pub enum OrderPrice {
    Native(Coin),
    Fiat { currency: String, amount: Uint128 },
}

#[cw_serde]
pub struct MarketplaceOrder {
    pub nft_id: String,
    pub denom_id: String,
    pub price: OrderPrice,
    pub seller: Addr,
    pub buyer: Option<Addr>,
    pub filled: bool,
    /// External payment reference recorded by fiat settlement.
    pub order_reference: Option<String>,
}

#[cw_serde]
pub struct Community {
    pub id: String,
    pub name: String,
    pub creator: Addr,
    pub description: String,
    pub preview_uri: String,
    pub tags: Vec<String>,
    pub data: String,
}

#[cw_serde]
pub struct CommunityMembers {
    pub community_id: String,
    /// Insertion order preserved, duplicates rejected case-insensitively.
    pub addresses: Vec<Addr>,
}

pub const DENOMS: Map<&str, Denom> = Map::new("denoms");

/// NFTs keyed by (denom id, token id).
pub const NFTS: Map<(&str, &str), Nft> = Map::new("nfts");

/// Reverse index from an owner to every (denom id, token id) it holds.
/// Must agree with `Nft.owner` at all times; every ownership change
/// rewrites the token record and this index in the same handler.
pub const OWNED_TOKENS: Map<(&Addr, &str, &str), bool> = Map::new("owned_tokens");

/// Minted-token counter per denom.
pub const SUPPLY: Map<&str, u64> = Map::new("supply");

/// Open and filled orders keyed by (denom id, token id); at most one
/// listing per token at a time.
pub const ORDERS: Map<(&str, &str), MarketplaceOrder> = Map::new("orders");

pub const COMMUNITIES: Map<&str, Community> = Map::new("communities");

pub const MEMBERS: Map<&str, CommunityMembers> = Map::new("members");
