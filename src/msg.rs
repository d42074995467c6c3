use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Coin, Uint128};

use crate::state::{Community, Config, Denom, MarketplaceOrder, Metadata, Nft, PaymentInfo};

#[cw_serde]
pub struct InstantiateMsg {
    /// Re-creating an existing denom id replaces it when true; rejected
    /// with an already-exists error when false.
    pub denom_overwrite: bool,
}

#[cw_serde]
pub enum ExecuteMsg {
    CreateDenom {
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
    },
    UpdateDenom {
        id: String,
        description: String,
        symbol: String,
    },
    MintNft {
        denom_id: String,
        id: String,
        /// Recipient of the minted token; defaults to the sender.
        owner: Option<String>,
        royalties: String,
        transferable: bool,
        metadata: Metadata,
        data: String,
    },
    UpdateNft {
        denom_id: String,
        id: String,
        name: String,
        description: String,
        royalties: String,
    },
    TransferNft {
        denom_id: String,
        id: String,
        recipient: String,
    },
    SellNft {
        denom_id: String,
        id: String,
        price: Coin,
    },
    SellNftWithFiat {
        denom_id: String,
        id: String,
        currency: String,
        amount: Uint128,
    },
    BuyNft {
        denom_id: String,
        id: String,
    },
    BuyNftWithFiat {
        denom_id: String,
        id: String,
        /// Reference id of the external payment that settled the order.
        order_reference: String,
    },
    DeleteMarketplaceNft {
        denom_id: String,
        id: String,
    },
    CreateCommunity {
        id: String,
        name: String,
        description: String,
        preview_uri: String,
        tags: Vec<String>,
        data: String,
    },
    JoinCommunity {
        community_id: String,
    },
    UpdateCommunity {
        id: String,
        description: String,
        data: String,
        tags: Vec<String>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    #[returns(DenomResponse)]
    Denom { id: String },
    #[returns(DenomsResponse)]
    Denoms {},
    #[returns(NftResponse)]
    Nft { denom_id: String, id: String },
    #[returns(NftsResponse)]
    CollectionNfts { denom_id: String },
    #[returns(NftsResponse)]
    AllNfts {},
    #[returns(OwnerNftsResponse)]
    OwnerNfts { owner: String },
    #[returns(SupplyResponse)]
    Supply { denom_id: String },
    #[returns(OrderResponse)]
    MarketplaceNft { denom_id: String, id: String },
    #[returns(OrdersResponse)]
    MarketplaceNfts { denom_id: String },
    #[returns(OrdersResponse)]
    AllOrders {},
    #[returns(CommunityResponse)]
    Community { id: String },
    #[returns(CommunitiesResponse)]
    Communities {},
    #[returns(CommunityMembersResponse)]
    CommunityMembers { community_id: String },
}

#[cw_serde]
pub struct DenomResponse {
    pub denom: Denom,
}

#[cw_serde]
pub struct DenomsResponse {
    pub denoms: Vec<Denom>,
}

#[cw_serde]
pub struct NftResponse {
    pub nft: Nft,
}

#[cw_serde]
pub struct NftsResponse {
    pub nfts: Vec<Nft>,
}

#[cw_serde]
pub struct OwnedToken {
    pub denom_id: String,
    pub nft_id: String,
}

#[cw_serde]
pub struct OwnerNftsResponse {
    pub owner: Addr,
    pub tokens: Vec<OwnedToken>,
}

#[cw_serde]
pub struct SupplyResponse {
    pub denom_id: String,
    pub supply: u64,
}

#[cw_serde]
pub struct OrderResponse {
    pub order: MarketplaceOrder,
}

#[cw_serde]
pub struct OrdersResponse {
    pub orders: Vec<MarketplaceOrder>,
}

#[cw_serde]
pub struct CommunityResponse {
    pub community: Community,
}

#[cw_serde]
pub struct CommunitiesResponse {
    pub communities: Vec<Community>,
}

#[cw_serde]
pub struct CommunityMembersResponse {
    pub community_id: String,
    pub addresses: Vec<Addr>,
}
