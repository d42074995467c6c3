use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Payment(#[from] cw_utils::PaymentError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Invalid denom id {id}: {reason}")]
    InvalidDenomId { id: String, reason: String },

    #[error("Invalid denom symbol {symbol}")]
    InvalidDenomSymbol { symbol: String },

    #[error("Denom {id} already exists")]
    DenomAlreadyExists { id: String },

    #[error("Denom {id} does not exist")]
    UnknownDenom { id: String },

    #[error("Dependent collection {id} does not exist")]
    UnknownCollection { id: String },

    #[error("Total nfts must be positive for a primary sale denom")]
    InvalidTotalNfts {},

    #[error("Not enough NFTs to mint in denom {denom_id}")]
    NotEnoughNfts { denom_id: String },

    #[error("Invalid token id {id}: {reason}")]
    InvalidTokenId { id: String, reason: String },

    #[error("Invalid token URI: exceeds {max} bytes")]
    InvalidTokenUri { max: usize },

    #[error("NFT {id} already exists in collection {denom_id}")]
    NftAlreadyExists { id: String, denom_id: String },

    #[error("NFT {id} does not exist in collection {denom_id}")]
    UnknownNft { id: String, denom_id: String },

    #[error("Invalid royalties {royalties}: must be a decimal in [0, 1]")]
    InvalidRoyalties { royalties: String },

    #[error("NFT {id} is not transferable")]
    NotTransferable { id: String },

    #[error("Updates are not allowed on primary sale denom {denom_id}")]
    PrimarySaleUpdate { denom_id: String },

    #[error("NFT {id} is not listed in the market place")]
    UnknownOrder { id: String },

    #[error("Order for NFT {id} is already filled")]
    OrderFilled { id: String },

    #[error("Order for NFT {id} is not payable in {expected}")]
    WrongSettlement { id: String, expected: String },

    #[error("Insufficient funds: sent {sent}, order price {required} {currency}")]
    InsufficientFunds {
        sent: String,
        required: String,
        currency: String,
    },

    #[error("Community {id} does not exist")]
    CommunityNotFound { id: String },

    #[error("Community {id} already exists")]
    CommunityAlreadyExists { id: String },

    #[error("Invalid community id {id}")]
    InvalidCommunityId { id: String },

    #[error("Address {address} is already a member of community {community_id}")]
    MemberAlreadyExists { address: String, community_id: String },
}
