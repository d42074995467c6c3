use cosmwasm_std::{entry_point, to_json_binary, Binary, Deps, Env, Order, StdError, StdResult};

use crate::helpers::{normalize_id, MIN_COMMUNITY_ID_LEN};
use crate::msg::{
    CommunitiesResponse, CommunityMembersResponse, CommunityResponse, DenomResponse,
    DenomsResponse, NftResponse, NftsResponse, OrderResponse, OrdersResponse, OwnedToken,
    OwnerNftsResponse, QueryMsg, SupplyResponse,
};
use crate::state::{
    Community, Denom, MarketplaceOrder, Nft, COMMUNITIES, CONFIG, DENOMS, MEMBERS, NFTS, ORDERS,
    OWNED_TOKENS, SUPPLY,
};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::Denom { id } => to_json_binary(&query_denom(deps, id)?),
        QueryMsg::Denoms {} => to_json_binary(&query_denoms(deps)?),
        QueryMsg::Nft { denom_id, id } => to_json_binary(&query_nft(deps, denom_id, id)?),
        QueryMsg::CollectionNfts { denom_id } => {
            to_json_binary(&query_collection_nfts(deps, denom_id)?)
        }
        QueryMsg::AllNfts {} => to_json_binary(&query_all_nfts(deps)?),
        QueryMsg::OwnerNfts { owner } => to_json_binary(&query_owner_nfts(deps, owner)?),
        QueryMsg::Supply { denom_id } => to_json_binary(&query_supply(deps, denom_id)?),
        QueryMsg::MarketplaceNft { denom_id, id } => {
            to_json_binary(&query_marketplace_nft(deps, denom_id, id)?)
        }
        QueryMsg::MarketplaceNfts { denom_id } => {
            to_json_binary(&query_marketplace_nfts(deps, denom_id)?)
        }
        QueryMsg::AllOrders {} => to_json_binary(&query_all_orders(deps)?),
        QueryMsg::Community { id } => to_json_binary(&query_community(deps, id)?),
        QueryMsg::Communities {} => to_json_binary(&query_communities(deps)?),
        QueryMsg::CommunityMembers { community_id } => {
            to_json_binary(&query_community_members(deps, community_id)?)
        }
    }
}

fn query_denom(deps: Deps, id: String) -> StdResult<DenomResponse> {
    let id = normalize_id(&id);
    let denom = DENOMS.load(deps.storage, &id)?;
    Ok(DenomResponse { denom })
}

fn query_denoms(deps: Deps) -> StdResult<DenomsResponse> {
    let denoms = DENOMS
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, denom)| denom))
        .collect::<StdResult<Vec<Denom>>>()?;
    Ok(DenomsResponse { denoms })
}

fn query_nft(deps: Deps, denom_id: String, id: String) -> StdResult<NftResponse> {
    let denom_id = normalize_id(&denom_id);
    let id = normalize_id(&id);
    let nft = NFTS.load(deps.storage, (&denom_id, &id))?;
    Ok(NftResponse { nft })
}

fn query_collection_nfts(deps: Deps, denom_id: String) -> StdResult<NftsResponse> {
    let denom_id = normalize_id(&denom_id);
    let nfts = NFTS
        .prefix(&denom_id)
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, nft)| nft))
        .collect::<StdResult<Vec<Nft>>>()?;
    Ok(NftsResponse { nfts })
}

fn query_all_nfts(deps: Deps) -> StdResult<NftsResponse> {
    let nfts = NFTS
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, nft)| nft))
        .collect::<StdResult<Vec<Nft>>>()?;
    Ok(NftsResponse { nfts })
}

fn query_owner_nfts(deps: Deps, owner: String) -> StdResult<OwnerNftsResponse> {
    let owner = deps.api.addr_validate(&owner)?;
    let tokens = OWNED_TOKENS
        .sub_prefix(&owner)
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| {
            item.map(|((denom_id, nft_id), _)| OwnedToken { denom_id, nft_id })
        })
        .collect::<StdResult<Vec<OwnedToken>>>()?;
    Ok(OwnerNftsResponse { owner, tokens })
}

fn query_supply(deps: Deps, denom_id: String) -> StdResult<SupplyResponse> {
    let denom_id = normalize_id(&denom_id);
    let supply = SUPPLY.may_load(deps.storage, &denom_id)?.unwrap_or(0);
    Ok(SupplyResponse { denom_id, supply })
}

fn query_marketplace_nft(deps: Deps, denom_id: String, id: String) -> StdResult<OrderResponse> {
    let denom_id = normalize_id(&denom_id);
    let id = normalize_id(&id);
    let order = ORDERS.load(deps.storage, (&denom_id, &id))?;
    Ok(OrderResponse { order })
}

fn query_marketplace_nfts(deps: Deps, denom_id: String) -> StdResult<OrdersResponse> {
    let denom_id = normalize_id(&denom_id);
    let orders = ORDERS
        .prefix(&denom_id)
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, order)| order))
        .collect::<StdResult<Vec<MarketplaceOrder>>>()?;
    Ok(OrdersResponse { orders })
}

fn query_all_orders(deps: Deps) -> StdResult<OrdersResponse> {
    let orders = ORDERS
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, order)| order))
        .collect::<StdResult<Vec<MarketplaceOrder>>>()?;
    Ok(OrdersResponse { orders })
}

fn query_community(deps: Deps, id: String) -> StdResult<CommunityResponse> {
    let id = id.trim().to_string();
    if id.len() < MIN_COMMUNITY_ID_LEN {
        return Err(StdError::generic_err(format!(
            "invalid community id {}, minimum length {}",
            id, MIN_COMMUNITY_ID_LEN
        )));
    }
    let community = COMMUNITIES.load(deps.storage, &id)?;
    Ok(CommunityResponse { community })
}

fn query_communities(deps: Deps) -> StdResult<CommunitiesResponse> {
    let communities = COMMUNITIES
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, community)| community))
        .collect::<StdResult<Vec<Community>>>()?;
    Ok(CommunitiesResponse { communities })
}

fn query_community_members(deps: Deps, community_id: String) -> StdResult<CommunityMembersResponse> {
    let community_id = community_id.trim().to_string();
    if !COMMUNITIES.has(deps.storage, &community_id) {
        return Err(StdError::generic_err(format!(
            "community {} does not exist",
            community_id
        )));
    }
    let addresses = MEMBERS
        .may_load(deps.storage, &community_id)?
        .map(|m| m.addresses)
        .unwrap_or_default();
    Ok(CommunityMembersResponse {
        community_id,
        addresses,
    })
}
