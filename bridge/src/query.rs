//! Query handlers for the custody bridge contract.
//!
//! Every query is read-only; the rate limit query previews a lazy window
//! reset at the current block without writing it.

use cosmwasm_std::{Binary, Deps, Env, Order, StdError, StdResult, Uint128};
use cw_storage_plus::Bound;

use crate::execute;
use crate::hash::compute_withdrawal_digest;
use crate::msg::{
    AccountSequenceResponse, AssetResponse, AssetsResponse, ConfigResponse,
    CounterpartIdResponse, DepositResponse, IsRegisteredResponse, IsRelayerResponse,
    LargeWithdrawalResponse, LargeWithdrawalsResponse, LockedBalanceResponse,
    PendingAdminResponse, RateLimitResponse, RelayerInfo, RelayersResponse, StatsResponse,
    WithdrawalDigestResponse, WithdrawalStateResponse, WithdrawalStatus,
    WithdrawalThresholdResponse,
};
use crate::rate_limit;
use crate::state::{
    AssetConfig, QueuedWithdrawal, WithdrawalState, ACCOUNT_SEQUENCES, ASSETS, CONFIG, DEPOSITS,
    LARGE_WITHDRAWAL_THRESHOLDS, LOCKED_BALANCES, PENDING_ADMIN, QUEUED_WITHDRAWALS, RELAYERS,
    STATS, WITHDRAWALS,
};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 50;

// ============================================================================
// Core Queries
// ============================================================================

/// Query contract configuration.
pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        paused: config.paused,
        large_withdrawal_delay: config.large_withdrawal_delay,
    })
}

pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.may_load(deps.storage)?.unwrap_or_default();
    Ok(StatsResponse {
        total_deposits: stats.total_deposits,
        total_immediate_withdrawals: stats.total_immediate_withdrawals,
        total_queued_withdrawals: stats.total_queued_withdrawals,
        total_executed_withdrawals: stats.total_executed_withdrawals,
        total_cancelled_withdrawals: stats.total_cancelled_withdrawals,
        total_emergency_releases: stats.total_emergency_releases,
    })
}

pub fn query_pending_admin(deps: Deps) -> StdResult<Option<PendingAdminResponse>> {
    Ok(PENDING_ADMIN
        .may_load(deps.storage)?
        .map(|pending| PendingAdminResponse {
            new_address: pending.new_address,
            execute_after: pending.execute_after,
        }))
}

// ============================================================================
// Token Registry Queries
// ============================================================================

fn asset_response(config: AssetConfig) -> AssetResponse {
    AssetResponse {
        asset: config.asset,
        counterpart_id: config.counterpart_id,
        is_native: config.is_native,
        active: config.active,
    }
}

pub fn query_asset(deps: Deps, asset: String) -> StdResult<AssetResponse> {
    ASSETS
        .may_load(deps.storage, &asset)?
        .map(asset_response)
        .ok_or_else(|| StdError::not_found(format!("asset {}", asset)))
}

pub fn query_assets(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<AssetsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let assets = ASSETS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, config)| asset_response(config)))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(AssetsResponse { assets })
}

pub fn query_is_registered(deps: Deps, asset: String) -> StdResult<IsRegisteredResponse> {
    Ok(IsRegisteredResponse {
        registered: ASSETS.has(deps.storage, &asset),
    })
}

pub fn query_counterpart_id(deps: Deps, asset: String) -> StdResult<CounterpartIdResponse> {
    Ok(CounterpartIdResponse {
        counterpart_id: ASSETS
            .may_load(deps.storage, &asset)?
            .map(|config| config.counterpart_id),
    })
}

// ============================================================================
// Deposit Ledger Queries
// ============================================================================

pub fn query_locked_balance(deps: Deps, asset: String) -> StdResult<LockedBalanceResponse> {
    let locked = LOCKED_BALANCES
        .may_load(deps.storage, &asset)?
        .unwrap_or_default();
    Ok(LockedBalanceResponse { asset, locked })
}

pub fn query_account_sequence(deps: Deps, account: String) -> StdResult<AccountSequenceResponse> {
    let account = deps.api.addr_validate(&account)?;
    let sequence = ACCOUNT_SEQUENCES
        .may_load(deps.storage, &account)?
        .unwrap_or_default();
    Ok(AccountSequenceResponse { account, sequence })
}

pub fn query_deposit(
    deps: Deps,
    account: String,
    sequence: u64,
) -> StdResult<Option<DepositResponse>> {
    let account = deps.api.addr_validate(&account)?;
    Ok(DEPOSITS
        .may_load(deps.storage, (&account, sequence))?
        .map(|record| DepositResponse {
            account,
            sequence,
            asset: record.asset,
            amount: record.amount,
            destination_fingerprint: record.destination_fingerprint,
            deposited_at: record.deposited_at,
        }))
}

// ============================================================================
// Withdrawal Queries
// ============================================================================

fn parse_withdrawal_id(withdrawal_id: &Binary) -> StdResult<[u8; 32]> {
    execute::parse_withdrawal_id(withdrawal_id).map_err(|e| StdError::generic_err(e.to_string()))
}

fn large_withdrawal_response(
    env: &Env,
    withdrawal_id: Binary,
    queued: QueuedWithdrawal,
) -> LargeWithdrawalResponse {
    LargeWithdrawalResponse {
        withdrawal_id,
        remaining_seconds: queued
            .execute_after
            .seconds()
            .saturating_sub(env.block.time.seconds()),
        asset: queued.asset,
        amount: queued.amount,
        recipient: queued.recipient,
        execute_after: queued.execute_after,
    }
}

pub fn query_withdrawal_state(
    deps: Deps,
    env: Env,
    withdrawal_id: Binary,
) -> StdResult<WithdrawalStateResponse> {
    let id = parse_withdrawal_id(&withdrawal_id)?;

    let (status, queued) = match WITHDRAWALS.may_load(deps.storage, &id)? {
        None => (WithdrawalStatus::Unseen, None),
        Some(WithdrawalState::Processed) => (WithdrawalStatus::Processed, None),
        Some(WithdrawalState::Cancelled) => (WithdrawalStatus::Cancelled, None),
        Some(WithdrawalState::Queued(queued)) => (
            WithdrawalStatus::Queued,
            Some(large_withdrawal_response(
                &env,
                withdrawal_id.clone(),
                queued,
            )),
        ),
    };

    Ok(WithdrawalStateResponse {
        withdrawal_id,
        status,
        queued,
    })
}

/// Queued large withdrawals, read from the queue index only.
pub fn query_large_withdrawals(
    deps: Deps,
    env: Env,
    start_after: Option<Binary>,
    limit: Option<u32>,
) -> StdResult<LargeWithdrawalsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_ref().map(|b| Bound::exclusive(b.as_slice()));

    let withdrawals = QUEUED_WITHDRAWALS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            item.map(|(id, queued)| large_withdrawal_response(&env, Binary::from(id), queued))
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(LargeWithdrawalsResponse { withdrawals })
}

pub fn query_withdrawal_threshold(
    deps: Deps,
    asset: String,
) -> StdResult<WithdrawalThresholdResponse> {
    let threshold = LARGE_WITHDRAWAL_THRESHOLDS
        .may_load(deps.storage, &asset)?
        .unwrap_or_default();
    Ok(WithdrawalThresholdResponse { asset, threshold })
}

/// Digest a relayer must sign for this withdrawal on this chain and instance.
pub fn query_withdrawal_digest(
    deps: Deps,
    env: Env,
    asset: String,
    amount: Uint128,
    recipient: String,
    withdrawal_id: Binary,
) -> StdResult<WithdrawalDigestResponse> {
    let recipient = deps.api.addr_validate(&recipient)?;
    let id = parse_withdrawal_id(&withdrawal_id)?;

    let digest = compute_withdrawal_digest(
        &asset,
        amount.u128(),
        recipient.as_str(),
        &id,
        &env.block.chain_id,
        env.contract.address.as_str(),
    );

    Ok(WithdrawalDigestResponse {
        digest: Binary::from(digest.to_vec()),
    })
}

// ============================================================================
// Limits & Relayers
// ============================================================================

pub fn query_rate_limit(
    deps: Deps,
    env: Env,
    asset: String,
) -> StdResult<Option<RateLimitResponse>> {
    Ok(
        rate_limit::preview(deps.storage, &asset, env.block.time)?.map(|status| {
            RateLimitResponse {
                asset,
                max_amount: status.window.max_amount,
                period_seconds: status.window.period_seconds,
                window_start: status.window.window_start,
                used: status.window.used,
                available: status.available,
            }
        }),
    )
}

pub fn query_relayers(deps: Deps) -> StdResult<RelayersResponse> {
    let relayers = RELAYERS
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| item.map(|(address, signer)| RelayerInfo { address, signer }))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(RelayersResponse { relayers })
}

pub fn query_is_relayer(deps: Deps, address: String) -> StdResult<IsRelayerResponse> {
    let address = deps.api.addr_validate(&address)?;
    Ok(IsRelayerResponse {
        is_relayer: RELAYERS.has(deps.storage, &address),
    })
}
