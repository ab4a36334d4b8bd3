//! Withdrawal handlers: proof-backed release and the large-withdrawal queue.
//!
//! Withdraw (Relayer) checks replay, proof, rate limit and liquidity, then
//! either releases immediately or parks the withdrawal behind the time lock.
//! ExecuteLargeWithdrawal (Relayer) delivers a matured entry using only its
//! stored parameters; CancelLargeWithdrawal (Admin) retires it for good.

use cosmwasm_std::{Binary, DepsMut, Env, MessageInfo, Response, Storage, Uint128};

use crate::auth::{ensure_capability, Capability};
use crate::error::ContractError;
use crate::events;
use crate::execute::{load_unpaused_config, locked_balance, parse_withdrawal_id, release_custody};
use crate::hash::{bytes32_to_hex, compute_withdrawal_digest};
use crate::proof::verify_withdrawal_proof;
use crate::rate_limit;
use crate::state::{
    QueuedWithdrawal, WithdrawalState, ASSETS, LARGE_WITHDRAWAL_THRESHOLDS, QUEUED_WITHDRAWALS,
    STATS, WITHDRAWALS,
};

// ============================================================================
// Withdraw (Relayer)
// ============================================================================

/// Release custody against a relayer proof, or queue it if above threshold.
#[allow(clippy::too_many_arguments)]
pub fn execute_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset: String,
    amount: Uint128,
    recipient: String,
    withdrawal_id: Binary,
    proof: Binary,
) -> Result<Response, ContractError> {
    let config = load_unpaused_config(deps.storage)?;
    ensure_capability(deps.storage, &info.sender, Capability::Relayer)?;

    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Withdrawal amount must be greater than zero".to_string(),
        });
    }

    // Inactive assets may still be withdrawn
    let asset_config = ASSETS
        .may_load(deps.storage, &asset)?
        .ok_or_else(|| ContractError::AssetNotRegistered {
            asset: asset.clone(),
        })?;

    let recipient_addr =
        deps.api
            .addr_validate(&recipient)
            .map_err(|e| ContractError::InvalidAddress {
                reason: e.to_string(),
            })?;

    let id = parse_withdrawal_id(&withdrawal_id)?;

    // Replay before proof, so a resubmission reports the replay
    ensure_unseen(deps.storage, &id)?;

    let digest = compute_withdrawal_digest(
        &asset,
        amount.u128(),
        recipient_addr.as_str(),
        &id,
        &env.block.chain_id,
        env.contract.address.as_str(),
    );
    let attested_by = verify_withdrawal_proof(deps.api, deps.storage, &digest, &proof)?;

    rate_limit::check_and_consume(deps.storage, &asset, amount, env.block.time)?;

    let locked = locked_balance(deps.storage, &asset)?;
    if locked < amount {
        return Err(ContractError::InsufficientLiquidity {
            locked,
            requested: amount,
        });
    }

    let threshold = LARGE_WITHDRAWAL_THRESHOLDS
        .may_load(deps.storage, &asset)?
        .unwrap_or_default();

    if threshold.is_zero() || amount <= threshold {
        // Immediate release
        let remaining = release_custody(deps.storage, &asset, amount)?;
        WITHDRAWALS.save(deps.storage, &id, &WithdrawalState::Processed)?;

        STATS.update(deps.storage, |mut stats| -> Result<_, ContractError> {
            stats.total_immediate_withdrawals += 1;
            Ok(stats)
        })?;

        let transfer = asset_config.asset_info().transfer_msg(&recipient_addr, amount)?;

        return Ok(Response::new()
            .add_message(transfer)
            .add_event(events::withdrawal_processed(&id, true))
            .add_attribute("method", "withdraw")
            .add_attribute("withdrawal_id", bytes32_to_hex(&id))
            .add_attribute("asset", asset)
            .add_attribute("amount", amount)
            .add_attribute("recipient", recipient_addr)
            .add_attribute("relayer", attested_by)
            .add_attribute("locked_balance", remaining));
    }

    // Large withdrawal: park it, custody is untouched until execution
    let execute_after = env.block.time.plus_seconds(config.large_withdrawal_delay);
    let queued = QueuedWithdrawal {
        asset: asset_config.asset_info(),
        amount,
        recipient: recipient_addr.clone(),
        execute_after,
    };
    WITHDRAWALS.save(deps.storage, &id, &WithdrawalState::Queued(queued.clone()))?;
    QUEUED_WITHDRAWALS.save(deps.storage, &id, &queued)?;

    STATS.update(deps.storage, |mut stats| -> Result<_, ContractError> {
        stats.total_queued_withdrawals += 1;
        Ok(stats)
    })?;

    Ok(Response::new()
        .add_event(events::large_withdrawal_queued(
            &id,
            &asset,
            amount,
            execute_after,
        ))
        .add_attribute("method", "withdraw_queued")
        .add_attribute("withdrawal_id", bytes32_to_hex(&id))
        .add_attribute("asset", asset)
        .add_attribute("amount", amount)
        .add_attribute("recipient", recipient_addr)
        .add_attribute("relayer", attested_by)
        .add_attribute("execute_after", execute_after.seconds().to_string()))
}

// ============================================================================
// ExecuteLargeWithdrawal (Relayer, after time lock)
// ============================================================================

/// Deliver a queued withdrawal whose time lock has elapsed.
pub fn execute_large_withdrawal(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    withdrawal_id: Binary,
) -> Result<Response, ContractError> {
    load_unpaused_config(deps.storage)?;
    ensure_capability(deps.storage, &info.sender, Capability::Relayer)?;

    let id = parse_withdrawal_id(&withdrawal_id)?;
    let queued = load_queued(deps.storage, &id)?;

    let now = env.block.time.seconds();
    let ready_at = queued.execute_after.seconds();
    if now < ready_at {
        return Err(ContractError::StillTimeLocked {
            remaining_seconds: ready_at - now,
        });
    }

    let asset_key = queued.asset.key();
    let remaining = release_custody(deps.storage, &asset_key, queued.amount)?;
    WITHDRAWALS.save(deps.storage, &id, &WithdrawalState::Processed)?;
    QUEUED_WITHDRAWALS.remove(deps.storage, &id);

    STATS.update(deps.storage, |mut stats| -> Result<_, ContractError> {
        stats.total_executed_withdrawals += 1;
        Ok(stats)
    })?;

    let transfer = queued.asset.transfer_msg(&queued.recipient, queued.amount)?;

    Ok(Response::new()
        .add_message(transfer)
        .add_event(events::withdrawal_processed(&id, true))
        .add_attribute("method", "execute_large_withdrawal")
        .add_attribute("withdrawal_id", bytes32_to_hex(&id))
        .add_attribute("asset", asset_key)
        .add_attribute("amount", queued.amount)
        .add_attribute("recipient", queued.recipient)
        .add_attribute("locked_balance", remaining))
}

// ============================================================================
// CancelLargeWithdrawal (Admin, allowed while paused)
// ============================================================================

/// Cancel a queued withdrawal. The identifier can never be used again.
pub fn execute_cancel_large_withdrawal(
    deps: DepsMut,
    info: MessageInfo,
    withdrawal_id: Binary,
) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    let id = parse_withdrawal_id(&withdrawal_id)?;
    let queued = load_queued(deps.storage, &id)?;

    WITHDRAWALS.save(deps.storage, &id, &WithdrawalState::Cancelled)?;
    QUEUED_WITHDRAWALS.remove(deps.storage, &id);

    STATS.update(deps.storage, |mut stats| -> Result<_, ContractError> {
        stats.total_cancelled_withdrawals += 1;
        Ok(stats)
    })?;

    Ok(Response::new()
        .add_event(events::large_withdrawal_cancelled(&id))
        .add_attribute("method", "cancel_large_withdrawal")
        .add_attribute("withdrawal_id", bytes32_to_hex(&id))
        .add_attribute("asset", queued.asset.key())
        .add_attribute("amount", queued.amount)
        .add_attribute("cancelled_by", info.sender))
}

// ============================================================================
// Internal Helpers
// ============================================================================

fn ensure_unseen(storage: &dyn Storage, id: &[u8; 32]) -> Result<(), ContractError> {
    match WITHDRAWALS.may_load(storage, id)? {
        None => Ok(()),
        Some(WithdrawalState::Processed) => Err(ContractError::WithdrawalAlreadyProcessed),
        Some(WithdrawalState::Queued(_)) => Err(ContractError::WithdrawalAlreadyQueued),
        Some(WithdrawalState::Cancelled) => Err(ContractError::WithdrawalCancelled),
    }
}

fn load_queued(storage: &dyn Storage, id: &[u8; 32]) -> Result<QueuedWithdrawal, ContractError> {
    match WITHDRAWALS.may_load(storage, id)? {
        Some(WithdrawalState::Queued(queued)) => Ok(queued),
        Some(WithdrawalState::Processed) => Err(ContractError::WithdrawalAlreadyProcessed),
        Some(WithdrawalState::Cancelled) => Err(ContractError::WithdrawalCancelled),
        None => Err(ContractError::WithdrawalNotQueued),
    }
}
