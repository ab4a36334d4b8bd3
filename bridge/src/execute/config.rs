//! Configuration handlers.
//!
//! This module handles:
//! - Rate limits (set/remove)
//! - Large-withdrawal threshold and time lock
//! - Relayer management (add/remove)

use cosmwasm_std::{Addr, Binary, DepsMut, Env, MessageInfo, Response, Storage, Uint128};

use crate::auth::{ensure_capability, Capability};
use crate::error::ContractError;
use crate::events;
use crate::proof::SIGNER_LENGTH;
use crate::rate_limit;
use crate::state::{
    CONFIG, LARGE_WITHDRAWAL_THRESHOLDS, MAX_LARGE_WITHDRAWAL_DELAY, MIN_LARGE_WITHDRAWAL_DELAY,
    RELAYERS, RELAYER_COUNT, RELAYER_SIGNERS,
};

// ============================================================================
// Rate Limits
// ============================================================================

/// Configure an asset's rate limit. A zero `max_amount` disables it.
pub fn execute_set_rate_limit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset: String,
    max_amount: Uint128,
    period_seconds: u64,
) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    rate_limit::set_limit(deps.storage, &asset, max_amount, period_seconds, env.block.time)?;

    let event = if max_amount.is_zero() {
        events::rate_limit_removed(&asset)
    } else {
        events::rate_limit_configured(&asset, max_amount, period_seconds)
    };

    Ok(Response::new()
        .add_event(event)
        .add_attribute("method", "set_rate_limit")
        .add_attribute("asset", asset)
        .add_attribute("max_amount", max_amount)
        .add_attribute("period_seconds", period_seconds.to_string()))
}

pub fn execute_remove_rate_limit(
    deps: DepsMut,
    info: MessageInfo,
    asset: String,
) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    rate_limit::remove_limit(deps.storage, &asset);

    Ok(Response::new()
        .add_event(events::rate_limit_removed(&asset))
        .add_attribute("method", "remove_rate_limit")
        .add_attribute("asset", asset))
}

// ============================================================================
// Large Withdrawals
// ============================================================================

/// Set the amount above which withdrawals of `asset` are time-locked.
pub fn execute_set_large_withdrawal_threshold(
    deps: DepsMut,
    info: MessageInfo,
    asset: String,
    threshold: Uint128,
) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    if threshold.is_zero() {
        LARGE_WITHDRAWAL_THRESHOLDS.remove(deps.storage, &asset);
    } else {
        LARGE_WITHDRAWAL_THRESHOLDS.save(deps.storage, &asset, &threshold)?;
    }

    Ok(Response::new()
        .add_event(events::large_withdrawal_threshold_set(&asset, threshold))
        .add_attribute("method", "set_large_withdrawal_threshold")
        .add_attribute("asset", asset)
        .add_attribute("threshold", threshold))
}

/// Set the time lock for withdrawals queued from now on.
pub fn execute_set_large_withdrawal_delay(
    deps: DepsMut,
    info: MessageInfo,
    delay_seconds: u64,
) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    let mut config = CONFIG.load(deps.storage)?;

    validate_delay(delay_seconds)?;

    config.large_withdrawal_delay = delay_seconds;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_event(events::large_withdrawal_delay_set(delay_seconds))
        .add_attribute("method", "set_large_withdrawal_delay")
        .add_attribute("delay_seconds", delay_seconds.to_string()))
}

pub(crate) fn validate_delay(delay_seconds: u64) -> Result<(), ContractError> {
    if !(MIN_LARGE_WITHDRAWAL_DELAY..=MAX_LARGE_WITHDRAWAL_DELAY).contains(&delay_seconds) {
        return Err(ContractError::InvalidWithdrawalDelay {
            min: MIN_LARGE_WITHDRAWAL_DELAY,
            max: MAX_LARGE_WITHDRAWAL_DELAY,
        });
    }
    Ok(())
}

// ============================================================================
// Relayer Management
// ============================================================================

pub fn execute_add_relayer(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
    signer: Binary,
) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    let relayer = deps.api.addr_validate(&address)?;
    register_relayer(deps.storage, &relayer, &signer)?;

    let count = RELAYER_COUNT.load(deps.storage)?;
    RELAYER_COUNT.save(deps.storage, &(count + 1))?;

    Ok(Response::new()
        .add_event(events::relayer_added(&relayer, &signer))
        .add_attribute("method", "add_relayer")
        .add_attribute("relayer", relayer))
}

/// Remove a relayer. Its signing key stops verifying immediately.
pub fn execute_remove_relayer(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    let relayer = deps.api.addr_validate(&address)?;
    let signer = RELAYERS
        .may_load(deps.storage, &relayer)?
        .ok_or(ContractError::RelayerNotRegistered)?;

    let count = RELAYER_COUNT.load(deps.storage)?;
    if count <= 1 {
        return Err(ContractError::CannotRemoveLastRelayer);
    }

    RELAYERS.remove(deps.storage, &relayer);
    RELAYER_SIGNERS.remove(deps.storage, signer.as_slice());
    RELAYER_COUNT.save(deps.storage, &(count - 1))?;

    Ok(Response::new()
        .add_event(events::relayer_removed(&relayer))
        .add_attribute("method", "remove_relayer")
        .add_attribute("relayer", relayer))
}

/// Bind `relayer` to its proof signing key. Does not touch RELAYER_COUNT.
pub(crate) fn register_relayer(
    storage: &mut dyn Storage,
    relayer: &Addr,
    signer: &Binary,
) -> Result<(), ContractError> {
    if signer.len() != SIGNER_LENGTH {
        return Err(ContractError::InvalidSigner { got: signer.len() });
    }
    if RELAYERS.has(storage, relayer) {
        return Err(ContractError::RelayerAlreadyRegistered);
    }
    if let Some(bound) = RELAYER_SIGNERS.may_load(storage, signer.as_slice())? {
        return Err(ContractError::SignerAlreadyBound {
            relayer: bound.into_string(),
        });
    }

    RELAYERS.save(storage, relayer, signer)?;
    RELAYER_SIGNERS.save(storage, signer.as_slice(), relayer)?;
    Ok(())
}
