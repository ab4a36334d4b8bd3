//! Admin operations handlers.
//!
//! This module handles:
//! - Pause/unpause contract
//! - Emergency release of custody
//! - Admin transfer (propose/accept/cancel)

use cosmwasm_std::{DepsMut, Env, MessageInfo, Response, Uint128};

use crate::auth::{ensure_capability, Capability};
use crate::error::ContractError;
use crate::events;
use crate::execute::release_custody;
use crate::state::{PendingAdmin, ADMIN_TIMELOCK_DURATION, ASSETS, CONFIG, PENDING_ADMIN, STATS};

// ============================================================================
// Pause/Unpause
// ============================================================================

/// Pause the contract (stops deposits and withdrawals).
pub fn execute_pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    let mut config = CONFIG.load(deps.storage)?;

    config.paused = true;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_event(events::paused(&info.sender))
        .add_attribute("method", "pause"))
}

/// Unpause the contract (resumes deposits and withdrawals).
pub fn execute_unpause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    let mut config = CONFIG.load(deps.storage)?;

    config.paused = false;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_event(events::unpaused(&info.sender))
        .add_attribute("method", "unpause"))
}

// ============================================================================
// Emergency Release
// ============================================================================

/// Release custody without a proof.
///
/// Bypasses replay protection, rate limiting and the pause switch, but never
/// releases more than the bridge holds for the asset, and keeps
/// LOCKED_BALANCES in step with what leaves.
pub fn execute_emergency_release(
    deps: DepsMut,
    info: MessageInfo,
    asset: String,
    amount: Uint128,
    recipient: String,
) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Release amount must be greater than zero".to_string(),
        });
    }

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

    let remaining = release_custody(deps.storage, &asset, amount)?;

    STATS.update(deps.storage, |mut stats| -> Result<_, ContractError> {
        stats.total_emergency_releases += 1;
        Ok(stats)
    })?;

    let transfer = asset_config
        .asset_info()
        .transfer_msg(&recipient_addr, amount)?;

    Ok(Response::new()
        .add_message(transfer)
        .add_event(events::emergency_release(&asset, amount, &recipient_addr))
        .add_attribute("method", "emergency_release")
        .add_attribute("asset", asset)
        .add_attribute("amount", amount)
        .add_attribute("recipient", recipient_addr)
        .add_attribute("locked_balance", remaining))
}

// ============================================================================
// Admin Transfer
// ============================================================================

/// Propose a new admin (starts timelock).
pub fn execute_propose_admin(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    new_admin: String,
) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    let new_admin_addr = deps.api.addr_validate(&new_admin)?;
    let pending = PendingAdmin {
        new_address: new_admin_addr.clone(),
        execute_after: env.block.time.plus_seconds(ADMIN_TIMELOCK_DURATION),
    };
    PENDING_ADMIN.save(deps.storage, &pending)?;

    Ok(Response::new()
        .add_attribute("method", "propose_admin")
        .add_attribute("new_admin", new_admin_addr)
        .add_attribute("execute_after", pending.execute_after.seconds().to_string()))
}

/// Accept pending admin role (after timelock).
pub fn execute_accept_admin(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let pending = PENDING_ADMIN
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingAdmin)?;

    if info.sender != pending.new_address {
        return Err(ContractError::UnauthorizedPendingAdmin);
    }

    if env.block.time < pending.execute_after {
        return Err(ContractError::TimelockNotExpired {
            remaining_seconds: pending.execute_after.seconds() - env.block.time.seconds(),
        });
    }

    CONFIG.update(deps.storage, |mut config| -> Result<_, ContractError> {
        config.admin = pending.new_address.clone();
        Ok(config)
    })?;
    PENDING_ADMIN.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("method", "accept_admin")
        .add_attribute("new_admin", pending.new_address))
}

/// Cancel pending admin proposal.
pub fn execute_cancel_admin_proposal(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    if !PENDING_ADMIN.exists(deps.storage) {
        return Err(ContractError::NoPendingAdmin);
    }
    PENDING_ADMIN.remove(deps.storage);

    Ok(Response::new().add_attribute("method", "cancel_admin_proposal"))
}
