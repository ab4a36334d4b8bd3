//! Token registry handlers.
//!
//! The registry maps a source asset (bank denom or CW20 contract) to the
//! identifier of its mirror on the counterpart ledger.

use cosmwasm_std::{DepsMut, MessageInfo, Response};

use crate::auth::{ensure_capability, Capability};
use crate::error::ContractError;
use crate::events;
use crate::execute::locked_balance;
use crate::state::{AssetConfig, ASSETS};

/// Register an asset, or overwrite an existing mapping, and mark it active.
pub fn execute_register_asset(
    deps: DepsMut,
    info: MessageInfo,
    asset: String,
    counterpart_id: String,
    is_native: bool,
) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    validate_counterpart_id(&counterpart_id)?;

    let asset = if is_native {
        if asset.trim().is_empty() {
            return Err(ContractError::InvalidAddress {
                reason: "Native denom cannot be empty".to_string(),
            });
        }
        asset
    } else {
        deps.api
            .addr_validate(&asset)
            .map_err(|e| ContractError::InvalidAddress {
                reason: e.to_string(),
            })?
            .into_string()
    };

    // Flipping the kind of an asset that holds custody would make it
    // undeliverable
    if let Some(existing) = ASSETS.may_load(deps.storage, &asset)? {
        let locked = locked_balance(deps.storage, &asset)?;
        if existing.is_native != is_native && !locked.is_zero() {
            return Err(ContractError::AssetHasLockedBalance { asset, locked });
        }
    }

    ASSETS.save(
        deps.storage,
        &asset,
        &AssetConfig {
            asset: asset.clone(),
            counterpart_id: counterpart_id.clone(),
            is_native,
            active: true,
        },
    )?;

    Ok(Response::new()
        .add_event(events::asset_registered(&asset, &counterpart_id, is_native))
        .add_attribute("method", "register_asset")
        .add_attribute("asset", asset)
        .add_attribute("counterpart_id", counterpart_id)
        .add_attribute("is_native", is_native.to_string()))
}

/// Remove an asset mapping. Refused while the bridge still holds custody.
pub fn execute_deregister_asset(
    deps: DepsMut,
    info: MessageInfo,
    asset: String,
) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    if !ASSETS.has(deps.storage, &asset) {
        return Err(ContractError::AssetNotRegistered { asset });
    }

    let locked = locked_balance(deps.storage, &asset)?;
    if !locked.is_zero() {
        return Err(ContractError::AssetHasLockedBalance { asset, locked });
    }

    ASSETS.remove(deps.storage, &asset);

    Ok(Response::new()
        .add_event(events::asset_deregistered(&asset))
        .add_attribute("method", "deregister_asset")
        .add_attribute("asset", asset))
}

/// Update the counterpart identifier or the active flag of an asset.
pub fn execute_update_asset(
    deps: DepsMut,
    info: MessageInfo,
    asset: String,
    counterpart_id: Option<String>,
    active: Option<bool>,
) -> Result<Response, ContractError> {
    ensure_capability(deps.storage, &info.sender, Capability::Admin)?;

    let mut asset_config = ASSETS
        .may_load(deps.storage, &asset)?
        .ok_or_else(|| ContractError::AssetNotRegistered {
            asset: asset.clone(),
        })?;

    if let Some(counterpart_id) = counterpart_id {
        validate_counterpart_id(&counterpart_id)?;
        asset_config.counterpart_id = counterpart_id;
    }
    if let Some(active) = active {
        asset_config.active = active;
    }

    ASSETS.save(deps.storage, &asset, &asset_config)?;

    Ok(Response::new()
        .add_event(events::asset_updated(
            &asset,
            &asset_config.counterpart_id,
            asset_config.active,
        ))
        .add_attribute("method", "update_asset")
        .add_attribute("asset", asset)
        .add_attribute("active", asset_config.active.to_string()))
}

fn validate_counterpart_id(counterpart_id: &str) -> Result<(), ContractError> {
    if counterpart_id.trim().is_empty() {
        return Err(ContractError::InvalidCounterpartId {
            reason: "Counterpart identifier cannot be empty".to_string(),
        });
    }
    Ok(())
}
