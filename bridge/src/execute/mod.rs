//! Execute handlers for the custody bridge contract.
//!
//! - `deposit` - DepositNative and CW20 Receive (lock into custody)
//! - `withdraw` - proof-backed withdrawals and the large-withdrawal queue
//! - `registry` - asset registration
//! - `config` - rate limits, thresholds, delay and relayer management
//! - `admin` - pause, emergency release and admin transfer

mod admin;
mod config;
mod deposit;
mod registry;
mod withdraw;

pub use admin::*;
pub use config::*;
pub use deposit::*;
pub use registry::*;
pub use withdraw::*;

use cosmwasm_std::{Binary, Storage, Uint128};

use crate::error::ContractError;
use crate::state::{Config, CONFIG, LOCKED_BALANCES, WITHDRAWAL_ID_LENGTH};

/// Load config and reject if the bridge is paused.
pub(crate) fn load_unpaused_config(storage: &dyn Storage) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if config.paused {
        return Err(ContractError::BridgePaused);
    }
    Ok(config)
}

/// Current custody held for `asset`.
pub(crate) fn locked_balance(storage: &dyn Storage, asset: &str) -> Result<Uint128, ContractError> {
    Ok(LOCKED_BALANCES
        .may_load(storage, asset)?
        .unwrap_or_default())
}

/// Deduct `amount` from custody, rejecting if the bridge holds less.
pub(crate) fn release_custody(
    storage: &mut dyn Storage,
    asset: &str,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    let locked = locked_balance(storage, asset)?;
    if locked < amount {
        return Err(ContractError::InsufficientLiquidity {
            locked,
            requested: amount,
        });
    }
    let remaining = locked - amount;
    LOCKED_BALANCES.save(storage, asset, &remaining)?;
    Ok(remaining)
}

/// Parse a 32-byte withdrawal identifier from Binary input.
pub(crate) fn parse_withdrawal_id(withdrawal_id: &Binary) -> Result<[u8; 32], ContractError> {
    if withdrawal_id.len() != WITHDRAWAL_ID_LENGTH {
        return Err(ContractError::InvalidWithdrawalId {
            got: withdrawal_id.len(),
        });
    }
    let mut id = [0u8; 32];
    id.copy_from_slice(withdrawal_id.as_slice());
    Ok(id)
}
