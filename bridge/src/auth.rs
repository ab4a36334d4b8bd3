//! Capability checks for privileged entry points.
//!
//! Capabilities are injected at instantiation (admin address, relayer set)
//! and administered through the admin messages; handlers never compare
//! against a hard-coded owner.

use cosmwasm_std::{Addr, StdResult, Storage};

use crate::error::ContractError;
use crate::state::{CONFIG, RELAYERS, RELAYER_SIGNERS};

/// A role an address may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Registry, limits, pause, cancellation and break-glass release
    Admin,
    /// Submitting withdrawal proofs and executing matured queue entries
    Relayer,
}

/// Whether `addr` currently holds `capability`.
pub fn holds_capability(
    storage: &dyn Storage,
    addr: &Addr,
    capability: Capability,
) -> StdResult<bool> {
    match capability {
        Capability::Admin => Ok(CONFIG.load(storage)?.admin == *addr),
        Capability::Relayer => Ok(RELAYERS.has(storage, addr)),
    }
}

/// Reject unless `addr` holds `capability`.
pub fn ensure_capability(
    storage: &dyn Storage,
    addr: &Addr,
    capability: Capability,
) -> Result<(), ContractError> {
    if holds_capability(storage, addr, capability)? {
        return Ok(());
    }
    Err(match capability {
        Capability::Admin => ContractError::Unauthorized,
        Capability::Relayer => ContractError::UnauthorizedRelayer,
    })
}

/// Relayer account owning a proof signing key, if the key is registered.
pub fn relayer_for_signer(storage: &dyn Storage, signer: &[u8]) -> StdResult<Option<Addr>> {
    RELAYER_SIGNERS.may_load(storage, signer)
}
