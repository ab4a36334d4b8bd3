//! Withdrawal proof verification.
//!
//! A proof is a 65-byte recoverable secp256k1 signature `r || s || v` over
//! the digest from [`crate::hash::compute_withdrawal_digest`]. The signer is
//! identified by its 20-byte address (last 20 bytes of the keccak256 of the
//! uncompressed public key) and must be bound to a registered relayer.

use cosmwasm_std::{Addr, Api, Storage};

use crate::auth::relayer_for_signer;
use crate::error::ContractError;
use crate::hash::keccak256;

/// Length of a recoverable signature
pub const PROOF_LENGTH: usize = 65;

/// Length of a signer address
pub const SIGNER_LENGTH: usize = 20;

/// Derive the 20-byte signer address from a 65-byte uncompressed public key.
pub fn signer_from_pubkey(pubkey: &[u8]) -> Option<[u8; SIGNER_LENGTH]> {
    if pubkey.len() != 65 || pubkey[0] != 0x04 {
        return None;
    }
    let hash = keccak256(&pubkey[1..]);
    let mut signer = [0u8; SIGNER_LENGTH];
    signer.copy_from_slice(&hash[12..]);
    Some(signer)
}

/// Recover the signer address of `proof` over `digest`.
pub fn recover_signer(
    api: &dyn Api,
    digest: &[u8; 32],
    proof: &[u8],
) -> Result<[u8; SIGNER_LENGTH], ContractError> {
    if proof.len() != PROOF_LENGTH {
        return Err(ContractError::InvalidSignature);
    }

    // Accept both raw (0/1) and Ethereum-style (27/28) recovery ids
    let recovery_param = match proof[64] {
        v @ (0 | 1) => v,
        v @ (27 | 28) => v - 27,
        _ => return Err(ContractError::InvalidSignature),
    };

    let pubkey = api
        .secp256k1_recover_pubkey(digest, &proof[..64], recovery_param)
        .map_err(|_| ContractError::InvalidSignature)?;

    signer_from_pubkey(&pubkey).ok_or(ContractError::InvalidSignature)
}

/// Verify a withdrawal proof and return the relayer it is attributable to.
pub fn verify_withdrawal_proof(
    api: &dyn Api,
    storage: &dyn Storage,
    digest: &[u8; 32],
    proof: &[u8],
) -> Result<Addr, ContractError> {
    let signer = recover_signer(api, digest, proof)?;
    relayer_for_signer(storage, &signer)?.ok_or(ContractError::InvalidSignature)
}
