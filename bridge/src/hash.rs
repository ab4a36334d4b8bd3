//! Canonical withdrawal digest.
//!
//! Relayers sign the digest produced here; the contract recomputes it from
//! the message parameters and its own environment, so a proof only verifies
//! for the exact (asset, amount, recipient, withdrawal id) on this chain and
//! this contract instance.
//!
//! # Byte Layout (192 bytes total, hashed with keccak256)
//! - Bytes 0-31:    keccak256(asset identifier)
//! - Bytes 32-63:   amount (uint256, big-endian, left-padded)
//! - Bytes 64-95:   keccak256(recipient address)
//! - Bytes 96-127:  withdrawal id (32 raw bytes)
//! - Bytes 128-159: keccak256(chain id)
//! - Bytes 160-191: keccak256(contract address)

use tiny_keccak::{Hasher, Keccak};

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Compute the digest a relayer signs to authorize a withdrawal.
///
/// `chain_id` is the execution domain and `instance` the bridge contract
/// address; both come from `Env` when called by the contract.
pub fn compute_withdrawal_digest(
    asset: &str,
    amount: u128,
    recipient: &str,
    withdrawal_id: &[u8; 32],
    chain_id: &str,
    instance: &str,
) -> [u8; 32] {
    let mut data = [0u8; 192];

    data[0..32].copy_from_slice(&keccak256(asset.as_bytes()));

    // u128 (16 bytes) goes into bytes 16-31 of the word
    data[32 + 16..64].copy_from_slice(&amount.to_be_bytes());

    data[64..96].copy_from_slice(&keccak256(recipient.as_bytes()));
    data[96..128].copy_from_slice(withdrawal_id);
    data[128..160].copy_from_slice(&keccak256(chain_id.as_bytes()));
    data[160..192].copy_from_slice(&keccak256(instance.as_bytes()));

    keccak256(&data)
}

/// Convert 32-byte hash to hex string (for attributes/logging)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}
