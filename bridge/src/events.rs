//! Typed events emitted by the bridge.
//!
//! Each constructor builds the `wasm-<type>` event off-chain watchers key on.
//! Handlers still add a `method` attribute to the response itself.

use cosmwasm_std::{Addr, Binary, Event, Timestamp, Uint128};

use crate::hash::bytes32_to_hex;

// ============================================================================
// Event Types
// ============================================================================

pub const ASSET_REGISTERED: &str = "asset_registered";
pub const ASSET_DEREGISTERED: &str = "asset_deregistered";
pub const ASSET_UPDATED: &str = "asset_updated";
pub const DEPOSIT_RECORDED: &str = "deposit_recorded";
pub const WITHDRAWAL_PROCESSED: &str = "withdrawal_processed";
pub const LARGE_WITHDRAWAL_QUEUED: &str = "large_withdrawal_queued";
pub const LARGE_WITHDRAWAL_CANCELLED: &str = "large_withdrawal_cancelled";
pub const RATE_LIMIT_CONFIGURED: &str = "rate_limit_configured";
pub const RATE_LIMIT_REMOVED: &str = "rate_limit_removed";
pub const LARGE_WITHDRAWAL_THRESHOLD_SET: &str = "large_withdrawal_threshold_set";
pub const LARGE_WITHDRAWAL_DELAY_SET: &str = "large_withdrawal_delay_set";
pub const PAUSED: &str = "paused";
pub const UNPAUSED: &str = "unpaused";
pub const EMERGENCY_RELEASE: &str = "emergency_release";
pub const RELAYER_ADDED: &str = "relayer_added";
pub const RELAYER_REMOVED: &str = "relayer_removed";

// ============================================================================
// Registry
// ============================================================================

pub fn asset_registered(asset: &str, counterpart_id: &str, is_native: bool) -> Event {
    Event::new(ASSET_REGISTERED)
        .add_attribute("asset", asset)
        .add_attribute("counterpart_id", counterpart_id)
        .add_attribute("is_native", is_native.to_string())
}

pub fn asset_deregistered(asset: &str) -> Event {
    Event::new(ASSET_DEREGISTERED).add_attribute("asset", asset)
}

pub fn asset_updated(asset: &str, counterpart_id: &str, active: bool) -> Event {
    Event::new(ASSET_UPDATED)
        .add_attribute("asset", asset)
        .add_attribute("counterpart_id", counterpart_id)
        .add_attribute("active", active.to_string())
}

// ============================================================================
// Deposits & Withdrawals
// ============================================================================

/// The fingerprint is forwarded as hex, never interpreted.
pub fn deposit_recorded(
    asset: &str,
    account: &Addr,
    amount: Uint128,
    destination_fingerprint: &Binary,
    sequence: u64,
) -> Event {
    Event::new(DEPOSIT_RECORDED)
        .add_attribute("asset", asset)
        .add_attribute("account", account)
        .add_attribute("amount", amount)
        .add_attribute(
            "destination_fingerprint",
            format!("0x{}", hex::encode(destination_fingerprint.as_slice())),
        )
        .add_attribute("sequence", sequence.to_string())
}

pub fn withdrawal_processed(withdrawal_id: &[u8; 32], success: bool) -> Event {
    Event::new(WITHDRAWAL_PROCESSED)
        .add_attribute("withdrawal_id", bytes32_to_hex(withdrawal_id))
        .add_attribute("success", success.to_string())
}

pub fn large_withdrawal_queued(
    withdrawal_id: &[u8; 32],
    asset: &str,
    amount: Uint128,
    execute_after: Timestamp,
) -> Event {
    Event::new(LARGE_WITHDRAWAL_QUEUED)
        .add_attribute("withdrawal_id", bytes32_to_hex(withdrawal_id))
        .add_attribute("asset", asset)
        .add_attribute("amount", amount)
        .add_attribute("execute_after", execute_after.seconds().to_string())
}

pub fn large_withdrawal_cancelled(withdrawal_id: &[u8; 32]) -> Event {
    Event::new(LARGE_WITHDRAWAL_CANCELLED)
        .add_attribute("withdrawal_id", bytes32_to_hex(withdrawal_id))
}

// ============================================================================
// Limits & Admin
// ============================================================================

pub fn rate_limit_configured(asset: &str, max_amount: Uint128, period_seconds: u64) -> Event {
    Event::new(RATE_LIMIT_CONFIGURED)
        .add_attribute("asset", asset)
        .add_attribute("max_amount", max_amount)
        .add_attribute("period_seconds", period_seconds.to_string())
}

pub fn rate_limit_removed(asset: &str) -> Event {
    Event::new(RATE_LIMIT_REMOVED).add_attribute("asset", asset)
}

/// A zero threshold means the asset is never time-locked.
pub fn large_withdrawal_threshold_set(asset: &str, threshold: Uint128) -> Event {
    Event::new(LARGE_WITHDRAWAL_THRESHOLD_SET)
        .add_attribute("asset", asset)
        .add_attribute("threshold", threshold)
}

pub fn large_withdrawal_delay_set(delay_seconds: u64) -> Event {
    Event::new(LARGE_WITHDRAWAL_DELAY_SET)
        .add_attribute("delay_seconds", delay_seconds.to_string())
}

pub fn paused(by: &Addr) -> Event {
    Event::new(PAUSED).add_attribute("by", by)
}

pub fn unpaused(by: &Addr) -> Event {
    Event::new(UNPAUSED).add_attribute("by", by)
}

pub fn emergency_release(asset: &str, amount: Uint128, recipient: &Addr) -> Event {
    Event::new(EMERGENCY_RELEASE)
        .add_attribute("asset", asset)
        .add_attribute("amount", amount)
        .add_attribute("recipient", recipient)
}

pub fn relayer_added(relayer: &Addr, signer: &Binary) -> Event {
    Event::new(RELAYER_ADDED)
        .add_attribute("relayer", relayer)
        .add_attribute("signer", format!("0x{}", hex::encode(signer.as_slice())))
}

pub fn relayer_removed(relayer: &Addr) -> Event {
    Event::new(RELAYER_REMOVED).add_attribute("relayer", relayer)
}
