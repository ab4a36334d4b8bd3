//! Custody Bridge Contract - Lock/Release Custody for a Counterpart Ledger
//!
//! Holds assets in custody on this chain while their mirrors circulate on a
//! counterpart ledger.
//!
//! # Deposit Flow (Lock)
//! 1. User sends a registered native coin (`DepositNative`) or CW20 tokens
//!    (`Send` with `ReceiveMsg::Deposit`) together with an opaque 32-byte
//!    destination fingerprint
//! 2. The contract locks the funds, assigns the next per-account sequence and
//!    emits `deposit_recorded`
//! 3. Relayers observe the event and mint on the counterpart ledger
//!
//! # Withdrawal Flow (Release)
//! 1. A relayer submits `Withdraw` with a signature over the canonical
//!    withdrawal digest (see [`hash`])
//! 2. Amounts at or below the asset's threshold are released immediately
//! 3. Larger amounts are queued for `large_withdrawal_delay` seconds, during
//!    which the admin may cancel; afterwards a relayer executes them
//!
//! # Security
//! - Replay protection on globally unique 32-byte withdrawal ids
//! - Per-asset fixed-window rate limiting shared by deposits and withdrawals
//! - Time-locked large withdrawals with admin cancellation
//! - Emergency pause and an audited break-glass release

pub mod auth;
pub mod contract;
pub mod error;
pub mod events;
mod execute;
pub mod hash;
pub mod msg;
pub mod proof;
mod query;
pub mod rate_limit;
pub mod state;

pub use crate::error::ContractError;
pub use crate::hash::{compute_withdrawal_digest, keccak256};
