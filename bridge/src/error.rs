//! Error types for the custody bridge contract
//!
//! Every variant rejects the whole transaction; the runtime discards all
//! storage writes and transfers of a failed message.

use cosmwasm_std::{OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only relayer can perform this action")]
    UnauthorizedRelayer,

    #[error("Unauthorized: only pending admin can accept")]
    UnauthorizedPendingAdmin,

    #[error("Invalid withdrawal proof")]
    InvalidSignature,

    // ========================================================================
    // Admin Errors
    // ========================================================================

    #[error("No pending admin change")]
    NoPendingAdmin,

    #[error("Timelock not expired: {remaining_seconds} seconds remaining")]
    TimelockNotExpired { remaining_seconds: u64 },

    // ========================================================================
    // Availability Errors
    // ========================================================================

    #[error("Bridge is paused")]
    BridgePaused,

    // ========================================================================
    // Registry Errors
    // ========================================================================

    #[error("Asset not registered: {asset}")]
    AssetNotRegistered { asset: String },

    #[error("Asset not active: {asset}")]
    AssetInactive { asset: String },

    #[error("Asset {asset} still holds {locked} in custody")]
    AssetHasLockedBalance { asset: String, locked: Uint128 },

    #[error("Invalid counterpart identifier: {reason}")]
    InvalidCounterpartId { reason: String },

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },

    #[error("At least one relayer required")]
    NoRelayers,

    #[error("No funds sent")]
    NoFundsSent,

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("Invalid destination fingerprint: {reason}")]
    InvalidFingerprint { reason: String },

    #[error("Invalid withdrawal id: expected 32 bytes, got {got}")]
    InvalidWithdrawalId { got: usize },

    #[error("Invalid signer: expected 20 bytes, got {got}")]
    InvalidSigner { got: usize },

    #[error("Insufficient bridge liquidity: locked {locked}, requested {requested}")]
    InsufficientLiquidity { locked: Uint128, requested: Uint128 },

    // ========================================================================
    // Replay Errors
    // ========================================================================

    #[error("Withdrawal already processed")]
    WithdrawalAlreadyProcessed,

    #[error("Withdrawal already queued")]
    WithdrawalAlreadyQueued,

    #[error("Withdrawal cancelled")]
    WithdrawalCancelled,

    #[error("Withdrawal not queued")]
    WithdrawalNotQueued,

    // ========================================================================
    // Timing Errors
    // ========================================================================

    #[error("Withdrawal still time-locked: {remaining_seconds} seconds remaining")]
    StillTimeLocked { remaining_seconds: u64 },

    #[error("Invalid large withdrawal delay: must be between {min} and {max} seconds")]
    InvalidWithdrawalDelay { min: u64, max: u64 },

    // ========================================================================
    // Rate Limit Errors
    // ========================================================================

    #[error("Rate limit exceeded for {asset}: requested {requested}, available {available}")]
    RateLimitExceeded {
        asset: String,
        requested: Uint128,
        available: Uint128,
    },

    #[error("Invalid rate limit period: must be greater than zero")]
    InvalidRateLimitPeriod,

    // ========================================================================
    // Relayer Errors
    // ========================================================================

    #[error("Relayer already registered")]
    RelayerAlreadyRegistered,

    #[error("Relayer not registered")]
    RelayerNotRegistered,

    #[error("Signer already bound to relayer {relayer}")]
    SignerAlreadyBound { relayer: String },

    #[error("Cannot remove last relayer")]
    CannotRemoveLastRelayer,
}
