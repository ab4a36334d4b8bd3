//! Message types for the custody bridge contract
//!
//! Instantiation, execution (deposit, withdrawal, registry, limits and
//! admin), queries and their responses.

use common::AssetInfo;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Timestamp, Uint128};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// A relayer account together with the key it signs withdrawal proofs with.
#[cw_serde]
pub struct RelayerInit {
    /// Relayer account address (submits proofs, executes matured withdrawals)
    pub address: String,
    /// 20-byte signer address of the relayer's secp256k1 proof key
    pub signer: Binary,
}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Admin address for contract management
    pub admin: String,
    /// Initial relayers (at least one)
    pub relayers: Vec<RelayerInit>,
    /// Large-withdrawal time lock in seconds (defaults to 24 hours)
    pub large_withdrawal_delay: Option<u64>,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Deposits (Lock)
    // ========================================================================
    /// Lock exactly one attached native coin for the counterpart ledger
    DepositNative {
        /// Opaque 32-byte recipient on the counterpart ledger
        destination_fingerprint: Binary,
    },

    /// Lock CW20 tokens (called via CW20 send with a [`ReceiveMsg`])
    Receive(cw20::Cw20ReceiveMsg),

    // ========================================================================
    // Withdrawals (Release)
    // ========================================================================
    /// Release custody against a relayer proof
    ///
    /// Authorization: Relayer
    Withdraw {
        /// Source identifier of the asset
        asset: String,
        amount: Uint128,
        /// Recipient address on this chain
        recipient: String,
        /// 32-byte globally unique withdrawal identifier
        withdrawal_id: Binary,
        /// 65-byte recoverable signature over the withdrawal digest
        proof: Binary,
    },

    /// Deliver a queued large withdrawal once its time lock has elapsed
    ///
    /// Authorization: Relayer
    ExecuteLargeWithdrawal { withdrawal_id: Binary },

    /// Cancel a queued large withdrawal; the identifier can never be reused
    ///
    /// Authorization: Admin
    CancelLargeWithdrawal { withdrawal_id: Binary },

    // ========================================================================
    // Token Registry
    // ========================================================================
    /// Register (or overwrite) an asset mapping and mark it active
    RegisterAsset {
        asset: String,
        counterpart_id: String,
        is_native: bool,
    },

    /// Remove an asset mapping (requires zero locked balance)
    DeregisterAsset { asset: String },

    /// Update metadata of a registered asset
    UpdateAsset {
        asset: String,
        counterpart_id: Option<String>,
        active: Option<bool>,
    },

    // ========================================================================
    // Limits
    // ========================================================================
    /// Configure an asset's rate limit window (max_amount = 0 disables)
    SetRateLimit {
        asset: String,
        max_amount: Uint128,
        period_seconds: u64,
    },

    /// Remove an asset's rate limit
    RemoveRateLimit { asset: String },

    /// Set the amount above which withdrawals are time-locked (0 clears)
    SetLargeWithdrawalThreshold { asset: String, threshold: Uint128 },

    /// Set the large-withdrawal time lock for future enqueues
    SetLargeWithdrawalDelay { delay_seconds: u64 },

    // ========================================================================
    // Relayer Management
    // ========================================================================
    /// Register a relayer and its proof signing key
    AddRelayer { address: String, signer: Binary },

    /// Remove a relayer and revoke its signing key
    RemoveRelayer { address: String },

    // ========================================================================
    // Admin Operations
    // ========================================================================
    /// Refuse deposits and withdrawals
    Pause {},

    /// Resume normal operation
    Unpause {},

    /// Break-glass release of custody, bypassing proofs, limits and pause
    EmergencyRelease {
        asset: String,
        amount: Uint128,
        recipient: String,
    },

    /// Propose a new admin (starts the 7-day timelock)
    ProposeAdmin { new_admin: String },

    /// Accept a pending admin proposal (called by the proposed admin)
    AcceptAdmin {},

    /// Withdraw a pending admin proposal
    CancelAdminProposal {},
}

/// Messages accepted through the CW20 `Receive` hook
#[cw_serde]
pub enum ReceiveMsg {
    /// Lock the received CW20 tokens for the counterpart ledger
    Deposit { destination_fingerprint: Binary },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    // ========================================================================
    // Core
    // ========================================================================
    #[returns(ConfigResponse)]
    Config {},

    #[returns(StatsResponse)]
    Stats {},

    #[returns(Option<PendingAdminResponse>)]
    PendingAdmin {},

    // ========================================================================
    // Token Registry
    // ========================================================================
    #[returns(AssetResponse)]
    Asset { asset: String },

    /// Registered assets, paginated by source identifier
    #[returns(AssetsResponse)]
    Assets {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    #[returns(IsRegisteredResponse)]
    IsRegistered { asset: String },

    #[returns(CounterpartIdResponse)]
    CounterpartId { asset: String },

    // ========================================================================
    // Deposit Ledger
    // ========================================================================
    #[returns(LockedBalanceResponse)]
    LockedBalance { asset: String },

    #[returns(AccountSequenceResponse)]
    AccountSequence { account: String },

    #[returns(Option<DepositResponse>)]
    Deposit { account: String, sequence: u64 },

    // ========================================================================
    // Withdrawals
    // ========================================================================
    #[returns(WithdrawalStateResponse)]
    WithdrawalState { withdrawal_id: Binary },

    /// Queued large withdrawals, paginated by withdrawal id
    #[returns(LargeWithdrawalsResponse)]
    LargeWithdrawals {
        start_after: Option<Binary>,
        limit: Option<u32>,
    },

    #[returns(WithdrawalThresholdResponse)]
    WithdrawalThreshold { asset: String },

    /// Digest a relayer must sign to authorize this withdrawal here
    #[returns(WithdrawalDigestResponse)]
    WithdrawalDigest {
        asset: String,
        amount: Uint128,
        recipient: String,
        withdrawal_id: Binary,
    },

    // ========================================================================
    // Limits & Relayers
    // ========================================================================
    /// Rate limit as it stands at the current block (None when unlimited)
    #[returns(Option<RateLimitResponse>)]
    RateLimit { asset: String },

    #[returns(RelayersResponse)]
    Relayers {},

    #[returns(IsRelayerResponse)]
    IsRelayer { address: String },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub paused: bool,
    pub large_withdrawal_delay: u64,
}

#[cw_serde]
pub struct StatsResponse {
    pub total_deposits: u64,
    pub total_immediate_withdrawals: u64,
    pub total_queued_withdrawals: u64,
    pub total_executed_withdrawals: u64,
    pub total_cancelled_withdrawals: u64,
    pub total_emergency_releases: u64,
}

#[cw_serde]
pub struct PendingAdminResponse {
    pub new_address: Addr,
    pub execute_after: Timestamp,
}

#[cw_serde]
pub struct AssetResponse {
    pub asset: String,
    pub counterpart_id: String,
    pub is_native: bool,
    pub active: bool,
}

#[cw_serde]
pub struct AssetsResponse {
    pub assets: Vec<AssetResponse>,
}

#[cw_serde]
pub struct IsRegisteredResponse {
    pub registered: bool,
}

#[cw_serde]
pub struct CounterpartIdResponse {
    /// None if the asset is not registered
    pub counterpart_id: Option<String>,
}

#[cw_serde]
pub struct LockedBalanceResponse {
    pub asset: String,
    pub locked: Uint128,
}

#[cw_serde]
pub struct AccountSequenceResponse {
    pub account: Addr,
    /// Last sequence assigned (0 if the account never deposited)
    pub sequence: u64,
}

#[cw_serde]
pub struct DepositResponse {
    pub account: Addr,
    pub sequence: u64,
    pub asset: String,
    pub amount: Uint128,
    pub destination_fingerprint: Binary,
    pub deposited_at: Timestamp,
}

/// Externally visible status of a withdrawal identifier
#[cw_serde]
pub enum WithdrawalStatus {
    Unseen,
    Queued,
    Processed,
    Cancelled,
}

#[cw_serde]
pub struct WithdrawalStateResponse {
    pub withdrawal_id: Binary,
    pub status: WithdrawalStatus,
    /// Stored parameters, present only while queued
    pub queued: Option<LargeWithdrawalResponse>,
}

#[cw_serde]
pub struct LargeWithdrawalResponse {
    pub withdrawal_id: Binary,
    pub asset: AssetInfo,
    pub amount: Uint128,
    pub recipient: Addr,
    pub execute_after: Timestamp,
    /// Seconds until execution is allowed (0 if matured)
    pub remaining_seconds: u64,
}

#[cw_serde]
pub struct LargeWithdrawalsResponse {
    pub withdrawals: Vec<LargeWithdrawalResponse>,
}

#[cw_serde]
pub struct WithdrawalThresholdResponse {
    pub asset: String,
    /// Zero means every withdrawal is released immediately
    pub threshold: Uint128,
}

#[cw_serde]
pub struct WithdrawalDigestResponse {
    pub digest: Binary,
}

#[cw_serde]
pub struct RateLimitResponse {
    pub asset: String,
    pub max_amount: Uint128,
    pub period_seconds: u64,
    /// Start of the window in effect at the current block
    pub window_start: Timestamp,
    pub used: Uint128,
    pub available: Uint128,
}

#[cw_serde]
pub struct RelayerInfo {
    pub address: Addr,
    pub signer: Binary,
}

#[cw_serde]
pub struct RelayersResponse {
    pub relayers: Vec<RelayerInfo>,
}

#[cw_serde]
pub struct IsRelayerResponse {
    pub is_relayer: bool,
}
