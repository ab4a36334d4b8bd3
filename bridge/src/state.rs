//! State definitions for the custody bridge contract
//!
//! Every store here is owned by one contract instance and only reached through
//! the `Deps`/`DepsMut` handle passed into each entry point.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

use common::AssetInfo;

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Admin address (holder of the admin capability)
    pub admin: Addr,
    /// Whether deposits and withdrawals are currently refused
    pub paused: bool,
    /// Time lock applied to withdrawals above their asset's threshold, in seconds
    pub large_withdrawal_delay: u64,
}

/// Pending admin change proposal
#[cw_serde]
pub struct PendingAdmin {
    /// Proposed new admin address
    pub new_address: Addr,
    /// Block time when the change can be accepted
    pub execute_after: Timestamp,
}

/// Bridge statistics
#[cw_serde]
#[derive(Default)]
pub struct Stats {
    pub total_deposits: u64,
    pub total_immediate_withdrawals: u64,
    pub total_queued_withdrawals: u64,
    pub total_executed_withdrawals: u64,
    pub total_cancelled_withdrawals: u64,
    pub total_emergency_releases: u64,
}

// ============================================================================
// Token Registry
// ============================================================================

/// A bridgeable asset and its identity on the counterpart ledger.
#[cw_serde]
pub struct AssetConfig {
    /// Source identifier (denom for native, contract address for CW20)
    pub asset: String,
    /// Identifier assigned to the mirrored asset by the counterpart ledger
    pub counterpart_id: String,
    /// Whether this is a bank denom (vs. a CW20 contract)
    pub is_native: bool,
    /// Whether deposits are currently accepted
    pub active: bool,
}

impl AssetConfig {
    pub fn asset_info(&self) -> AssetInfo {
        if self.is_native {
            AssetInfo::Native {
                denom: self.asset.clone(),
            }
        } else {
            AssetInfo::Cw20 {
                contract_addr: Addr::unchecked(&self.asset),
            }
        }
    }
}

// ============================================================================
// Deposit Ledger
// ============================================================================

/// A recorded deposit, keyed by (account, sequence).
#[cw_serde]
pub struct DepositRecord {
    pub asset: String,
    pub amount: Uint128,
    /// Opaque counterpart-ledger recipient, never interpreted here
    pub destination_fingerprint: Binary,
    pub deposited_at: Timestamp,
}

// ============================================================================
// Withdrawal State Machine
// ============================================================================

/// Parameters of a time-locked withdrawal, captured verbatim at enqueue time.
#[cw_serde]
pub struct QueuedWithdrawal {
    pub asset: AssetInfo,
    pub amount: Uint128,
    pub recipient: Addr,
    pub execute_after: Timestamp,
}

/// Lifecycle of a withdrawal identifier.
///
/// An identifier with no stored entry is `Unseen`. Stored entries only ever
/// move `Queued -> Processed` or `Queued -> Cancelled`; `Processed` and
/// `Cancelled` are terminal.
#[cw_serde]
pub enum WithdrawalState {
    Queued(QueuedWithdrawal),
    Processed,
    Cancelled,
}

// ============================================================================
// Rate Limiting
// ============================================================================

/// Per-asset fixed window. Absence of a stored window means no limit.
#[cw_serde]
pub struct RateLimitWindow {
    /// Maximum total amount moved per window
    pub max_amount: Uint128,
    /// Window length in seconds
    pub period_seconds: u64,
    /// Block time the current window started
    pub window_start: Timestamp,
    /// Amount consumed in the current window
    pub used: Uint128,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:custody-bridge";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// 7 days in seconds for admin change timelock
pub const ADMIN_TIMELOCK_DURATION: u64 = 604_800;

/// Default large-withdrawal time lock (24 hours)
pub const DEFAULT_LARGE_WITHDRAWAL_DELAY: u64 = 86_400;

/// Bounds for the large-withdrawal time lock
pub const MIN_LARGE_WITHDRAWAL_DELAY: u64 = 60;
pub const MAX_LARGE_WITHDRAWAL_DELAY: u64 = 604_800;

/// Length of a destination fingerprint in bytes
pub const FINGERPRINT_LENGTH: usize = 32;

/// Length of a withdrawal identifier in bytes
pub const WITHDRAWAL_ID_LENGTH: usize = 32;

// ============================================================================
// Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Pending admin proposal (if any)
pub const PENDING_ADMIN: Item<PendingAdmin> = Item::new("pending_admin");

/// Bridge statistics
pub const STATS: Item<Stats> = Item::new("stats");

/// Registered relayers
/// Key: relayer account, Value: 20-byte signer address of its proof key
pub const RELAYERS: Map<&Addr, Binary> = Map::new("relayers");

/// Reverse index of relayer signing keys
/// Key: 20-byte signer address, Value: relayer account
pub const RELAYER_SIGNERS: Map<&[u8], Addr> = Map::new("relayer_signers");

/// Number of registered relayers
pub const RELAYER_COUNT: Item<u32> = Item::new("relayer_count");

/// Token registry
/// Key: source identifier, Value: AssetConfig
pub const ASSETS: Map<&str, AssetConfig> = Map::new("assets");

/// Aggregate custody per asset
/// Key: source identifier, Value: locked amount
pub const LOCKED_BALANCES: Map<&str, Uint128> = Map::new("locked_balances");

/// Last sequence number assigned to each depositor
pub const ACCOUNT_SEQUENCES: Map<&Addr, u64> = Map::new("account_sequences");

/// Deposits by (depositor, sequence)
pub const DEPOSITS: Map<(&Addr, u64), DepositRecord> = Map::new("deposits");

/// Withdrawal identifiers that have left `Unseen`
/// Key: 32-byte withdrawal id, Value: WithdrawalState
pub const WITHDRAWALS: Map<&[u8], WithdrawalState> = Map::new("withdrawals");

/// Withdrawals currently `Queued`, removed once executed or cancelled
/// Key: 32-byte withdrawal id, Value: QueuedWithdrawal
pub const QUEUED_WITHDRAWALS: Map<&[u8], QueuedWithdrawal> = Map::new("queued_withdrawals");

/// Per-asset large-withdrawal thresholds (absent or 0 = always immediate)
pub const LARGE_WITHDRAWAL_THRESHOLDS: Map<&str, Uint128> = Map::new("large_thresholds");

/// Per-asset rate limit windows
pub const RATE_LIMITS: Map<&str, RateLimitWindow> = Map::new("rate_limits");
