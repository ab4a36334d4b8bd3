//! Per-asset rate limiting over a lazily reset fixed window.
//!
//! The window resets the first time an operation observes that
//! `now >= window_start + period`; there is no background timer. Because
//! windows are fixed rather than sliding, up to twice `max_amount` can move
//! across a window boundary.

use cosmwasm_std::{StdResult, Storage, Timestamp, Uint128};

use crate::error::ContractError;
use crate::state::{RateLimitWindow, RATE_LIMITS};

/// Snapshot of an asset's limit as seen at a given block time.
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitStatus {
    pub window: RateLimitWindow,
    pub available: Uint128,
}

impl RateLimitWindow {
    /// Start a fresh window at `now`.
    pub fn new(max_amount: Uint128, period_seconds: u64, now: Timestamp) -> Self {
        Self {
            max_amount,
            period_seconds,
            window_start: now,
            used: Uint128::zero(),
        }
    }

    /// Window as it stands at `now`, reset if it has expired.
    pub fn at(&self, now: Timestamp) -> Self {
        if now.seconds() >= self.window_start.seconds().saturating_add(self.period_seconds) {
            Self::new(self.max_amount, self.period_seconds, now)
        } else {
            self.clone()
        }
    }

    pub fn available(&self) -> Uint128 {
        self.max_amount.saturating_sub(self.used)
    }
}

/// Read-only preview of an asset's limit at `now`. `None` when unlimited.
pub fn preview(
    storage: &dyn Storage,
    asset: &str,
    now: Timestamp,
) -> StdResult<Option<RateLimitStatus>> {
    Ok(RATE_LIMITS.may_load(storage, asset)?.map(|stored| {
        let window = stored.at(now);
        let available = window.available();
        RateLimitStatus { window, available }
    }))
}

/// Consume `amount` from the asset's current window, or reject with the
/// amount still available.
pub fn check_and_consume(
    storage: &mut dyn Storage,
    asset: &str,
    amount: Uint128,
    now: Timestamp,
) -> Result<(), ContractError> {
    let Some(stored) = RATE_LIMITS.may_load(storage, asset)? else {
        return Ok(());
    };

    let mut window = stored.at(now);
    let available = window.available();
    if amount > available {
        return Err(ContractError::RateLimitExceeded {
            asset: asset.to_string(),
            requested: amount,
            available,
        });
    }

    window.used = window.used.checked_add(amount)?;
    RATE_LIMITS.save(storage, asset, &window)?;
    Ok(())
}

/// Configure a limit. `max_amount == 0` disables the limit and clears usage.
pub fn set_limit(
    storage: &mut dyn Storage,
    asset: &str,
    max_amount: Uint128,
    period_seconds: u64,
    now: Timestamp,
) -> Result<(), ContractError> {
    if max_amount.is_zero() {
        RATE_LIMITS.remove(storage, asset);
        return Ok(());
    }
    if period_seconds == 0 {
        return Err(ContractError::InvalidRateLimitPeriod);
    }

    RATE_LIMITS.save(
        storage,
        asset,
        &RateLimitWindow::new(max_amount, period_seconds, now),
    )?;
    Ok(())
}

pub fn remove_limit(storage: &mut dyn Storage, asset: &str) {
    RATE_LIMITS.remove(storage, asset);
}
