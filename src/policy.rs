// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Economic policy curves.
//!
//! Pure functions of the projection's aggregate state, recomputed on
//! every call since any mutation moves the aggregates. Intermediates are
//! floating point for the curve shape; anything that becomes a currency
//! value is truncated to whole micro-units.

use crate::types::{Currency, UNIT};

/// Target Currency per User: the economy size steers toward
/// `TCU * user count`, where a user is anyone who has ever transacted.
pub const TCU: f64 = (100 * UNIT) as f64;

pub const BASE_STIPEND: f64 = (10 * UNIT) as f64;

pub const BASE_FEE: f64 = 0.1;

/// Minimum wait between stipends for one user.
pub const STIPEND_INTERVAL_MS: u64 = 12 * 60 * 60 * 1000;

/// Mint note marking a stipend payout.
pub const STIPEND_NOTE: &str = "Stipend";

/// Current Currency per User. Zero when nobody has transacted yet.
pub fn ccu(supply: Currency, users: usize) -> f64 {
    if users == 0 {
        return 0.0;
    }
    supply as f64 / users as f64
}

/// If the economy is too small, stipends increase; near or above the
/// desired size they sit at the base.
pub fn current_stipend(supply: Currency, users: usize) -> Currency {
    ((TCU - ccu(supply, users) + BASE_STIPEND) / 2.0).max(BASE_STIPEND) as Currency
}

/// If the economy is too large, fees increase; near or below the desired
/// size they sit at the base. The 0.9 damping factor and x4 slope are
/// tuning constants.
pub fn current_fee(supply: Currency, users: usize) -> f64 {
    ((1.0 + (ccu(supply, users) * 0.9 - TCU) / TCU * 4.0) * BASE_FEE).max(BASE_FEE)
}

/// Fee charged on a transfer: floor(amount * rate).
pub fn transfer_fee(amount: Currency, rate: f64) -> Currency {
    (amount as f64 * rate) as Currency
}
