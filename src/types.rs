// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Currency and identifier primitives.

use rand::Rng;

/// Balances are exact integer micro-units. 1 unit = 1_000_000 micro.
/// All ledger arithmetic stays in integers; only the policy curves go
/// through floating point, and they truncate before producing a value.
pub type Currency = u64;

/// Opaque user identifier. There is no registration: a user exists the
/// moment it first appears in the ledger.
pub type User = String;

/// Asset reference carried on transfer/burn events. Inert for now.
pub type AssetId = u64;

pub const MICRO: Currency = 1;
pub const MILLI: Currency = 1_000 * MICRO;
pub const UNIT: Currency = 1_000_000 * MICRO;
pub const KILO: Currency = 1_000 * UNIT;
pub const MEGA: Currency = 1_000_000 * UNIT;
pub const GIGA: Currency = 1_000_000_000 * UNIT;
// u64 means ~18 tera is the economy limit.
pub const TERA: Currency = 1_000_000_000_000 * UNIT;

/// Render a currency value as `<units>.<micros> unit`.
pub fn readable(c: Currency) -> String {
    format!("{}.{:06} unit", c / UNIT, c % UNIT)
}

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
pub const ID_LEN: usize = 15;

/// Random printable event id: fixed length, lowercase alphanumeric,
/// collision-resistant for a single-writer ledger.
pub fn random_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}
