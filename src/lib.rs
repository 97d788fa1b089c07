// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! mercury-ledger: an event-sourced virtual-economy ledger.
//!
//! The append-only ledger file is the canonical truth; balances are a
//! projection rebuilt by replay at startup and maintained incrementally
//! afterwards. Fee and stipend rates are pure functions of the aggregate
//! state, steering the supply toward a per-user target.

pub mod codec;
pub mod error;
pub mod event;
pub mod history;
pub mod ledger;
pub mod log;
pub mod policy;
pub mod projection;
pub mod types;
