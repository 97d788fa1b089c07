// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! mercury-node: HTTP adapter over the ledger kernel.
//!
//! Thin by design: route wiring, request/response marshaling, and the
//! process bootstrap live here; every balance change goes through the
//! kernel's transaction processor.

pub mod api;
pub mod config;
pub mod errors;
pub mod server;
pub mod telemetry;
