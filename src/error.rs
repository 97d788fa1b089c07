// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error taxonomy.
//!
//! Validation failures are recoverable rejections with no state change.
//! Durability failures abort the operation before the projection is
//! touched. Corruption is fatal to startup.

use crate::codec::CodecError;
use crate::log::EventLogError;
use crate::projection::ReplayError;
use crate::types::{readable, Currency};
use std::fmt;
use thiserror::Error;

/// Which operation a validation failure belongs to. Picks the wording of
/// the user-facing message only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Transfer,
    Mint,
    Burn,
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OpKind::Transfer => "transaction",
            OpKind::Mint => "mint",
            OpKind::Burn => "burn",
        })
    }
}

/// A rejected operation. Reported verbatim to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must have an amount")]
    ZeroAmount(OpKind),

    #[error("{0} must have a sender")]
    NoSender(OpKind),

    #[error("{0} must have a recipient")]
    NoRecipient(OpKind),

    #[error("circular transaction: {from} -> {to}")]
    Circular { from: String, to: String },

    #[error("{0} must have a note")]
    NoNote(OpKind),

    #[error("{0} must have a link")]
    NoLink(OpKind),

    #[error(
        "insufficient balance: balance was {}, at least {} is required",
        readable(*balance),
        readable(*required)
    )]
    InsufficientBalance { balance: Currency, required: Currency },

    #[error("next stipend not available yet")]
    StipendNotReady,
}

/// Anything a ledger operation can fail with.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Recoverable rejection. The log and projection are untouched.
    #[error(transparent)]
    Rejected(#[from] ValidationError),

    /// Storage could not be opened, read, or confirmed durable. The
    /// projection is left unmodified so a later replay stays the source
    /// of truth.
    #[error("ledger storage failure: {0}")]
    Durability(#[from] EventLogError),

    /// The event could not be encoded. Nothing was written.
    #[error("event encoding failed: {0}")]
    Encode(#[from] CodecError),

    /// The on-disk ledger failed replay. The caller must refuse to serve.
    #[error("ledger corrupt: {0}")]
    Corrupt(#[from] ReplayError),
}

impl LedgerError {
    /// True for rejections the caller may surface as a bad request.
    pub fn is_rejection(&self) -> bool {
        matches!(self, LedgerError::Rejected(_))
    }
}
