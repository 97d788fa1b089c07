// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Recent-transaction queries.
//!
//! Reads the whole file on every call and decodes newest to oldest; no
//! index is maintained. The log is assumed small enough for this
//! service that a linear pass per query is acceptable.

use crate::codec::{self, CodecError};
use crate::event::Event;
use crate::log::{strip_trailing_empty, EventLog, EventLogError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("ledger read failed: {0}")]
    Io(#[from] EventLogError),

    /// A record failed to decode on a live query path. Recoverable for
    /// the caller, unlike the same failure during replay.
    #[error("record failed to decode: {0}")]
    Codec(#[from] CodecError),
}

pub type Result<T> = std::result::Result<T, HistoryError>;

/// Up to `limit` decoded events matching `predicate`, newest first.
pub fn recent(
    log: &EventLog,
    limit: usize,
    predicate: impl Fn(&Event) -> bool,
) -> Result<Vec<Event>> {
    let lines = log.read_lines()?;
    let mut events = Vec::new();

    for line in strip_trailing_empty(&lines).iter().rev() {
        if events.len() == limit {
            break;
        }
        let event = codec::decode(line)?;
        if predicate(&event) {
            events.push(event);
        }
    }

    Ok(events)
}
