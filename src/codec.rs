// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Line codec for the ledger file.
//!
//! Each record is `<tag> <json>`: the event kind, one separating space,
//! then the payload object. The tag lives outside the JSON so decoding
//! can dispatch on it without touching serde, and an unknown tag stays
//! distinguishable from a malformed payload.

use crate::event::{Burn, Event, Mint, Transfer};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    /// The type tag is not one this ledger ever writes.
    #[error("unknown event kind {0:?}")]
    UnknownKind(String),

    #[error("malformed {kind} payload: {source}")]
    Malformed {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// No separating space after the type tag.
    #[error("missing payload after type tag")]
    MissingPayload,
}

pub type Result<T> = std::result::Result<T, CodecError>;

/// Encode one event as a ledger line (without the trailing newline).
pub fn encode(event: &Event) -> Result<String> {
    let payload = match event {
        Event::Transfer(tx) => serde_json::to_string(tx),
        Event::Mint(mint) => serde_json::to_string(mint),
        Event::Burn(burn) => serde_json::to_string(burn),
    }
    .map_err(|source| CodecError::Malformed {
        kind: event.kind(),
        source,
    })?;

    Ok(format!("{} {}", event.kind(), payload))
}

/// Decode one ledger line back into a tagged event.
pub fn decode(line: &str) -> Result<Event> {
    let (kind, payload) = line.split_once(' ').ok_or(CodecError::MissingPayload)?;

    match kind {
        "Transaction" => serde_json::from_str::<Transfer>(payload)
            .map(Event::Transfer)
            .map_err(|source| CodecError::Malformed {
                kind: "Transaction",
                source,
            }),
        "Mint" => serde_json::from_str::<Mint>(payload)
            .map(Event::Mint)
            .map_err(|source| CodecError::Malformed {
                kind: "Mint",
                source,
            }),
        "Burn" => serde_json::from_str::<Burn>(payload)
            .map(Event::Burn)
            .map_err(|source| CodecError::Malformed {
                kind: "Burn",
                source,
            }),
        other => Err(CodecError::UnknownKind(other.to_string())),
    }
}
