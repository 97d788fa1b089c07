// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Economic event types.
//!
//! Each event splits into a `Sent*` half (what a caller submits) and a
//! full record that adds the processor-assigned fee/time/id. JSON field
//! names are PascalCase to match the ledger file format.

use crate::types::{AssetId, Currency, User};
use serde::{Deserialize, Serialize};

/// A proposed transfer, before the processor prices and stamps it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct SentTransfer {
    pub to: User,
    pub from: User,
    pub amount: Currency,
    pub link: String,
    pub note: String,
    #[serde(default)]
    pub returns: Option<Vec<AssetId>>,
}

/// A committed transfer. The fee is burned, not paid to any account.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Transfer {
    #[serde(flatten)]
    pub sent: SentTransfer,
    pub fee: Currency,
    pub time: u64,
    pub id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct SentMint {
    pub to: User,
    pub amount: Currency,
    pub note: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Mint {
    #[serde(flatten)]
    pub sent: SentMint,
    pub time: u64,
    pub id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct SentBurn {
    pub from: User,
    pub amount: Currency,
    pub note: String,
    pub link: String,
    #[serde(default)]
    pub returns: Option<Vec<AssetId>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Burn {
    #[serde(flatten)]
    pub sent: SentBurn,
    pub time: u64,
    pub id: String,
}

/// A decoded ledger record, tagged with its kind.
///
/// Serializes with an internal `Type` field so history responses carry
/// the tag without any dynamic re-tagging.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "Type")]
pub enum Event {
    #[serde(rename = "Transaction")]
    Transfer(Transfer),
    Mint(Mint),
    Burn(Burn),
}

impl Event {
    /// Wire tag written ahead of the payload in the ledger file.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Transfer(_) => "Transaction",
            Event::Mint(_) => "Mint",
            Event::Burn(_) => "Burn",
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Event::Transfer(tx) => &tx.id,
            Event::Mint(mint) => &mint.id,
            Event::Burn(burn) => &burn.id,
        }
    }

    pub fn time(&self) -> u64 {
        match self {
            Event::Transfer(tx) => tx.time,
            Event::Mint(mint) => mint.time,
            Event::Burn(burn) => burn.time,
        }
    }

    /// True when `user` appears as the sender or recipient.
    pub fn mentions(&self, user: &str) -> bool {
        match self {
            Event::Transfer(tx) => tx.sent.from == user || tx.sent.to == user,
            Event::Mint(mint) => mint.sent.to == user,
            Event::Burn(burn) => burn.sent.from == user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_serialization() {
        let event = Event::Mint(Mint {
            sent: SentMint {
                to: "alice".into(),
                amount: 10_000_000,
                note: "seed".into(),
            },
            time: 1,
            id: "abcabcabcabcabc".into(),
        });

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["Type"], "Mint");
        assert_eq!(value["To"], "alice");
        assert_eq!(value["Amount"], 10_000_000);
    }

    #[test]
    fn test_mentions() {
        let event = Event::Transfer(Transfer {
            sent: SentTransfer {
                to: "bob".into(),
                from: "alice".into(),
                amount: 1,
                link: "l".into(),
                note: "n".into(),
                returns: None,
            },
            fee: 0,
            time: 0,
            id: "0".repeat(15),
        });

        assert!(event.mentions("alice"));
        assert!(event.mentions("bob"));
        assert!(!event.mentions("carol"));
    }
}
