// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Balance projection and replay.
//!
//! Derived state only: the ledger file always wins. The projection is
//! rebuilt by full replay at startup and maintained incrementally for
//! the process lifetime; it has no persisted form of its own.
//!
//! Replay fails closed: a record that does not decode, carries an
//! unknown tag, or would overdraw a balance means the ledger is corrupt
//! and must not be partially loaded.

use crate::codec::{self, CodecError};
use crate::event::Event;
use crate::log::strip_trailing_empty;
use crate::policy::STIPEND_NOTE;
use crate::types::{Currency, User};
use rustc_hash::FxHashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReplayError {
    /// A record failed to decode. Includes unknown event kinds.
    #[error("record {index}: {source}")]
    Decode {
        index: usize,
        #[source]
        source: CodecError,
    },

    /// A debit exceeds the balance accumulated so far. Either the file
    /// was tampered with or a writer skipped validation.
    #[error("record {index}: invalid {kind}: {user} held {balance} micro but {debit} micro is debited")]
    Overdrawn {
        index: usize,
        kind: &'static str,
        user: User,
        balance: Currency,
        debit: Currency,
    },
}

pub type Result<T> = std::result::Result<T, ReplayError>;

/// user -> current balance, plus user -> last stipend time.
#[derive(Debug, Clone, Default)]
pub struct Projection {
    balances: FxHashMap<User, Currency>,
    prev_stipends: FxHashMap<User, u64>,
}

impl Projection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a fresh projection from raw ledger lines, in log order.
    pub fn replay(lines: &[String]) -> Result<Self> {
        let mut projection = Self::new();

        for (index, line) in strip_trailing_empty(lines).iter().enumerate() {
            let event = codec::decode(line)
                .map_err(|source| ReplayError::Decode { index, source })?;
            projection.check_funds(&event, index)?;
            projection.apply(&event);
        }

        Ok(projection)
    }

    /// Replay-time overdraft guard. Live callers validate before append,
    /// so a violation here can only come from a corrupt log.
    fn check_funds(&self, event: &Event, index: usize) -> Result<()> {
        let (kind, user, debit) = match event {
            Event::Transfer(tx) => (
                "transaction",
                &tx.sent.from,
                tx.sent.amount.saturating_add(tx.fee),
            ),
            Event::Burn(burn) => ("burn", &burn.sent.from, burn.sent.amount),
            Event::Mint(_) => return Ok(()),
        };

        let balance = self.balance(user);
        if debit > balance {
            return Err(ReplayError::Overdrawn {
                index,
                kind,
                user: user.clone(),
                balance,
                debit,
            });
        }
        Ok(())
    }

    /// Apply one event unconditionally. Callers guarantee every debit is
    /// covered: the processor validates live operations and [`replay`]
    /// checks the log.
    ///
    /// [`replay`]: Projection::replay
    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::Transfer(tx) => {
                *self.balances.entry(tx.sent.from.clone()).or_default() -=
                    tx.sent.amount + tx.fee;
                *self.balances.entry(tx.sent.to.clone()).or_default() += tx.sent.amount;
            }
            Event::Mint(mint) => {
                *self.balances.entry(mint.sent.to.clone()).or_default() += mint.sent.amount;
                if mint.sent.note == STIPEND_NOTE {
                    self.prev_stipends.insert(mint.sent.to.clone(), mint.time);
                }
            }
            Event::Burn(burn) => {
                *self.balances.entry(burn.sent.from.clone()).or_default() -= burn.sent.amount;
            }
        }
    }

    /// Current balance; absent users hold zero.
    pub fn balance(&self, user: &str) -> Currency {
        self.balances.get(user).copied().unwrap_or(0)
    }

    /// Aggregate supply: the sum over every balance.
    pub fn supply(&self) -> Currency {
        self.balances.values().sum()
    }

    /// Everyone who has ever transacted, zero balances included.
    pub fn user_count(&self) -> usize {
        self.balances.len()
    }

    /// Time of the user's last stipend mint, if any.
    pub fn last_stipend(&self, user: &str) -> Option<u64> {
        self.prev_stipends.get(user).copied()
    }
}
