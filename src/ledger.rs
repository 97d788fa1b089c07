// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! The transaction processor.
//!
//! `Ledger` owns the triad {event log handle, balance projection,
//! stipend eligibility} and is the single path through which balances
//! change. Every mutation follows the same barrier:
//!
//! 1. Validate against current state and policy
//! 2. Durable append (fsync)
//! 3. In-memory apply
//!
//! A rejected validation never reaches the log; a failed append never
//! reaches the projection. Mutations take `&mut self`, so exclusive
//! access is enforced by the borrow checker in-process and by the
//! caller's lock across concurrent requests.

use crate::codec;
use crate::error::{LedgerError, OpKind, ValidationError};
use crate::event::{Burn, Event, Mint, SentBurn, SentMint, SentTransfer, Transfer};
use crate::history::{self, HistoryError};
use crate::log::EventLog;
use crate::policy;
use crate::projection::Projection;
use crate::types::{now_millis, random_id, Currency};
use std::path::Path;

pub struct Ledger {
    log: EventLog,
    projection: Projection,
}

impl Ledger {
    /// Open the ledger file (creating it when absent) and rebuild the
    /// projection by full replay.
    ///
    /// Corruption is returned, not swallowed: the caller decides whether
    /// to abort the process, and must not serve from a partial load.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let log = EventLog::open(path)?;
        let lines = log.read_lines()?;
        let projection = Projection::replay(&lines)?;

        tracing::debug!(
            records = log.record_count(),
            users = projection.user_count(),
            "ledger replayed"
        );

        Ok(Self { log, projection })
    }

    // --- Read APIs ---

    /// Current balance; absent users hold zero.
    pub fn balance(&self, user: &str) -> Currency {
        self.projection.balance(user)
    }

    pub fn supply(&self) -> Currency {
        self.projection.supply()
    }

    pub fn user_count(&self) -> usize {
        self.projection.user_count()
    }

    /// Number of records in the log.
    pub fn record_count(&self) -> u64 {
        self.log.record_count()
    }

    /// Fee rate from live aggregates, recomputed on every call.
    pub fn current_fee(&self) -> f64 {
        policy::current_fee(self.projection.supply(), self.projection.user_count())
    }

    /// Stipend size from live aggregates, recomputed on every call.
    pub fn current_stipend(&self) -> Currency {
        policy::current_stipend(self.projection.supply(), self.projection.user_count())
    }

    /// Up to `limit` events, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<Event>, HistoryError> {
        history::recent(&self.log, limit, |_| true)
    }

    /// Up to `limit` events mentioning `user` as sender or recipient.
    pub fn recent_for_user(&self, user: &str, limit: usize) -> Result<Vec<Event>, HistoryError> {
        history::recent(&self.log, limit, |event| event.mentions(user))
    }

    // --- Mutations ---

    /// Move `amount` from sender to recipient, burning the policy fee on
    /// top of it.
    pub fn transfer(&mut self, sent: SentTransfer) -> Result<Event, LedgerError> {
        let fee = policy::transfer_fee(sent.amount, self.current_fee());
        self.validate_transfer(&sent, fee)?;

        let event = Event::Transfer(Transfer {
            sent,
            fee,
            time: now_millis(),
            id: random_id(),
        });
        self.commit(event)
    }

    /// Issue new currency to a recipient.
    pub fn mint(&mut self, sent: SentMint, time: u64) -> Result<Event, LedgerError> {
        self.validate_mint(&sent)?;

        let event = Event::Mint(Mint {
            sent,
            time,
            id: random_id(),
        });
        self.commit(event)
    }

    /// Remove currency from circulation.
    pub fn burn(&mut self, sent: SentBurn) -> Result<Event, LedgerError> {
        self.validate_burn(&sent)?;

        let event = Event::Burn(Burn {
            sent,
            time: now_millis(),
            id: random_id(),
        });
        self.commit(event)
    }

    /// Mint the policy-sized stipend, rate-limited per user by the fixed
    /// interval.
    pub fn request_stipend(&mut self, to: &str) -> Result<Event, LedgerError> {
        let now = now_millis();
        if let Some(prev) = self.projection.last_stipend(to) {
            if prev + policy::STIPEND_INTERVAL_MS > now {
                return Err(ValidationError::StipendNotReady.into());
            }
        }

        let amount = self.current_stipend();
        self.mint(
            SentMint {
                to: to.to_owned(),
                amount,
                note: policy::STIPEND_NOTE.to_owned(),
            },
            now,
        )
    }

    /// The commit barrier: nothing reaches the projection until the
    /// record is durable on disk.
    fn commit(&mut self, event: Event) -> Result<Event, LedgerError> {
        let line = codec::encode(&event)?;
        self.log.append(&line)?;
        self.projection.apply(&event);
        Ok(event)
    }

    fn validate_transfer(&self, sent: &SentTransfer, fee: Currency) -> Result<(), ValidationError> {
        if sent.amount == 0 {
            Err(ValidationError::ZeroAmount(OpKind::Transfer))
        } else if sent.from.is_empty() {
            Err(ValidationError::NoSender(OpKind::Transfer))
        } else if sent.to.is_empty() {
            Err(ValidationError::NoRecipient(OpKind::Transfer))
        } else if sent.from == sent.to {
            Err(ValidationError::Circular {
                from: sent.from.clone(),
                to: sent.to.clone(),
            })
        } else if sent.note.is_empty() {
            Err(ValidationError::NoNote(OpKind::Transfer))
        } else if sent.link.is_empty() {
            Err(ValidationError::NoLink(OpKind::Transfer))
        } else {
            let required = sent.amount.saturating_add(fee);
            let balance = self.projection.balance(&sent.from);
            if required > balance {
                Err(ValidationError::InsufficientBalance { balance, required })
            } else {
                Ok(())
            }
        }
    }

    fn validate_mint(&self, sent: &SentMint) -> Result<(), ValidationError> {
        if sent.amount == 0 {
            Err(ValidationError::ZeroAmount(OpKind::Mint))
        } else if sent.to.is_empty() {
            Err(ValidationError::NoRecipient(OpKind::Mint))
        } else if sent.note.is_empty() {
            Err(ValidationError::NoNote(OpKind::Mint))
        } else {
            Ok(())
        }
    }

    fn validate_burn(&self, sent: &SentBurn) -> Result<(), ValidationError> {
        if sent.amount == 0 {
            Err(ValidationError::ZeroAmount(OpKind::Burn))
        } else if sent.from.is_empty() {
            Err(ValidationError::NoSender(OpKind::Burn))
        } else {
            let balance = self.projection.balance(&sent.from);
            if sent.amount > balance {
                Err(ValidationError::InsufficientBalance {
                    balance,
                    required: sent.amount,
                })
            } else if sent.note.is_empty() {
                Err(ValidationError::NoNote(OpKind::Burn))
            } else if sent.link.is_empty() {
                Err(ValidationError::NoLink(OpKind::Burn))
            } else {
                Ok(())
            }
        }
    }
}
