// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Ledger-level property tests: conservation, replay idempotence,
//! rejection purity, and single-writer exclusion under concurrency.

use mercury_ledger::error::{LedgerError, ValidationError};
use mercury_ledger::event::{Event, SentBurn, SentMint, SentTransfer};
use mercury_ledger::ledger::Ledger;
use mercury_ledger::types::{now_millis, Currency, UNIT};
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

fn sent_transfer(from: &str, to: &str, amount: Currency) -> SentTransfer {
    SentTransfer {
        to: to.into(),
        from: from.into(),
        amount,
        link: "https://example.org/tx".into(),
        note: "test".into(),
        returns: None,
    }
}

fn sent_mint(to: &str, amount: Currency) -> SentMint {
    SentMint {
        to: to.into(),
        amount,
        note: "seed".into(),
    }
}

fn sent_burn(from: &str, amount: Currency) -> SentBurn {
    SentBurn {
        from: from.into(),
        amount,
        note: "burn".into(),
        link: "https://example.org/burn".into(),
        returns: None,
    }
}

/// sum(balances) == sum(mints) - sum(burns) - sum(fees), after every
/// accepted operation.
#[test]
fn test_conservation() {
    let dir = tempdir().unwrap();
    let mut ledger = Ledger::open(dir.path().join("ledger")).unwrap();

    let mut minted: Currency = 0;
    let mut burned: Currency = 0;
    let mut fees: Currency = 0;

    let check = |ledger: &Ledger, minted: Currency, burned: Currency, fees: Currency| {
        assert_eq!(ledger.supply(), minted - burned - fees);
    };

    ledger.mint(sent_mint("alice", 200 * UNIT), now_millis()).unwrap();
    minted += 200 * UNIT;
    check(&ledger, minted, burned, fees);

    ledger.mint(sent_mint("bob", 50 * UNIT), now_millis()).unwrap();
    minted += 50 * UNIT;
    check(&ledger, minted, burned, fees);

    for amount in [10 * UNIT, 25 * UNIT, UNIT / 2] {
        match ledger.transfer(sent_transfer("alice", "bob", amount)).unwrap() {
            Event::Transfer(tx) => fees += tx.fee,
            other => panic!("expected transfer, got {:?}", other),
        }
        check(&ledger, minted, burned, fees);
    }

    ledger.burn(sent_burn("bob", 5 * UNIT)).unwrap();
    burned += 5 * UNIT;
    check(&ledger, minted, burned, fees);

    match ledger.request_stipend("carol").unwrap() {
        Event::Mint(mint) => minted += mint.sent.amount,
        other => panic!("expected mint, got {:?}", other),
    }
    check(&ledger, minted, burned, fees);
}

/// No accepted operation may produce a negative balance, and a drained
/// account stops at exactly zero.
#[test]
fn test_non_negativity() {
    let dir = tempdir().unwrap();
    let mut ledger = Ledger::open(dir.path().join("ledger")).unwrap();

    ledger.mint(sent_mint("alice", 11 * UNIT), now_millis()).unwrap();

    // 10 units + 1 unit fee drains the account to zero exactly.
    ledger.transfer(sent_transfer("alice", "bob", 10 * UNIT)).unwrap();
    assert_eq!(ledger.balance("alice"), 0);

    // Any further debit is rejected.
    assert!(ledger.transfer(sent_transfer("alice", "bob", 1)).is_err());
    assert!(ledger.burn(sent_burn("alice", 1)).is_err());
    assert_eq!(ledger.balance("alice"), 0);
}

/// Replaying the same log twice from empty produces identical
/// projections.
#[test]
fn test_replay_idempotence() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger");

    {
        let mut ledger = Ledger::open(&path).unwrap();
        ledger.mint(sent_mint("alice", 100 * UNIT), now_millis()).unwrap();
        ledger.transfer(sent_transfer("alice", "bob", 30 * UNIT)).unwrap();
        ledger.burn(sent_burn("bob", 10 * UNIT)).unwrap();
        ledger.request_stipend("carol").unwrap();
    }

    let first = Ledger::open(&path).unwrap();
    let second = Ledger::open(&path).unwrap();

    for user in ["alice", "bob", "carol", "nobody"] {
        assert_eq!(first.balance(user), second.balance(user));
    }
    assert_eq!(first.supply(), second.supply());
    assert_eq!(first.user_count(), second.user_count());
    assert_eq!(first.record_count(), second.record_count());
}

/// A rejected operation leaves the log length and every balance
/// unchanged.
#[test]
fn test_rejection_purity() {
    let dir = tempdir().unwrap();
    let mut ledger = Ledger::open(dir.path().join("ledger")).unwrap();
    ledger.mint(sent_mint("alice", 10 * UNIT), now_millis()).unwrap();
    ledger.request_stipend("bob").unwrap();

    let records = ledger.record_count();
    let alice = ledger.balance("alice");
    let bob = ledger.balance("bob");
    let supply = ledger.supply();

    let rejects: Vec<Result<Event, LedgerError>> = vec![
        ledger.transfer(sent_transfer("alice", "alice", 100)),
        ledger.transfer(sent_transfer("alice", "bob", 0)),
        ledger.transfer(sent_transfer("alice", "bob", 1_000 * UNIT)),
        ledger.mint(sent_mint("", 100), now_millis()),
        ledger.burn(sent_burn("alice", 1_000 * UNIT)),
        ledger.request_stipend("bob"),
    ];
    for result in rejects {
        assert!(matches!(result, Err(LedgerError::Rejected(_))));
    }

    assert_eq!(ledger.record_count(), records);
    assert_eq!(ledger.balance("alice"), alice);
    assert_eq!(ledger.balance("bob"), bob);
    assert_eq!(ledger.supply(), supply);
}

/// N concurrent transfers that each try to drain the sender's entire
/// balance: exactly one succeeds, the rest are insufficient-balance
/// rejections.
#[test]
fn test_concurrent_transfers_single_winner() {
    let dir = tempdir().unwrap();
    let mut ledger = Ledger::open(dir.path().join("ledger")).unwrap();

    // 11 units: a 10-unit transfer plus its 1-unit fee drains it all.
    ledger.mint(sent_mint("alice", 11 * UNIT), now_millis()).unwrap();
    let shared = Arc::new(Mutex::new(ledger));

    let mut handles = Vec::new();
    for worker in 0..8u32 {
        let shared = Arc::clone(&shared);
        handles.push(std::thread::spawn(move || {
            let to = format!("sink-{}", worker);
            let mut ledger = shared.lock().unwrap();
            ledger.transfer(sent_transfer("alice", &to, 10 * UNIT))
        }));
    }

    let mut successes = 0;
    let mut insufficient = 0;
    for handle in handles {
        match handle.join().unwrap() {
            Ok(_) => successes += 1,
            Err(LedgerError::Rejected(ValidationError::InsufficientBalance { .. })) => {
                insufficient += 1
            }
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(insufficient, 7);

    let ledger = shared.lock().unwrap();
    assert_eq!(ledger.balance("alice"), 0);
    assert_eq!(ledger.record_count(), 2);
}
