//! Behaviour shared by every store backend, including concurrent increments

use groupwarden_core::{GroupId, UserId};
use groupwarden_store::*;
use std::sync::Arc;

const G: GroupId = GroupId::new(100);
const U: UserId = UserId::new(5);

fn backends() -> Vec<(&'static str, Arc<dyn WarningStore>)> {
    vec![
        ("memory", Arc::new(MemoryStore::new())),
        ("sqlite", Arc::new(SqliteStore::open_in_memory().unwrap())),
    ]
}

fn rule_backends() -> Vec<(&'static str, Arc<dyn RuleStore>)> {
    vec![
        ("memory", Arc::new(MemoryStore::new())),
        ("sqlite", Arc::new(SqliteStore::open_in_memory().unwrap())),
    ]
}

// ===========================================================================
// Warning counters
// ===========================================================================

#[test]
fn absent_record_reads_as_zero() {
    for (name, store) in backends() {
        assert_eq!(store.count(G, U).unwrap(), 0, "{name}");
        assert_eq!(store.warning_records().unwrap(), 0, "{name}");
    }
}

#[test]
fn increments_accumulate() {
    for (name, store) in backends() {
        for expected in 1..=4 {
            let inc = store.increment(G, U).unwrap();
            assert_eq!(inc.previous, expected - 1, "{name}");
            assert_eq!(inc.current, expected, "{name}");
        }
        assert_eq!(store.count(G, U).unwrap(), 4, "{name}");
    }
}

#[test]
fn delete_is_idempotent() {
    for (name, store) in backends() {
        assert!(!store.delete(G, U).unwrap(), "{name}");
        store.increment(G, U).unwrap();
        assert!(store.delete(G, U).unwrap(), "{name}");
        assert!(!store.delete(G, U).unwrap(), "{name}");
        assert_eq!(store.count(G, U).unwrap(), 0, "{name}");
    }
}

#[test]
fn delete_leaves_other_users_alone() {
    for (name, store) in backends() {
        let other = UserId::new(6);
        store.increment(G, U).unwrap();
        store.increment(G, other).unwrap();
        store.delete(G, U).unwrap();
        assert_eq!(store.count(G, other).unwrap(), 1, "{name}");
        assert_eq!(store.warning_records().unwrap(), 1, "{name}");
    }
}

#[test]
fn decrement_undoes_one_increment() {
    for (name, store) in backends() {
        for _ in 0..3 {
            store.increment(G, U).unwrap();
        }
        assert_eq!(store.decrement(G, U).unwrap(), 2, "{name}");
        assert_eq!(store.count(G, U).unwrap(), 2, "{name}");
        assert!(store.increment(G, U).unwrap().crosses(3), "{name}");
    }
}

#[test]
fn decrement_from_one_removes_the_record() {
    for (name, store) in backends() {
        store.increment(G, U).unwrap();
        assert_eq!(store.decrement(G, U).unwrap(), 0, "{name}");
        assert_eq!(store.warning_records().unwrap(), 0, "{name}");
        assert_eq!(store.decrement(G, U).unwrap(), 0, "{name}");
        assert_eq!(store.count(G, U).unwrap(), 0, "{name}");
    }
}

#[test]
fn concurrent_increments_are_not_lost() {
    const THREADS: u32 = 8;
    const PER_THREAD: u32 = 25;
    for (name, store) in backends() {
        let crossings = std::sync::atomic::AtomicU32::new(0);
        std::thread::scope(|s| {
            for _ in 0..THREADS {
                let store = &store;
                let crossings = &crossings;
                s.spawn(move || {
                    for _ in 0..PER_THREAD {
                        let inc = store.increment(G, U).unwrap();
                        if inc.crosses(3) {
                            crossings.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                        }
                    }
                });
            }
        });
        assert_eq!(store.count(G, U).unwrap(), THREADS * PER_THREAD, "{name}");
        assert_eq!(crossings.into_inner(), 1, "{name}");
    }
}

// ===========================================================================
// Rules
// ===========================================================================

#[test]
fn rules_absent_until_set() {
    for (name, store) in rule_backends() {
        assert_eq!(store.rules(G).unwrap(), None, "{name}");
        store.upsert_rules(G, "1. Be kind").unwrap();
        assert_eq!(store.rules(G).unwrap().as_deref(), Some("1. Be kind"), "{name}");
        assert_eq!(store.rules(GroupId::new(200)).unwrap(), None, "{name}");
    }
}

#[test]
fn rules_last_write_wins() {
    for (name, store) in rule_backends() {
        store.upsert_rules(G, "old").unwrap();
        store.upsert_rules(G, "new").unwrap();
        assert_eq!(store.rules(G).unwrap().as_deref(), Some("new"), "{name}");
        assert_eq!(store.rule_records().unwrap(), 1, "{name}");
    }
}

#[test]
fn rules_keep_unicode_and_newlines() {
    for (name, store) in rule_backends() {
        let text = "ようこそ！\n1. スパム禁止";
        store.upsert_rules(G, text).unwrap();
        assert_eq!(store.rules(G).unwrap().as_deref(), Some(text), "{name}");
    }
}
