//! Reusable test helpers for deletion workflow tests.
//!
//! Provides a seeded in-memory store and a scripted operator that records
//! every prompt it was shown.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;

use excelpoint_admin::accounts::{Confirm, MemoryAccountStore};
use excelpoint_admin::db::Account;

/// Operator stand-in that answers prompts from a script.
#[derive(Debug, Default)]
pub struct ScriptedConfirm {
    answers: VecDeque<io::Result<String>>,
    pub prompts: Vec<String>,
}

impl ScriptedConfirm {
    /// Answer every prompt with the given responses, in order.
    pub fn answering<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(|a| Ok(a.into())).collect(),
            prompts: Vec::new(),
        }
    }

    /// Fail to read input on the first prompt.
    pub fn broken() -> Self {
        let mut confirm = Self::default();
        confirm.answers.push_back(Err(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "stdin closed",
        )));
        confirm
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&mut self, message: &str) -> io::Result<String> {
        self.prompts.push(message.to_string());
        self.answers
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

/// Store containing `alice` (id 7) with a full set of dependent records and
/// `carol` (id 9) with a profile of her own.
pub fn seeded_store() -> (MemoryAccountStore, Account, Account) {
    let store = MemoryAccountStore::new();

    let alice = store.insert_with_id(7, "alice");
    store.set_profile(alice.id, Some("avatars/7/alice.png"));
    store.add_education(alice.id, 2);
    store.add_certifications(alice.id, 1);
    store.add_achievements(alice.id, 3);

    let carol = store.insert_with_id(9, "carol");
    store.set_profile(carol.id, None);
    store.add_education(carol.id, 1);

    (store, alice, carol)
}
