//! Flat key-value storage for final scores.

use std::{collections::BTreeMap, convert::Infallible};

/// Flat namespace of integer scores keyed by string.
///
/// Implementations decide where entries live; the scoreboard only ever
/// writes `score_<timestamp_ms>` keys and reads every entry back.
pub trait ScoreStore {
    /// Failure raised by the backing storage.
    type Error: std::error::Error;

    /// Stores `score` under `key`, replacing any previous value.
    fn put(&mut self, key: String, score: u32) -> Result<(), Self::Error>;

    /// Returns every stored entry.
    fn entries(&self) -> Vec<(String, u32)>;
}

/// Score store held entirely in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, u32>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether nothing has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Score stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<u32> {
        self.entries.get(key).copied()
    }
}

impl ScoreStore for MemoryStore {
    type Error = Infallible;

    fn put(&mut self, key: String, score: u32) -> Result<(), Self::Error> {
        let _ = self.entries.insert(key, score);
        Ok(())
    }

    fn entries(&self) -> Vec<(String, u32)> {
        self.entries
            .iter()
            .map(|(key, score)| (key.clone(), *score))
            .collect()
    }
}
