#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Scoreboard system that records final scores and ranks them for listing.

pub mod store;

pub use store::{MemoryStore, ScoreStore};

use std::num::ParseIntError;

use serde::Serialize;
use thiserror::Error;
use torus_snake_core::{Event, ScoreRecord, SCORE_KEY_PREFIX};

/// Pure system that writes one record per game over into a score store.
#[derive(Clone, Debug, Default)]
pub struct Scoreboard {
    last_timestamp: Option<u64>,
}

impl Scoreboard {
    /// Creates a scoreboard that has not recorded anything yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_timestamp: None,
        }
    }

    /// Consumes world events and stores a record for every game over.
    ///
    /// `timestamp_ms` is the caller's wall-clock reading for this batch.
    /// Records never share a key: a timestamp that does not move past the
    /// previous record is bumped by one millisecond.
    pub fn handle<S: ScoreStore>(
        &mut self,
        events: &[Event],
        timestamp_ms: u64,
        store: &mut S,
    ) -> Result<Vec<ScoreRecord>, S::Error> {
        let mut recorded = Vec::new();
        for event in events {
            let Event::GameOver { score, .. } = event else {
                continue;
            };

            let timestamp_ms = match self.last_timestamp {
                Some(last) if timestamp_ms <= last => last.saturating_add(1),
                _ => timestamp_ms,
            };
            let record = ScoreRecord::new(timestamp_ms, *score);
            store.put(record.key(), record.score)?;
            self.last_timestamp = Some(timestamp_ms);
            tracing::debug!(key = %record.key(), score = record.score, "recorded final score");
            recorded.push(record);
        }
        Ok(recorded)
    }
}

/// Order in which the leaderboard lists stored records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RankOrder {
    /// Highest score first; newer records first on ties.
    #[default]
    Score,
    /// Newest record first.
    Recent,
}

/// Stored record together with its position in the listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RankedScore {
    /// One-based position in the listing.
    pub rank: usize,
    /// Wall-clock time of the game over, in milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
    /// Final score of the session.
    pub score: u32,
}

/// Reads every record from the store and ranks it.
///
/// Entries whose keys do not follow the `score_<timestamp_ms>` form are
/// skipped.
#[must_use]
pub fn leaderboard<S: ScoreStore>(store: &S, order: RankOrder) -> Vec<RankedScore> {
    let mut records: Vec<ScoreRecord> = store
        .entries()
        .into_iter()
        .filter_map(|(key, score)| match parse_key(&key) {
            Ok(timestamp_ms) => Some(ScoreRecord::new(timestamp_ms, score)),
            Err(error) => {
                tracing::warn!(%error, "skipping malformed score entry");
                None
            }
        })
        .collect();

    match order {
        RankOrder::Score => records.sort_by(|left, right| {
            right
                .score
                .cmp(&left.score)
                .then(right.timestamp_ms.cmp(&left.timestamp_ms))
        }),
        RankOrder::Recent => {
            records.sort_by(|left, right| right.timestamp_ms.cmp(&left.timestamp_ms));
        }
    }

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| RankedScore {
            rank: index + 1,
            timestamp_ms: record.timestamp_ms,
            score: record.score,
        })
        .collect()
}

/// Extracts the timestamp from a `score_<timestamp_ms>` key.
pub fn parse_key(key: &str) -> Result<u64, ScoreKeyError> {
    let digits = key
        .strip_prefix(SCORE_KEY_PREFIX)
        .ok_or_else(|| ScoreKeyError::MissingPrefix {
            key: key.to_owned(),
        })?;
    digits
        .parse()
        .map_err(|source| ScoreKeyError::InvalidTimestamp {
            key: key.to_owned(),
            source,
        })
}

/// Reasons a stored key cannot be read back as a score record.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ScoreKeyError {
    /// The key does not start with the score prefix.
    #[error("key {key:?} does not start with \"score_\"")]
    MissingPrefix {
        /// Offending key.
        key: String,
    },
    /// The key suffix is not a millisecond timestamp.
    #[error("key {key:?} does not end in a timestamp")]
    InvalidTimestamp {
        /// Offending key.
        key: String,
        /// Parse failure of the suffix.
        source: ParseIntError,
    },
}
