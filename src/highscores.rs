//! Best score and ranking leaderboard
//!
//! Both records are persisted through a `KeyValueStore`; the ranking keeps the
//! top N entries (5 by default) sorted by score, ties in submission order.

use serde::{Deserialize, Serialize};

use crate::error::{HopperError, Result};

/// Default number of ranking entries to keep
pub const DEFAULT_RANKING_CAPACITY: usize = 5;

/// The single best score across runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BestScore(pub u32);

impl BestScore {
    /// Raise the record if `score` beats it. Returns true if it changed.
    pub fn update(&mut self, score: u32) -> bool {
        if score > self.0 {
            self.0 = score;
            true
        } else {
            false
        }
    }
}

/// What to do when a ranking name is blank after trimming
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BlankNamePolicy {
    /// Refuse the submission so the caller can re-prompt
    #[default]
    Reject,
    /// Record the entry under this name instead
    Substitute(String),
}

impl BlankNamePolicy {
    /// Resolve a raw name to the one that will be stored
    pub fn resolve(&self, raw: &str) -> Result<String> {
        let name = raw.trim();
        if !name.is_empty() {
            return Ok(name.to_string());
        }
        match self {
            BlankNamePolicy::Reject => Err(HopperError::BlankName),
            BlankNamePolicy::Substitute(default) => Ok(default.clone()),
        }
    }
}

/// A single ranking entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    pub score: u32,
}

/// Bounded leaderboard, sorted descending by score
#[derive(Debug, Clone)]
pub struct Ranking {
    entries: Vec<RankingEntry>,
    capacity: usize,
}

impl Default for Ranking {
    fn default() -> Self {
        Self::new(DEFAULT_RANKING_CAPACITY)
    }
}

impl Ranking {
    /// Create an empty leaderboard
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Rebuild from stored entries, restoring order and bound
    pub fn from_entries(mut entries: Vec<RankingEntry>, capacity: usize) -> Self {
        // Stable: equal scores keep their stored order
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(capacity);
        Self { entries, capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current entries, best first
    pub fn entries(&self) -> &[RankingEntry] {
        &self.entries
    }

    /// Check if a score would make it onto the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.entries.len() < self.capacity {
            return true;
        }
        // Must strictly beat the lowest entry: ties rank after existing ones
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add an entry. The name is validated before anything is touched.
    /// Returns the rank achieved (1-indexed), or None if it fell off the end.
    pub fn submit(&mut self, name: &str, score: u32, policy: &BlankNamePolicy) -> Result<Option<usize>> {
        let name = policy.resolve(name)?;
        let entry = RankingEntry { name, score };

        // Insert after every entry with an equal or higher score
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(self.capacity);

        Ok((pos < self.capacity).then_some(pos + 1))
    }
}
