//! Typed records: best score, ranking, settings
//!
//! Loading never fails the caller: a missing record means "fresh start" and a
//! malformed one is logged and replaced by the default.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::KeyValueStore;
use crate::error::Result;
use crate::highscores::{BestScore, Ranking, RankingEntry};

pub const BEST_SCORE_KEY: &str = "sky_hopper_best";
pub const RANKING_KEY: &str = "sky_hopper_ranking";
pub const SETTINGS_KEY: &str = "sky_hopper_settings";

/// Read and decode a record, falling back to `T::default()`
pub fn load_or_default<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    match store.get(key) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Discarding malformed record {key}: {e}");
                T::default()
            }
        },
        Ok(None) => {
            log::info!("No {key} record found, starting fresh");
            T::default()
        }
        Err(e) => {
            log::warn!("Could not read {key}: {e}");
            T::default()
        }
    }
}

/// Encode and write a record
pub fn save<T, S>(store: &mut S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

pub fn load_best<S: KeyValueStore + ?Sized>(store: &S) -> BestScore {
    load_or_default(store, BEST_SCORE_KEY)
}

pub fn save_best<S: KeyValueStore + ?Sized>(store: &mut S, best: BestScore) -> Result<()> {
    save(store, BEST_SCORE_KEY, &best)
}

/// Ranking is stored as a bare JSON array of `{name, score}` objects
pub fn load_ranking<S: KeyValueStore + ?Sized>(store: &S, capacity: usize) -> Ranking {
    let entries: Vec<RankingEntry> = load_or_default(store, RANKING_KEY);
    let ranking = Ranking::from_entries(entries, capacity);
    log::info!("Loaded {} ranking entries", ranking.entries().len());
    ranking
}

pub fn save_ranking<S: KeyValueStore + ?Sized>(store: &mut S, ranking: &Ranking) -> Result<()> {
    save(store, RANKING_KEY, ranking.entries())
}
