//! Prediction Cache
//!
//! The user's predictions are numbered `0..len` on the ledger but fetched
//! lazily, a page or a scan batch at a time. The cache maps ids to the
//! predictions fetched so far and tells "not fetched yet" apart from "no
//! such prediction".

use std::collections::BTreeMap;

use crate::state::UserPrediction;

/// Result of a cache lookup
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CacheLookup<'a> {
    Loaded(&'a UserPrediction),
    /// Id exists on the ledger but has not been fetched
    NotFetched,
    /// Id is past the user's prediction count
    OutOfRange,
}

#[derive(Clone, Debug, Default)]
pub struct PredictionCache {
    entries: BTreeMap<u64, UserPrediction>,
    len: u64,
}

impl PredictionCache {
    pub fn new(len: u64) -> Self {
        Self {
            entries: BTreeMap::new(),
            len,
        }
    }

    /// Number of predictions the user has on the ledger
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of predictions fetched so far
    pub fn loaded(&self) -> usize {
        self.entries.len()
    }

    /// Change the ledger count, dropping entries past the new end
    pub fn resize(&mut self, len: u64) {
        self.entries.retain(|&id, _| id < len);
        self.len = len;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn lookup(&self, id: u64) -> CacheLookup<'_> {
        if id >= self.len {
            return CacheLookup::OutOfRange;
        }
        match self.entries.get(&id) {
            Some(prediction) => CacheLookup::Loaded(prediction),
            None => CacheLookup::NotFetched,
        }
    }

    pub fn get(&self, id: u64) -> Option<&UserPrediction> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut UserPrediction> {
        self.entries.get_mut(&id)
    }

    /// Store a fetched prediction; ids past the end are ignored
    pub fn insert(&mut self, prediction: UserPrediction) -> bool {
        if prediction.prediction_id >= self.len {
            return false;
        }
        self.entries.insert(prediction.prediction_id, prediction);
        true
    }

    /// Ids among `ids` that still need fetching
    pub fn missing(&self, ids: &[u64]) -> Vec<u64> {
        ids.iter()
            .copied()
            .filter(|id| matches!(self.lookup(*id), CacheLookup::NotFetched))
            .collect()
    }

    /// Loaded predictions among `ids`, in the order given
    pub fn collect(&self, ids: &[u64]) -> Vec<UserPrediction> {
        ids.iter().filter_map(|id| self.entries.get(id).copied()).collect()
    }

    /// Loaded predictions in id order
    pub fn iter(&self) -> impl Iterator<Item = &UserPrediction> {
        self.entries.values()
    }

    /// Mirror the ledger's removal of prediction `id`: the last prediction
    /// takes its id and the count shrinks by one
    pub fn swap_remove(&mut self, id: u64) -> bool {
        if id >= self.len {
            return false;
        }
        let last = self.len - 1;

        let moved = self.entries.remove(&last);
        self.entries.remove(&id);
        if id != last {
            if let Some(mut prediction) = moved {
                prediction.prediction_id = id;
                self.entries.insert(id, prediction);
            }
        }

        self.len = last;
        true
    }
}
