// Counting helper behind every "top N" list
//
// Keys are remembered in the order they first show up. The final sort is stable,
// so equal counts stay in first-seen order. Reports depend on that.

use crate::models::{RankedAggregate, RankedEntry};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct CountAccumulator {
    index: HashMap<String, usize>,
    entries: Vec<RankedEntry>,
}

impl CountAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&position) => self.entries[position].count += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push(RankedEntry::new(key, 1));
            }
        }
    }

    /// Number of distinct keys seen so far
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Full ranking, highest count first
    pub fn into_ranked(mut self) -> RankedAggregate {
        // stable: ties keep first-seen order
        self.entries.sort_by(|a, b| b.count.cmp(&a.count));
        self.entries
    }

    /// Ranking cut to the first `n` entries
    pub fn top(self, n: usize) -> RankedAggregate {
        let mut ranked = self.into_ranked();
        ranked.truncate(n);
        ranked
    }
}

impl<'k> FromIterator<&'k str> for CountAccumulator {
    fn from_iter<I: IntoIterator<Item = &'k str>>(iter: I) -> Self {
        let mut acc = Self::new();
        for key in iter {
            acc.add(key);
        }
        acc
    }
}
