use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub value: String,
    pub count: u64,
    pub percentage: f64,
}

/// Occurrence counter keyed by label; entries come back label-sorted.
pub struct FrequencyCounter {
    map: BTreeMap<String, u64>,
    total: u64,
}

impl FrequencyCounter {
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
            total: 0,
        }
    }
    pub fn add(&mut self, val: &str) {
        if let Some(c) = self.map.get_mut(val) {
            *c += 1;
        } else {
            self.map.insert(val.to_owned(), 1);
        }
        self.total += 1;
    }
    pub fn total(&self) -> u64 {
        self.total
    }
    pub fn into_entries(self) -> Vec<FrequencyEntry> {
        let total = self.total;
        self.map
            .into_iter()
            .map(|(v, c)| FrequencyEntry {
                percentage: if total > 0 {
                    c as f64 / total as f64 * 100.0
                } else {
                    0.0
                },
                value: v,
                count: c,
            })
            .collect()
    }
}

impl Default for FrequencyCounter {
    fn default() -> Self { Self::new() }
}
