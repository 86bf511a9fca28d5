use crate::model::price::Price;
use crate::preprocessing::RecordKey;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

#[derive(Default)]
struct Entries {
    prices: HashMap<RecordKey, Price>,
    // insertion order, oldest first
    order: VecDeque<RecordKey>,
}

/// Bounded memo of successful predictions, keyed by the full input record.
/// Evicts the oldest entry once full.
pub struct PredictionCache {
    capacity: usize,
    entries: Mutex<Entries>,
}

impl PredictionCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(Entries::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, key: &RecordKey) -> Option<Price> {
        let entries = self.entries.lock().ok()?;
        entries.prices.get(key).copied()
    }

    pub fn insert(&self, key: RecordKey, price: Price) {
        if self.capacity == 0 {
            return;
        }
        // A poisoned cache is simply skipped; it never affects the result.
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };
        if entries.prices.insert(key.clone(), price).is_some() {
            return;
        }
        entries.order.push_back(key);
        while entries.order.len() > self.capacity {
            if let Some(oldest) = entries.order.pop_front() {
                entries.prices.remove(&oldest);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.prices.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
