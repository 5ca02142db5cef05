//! Primary-key request envelopes.

use serde::{Deserialize, Serialize};

/// Operation on a single primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Id<T> {
    /// The key itself.
    pub id: T,
}

impl<T> Id<T> {
    /// Wrap a key.
    pub fn new(id: T) -> Self {
        Self { id }
    }
}

/// Operation on a batch of primary keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiId<T> {
    /// The keys, in request order.
    pub ids: Vec<T>,
}

impl<T> MultiId<T> {
    /// Wrap a batch of keys.
    pub fn new(ids: Vec<T>) -> Self {
        Self { ids }
    }

    /// Number of keys in the batch.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the batch carries no keys.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<T: PartialEq> MultiId<T> {
    /// Drop duplicate keys, keeping first occurrences in order.
    pub fn dedup(&mut self) {
        let mut seen: Vec<&T> = Vec::with_capacity(self.ids.len());
        let mut keep = vec![false; self.ids.len()];
        for (index, id) in self.ids.iter().enumerate() {
            if !seen.contains(&id) {
                seen.push(id);
                keep[index] = true;
            }
        }
        let mut index = 0;
        self.ids.retain(|_| {
            let kept = keep[index];
            index += 1;
            kept
        });
    }
}
