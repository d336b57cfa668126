//! Hash index from join key to geometry record positions.

use std::collections::HashMap;

use crate::ir::{GeometryRecord, JoinKey};

/// Maps each join key to every record position carrying it.
///
/// Positions are kept in record order and duplicates are retained: a region
/// stored as several shapefile entries under one key (islands, for example)
/// resolves to all of them.
#[derive(Clone, Debug, Default)]
pub struct KeyIndex {
    positions: HashMap<JoinKey, Vec<usize>>,
    /// Distinct keys in order of first appearance.
    order: Vec<JoinKey>,
}

impl KeyIndex {
    /// Builds the index in one pass over `records`.
    pub fn build(records: &[GeometryRecord]) -> Self {
        let mut index = Self {
            positions: HashMap::with_capacity(records.len()),
            order: Vec::new(),
        };

        for (pos, record) in records.iter().enumerate() {
            match index.positions.get_mut(&record.key) {
                Some(existing) => existing.push(pos),
                None => {
                    index.positions.insert(record.key.clone(), vec![pos]);
                    index.order.push(record.key.clone());
                }
            }
        }

        index
    }

    /// Record positions for `key`, or an empty slice if it is absent.
    pub fn lookup(&self, key: &JoinKey) -> &[usize] {
        self.positions.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Distinct keys in order of first appearance.
    pub fn keys(&self) -> impl Iterator<Item = &JoinKey> {
        self.order.iter()
    }

    /// Keys carried by more than one record, in order of first appearance.
    pub fn duplicate_keys(&self) -> impl Iterator<Item = &JoinKey> {
        self.order
            .iter()
            .filter(move |key| self.lookup(key).len() > 1)
    }
}
