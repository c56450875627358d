// SPDX-License-Identifier: GPL-3.0-only

//! Physical address index over one host's partition inventory.

use std::collections::HashMap;

use storage_types::{PartitionKey, PartitionRecord};

#[derive(Debug, Clone, Default)]
pub struct PartitionIndex {
    by_key: HashMap<PartitionKey, PartitionRecord>,
    duplicates: Vec<PartitionKey>,
}

impl PartitionIndex {
    /// Index partitions by `(disk_id, offset)`.
    ///
    /// A repeated key is a data-integrity problem in the source inventory. The
    /// later record replaces the earlier one, and the key is logged and kept
    /// in `duplicates()` so callers can report it.
    pub fn build(partitions: impl IntoIterator<Item = PartitionRecord>) -> Self {
        let mut by_key = HashMap::new();
        let mut duplicates = Vec::new();

        for partition in partitions {
            let key = partition.key();
            if let Some(previous) = by_key.insert(key, partition) {
                tracing::warn!(
                    "Duplicate partition key {} (serial {:?}); keeping the later record",
                    key,
                    previous.disk_serial_number
                );
                duplicates.push(key);
            }
        }

        Self { by_key, duplicates }
    }

    pub fn get(&self, key: &PartitionKey) -> Option<&PartitionRecord> {
        self.by_key.get(key)
    }

    /// Keys that appeared more than once, in the order the repeats were seen
    pub fn duplicates(&self) -> &[PartitionKey] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
