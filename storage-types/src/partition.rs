// SPDX-License-Identifier: GPL-3.0-only

//! Partition inventory models
//!
//! One `PartitionRecord` per physical partition, as enumerated by the host OS.

use serde::{Deserialize, Serialize};

/// Physical address of a partition: disk enumeration index plus byte offset.
///
/// Unique within one host's inventory snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartitionKey {
    pub disk_id: u32,
    pub offset: u64,
}

impl PartitionKey {
    pub fn new(disk_id: u32, offset: u64) -> Self {
        Self { disk_id, offset }
    }
}

impl std::fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "disk {} @ {}", self.disk_id, self.offset)
    }
}

/// Host-side view of one disk partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionRecord {
    // === Address ===
    /// Disk enumeration index on the host
    pub disk_id: u32,

    /// Byte offset of the partition start
    pub offset: u64,

    // === Sizes ===
    /// Total size of the owning disk in bytes
    pub disk_size: u64,

    /// Partition size in bytes
    pub partition_size: u64,

    /// Disk serial number, verbatim from the host OS
    #[serde(default)]
    pub disk_serial_number: String,

    // === SCSI addressing (host-OS relative) ===
    pub scsi_bus: u32,
    pub scsi_logical_unit: u32,
    /// SCSI port; rebased to zero per host before correlation
    pub scsi_port: u32,
    pub scsi_target_id: u32,
}

impl PartitionRecord {
    pub fn key(&self) -> PartitionKey {
        PartitionKey::new(self.disk_id, self.offset)
    }
}
