// SPDX-License-Identifier: GPL-3.0-only

//! Volume and extent models produced by the utility output parser

use serde::{Deserialize, Serialize};

use crate::PartitionKey;

/// One logical volume reported by the inventory utility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeRecord {
    /// Platform volume identifier (hyphenated hex, without braces)
    pub volume_id: String,

    /// Mount path or drive letter
    pub mount_point: String,

    /// Extents backing this volume, in reported order
    pub extents: Vec<ExtentRecord>,
}

/// One contiguous disk extent backing a volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtentRecord {
    /// Position within the owning volume
    pub extent_id: u32,
    pub disk_id: u32,
    pub offset: u64,
    pub length: u64,
}

impl ExtentRecord {
    /// Address used to join against the partition index
    pub fn partition_key(&self) -> PartitionKey {
        PartitionKey::new(self.disk_id, self.offset)
    }
}
