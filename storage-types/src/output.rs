// SPDX-License-Identifier: GPL-3.0-only

//! Correlated output rows and their per-host summary

use serde::{Deserialize, Serialize};

use crate::{PartitionKey, VolumeRecord};

/// One correlated extent: the volume, its physical partition and, when the
/// virtual infrastructure matched, the backing virtual disk.
///
/// Every field exists from construction; joins that missed are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutputRecord {
    // === Volume ===
    pub host: String,
    pub mount_point: String,
    pub volume_id: String,

    // === Extent ===
    pub extent_id: u32,
    pub disk_id: u32,
    pub extent_offset: u64,
    pub extent_size: u64,

    // === Partition join ===
    pub disk_size: Option<u64>,
    pub partition_size: Option<u64>,
    pub disk_serial_number: Option<String>,
    pub scsi_bus: Option<u32>,
    pub scsi_logical_unit: Option<u32>,
    /// Rebased host SCSI port, aligned with the platform's controller number
    pub scsi_controller: Option<u32>,
    /// Host SCSI target ID, aligned with the platform's controller port
    pub scsi_controller_port: Option<u32>,

    // === Virtual disk join ===
    pub vm_name: Option<String>,
    pub vm_id: Option<String>,
    pub vdisk_name: Option<String>,
    pub vdisk_filename: Option<String>,
    pub vdisk_type: Option<String>,
    pub vdisk_storage_format: Option<String>,
    pub vdisk_uuid: Option<String>,
    pub vdisk_key: Option<String>,
}

impl OutputRecord {
    pub fn has_partition(&self) -> bool {
        self.disk_size.is_some()
    }

    pub fn has_virtual_disk(&self) -> bool {
        self.vdisk_uuid.is_some()
    }
}

/// Aggregate counters for one host's correlation pass
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CorrelationSummary {
    pub volume_count: usize,
    /// Volumes reported with no parseable extent
    pub empty_volume_count: usize,
    pub extent_count: usize,
    pub partition_matches: usize,
    pub virtual_disk_matches: usize,
    /// Partition keys seen more than once in the inventory
    pub duplicate_partition_keys: Vec<PartitionKey>,
    /// Minimum host SCSI port subtracted during normalization
    pub scsi_port_base: Option<u32>,
}

pub fn summarize_records(volumes: &[VolumeRecord], records: &[OutputRecord]) -> CorrelationSummary {
    let mut summary = CorrelationSummary {
        volume_count: volumes.len(),
        extent_count: records.len(),
        ..Default::default()
    };

    summary.empty_volume_count = volumes.iter().filter(|v| v.extents.is_empty()).count();

    for record in records {
        if record.has_partition() {
            summary.partition_matches += 1;
        }
        if record.has_virtual_disk() {
            summary.virtual_disk_matches += 1;
        }
    }

    summary
}
