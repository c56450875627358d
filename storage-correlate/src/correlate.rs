// SPDX-License-Identifier: GPL-3.0-only

//! Joins parsed extents to partitions and virtual disks.

use storage_types::{ExtentRecord, OutputRecord, PartitionRecord, VirtualDiskRecord, VolumeRecord};

use crate::{PartitionIndex, VirtualDiskIndex};

/// Produce one output row per extent, in volume then extent order.
///
/// Misses are normal: partition and extent inventories are taken at slightly
/// different instants, and the virtual infrastructure may not know the disk.
/// A miss leaves the corresponding fields `None`.
pub fn correlate(
    host: &str,
    volumes: &[VolumeRecord],
    partitions: &PartitionIndex,
    virtual_disks: Option<&VirtualDiskIndex>,
) -> Vec<OutputRecord> {
    let mut records = Vec::with_capacity(volumes.iter().map(|v| v.extents.len()).sum());

    for volume in volumes {
        for extent in &volume.extents {
            let mut record = base_record(host, volume, extent);

            match partitions.get(&extent.partition_key()) {
                Some(partition) => apply_partition(&mut record, partition),
                None => tracing::debug!(
                    "No partition at {} for volume {} on {}",
                    extent.partition_key(),
                    volume.volume_id,
                    host
                ),
            }

            if let Some(index) = virtual_disks {
                let hit = record
                    .disk_serial_number
                    .as_deref()
                    .and_then(|serial| index.lookup(serial));
                if let Some(disk) = hit {
                    apply_virtual_disk(&mut record, index, disk);
                }
            }

            records.push(record);
        }
    }

    records
}

fn base_record(host: &str, volume: &VolumeRecord, extent: &ExtentRecord) -> OutputRecord {
    OutputRecord {
        host: host.to_string(),
        mount_point: volume.mount_point.clone(),
        volume_id: volume.volume_id.clone(),
        extent_id: extent.extent_id,
        disk_id: extent.disk_id,
        extent_offset: extent.offset,
        extent_size: extent.length,
        ..Default::default()
    }
}

fn apply_partition(record: &mut OutputRecord, partition: &PartitionRecord) {
    record.disk_size = Some(partition.disk_size);
    record.partition_size = Some(partition.partition_size);
    record.disk_serial_number = Some(partition.disk_serial_number.clone());
    record.scsi_bus = Some(partition.scsi_bus);
    record.scsi_logical_unit = Some(partition.scsi_logical_unit);
    record.scsi_controller = Some(partition.scsi_port);
    record.scsi_controller_port = Some(partition.scsi_target_id);
}

fn apply_virtual_disk(record: &mut OutputRecord, index: &VirtualDiskIndex, disk: &VirtualDiskRecord) {
    record.vm_name = Some(index.vm_name().to_string());
    record.vm_id = Some(index.vm_id().to_string());
    record.vdisk_name = Some(disk.name.clone());
    record.vdisk_filename = Some(disk.filename.clone());
    record.vdisk_type = Some(disk.disk_type.clone());
    record.vdisk_storage_format = Some(disk.storage_format.clone());
    record.vdisk_uuid = Some(disk.uuid.clone());
    record.vdisk_key = Some(disk.normalized_key.clone());
}
