// SPDX-License-Identifier: GPL-3.0-only

//! SCSI address rebasing.
//!
//! The host OS numbers SCSI ports from an arbitrary starting point while the
//! virtualization platform numbers controllers from zero. Subtracting the
//! host's own minimum port puts both in the same address space.

use storage_types::PartitionRecord;

/// Rebase `scsi_port` so the smallest port on this host becomes 0.
///
/// Returns the subtracted base, or `None` for an empty inventory.
/// The minimum is host-local; call once per host.
pub fn normalize_scsi_ports(partitions: &mut [PartitionRecord]) -> Option<u32> {
    let base = partitions.iter().map(|p| p.scsi_port).min()?;

    for partition in partitions.iter_mut() {
        partition.scsi_port -= base;
    }

    Some(base)
}
