// SPDX-License-Identifier: GPL-3.0-only

//! Full correlation pass for a single host.

use serde::{Deserialize, Serialize};
use storage_types::{
    CorrelationSummary, OutputRecord, PartitionRecord, VirtualMachine, summarize_records,
};

use crate::{
    PartitionIndex, VirtualDiskIndex, VolumeReportParser, correlate, normalize_scsi_ports,
};

/// Everything collected for one host before correlation
#[derive(Debug, Clone)]
pub struct HostInput {
    pub host: String,
    pub partitions: Vec<PartitionRecord>,
    /// Raw stdout of the inventory utility
    pub extent_report: String,
    /// Virtual machine matched to this host, when virtual data was requested
    pub virtual_machine: Option<VirtualMachine>,
}

/// Correlated result for one host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostInventory {
    pub host: String,
    pub virtual_machine: Option<String>,
    pub records: Vec<OutputRecord>,
    pub summary: CorrelationSummary,
}

/// Normalize, index, parse and join one host's inputs.
///
/// Consumes the input so nothing built here outlives the host.
pub fn correlate_host(input: HostInput, parser: &dyn VolumeReportParser) -> HostInventory {
    let HostInput {
        host,
        mut partitions,
        extent_report,
        virtual_machine,
    } = input;

    let scsi_port_base = normalize_scsi_ports(&mut partitions);
    let partition_index = PartitionIndex::build(partitions);
    let volumes = parser.parse(&extent_report);
    let virtual_disks = virtual_machine.as_ref().map(VirtualDiskIndex::build);

    let records = correlate(&host, &volumes, &partition_index, virtual_disks.as_ref());

    let mut summary = summarize_records(&volumes, &records);
    summary.duplicate_partition_keys = partition_index.duplicates().to_vec();
    summary.scsi_port_base = scsi_port_base;

    tracing::info!(
        "{}: {} volumes, {} extents, {} partition matches, {} virtual disk matches",
        host,
        summary.volume_count,
        summary.extent_count,
        summary.partition_matches,
        summary.virtual_disk_matches
    );

    HostInventory {
        host,
        virtual_machine: virtual_machine.map(|vm| vm.name),
        records,
        summary,
    }
}
