// SPDX-License-Identifier: GPL-3.0-only

//! Correlation engine for host storage layout
//!
//! This crate joins three independently collected datasets that share no
//! primary key:
//! - partition inventory, indexed by physical address (`PartitionIndex`)
//! - inventory utility text, parsed into volumes and extents (`parser`)
//! - virtual disk metadata, indexed by normalized identity (`VirtualDiskIndex`)
//!
//! Everything here is synchronous and performs no I/O. Acquiring the inputs
//! is the job of the collaborators in `storage-contracts`.

pub mod address;
pub mod correlate;
pub mod error;
pub mod identity;
pub mod parser;
pub mod partition_index;
pub mod pipeline;
pub mod virtual_disk_index;

pub use address::normalize_scsi_ports;
pub use correlate::correlate;
pub use error::{ExtentFieldError, Result};
pub use identity::{IdentityKey, normalize_identity};
pub use parser::{DiskExtParser, VolumeReportParser};
pub use partition_index::PartitionIndex;
pub use pipeline::{HostInput, HostInventory, correlate_host};
pub use virtual_disk_index::VirtualDiskIndex;
