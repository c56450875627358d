// SPDX-License-Identifier: GPL-3.0-only

//! Contracts between the correlation batch and its external collaborators.
//!
//! Remote inventory, remote execution of the inventory utility, and
//! virtual-infrastructure queries all happen behind these traits. Connection
//! and credential handling belong to the implementor.

pub mod protocol;
pub mod traits;

pub use protocol::{CollectorError, CollectorErrorKind};
pub use traits::{ExtentReportSource, PartitionInventory, VirtualInfrastructure};
