// SPDX-License-Identifier: GPL-3.0-only

pub mod extents;
pub mod inventory;
pub mod virtualization;

pub use extents::ExtentReportSource;
pub use inventory::PartitionInventory;
pub use virtualization::VirtualInfrastructure;
