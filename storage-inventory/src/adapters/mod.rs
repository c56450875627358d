// SPDX-License-Identifier: GPL-3.0-only

//! File-backed collaborators.
//!
//! These read inventory captured ahead of time instead of querying hosts, so
//! a batch can be correlated offline or replayed.

pub mod snapshot;
pub mod virtual_inventory;

pub use snapshot::{EXTENTS_FILE, PARTITIONS_FILE, SnapshotDirectory};
pub use virtual_inventory::{SnapshotVirtualInfrastructure, find_matching_vm};
