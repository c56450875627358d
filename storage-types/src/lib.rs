// SPDX-License-Identifier: GPL-3.0-only

//! Canonical data models for storage layout correlation
//!
//! These types are shared by every layer of the workspace:
//!
//! - **storage-contracts**: collaborator traits return these types
//! - **storage-correlate**: the engine indexes, parses and joins them
//! - **storage-inventory**: the batch runner serializes them for output
//!
//! ## Inputs
//! - `PartitionRecord` → one physical partition as seen by the host OS
//! - `VirtualMachine` / `VirtualDiskRecord` → virtualization platform view
//!
//! ## Intermediate
//! - `VolumeRecord` / `ExtentRecord` → parsed utility output
//!
//! ## Output
//! - `OutputRecord` → one fully typed row per extent, optional joins as `Option`

pub mod common;
pub mod output;
pub mod partition;
pub mod virtual_disk;
pub mod volume;

pub use common::bytes_to_pretty;
pub use output::{CorrelationSummary, OutputRecord, summarize_records};
pub use partition::{PartitionKey, PartitionRecord};
pub use virtual_disk::{VirtualDiskRecord, VirtualMachine};
pub use volume::{ExtentRecord, VolumeRecord};
