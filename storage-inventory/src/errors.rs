// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use storage_contracts::CollectorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("config not found: {path:?}")]
    ConfigNotFound { path: PathBuf },
    #[error("invalid config {path:?}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },
    #[error("virtual inventory unreadable {path:?}: {reason}")]
    VirtualInventory { path: PathBuf, reason: String },
    #[error("report encoding failed: {reason}")]
    Output { reason: String },
}

pub type Result<T> = std::result::Result<T, InventoryError>;

/// Failure that aborts correlation of a single host.
///
/// Other hosts in the batch are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "stage", content = "cause", rename_all = "snake_case")]
pub enum HostError {
    #[error("partition inventory failed: {0}")]
    PartitionInventory(CollectorError),
    #[error("extent report failed: {0}")]
    ExtentReport(CollectorError),
}
