// SPDX-License-Identifier: GPL-3.0-only

use async_trait::async_trait;

use storage_types::PartitionRecord;

use crate::CollectorError;

/// Enumerates disks and partitions on a target host.
#[async_trait]
pub trait PartitionInventory: Send + Sync {
    async fn list_partitions(&self, host: &str) -> Result<Vec<PartitionRecord>, CollectorError>;
}
