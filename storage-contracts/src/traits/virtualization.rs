// SPDX-License-Identifier: GPL-3.0-only

use async_trait::async_trait;

use storage_types::VirtualMachine;

use crate::CollectorError;

/// Read-only handle to a virtual-infrastructure connection.
///
/// The caller opens the connection before a batch and closes it afterwards;
/// the batch only borrows it.
#[async_trait]
pub trait VirtualInfrastructure: Send + Sync {
    /// The virtual machine backing `host`, with its disks, if any.
    async fn find_virtual_machine(
        &self,
        host: &str,
    ) -> Result<Option<VirtualMachine>, CollectorError>;
}
