// SPDX-License-Identifier: GPL-3.0-only

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use storage_contracts::{CollectorError, VirtualInfrastructure};
use storage_types::VirtualMachine;

use crate::errors::{InventoryError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct VirtualInventoryFile {
    #[serde(default)]
    virtual_machines: Vec<VirtualMachine>,
}

/// Virtual machines exported from the virtual infrastructure, held in memory
/// for the duration of a batch.
#[derive(Debug, Clone, Default)]
pub struct SnapshotVirtualInfrastructure {
    machines: Vec<VirtualMachine>,
}

impl SnapshotVirtualInfrastructure {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|error| InventoryError::VirtualInventory {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?;

        let file: VirtualInventoryFile =
            serde_json::from_str(&raw).map_err(|error| InventoryError::VirtualInventory {
                path: path.to_path_buf(),
                reason: error.to_string(),
            })?;

        tracing::info!(
            "Loaded {} virtual machines from {}",
            file.virtual_machines.len(),
            path.display()
        );

        Ok(Self::from_machines(file.virtual_machines))
    }

    pub fn from_machines(machines: Vec<VirtualMachine>) -> Self {
        Self { machines }
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }
}

#[async_trait]
impl VirtualInfrastructure for SnapshotVirtualInfrastructure {
    async fn find_virtual_machine(
        &self,
        host: &str,
    ) -> std::result::Result<Option<VirtualMachine>, CollectorError> {
        Ok(find_matching_vm(&self.machines, host).cloned())
    }
}

fn short_name(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

fn names(vm: &VirtualMachine) -> impl Iterator<Item = &str> {
    std::iter::once(vm.name.as_str()).chain(vm.guest_hostname.as_deref())
}

/// Pick the virtual machine backing `host`.
///
/// A case-insensitive match on the VM name or guest hostname wins. Failing
/// that, short names (first DNS label) are compared, and only a single
/// candidate is accepted.
pub fn find_matching_vm<'a>(machines: &'a [VirtualMachine], host: &str) -> Option<&'a VirtualMachine> {
    if let Some(vm) = machines
        .iter()
        .find(|vm| names(vm).any(|name| name.eq_ignore_ascii_case(host)))
    {
        return Some(vm);
    }

    let host_short = short_name(host);
    let mut candidates = machines.iter().filter(|vm| {
        names(vm).any(|name| short_name(name).eq_ignore_ascii_case(host_short))
    });

    let first = candidates.next()?;
    if candidates.next().is_some() {
        tracing::warn!(
            "Several virtual machines match {} by short name; skipping virtual disk correlation",
            host
        );
        return None;
    }

    Some(first)
}
