// SPDX-License-Identifier: GPL-3.0-only

//! Normalized-identity index over one virtual machine's disks.

use std::collections::HashMap;

use storage_types::{VirtualDiskRecord, VirtualMachine};

use crate::identity::{IdentityKey, normalize_identity};

/// Disks of a single matched virtual machine, keyed by normalized UUID.
///
/// Built per host and never shared between hosts.
#[derive(Debug, Clone)]
pub struct VirtualDiskIndex {
    vm_name: String,
    vm_id: String,
    by_key: HashMap<IdentityKey, VirtualDiskRecord>,
}

impl VirtualDiskIndex {
    pub fn build(vm: &VirtualMachine) -> Self {
        let mut by_key = HashMap::with_capacity(vm.disks.len());

        for disk in &vm.disks {
            let key = normalize_identity(&disk.uuid);
            if key.is_empty() {
                tracing::debug!("Virtual disk {:?} of {} has no usable uuid", disk.name, vm.name);
                continue;
            }

            let mut disk = disk.clone();
            disk.normalized_key = key.as_str().to_string();

            if let Some(previous) = by_key.insert(key, disk) {
                tracing::warn!(
                    "Virtual disks {:?} and a later disk of {} share identity {}",
                    previous.name,
                    vm.name,
                    previous.normalized_key
                );
            }
        }

        Self {
            vm_name: vm.name.clone(),
            vm_id: vm.id.clone(),
            by_key,
        }
    }

    pub fn vm_name(&self) -> &str {
        &self.vm_name
    }

    pub fn vm_id(&self) -> &str {
        &self.vm_id
    }

    /// Look up a disk by a raw serial number or UUID in any formatting.
    pub fn lookup(&self, raw_identity: &str) -> Option<&VirtualDiskRecord> {
        let key = normalize_identity(raw_identity);
        if key.is_empty() {
            return None;
        }
        self.by_key.get(&key)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disk(name: &str, uuid: &str) -> VirtualDiskRecord {
        VirtualDiskRecord {
            name: name.to_string(),
            filename: format!("[datastore1] web01/{name}.vmdk"),
            disk_type: "flat".to_string(),
            storage_format: "thin".to_string(),
            uuid: uuid.to_string(),
            normalized_key: String::new(),
        }
    }

    fn vm(disks: Vec<VirtualDiskRecord>) -> VirtualMachine {
        VirtualMachine {
            id: "vm-42".to_string(),
            name: "web01".to_string(),
            guest_hostname: None,
            disks,
        }
    }

    #[test]
    fn matches_serial_with_different_formatting() {
        let index = VirtualDiskIndex::build(&vm(vec![disk(
            "Hard disk 1",
            "6000C29a-1b2c-3d4e-5f60-718293a4b5c6",
        )]));

        let hit = index
            .lookup("6000c29a1b2c3d4e5f60718293a4b5c6")
            .expect("normalized serial matches");
        assert_eq!(hit.name, "Hard disk 1");
        assert_eq!(hit.normalized_key, "6000c29a1b2c3d4e5f60718293a4b5c6");
        assert_eq!(index.vm_name(), "web01");
        assert_eq!(index.vm_id(), "vm-42");
    }

    #[test]
    fn empty_identities_never_match() {
        let index = VirtualDiskIndex::build(&vm(vec![disk("Hard disk 1", " - ")]));
        assert!(index.is_empty());
        assert!(index.lookup("").is_none());
    }

    #[test]
    fn colliding_uuids_keep_later_disk() {
        let index = VirtualDiskIndex::build(&vm(vec![
            disk("Hard disk 1", "AB-CD"),
            disk("Hard disk 2", "ab cd"),
        ]));
        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup("abcd").map(|d| d.name.as_str()), Some("Hard disk 2"));
    }
}
