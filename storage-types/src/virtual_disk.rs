// SPDX-License-Identifier: GPL-3.0-only

//! Virtualization platform models
//!
//! A `VirtualMachine` is the platform's record of a guest; its `disks` are the
//! virtual disk files attached to it.

use serde::{Deserialize, Serialize};

/// One virtual machine as reported by the virtual infrastructure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualMachine {
    /// Platform-issued identity (e.g. a managed object reference)
    pub id: String,

    /// Display name in the inventory
    pub name: String,

    /// Hostname reported by the guest tools, when available
    #[serde(default)]
    pub guest_hostname: Option<String>,

    #[serde(default)]
    pub disks: Vec<VirtualDiskRecord>,
}

/// One virtual disk attached to a virtual machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualDiskRecord {
    /// Display name (e.g. "Hard disk 2")
    pub name: String,

    /// Backing file path on the datastore
    pub filename: String,

    pub disk_type: String,
    pub storage_format: String,

    /// Platform-issued disk identity, hyphenated
    pub uuid: String,

    /// Comparison key derived from `uuid`; filled in when the disk is indexed
    #[serde(default, skip_deserializing)]
    pub normalized_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_key_is_never_read_from_input() {
        let vm: VirtualMachine = serde_json::from_str(
            r#"{
                "id": "vm-101",
                "name": "web01",
                "disks": [{
                    "name": "Hard disk 1",
                    "filename": "[ds1] web01/web01.vmdk",
                    "disk_type": "flat",
                    "storage_format": "thin",
                    "uuid": "6000C29A-1234",
                    "normalized_key": "spoofed"
                }]
            }"#,
        )
        .expect("decode vm");

        assert_eq!(vm.guest_hostname, None);
        assert_eq!(vm.disks.len(), 1);
        assert!(vm.disks[0].normalized_key.is_empty());
    }
}
