// SPDX-License-Identifier: GPL-3.0-only

//! Inventory utility output parsing.
//!
//! The grammar is two-stage: the blob is split into volume blocks, and each
//! block's body is split into extent lines. Implementations may use any
//! technique as long as they follow the rules documented on
//! [`VolumeReportParser`].

pub mod diskext;

use storage_types::VolumeRecord;

pub use diskext::DiskExtParser;

/// Turns the utility's concatenated stdout for one host into volume records.
///
/// Rules every implementation follows:
/// - one `VolumeRecord` per block whose header matches, in input order
/// - blocks with an unrecognised header are dropped without error
/// - extent lines that do not match, or carry a negative or non-numeric
///   field, are dropped; their siblings are kept
/// - a volume whose block holds no valid extent is still returned
pub trait VolumeReportParser: Send + Sync {
    fn parse(&self, report: &str) -> Vec<VolumeRecord>;
}
