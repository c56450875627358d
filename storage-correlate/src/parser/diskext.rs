// SPDX-License-Identifier: GPL-3.0-only

//! Regex parser for `diskext`-style volume extent reports.
//!
//! ```text
//! Volume: \\?\Volume{2f1d3c4a-0000-0000-0000-100000000000}\
//!     Mounted at: D:\
//!     Extent [0]: Disk: 1 Offset: 1048576 Length: 10736369664
//! ```

use std::sync::LazyLock;

use regex::{Captures, Regex};
use storage_types::{ExtentRecord, VolumeRecord};

use super::VolumeReportParser;
use crate::{ExtentFieldError, Result};

const VOLUME_MARKER: &str = "Volume:";
const EXTENT_MARKER: &str = "Extent";

static HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*\S*?Volume\{(?P<id>[0-9A-Fa-f]+(?:-[0-9A-Fa-f]+)*)\}\S*\s+Mounted at:[ \t]*(?P<mount>[^\r\n]*)",
    )
    .expect("volume header pattern is valid")
});

static EXTENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*\[\s*(?P<index>[^\]\s]+)\s*\]\s*:\s*Disk:\s*(?P<disk>\S+)\s+Offset:\s*(?P<offset>\S+)\s+Length:\s*(?P<length>\S+)",
    )
    .expect("extent pattern is valid")
});

#[derive(Debug, Clone, Copy, Default)]
pub struct DiskExtParser;

impl DiskExtParser {
    pub fn new() -> Self {
        Self
    }

    fn parse_volume(chunk: &str) -> Option<VolumeRecord> {
        let Some(header) = HEADER_PATTERN.captures(chunk) else {
            if !chunk.trim().is_empty() {
                tracing::trace!("Skipping text without a volume header: {:?}", chunk.trim());
            }
            return None;
        };

        let volume_id = header["id"].to_string();
        let mount_point = header["mount"].trim().to_string();
        let body = &chunk[header.get(0).map_or(0, |m| m.end())..];

        let extents = body
            .split(EXTENT_MARKER)
            .filter_map(|line| match Self::parse_extent(line)? {
                Ok(extent) => Some(extent),
                Err(e) => {
                    tracing::debug!("Dropping extent of volume {}: {}", volume_id, e);
                    None
                }
            })
            .collect();

        Some(VolumeRecord {
            volume_id,
            mount_point,
            extents,
        })
    }

    /// `None` when the text is not an extent line at all.
    fn parse_extent(line: &str) -> Option<Result<ExtentRecord>> {
        let captures = EXTENT_PATTERN.captures(line)?;
        Some(extent_from_captures(&captures))
    }
}

impl VolumeReportParser for DiskExtParser {
    fn parse(&self, report: &str) -> Vec<VolumeRecord> {
        report
            .split(VOLUME_MARKER)
            .filter_map(Self::parse_volume)
            .collect()
    }
}

fn extent_from_captures(captures: &Captures<'_>) -> Result<ExtentRecord> {
    let index = non_negative("extent index", &captures["index"])?;
    let disk = non_negative("disk", &captures["disk"])?;
    let offset = non_negative("offset", &captures["offset"])?;
    let length = non_negative("length", &captures["length"])?;

    Ok(ExtentRecord {
        extent_id: narrow("extent index", index)?,
        disk_id: narrow("disk", disk)?,
        offset: offset as u64,
        length: length as u64,
    })
}

fn non_negative(field: &'static str, raw: &str) -> Result<i64> {
    let value: i64 = raw.parse().map_err(|_| ExtentFieldError::NotNumeric {
        field,
        value: raw.to_string(),
    })?;

    if value < 0 {
        return Err(ExtentFieldError::Negative { field, value });
    }

    Ok(value)
}

fn narrow(field: &'static str, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| ExtentFieldError::OutOfRange { field, value })
}
