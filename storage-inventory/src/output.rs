// SPDX-License-Identifier: GPL-3.0-only

use std::fmt::Write;

use storage_types::{OutputRecord, bytes_to_pretty};

use crate::batch::{BatchReport, HostOutcome};
use crate::config::OutputFormat;
use crate::errors::{InventoryError, Result};

pub fn render(report: &BatchReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report).map_err(encoding_error),
        OutputFormat::Jsonl => render_lines(report),
        OutputFormat::Table => Ok(render_table(report)),
    }
}

fn encoding_error(error: serde_json::Error) -> InventoryError {
    InventoryError::Output {
        reason: error.to_string(),
    }
}

/// Records only; failed hosts are reported through the log.
fn render_lines(report: &BatchReport) -> Result<String> {
    let mut out = String::new();
    for record in report.inventories().flat_map(|inventory| &inventory.records) {
        out.push_str(&serde_json::to_string(record).map_err(encoding_error)?);
        out.push('\n');
    }
    Ok(out)
}

fn render_table(report: &BatchReport) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<16} {:<12} {:>4} {:>12} {:>12} {:<24} {:<4} {}",
        "HOST", "MOUNT", "DISK", "OFFSET", "SIZE", "SERIAL", "SCSI", "VIRTUAL DISK"
    );
    let _ = writeln!(out, "{}", "-".repeat(100));

    for host in &report.hosts {
        match &host.outcome {
            HostOutcome::Completed { inventory } => {
                for record in &inventory.records {
                    let _ = writeln!(out, "{}", table_row(record));
                }
            }
            HostOutcome::Failed { error } => {
                let _ = writeln!(out, "{:<16} FAILED: {}", host.host, error);
            }
        }
    }

    let _ = writeln!(out);
    for inventory in report.inventories() {
        let summary = &inventory.summary;
        let _ = writeln!(
            out,
            "{}: volumes={} empty_volumes={} extents={} partition_matches={} virtual_disk_matches={} duplicate_keys={}",
            inventory.host,
            summary.volume_count,
            summary.empty_volume_count,
            summary.extent_count,
            summary.partition_matches,
            summary.virtual_disk_matches,
            summary.duplicate_partition_keys.len()
        );
    }

    out
}

fn table_row(record: &OutputRecord) -> String {
    let scsi = match (record.scsi_controller, record.scsi_controller_port) {
        (Some(controller), Some(port)) => format!("{controller}:{port}"),
        _ => "-".to_string(),
    };
    let virtual_disk = match (&record.vdisk_name, &record.vdisk_filename) {
        (Some(name), Some(filename)) => format!("{name} {filename}"),
        _ => "-".to_string(),
    };

    format!(
        "{:<16} {:<12} {:>4} {:>12} {:>12} {:<24} {:<4} {}",
        record.host,
        record.mount_point,
        record.disk_id,
        record.extent_offset,
        bytes_to_pretty(record.extent_size, false),
        record.disk_serial_number.as_deref().unwrap_or("-"),
        scsi,
        virtual_disk
    )
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use storage_contracts::{CollectorError, CollectorErrorKind};
    use storage_correlate::HostInventory;
    use storage_types::CorrelationSummary;

    use super::*;
    use crate::batch::HostReport;
    use crate::errors::HostError;

    fn report() -> BatchReport {
        let record = OutputRecord {
            host: "web01".to_string(),
            mount_point: "D:\\".to_string(),
            volume_id: "aaaa-bbbb".to_string(),
            extent_size: 524_288,
            disk_serial_number: Some("ABC-123".to_string()),
            scsi_controller: Some(0),
            scsi_controller_port: Some(1),
            ..Default::default()
        };

        BatchReport {
            generated_at: Utc::now(),
            hosts: vec![
                HostReport {
                    host: "web01".to_string(),
                    outcome: HostOutcome::Completed {
                        inventory: HostInventory {
                            host: "web01".to_string(),
                            virtual_machine: None,
                            records: vec![record],
                            summary: CorrelationSummary {
                                volume_count: 1,
                                extent_count: 1,
                                partition_matches: 1,
                                ..Default::default()
                            },
                        },
                    },
                },
                HostReport {
                    host: "db01".to_string(),
                    outcome: HostOutcome::Failed {
                        error: HostError::ExtentReport(CollectorError::new(
                            CollectorErrorKind::CommandFailed,
                            "diskext exited 1",
                        )),
                    },
                },
            ],
        }
    }

    #[test]
    fn lines_hold_one_record_each() {
        let out = render(&report(), OutputFormat::Jsonl).expect("render");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 1);
        let record: OutputRecord = serde_json::from_str(lines[0]).expect("decode line");
        assert_eq!(record.mount_point, "D:\\");
    }

    #[test]
    fn table_shows_records_failures_and_summary() {
        let out = render(&report(), OutputFormat::Table).expect("render");
        assert!(out.contains("512.00 KB"));
        assert!(out.contains("ABC-123"));
        assert!(out.contains("0:1"));
        assert!(
            out.lines()
                .any(|line| line.starts_with("db01") && line.contains("FAILED: extent report failed"))
        );
        assert!(out.contains("web01: volumes=1 empty_volumes=0 extents=1 partition_matches=1"));
    }

    #[test]
    fn json_is_the_full_report() {
        let out = render(&report(), OutputFormat::Json).expect("render");
        let value: serde_json::Value = serde_json::from_str(&out).expect("decode");
        assert_eq!(value["hosts"].as_array().map(Vec::len), Some(2));
    }
}
