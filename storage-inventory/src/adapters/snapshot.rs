// SPDX-License-Identifier: GPL-3.0-only

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use storage_contracts::{
    CollectorError, CollectorErrorKind, ExtentReportSource, PartitionInventory,
};
use storage_types::PartitionRecord;

use crate::config::is_valid_host_name;

pub const PARTITIONS_FILE: &str = "partitions.json";
pub const EXTENTS_FILE: &str = "extents.txt";

/// Per-host captures laid out as `<root>/<host>/partitions.json` and
/// `<root>/<host>/extents.txt`.
#[derive(Debug, Clone)]
pub struct SnapshotDirectory {
    root: PathBuf,
}

impl SnapshotDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn host_file(&self, host: &str, file: &str) -> Result<PathBuf, CollectorError> {
        if !is_valid_host_name(host) {
            return Err(CollectorError::new(
                CollectorErrorKind::Internal,
                format!("invalid host name {host:?}"),
            ));
        }
        Ok(self.root.join(host).join(file))
    }

    async fn read(&self, host: &str, file: &str) -> Result<String, CollectorError> {
        let path = self.host_file(host, file)?;
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|error| io_error(&path, error))
    }
}

fn io_error(path: &Path, error: io::Error) -> CollectorError {
    let kind = match error.kind() {
        io::ErrorKind::NotFound => CollectorErrorKind::NotFound,
        io::ErrorKind::PermissionDenied => CollectorErrorKind::PermissionDenied,
        _ => CollectorErrorKind::Internal,
    };
    CollectorError::new(kind, format!("{}: {}", path.display(), error))
}

#[async_trait]
impl PartitionInventory for SnapshotDirectory {
    async fn list_partitions(&self, host: &str) -> Result<Vec<PartitionRecord>, CollectorError> {
        let raw = self.read(host, PARTITIONS_FILE).await?;
        serde_json::from_str(&raw).map_err(|error| {
            CollectorError::invalid_data(format!("{host}/{PARTITIONS_FILE}: {error}"))
        })
    }
}

#[async_trait]
impl ExtentReportSource for SnapshotDirectory {
    async fn collect_extent_report(&self, host: &str) -> Result<String, CollectorError> {
        self.read(host, EXTENTS_FILE).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> SnapshotDirectory {
        SnapshotDirectory::new(
            Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/snapshots"),
        )
    }

    #[tokio::test]
    async fn reads_partitions_and_report_for_host() {
        let snapshots = fixtures();

        let partitions = snapshots.list_partitions("web01").await.expect("partitions");
        assert_eq!(partitions.len(), 3);
        assert_eq!(partitions[0].scsi_port, 2);

        let report = snapshots.collect_extent_report("web01").await.expect("report");
        assert!(report.contains("Mounted at: C:\\"));
    }

    #[tokio::test]
    async fn missing_capture_is_not_found() {
        let error = fixtures()
            .collect_extent_report("db01")
            .await
            .expect_err("db01 has no extent capture");
        assert_eq!(error.kind, CollectorErrorKind::NotFound);
    }

    #[tokio::test]
    async fn malformed_partitions_are_invalid_data() {
        let error = fixtures()
            .list_partitions("app01")
            .await
            .expect_err("app01 partitions are malformed");
        assert_eq!(error.kind, CollectorErrorKind::InvalidData);
    }

    #[tokio::test]
    async fn refuses_path_like_host_names() {
        let error = fixtures()
            .list_partitions("../web01")
            .await
            .expect_err("reject traversal");
        assert_eq!(error.kind, CollectorErrorKind::Internal);
    }
}
