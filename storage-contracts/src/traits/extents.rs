// SPDX-License-Identifier: GPL-3.0-only

use async_trait::async_trait;

use crate::CollectorError;

/// Stages and runs the volume extent utility on a target host.
#[async_trait]
pub trait ExtentReportSource: Send + Sync {
    /// Concatenated stdout of the utility across every volume on `host`.
    async fn collect_extent_report(&self, host: &str) -> Result<String, CollectorError>;
}
