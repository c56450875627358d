// SPDX-License-Identifier: GPL-3.0-only

//! Per-host collection and correlation across a batch of hosts.

use chrono::{DateTime, Utc};
use futures_util::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use storage_contracts::{ExtentReportSource, PartitionInventory, VirtualInfrastructure};
use storage_correlate::{HostInput, HostInventory, VolumeReportParser, correlate_host};

use crate::errors::HostError;

/// Borrowed handles to the collaborators for one batch.
///
/// The caller owns the underlying connections and their lifetime.
#[derive(Clone, Copy)]
pub struct Collectors<'a> {
    pub partitions: &'a dyn PartitionInventory,
    pub extents: &'a dyn ExtentReportSource,
    /// `None` skips virtual disk correlation entirely
    pub virtual_infrastructure: Option<&'a dyn VirtualInfrastructure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub hosts: Vec<HostReport>,
}

impl BatchReport {
    pub fn inventories(&self) -> impl Iterator<Item = &HostInventory> {
        self.hosts.iter().filter_map(|report| match &report.outcome {
            HostOutcome::Completed { inventory } => Some(inventory),
            HostOutcome::Failed { .. } => None,
        })
    }

    pub fn failed_hosts(&self) -> usize {
        self.hosts
            .iter()
            .filter(|report| matches!(report.outcome, HostOutcome::Failed { .. }))
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostReport {
    pub host: String,
    #[serde(flatten)]
    pub outcome: HostOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HostOutcome {
    Completed { inventory: HostInventory },
    Failed { error: HostError },
}

/// Correlate every host, at most `concurrency` at a time.
///
/// Reports come back in `hosts` order. A host whose inventory cannot be
/// collected is reported as failed; the rest of the batch continues.
pub async fn run_batch(
    hosts: &[String],
    collectors: Collectors<'_>,
    parser: &dyn VolumeReportParser,
    concurrency: usize,
) -> BatchReport {
    tracing::info!(
        "Correlating {} hosts (concurrency {}, virtual infrastructure {})",
        hosts.len(),
        concurrency.max(1),
        if collectors.virtual_infrastructure.is_some() {
            "enabled"
        } else {
            "disabled"
        }
    );

    let reports = stream::iter(hosts.iter().cloned())
        .map(|host| process_host(host, collectors, parser))
        .buffered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    BatchReport {
        generated_at: Utc::now(),
        hosts: reports,
    }
}

async fn process_host(
    host: String,
    collectors: Collectors<'_>,
    parser: &dyn VolumeReportParser,
) -> HostReport {
    let outcome = match collect_host(&host, collectors).await {
        Ok(input) => HostOutcome::Completed {
            inventory: correlate_host(input, parser),
        },
        Err(error) => {
            tracing::error!("{}: {}", host, error);
            HostOutcome::Failed { error }
        }
    };

    HostReport { host, outcome }
}

async fn collect_host(host: &str, collectors: Collectors<'_>) -> Result<HostInput, HostError> {
    let partitions = collectors
        .partitions
        .list_partitions(host)
        .await
        .map_err(HostError::PartitionInventory)?;

    let extent_report = collectors
        .extents
        .collect_extent_report(host)
        .await
        .map_err(HostError::ExtentReport)?;

    let virtual_machine = match collectors.virtual_infrastructure {
        Some(infrastructure) => match infrastructure.find_virtual_machine(host).await {
            Ok(Some(vm)) => {
                tracing::debug!("{}: matched virtual machine {} ({})", host, vm.name, vm.id);
                Some(vm)
            }
            Ok(None) => {
                tracing::info!("{}: no matching virtual machine", host);
                None
            }
            Err(e) => {
                tracing::warn!(
                    "{}: virtual infrastructure lookup failed, continuing without virtual disks: {}",
                    host,
                    e
                );
                None
            }
        },
        None => None,
    };

    Ok(HostInput {
        host: host.to_string(),
        partitions,
        extent_report,
        virtual_machine,
    })
}
