// SPDX-License-Identifier: GPL-3.0-only

//! storage-inventory - correlate host volumes with partitions and virtual disks

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use storage_contracts::VirtualInfrastructure;
use storage_correlate::DiskExtParser;
use storage_inventory::adapters::{SnapshotDirectory, SnapshotVirtualInfrastructure};
use storage_inventory::{Collectors, Config, InventoryError, OutputFormat, logging, output, run_batch};

#[derive(Debug, Parser)]
#[command(name = "storage-inventory")]
#[command(about = "Correlate host volume extents with partitions and virtual disks")]
struct Args {
    /// TOML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Host to inventory; repeat for several. Replaces the configured list.
    #[arg(long = "host")]
    hosts: Vec<String>,

    /// Directory holding per-host captures
    #[arg(long)]
    snapshot_root: Option<PathBuf>,

    /// Virtual machine inventory JSON
    #[arg(long)]
    virtual_inventory: Option<PathBuf>,

    /// Skip virtual disk correlation
    #[arg(long)]
    no_virtual: bool,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    #[arg(long)]
    concurrency: Option<usize>,
}

impl Args {
    fn apply(self, config: &mut Config) {
        if !self.hosts.is_empty() {
            config.hosts = self.hosts;
        }
        if let Some(root) = self.snapshot_root {
            config.snapshot.root = root;
        }
        if let Some(inventory) = self.virtual_inventory {
            config.virtual_infrastructure =
                Some(storage_inventory::config::VirtualInfrastructureConfig { inventory });
        }
        if self.no_virtual {
            config.virtual_infrastructure = None;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let config_path = args.config.clone().unwrap_or_default();
    args.apply(&mut config);

    let _log_guard = logging::init(&config.logging);

    config
        .validate()
        .map_err(|reason| InventoryError::ConfigInvalid {
            path: config_path,
            reason,
        })?;

    tracing::info!("Starting storage-inventory v{}", env!("CARGO_PKG_VERSION"));

    let snapshots = SnapshotDirectory::new(config.snapshot.root.clone());
    let virtual_infrastructure = config
        .virtual_infrastructure
        .as_ref()
        .map(|vi| SnapshotVirtualInfrastructure::load(&vi.inventory))
        .transpose()?;

    let collectors = Collectors {
        partitions: &snapshots,
        extents: &snapshots,
        virtual_infrastructure: virtual_infrastructure
            .as_ref()
            .map(|vi| vi as &dyn VirtualInfrastructure),
    };

    let report = run_batch(
        &config.hosts,
        collectors,
        &DiskExtParser::new(),
        config.concurrency,
    )
    .await;

    println!("{}", output::render(&report, config.output.format)?);

    let failed = report.failed_hosts();
    if failed == report.hosts.len() {
        anyhow::bail!("all {failed} hosts failed");
    }
    if failed > 0 {
        tracing::warn!("{} of {} hosts failed", failed, report.hosts.len());
    }

    Ok(())
}
