use std::path::{Path, PathBuf};

use storage_contracts::{CollectorErrorKind, VirtualInfrastructure};
use storage_correlate::DiskExtParser;
use storage_inventory::adapters::{SnapshotDirectory, SnapshotVirtualInfrastructure};
use storage_inventory::{
    BatchReport, Collectors, Config, HostError, HostOutcome, OutputFormat, output, run_batch,
};

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

async fn run_fixture_batch(with_virtual: bool) -> BatchReport {
    let config = Config::load(&fixtures_root().join("inventory.toml")).expect("load config");
    config.validate().expect("valid config");

    let snapshots = SnapshotDirectory::new(config.snapshot.root.clone());
    let infrastructure = config
        .virtual_infrastructure
        .as_ref()
        .filter(|_| with_virtual)
        .map(|vi| SnapshotVirtualInfrastructure::load(&vi.inventory).expect("load vms"));

    let collectors = Collectors {
        partitions: &snapshots,
        extents: &snapshots,
        virtual_infrastructure: infrastructure
            .as_ref()
            .map(|vi| vi as &dyn VirtualInfrastructure),
    };

    run_batch(
        &config.hosts,
        collectors,
        &DiskExtParser::new(),
        config.concurrency,
    )
    .await
}

#[tokio::test]
async fn fixture_config_resolves_paths() {
    let config = Config::load(&fixtures_root().join("inventory.toml")).expect("load config");

    assert_eq!(config.snapshot.root, fixtures_root().join("snapshots"));
    assert_eq!(config.output.format, OutputFormat::Jsonl);
    assert_eq!(config.hosts, vec!["web01", "db01"]);
}

#[tokio::test]
async fn correlates_web01_against_virtual_disks() {
    let report = run_fixture_batch(true).await;

    let web01 = report.inventories().next().expect("web01 completed");
    assert_eq!(web01.host, "web01");
    assert_eq!(web01.virtual_machine.as_deref(), Some("WEB01"));

    let summary = &web01.summary;
    assert_eq!(summary.volume_count, 4);
    assert_eq!(summary.empty_volume_count, 1);
    assert_eq!(summary.extent_count, 3);
    assert_eq!(summary.partition_matches, 3);
    assert_eq!(summary.virtual_disk_matches, 3);
    assert_eq!(summary.scsi_port_base, Some(2));
    assert!(summary.duplicate_partition_keys.is_empty());

    let mounts: Vec<&str> = web01.records.iter().map(|r| r.mount_point.as_str()).collect();
    assert_eq!(mounts, vec!["(none)", "C:\\", "D:\\"]);

    let data = &web01.records[2];
    assert_eq!(data.volume_id, "c2a7f3d0-8e41-4b9a-9f21-3d5e6a7b8c90");
    assert_eq!(data.scsi_controller, Some(1));
    assert_eq!(data.scsi_controller_port, Some(1));
    assert_eq!(data.vdisk_name.as_deref(), Some("Hard disk 2"));
    assert_eq!(
        data.vdisk_filename.as_deref(),
        Some("[datastore2] WEB01/WEB01_1.vmdk")
    );
    assert_eq!(data.vm_id.as_deref(), Some("vm-1021"));
}

#[tokio::test]
async fn missing_capture_fails_only_that_host() {
    let report = run_fixture_batch(true).await;

    assert_eq!(report.hosts.len(), 2);
    assert_eq!(report.failed_hosts(), 1);
    match &report.hosts[1].outcome {
        HostOutcome::Failed {
            error: HostError::ExtentReport(error),
        } => assert_eq!(error.kind, CollectorErrorKind::NotFound),
        other => panic!("unexpected outcome for db01: {other:?}"),
    }
}

#[tokio::test]
async fn without_virtual_inventory_disk_fields_stay_empty() {
    let report = run_fixture_batch(false).await;

    let web01 = report.inventories().next().expect("web01 completed");
    assert_eq!(web01.summary.partition_matches, 3);
    assert_eq!(web01.summary.virtual_disk_matches, 0);
    assert!(web01.records.iter().all(|r| r.vm_name.is_none()));
}

#[tokio::test]
async fn jsonl_output_lists_every_correlated_extent() {
    let report = run_fixture_batch(true).await;

    let rendered = output::render(&report, OutputFormat::Jsonl).expect("render");
    let rows: Vec<serde_json::Value> = rendered
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1]["mount_point"], "C:\\");
    assert_eq!(rows[1]["extent_size"], 106_847_797_248_u64);
    assert_eq!(rows[1]["vdisk_key"], "6000c29a1b2c3d4e5f60718293a4b5c6");
}
