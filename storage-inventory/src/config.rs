// SPDX-License-Identifier: GPL-3.0-only

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{InventoryError, Result};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LoggingLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LoggingLevel {
    pub fn as_directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Eq, PartialEq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One pretty-printed batch report
    #[default]
    Json,
    /// One output record per line
    Jsonl,
    /// Human-readable columns
    Table,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Config {
    pub hosts: Vec<String>,
    /// Hosts correlated at the same time
    pub concurrency: usize,
    pub snapshot: SnapshotConfig,
    pub virtual_infrastructure: Option<VirtualInfrastructureConfig>,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct SnapshotConfig {
    pub root: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct VirtualInfrastructureConfig {
    /// JSON file listing virtual machines and their disks
    pub inventory: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LoggingLevel,
    pub log_to_disk: bool,
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hosts: Vec::new(),
            concurrency: 1,
            snapshot: SnapshotConfig::default(),
            virtual_infrastructure: None,
            logging: LoggingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("snapshots"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LoggingLevel::Info,
            log_to_disk: false,
            log_dir: None,
        }
    }
}

impl Config {
    /// Read a TOML config. Relative paths inside it are resolved against the
    /// directory holding the file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(InventoryError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let raw = fs::read_to_string(path).map_err(|error| InventoryError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?;

        let mut config = Self::parse(&raw).map_err(|reason| InventoryError::ConfigInvalid {
            path: path.to_path_buf(),
            reason,
        })?;

        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }

        Ok(config)
    }

    pub fn parse(raw: &str) -> std::result::Result<Self, String> {
        toml::from_str(raw).map_err(|error| error.to_string())
    }

    pub fn resolve_relative_to(&mut self, base: &Path) {
        resolve(&mut self.snapshot.root, base);
        if let Some(vi) = self.virtual_infrastructure.as_mut() {
            resolve(&mut vi.inventory, base);
        }
        if let Some(dir) = self.logging.log_dir.as_mut() {
            resolve(dir, base);
        }
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.hosts.is_empty() {
            return Err("hosts must not be empty".to_string());
        }

        if let Some(host) = self.hosts.iter().find(|host| !is_valid_host_name(host)) {
            return Err(format!("invalid host name {host:?}"));
        }

        if self.concurrency == 0 {
            return Err("concurrency must be at least 1".to_string());
        }

        Ok(())
    }
}

/// Host names double as snapshot directory names.
pub fn is_valid_host_name(host: &str) -> bool {
    !host.trim().is_empty()
        && host != "."
        && host != ".."
        && !host.contains(['/', '\\'])
        && !host.chars().any(char::is_whitespace)
}

fn resolve(path: &mut PathBuf, base: &Path) {
    if path.is_relative() {
        *path = base.join(&*path);
    }
}
