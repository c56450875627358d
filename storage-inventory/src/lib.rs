// SPDX-License-Identifier: GPL-3.0-only

//! Batch driver for storage layout correlation.
//!
//! Collects each host's inputs through the `storage-contracts` traits, runs
//! the `storage-correlate` engine per host, and renders the combined report.

pub mod adapters;
pub mod batch;
pub mod config;
pub mod errors;
pub mod logging;
pub mod output;

pub use batch::{BatchReport, Collectors, HostOutcome, HostReport, run_batch};
pub use config::{Config, LoggingLevel, OutputFormat};
pub use errors::{HostError, InventoryError, Result};
