// src/lib.rs

pub mod api;
pub mod config;
pub mod core;
pub mod csv;
pub mod dataset;
pub mod error;
pub mod file;
pub mod log;
pub mod manifest;
pub mod progress;
pub mod scrape;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Result, ScrapeError};
pub use manifest::{CardEntry, CategoryIndexMap, EncodedTable, Manifest};
