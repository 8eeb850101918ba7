// src/lib.rs
#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod error;
pub mod config;
pub mod core;
pub mod models;
pub mod progress;

pub mod store;
pub mod reconcile;
pub mod ingest;

pub mod specs;
pub mod scrape;
pub mod dashboard;
pub mod gui;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, Result};
