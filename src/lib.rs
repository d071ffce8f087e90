//! OrbitX Library
//!
//! Everything behind the `orbitx` binary: feed clients, the read-through
//! cache, refresh scheduling, app state and rendering. Exposed as a library so
//! integration tests can drive it.

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod feeds;
pub mod filter;
pub mod format;
pub mod gallery;
pub mod refresh;
pub mod settings;
pub mod ui;
