//! idfmgr - ESP-IDF version manager
//!
//! Keeps several ESP-IDF releases installed side by side and binds each
//! project to one of them through a `.espidf-version` marker file. Build,
//! flash and `idf.py` invocations run inside the environment the bound
//! release's activation script produces.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Version resolution, environment derivation and project logic
//! - [`registry`] - GitHub releases client
//! - [`infra`] - Infrastructure layer (filesystem, directories, processes)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;
pub mod registry;

#[cfg(test)]
pub mod test_utils;
