//! Core logic module
//!
//! Version discovery, resolution and environment derivation, plus the
//! operations built on top of them. Process spawning and file access go
//! through [`crate::infra`].
//!
//! # Submodules
//!
//! - [`install_registry`] - Installed version discovery and validation
//! - [`environment`] - Derived environment records and shell rendering
//! - [`activation`] - Platform activation providers
//! - [`resolver`] - Version resolution and the project marker
//! - [`session`] - Resolve, validate and derive in one step
//! - [`context`] - Per-invocation settings
//! - [`global_config`] - `config.toml` handling
//! - [`builder`] - Build invocation
//! - [`flash`] - Flash invocation
//! - [`create`] - Project scaffolding
//! - [`install`] - Version installation
//! - [`remove`] - Version removal
//! - [`info`] - Project information
//! - [`doctor`] - Host prerequisite checks

pub mod activation;
pub mod builder;
pub mod context;
pub mod create;
pub mod doctor;
pub mod environment;
pub mod flash;
pub mod global_config;
pub mod info;
pub mod install;
pub mod install_registry;
pub mod remove;
pub mod resolver;
pub mod session;
