//! Configuration and constants
//!
//! Compile-time defaults and remote URLs. Runtime settings live in
//! [`crate::core::context`].

pub mod defaults;
pub mod urls;
