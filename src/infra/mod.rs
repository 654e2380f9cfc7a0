//! Infrastructure layer
//!
//! Platform directories, filesystem access and child processes.

pub mod dirs;
pub mod filesystem;
pub mod launcher;
