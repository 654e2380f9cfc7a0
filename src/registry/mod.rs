//! ESP-IDF release registry client
//!
//! Talks to the GitHub releases API of the ESP-IDF repository.

pub mod client;

pub use client::{Release, ReleaseClient};
