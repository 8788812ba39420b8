//! Library components of the `college-finder` CLI.

pub mod config;
pub mod logging;
pub mod render;
