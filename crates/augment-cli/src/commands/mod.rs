//! CLI command implementations.

pub mod config;
pub mod expand;
pub mod files;
pub mod markers;
pub mod run;
