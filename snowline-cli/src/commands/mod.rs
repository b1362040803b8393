//! CLI command implementations.
//!
//! Each subcommand has its own module with its handler.
//!
//! # Command Modules
//!
//! - [`airports`] - Legacy airport listing
//! - [`coast`] - Coastline raster classification
//! - [`common`] - Config loading and logging setup
//! - [`sample`] - Depth grid sampling with X-Plane dataref preview

pub mod airports;
pub mod coast;
pub mod common;
pub mod sample;
