//! Denver - Dockerfile builder
//!
//! Generates Dockerfile text from a fluent builder, caching remote
//! assets by content key and emitting a background startup script.
//! Also hosts the glue behind the `denver` workflow CLI.

pub mod cli;
pub mod config;
pub mod digest;
pub mod dockerfile;
pub mod error;
pub mod project;
pub mod shell;

pub use dockerfile::Dockerfile;
pub use error::{DenverError, DenverResult};
