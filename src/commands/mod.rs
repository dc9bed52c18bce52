//! CLI command implementations for migmap operations.
//!
//! Each submodule handles one command with its configuration and
//! execution logic.
//!
//! Available commands:
//! - **analyze**: Scan controllers and templates for migration blockers

pub mod analyze;

pub use analyze::{handle_analyze, AnalyzeConfig};
