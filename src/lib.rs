// Export modules for library usage
pub mod advice;
pub mod cli;
pub mod commands;
pub mod core;
pub mod detectors;
pub mod io;
pub mod parse;
pub mod report;
pub mod severity;

// Re-export commonly used types
pub use crate::core::{
    FileKind, Finding, Occurrence, Severity, SmellKind, SourcePosition,
};

pub use crate::core::metrics::SmellMetrics;

pub use crate::advice::{advise, AdviceBundle};

pub use crate::detectors::{analyze_markup, analyze_script};

pub use crate::io::output::{create_writer, render_report, OutputFormat, OutputWriter};

pub use crate::parse::{parse_source, ParseError};

pub use crate::report::{build_report, ReportEntry};
