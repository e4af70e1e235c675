//! CI-facing output module.
//!
//! The engine itself performs no I/O; everything a pipeline operator sees
//! is rendered here.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_changelog, display_decision, display_error, display_gate_violations, display_ignored,
    display_parse_errors, display_status, display_success, display_warning,
};
