//! Common types and utilities for the duck workspace.
//!
//! This crate provides foundational types used across all duck crates:
//! - String interning (`Atom`, `ShardedInterner`)
//! - Centralized limits and thresholds
//! - Diagnostic messages and the `Diagnostic` value

// String interning for property and member names
pub mod interner;
pub use interner::{Atom, ShardedInterner};

// Centralized limits and thresholds
pub mod limits;

// Diagnostic codes, message templates and rendered diagnostics
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticMessage, diagnostic_codes, format_message,
    get_message_template,
};
