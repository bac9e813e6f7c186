//! Command-line front end for duck.
//!
//! `duck check <document.json>` loads named types, enums and queries from a
//! JSON document, answers the queries with the structural solver and the
//! enum registry, and reports the results as tsc-style text or JSON.

pub mod args;
pub mod config;
pub mod driver;
pub mod reporter;
pub mod tracing_config;

#[cfg(test)]
#[path = "../tests/cli_tests.rs"]
mod cli_tests;
