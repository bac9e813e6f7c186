use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use duck_solver::CompatOptions;

/// CLI arguments for the duck binary.
#[derive(Parser, Debug)]
#[command(
    name = "duck",
    version,
    about = "Structural type compatibility and enum tables, TypeScript style"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load a declaration document and run its queries.
    Check(CheckArgs),
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Path to the JSON declaration document.
    pub document: PathBuf,

    // ==================== Compatibility Options ====================
    /// Check function parameters contravariantly instead of bivariantly.
    #[arg(long = "strictFunctionTypes", alias = "strict-function-types")]
    pub strict_function_types: bool,

    /// Let `null` and `undefined` be assigned to every type.
    #[arg(long = "noStrictNullChecks", alias = "no-strict-null-checks")]
    pub no_strict_null_checks: bool,

    /// Accept unknown properties in fresh object literals.
    #[arg(long = "noExcessPropertyChecks", alias = "no-excess-property-checks")]
    pub no_excess_property_checks: bool,

    // ==================== Output Formatting ====================
    /// Output format for query results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable color in text output (`--pretty` or `--pretty=false`).
    /// Defaults to whether stdout is a terminal.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub pretty: Option<bool>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl CheckArgs {
    /// Apply command-line flags on top of the document's options. Flags only
    /// ever move an option away from its default.
    pub fn apply_to(&self, mut options: CompatOptions) -> CompatOptions {
        if self.strict_function_types {
            options.strict_function_types = true;
        }
        if self.no_strict_null_checks {
            options.strict_null_checks = false;
        }
        if self.no_excess_property_checks {
            options.excess_property_checks = false;
        }
        options
    }
}

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod tests;
