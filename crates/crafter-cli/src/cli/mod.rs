//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, help
//! text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use crafter_core::application::Phase;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
///
/// Crafter is a single-operation tool: one invocation runs the bootstrap,
/// optionally restricted to one phase by the positional selector.
#[derive(Debug, Parser)]
#[command(
    name    = "crafter",
    bin_name = "crafter",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f528} Two-phase project bootstrap",
    long_about = "Crafter generates a project skeleton from a packaged template \
                  tree and hands off to the schema-driven code foundry.",
    after_help = "EXAMPLES:\n\
        \x20 crafter                                  # both phases, prompting for input\n\
        \x20 crafter skeleton --group-id com.acme --artifact-id shop --package com.acme.shop\n\
        \x20 crafter foundry --config-file gen.properties   # into an existing project\n\
        \x20 crafter --dry-run -v                     # show the plan without writing"
)]
pub struct Cli {
    /// Phase selector; absent runs both phases in order.
    #[arg(value_name = "PHASE", value_enum, help = "Phase to run (default: both)")]
    pub phase: Option<PhaseArg>,

    /// Bootstrap inputs.
    #[command(flatten)]
    pub bootstrap: BootstrapArgs,

    /// Flags available on every invocation.
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Phase selector values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum PhaseArg {
    /// Generate the project skeleton only.
    Skeleton,
    /// Run the code foundry only (requires an existing project).
    Foundry,
}

impl From<PhaseArg> for Phase {
    fn from(phase: PhaseArg) -> Self {
        match phase {
            PhaseArg::Skeleton => Phase::Skeleton,
            PhaseArg::Foundry => Phase::Foundry,
        }
    }
}

// ── Bootstrap inputs ──────────────────────────────────────────────────────────

/// Explicit bootstrap inputs. Anything omitted here is resolved from the
/// config file or interactive prompts.
#[derive(Debug, Args)]
pub struct BootstrapArgs {
    // ── Project identity (skeleton phase) ─────────────────────────────────
    /// Organization identifier, e.g. reverse-DNS.
    #[arg(long = "group-id", value_name = "ID", help = "Group ID")]
    pub group_id: Option<String>,

    /// Project (artifact) name; becomes the output directory.
    #[arg(long = "artifact-id", value_name = "ID", help = "Artifact ID")]
    pub artifact_id: Option<String>,

    /// Project version.
    #[arg(
        long = "project-version",
        value_name = "VERSION",
        help = "Project version (default: 1.0.0)"
    )]
    pub project_version: Option<String>,

    /// Base package, dotted namespace.
    #[arg(long = "package", value_name = "PACKAGE", help = "Base package")]
    pub package: Option<String>,

    /// Free-form project description.
    #[arg(long = "description", value_name = "TEXT", help = "Project description")]
    pub description: Option<String>,

    // ── Data source (foundry phase) ───────────────────────────────────────
    /// Database connection URL.
    #[arg(long = "url", value_name = "URL", help = "Database URL")]
    pub url: Option<String>,

    /// JDBC driver class.
    #[arg(long = "driver", value_name = "CLASS", help = "Database driver")]
    pub driver: Option<String>,

    /// Database username.
    #[arg(long = "username", value_name = "USER", help = "Database username")]
    pub username: Option<String>,

    /// Database password.
    #[arg(long = "password", value_name = "PASS", help = "Database password")]
    pub password: Option<String>,

    /// Comma-delimited table selector.
    #[arg(long = "tables", value_name = "TABLES", help = "Tables to generate for")]
    pub tables: Option<String>,

    /// Overwrite previously generated files.
    #[arg(
        long = "overwrite",
        value_name = "BOOL",
        help = "Overwrite existing generated files"
    )]
    pub overwrite: Option<bool>,

    // ── Resolution inputs ─────────────────────────────────────────────────
    /// Key=value properties file feeding the foundry phase.
    #[arg(
        long = "config-file",
        value_name = "PATH",
        help = "Properties file with generation settings"
    )]
    pub config_file: Option<PathBuf>,

    /// Template root: an exploded directory or a .zip/.jar archive.
    #[arg(
        long = "template-root",
        value_name = "PATH",
        env = "CRAFTER_TEMPLATE_ROOT",
        help = "Template root (directory or archive)"
    )]
    pub template_root: Option<PathBuf>,

    /// Resolve and display the execution plan without writing anything.
    #[arg(long = "dry-run", help = "Show the plan without generating")]
    pub dry_run: bool,
}

// ── tests ─────────────────────────────────────────────────────────────────────
