//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "basecheck",
    version,
    about = "Baseline compatibility scanner",
    long_about = "Basecheck — scan a source tree for web-platform feature usage and classify each usage by its cross-browser Baseline status.\n\nConfiguration precedence: CLI > basecheck.toml > defaults.",
    after_help = "Examples:\n  basecheck scan ../site\n  basecheck scan --no-html --ignore 'legacy/**'\n  basecheck render\n  MAX_NONE=0 MAX_LOW=5 basecheck threshold",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for scanning, rendering, and CI gating.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current basecheck version.")]
    Version,
    /// Scan a tree and write report.json
    #[command(
        about = "Scan a source tree",
        long_about = "Extract CSS/HTML/script feature usages, classify them against the Baseline dataset, and write report.json to the current directory. Per-file problems are warnings; only setup failures are fatal.",
        after_help = "Examples:\n  basecheck scan\n  basecheck scan ../site --no-html\n  basecheck scan --ignore 'fixtures/**' --output json"
    )]
    Scan {
        #[arg(help = "Root path to scan (default: two directory levels above the current dir)")]
        root: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Skip HTML scanning")]
        no_html: bool,
        #[arg(long, help = "Extra ignore glob relative to the scan root (repeatable)")]
        ignore: Vec<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Render report.json to HTML and CSV
    #[command(
        about = "Render the report",
        long_about = "Read report.json from the current directory and write report.html and report.csv next to it.",
        after_help = "Examples:\n  basecheck render\n  basecheck render --output json"
    )]
    Render {
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Evaluate CI thresholds against report.json
    #[command(
        about = "Evaluate thresholds",
        long_about = "Recount tiers from report.json, apply the optional allowlist, and compare against MAX_LOW / MAX_NONE / MAX_HIGH. Exit 0 on pass, 1 on any violation.",
        after_help = "Examples:\n  MAX_NONE=0 basecheck threshold\n  basecheck threshold --allowlist ci/baseline-allow.json"
    )]
    Threshold {
        #[arg(long, help = "Allowlist file (default: baseline-allow.json)")]
        allowlist: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
