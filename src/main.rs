//! Basecheck CLI binary entry point.
//! Delegates to modules for scan/render/threshold and prints results.

use basecheck::cli::{Cli, Commands};
use basecheck::dataset::BaselineDataset;
use basecheck::models::allow::load_allowlist;
use basecheck::models::report::Report;
use basecheck::scan::{run_scan, ScanOptions};
use basecheck::threshold::Ceilings;
use basecheck::{config, keys, output, render, threshold, utils};
use clap::Parser;
use std::fmt::Display;
use std::path::PathBuf;

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Scan {
            root,
            no_html,
            ignore,
            output,
        } => scan_cmd(root, no_html, ignore, output),
        Commands::Render { output } => render_cmd(output),
        Commands::Threshold { allowlist, output } => threshold_cmd(allowlist, output),
    }
}

/// Expected failure classes get a single stderr line and exit 2; no
/// partial output, no internal trace.
fn fatal(err: impl Display) -> ! {
    eprintln!("{} {}", utils::error_prefix(), err);
    std::process::exit(2);
}

fn cwd() -> PathBuf {
    match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => fatal(e),
    }
}

fn scan_cmd(root: Option<String>, no_html: bool, ignore: Vec<String>, output: Option<String>) {
    let cwd = cwd();
    let eff = config::resolve_effective(
        &cwd,
        output.as_deref(),
        if no_html { Some(true) } else { None },
        &ignore,
        None,
    );

    let scan_root = match root {
        Some(r) => cwd.join(r),
        None => cwd.join("..").join(".."),
    };

    let dataset = match &eff.dataset {
        Some(path) => BaselineDataset::from_path(path),
        None => BaselineDataset::bundled(),
    };
    let dataset = match dataset {
        Ok(d) => d,
        Err(e) => fatal(e),
    };

    let opts = ScanOptions {
        root: scan_root,
        skip_html: eff.skip_html,
        ignore: eff.ignore.clone(),
        max_file_bytes: eff.max_file_bytes,
    };
    let outcome = match run_scan(&opts, &dataset) {
        Ok(o) => o,
        Err(e) => fatal(e),
    };
    if let Err(e) = outcome.report.save(&cwd) {
        fatal(e);
    }
    output::print_scan(&outcome.report, &eff.output, &outcome.warnings);
}

fn render_cmd(output: Option<String>) {
    let cwd = cwd();
    let eff = config::resolve_effective(&cwd, output.as_deref(), None, &[], None);
    match render::run_render(&cwd) {
        Ok(_) => output::print_render(&eff.output),
        Err(e) => fatal(e),
    }
}

fn threshold_cmd(allowlist: Option<String>, output: Option<String>) {
    let cwd = cwd();
    let eff = config::resolve_effective(&cwd, output.as_deref(), None, &[], allowlist.as_deref());

    let report = match Report::load(&cwd) {
        Ok(r) => r,
        Err(e) => fatal(e),
    };
    let ceilings = match Ceilings::from_env() {
        Ok(c) => c,
        Err(e) => fatal(e),
    };
    let allows = match load_allowlist(&eff.allowlist) {
        Ok(a) => a,
        Err(e) => fatal(e),
    };
    if eff.output != "json" {
        for rule in &allows {
            if !keys::is_canonical_key(&rule.bcd_key) {
                eprintln!(
                    "{} allow rule key does not look canonical: {}",
                    utils::note_prefix(),
                    rule.bcd_key
                );
            }
        }
    }

    let outcome = threshold::evaluate(&report, &ceilings, &allows);
    output::print_threshold(&outcome, &ceilings, allows.len(), &eff.output);
    if !outcome.passed() {
        std::process::exit(1);
    }
}
