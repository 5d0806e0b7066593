//! Preflight checks for sndfw.
//!
//! Validates host tools and the module tree before producing a report.
//! Run with `sndfw preflight` to check everything is ready.

mod environment;
mod host_tools;
mod types;

use anyhow::{bail, Result};

use crate::config::Config;

pub use types::{CheckResult, CheckStatus, PreflightReport};

/// Run all preflight checks.
pub fn run_preflight(config: &Config) -> PreflightReport {
    let mut checks = Vec::new();

    println!("Running preflight checks...\n");

    println!("Checking host tools...");
    let tools = host_tools::check_host_tools(config);
    let pacman_found = tools
        .first()
        .is_some_and(|check| check.status == CheckStatus::Pass);
    checks.extend(tools);

    println!("Checking kernel modules...");
    checks.extend(environment::check_kernel_modules(config));

    if pacman_found {
        println!("Checking package database...");
        checks.push(environment::check_package_files(config));
    }

    println!();

    PreflightReport { checks }
}

/// Run preflight and bail if any checks fail.
pub fn run_preflight_or_fail(config: &Config) -> Result<()> {
    let report = run_preflight(config);
    report.print();

    if !report.all_passed() {
        bail!(
            "Preflight failed: {} check(s) failed. Fix the issues above first.",
            report.fail_count()
        );
    }

    println!("All preflight checks passed!\n");
    Ok(())
}
