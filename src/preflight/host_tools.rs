//! Host tool availability checks.

use crate::config::Config;
use crate::process;

use super::types::CheckResult;

/// Check the package and module metadata tools are installed.
pub fn check_host_tools(config: &Config) -> Vec<CheckResult> {
    let tools = [
        (config.pacman.as_str(), "pacman", "Required to list package files"),
        (config.modinfo.as_str(), "kmod", "Required to read module metadata"),
    ];

    tools
        .into_iter()
        .map(|(tool, package, purpose)| check_tool_exists(tool, package, purpose))
        .collect()
}

/// Check if a tool exists in PATH.
fn check_tool_exists(tool: &str, package: &str, purpose: &str) -> CheckResult {
    match process::which(tool) {
        Some(path) => CheckResult::pass_with(tool, &path.display().to_string()),
        None => CheckResult::fail(
            tool,
            &format!("Not found. Install '{}' package. {}", package, purpose),
        ),
    }
}
