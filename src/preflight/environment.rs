//! Host environment checks (module tree, kernel version, package database).

use crate::config::Config;
use crate::firmware::{firmware_files, Pacman};
use crate::kernel;

use super::types::CheckResult;

/// Check the kernel module tree can be located.
pub fn check_kernel_modules(config: &Config) -> Vec<CheckResult> {
    let mut results = Vec::new();

    if !config.modules_root.is_dir() {
        results.push(CheckResult::fail(
            "modules root",
            &format!("{} is not a directory", config.modules_root.display()),
        ));
        return results;
    }
    results.push(CheckResult::pass_with(
        "modules root",
        &config.modules_root.display().to_string(),
    ));

    match kernel::sound_modules(&config.modules_root, &config.proc_version) {
        Ok(modules) if modules.is_empty() => {
            results.push(CheckResult::warn("sound modules", "No files under kernel/sound"));
        }
        Ok(modules) => {
            results.push(CheckResult::pass_with(
                "sound modules",
                &format!("{} files", modules.len()),
            ));
        }
        Err(e) => {
            results.push(CheckResult::fail("sound modules", &format!("{:#}", e)));
        }
    }

    results
}

/// Check the package's file list can be queried.
///
/// Only meaningful once the package tool itself was found.
pub fn check_package_files(config: &Config) -> CheckResult {
    let name = format!("{} file list", config.package);
    match firmware_files(&Pacman::new(&config.pacman), &config.package) {
        Ok(firmware) if firmware.is_empty() => CheckResult::warn(
            &name,
            "Package provides no firmware files. Run `pacman -Fy` if the database is stale.",
        ),
        Ok(firmware) => {
            CheckResult::pass_with(&name, &format!("{} firmware files", firmware.len()))
        }
        Err(e) => CheckResult::fail(&name, &format!("{:#}", e)),
    }
}
