//! Locating the running kernel's sound modules.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Where packaged kernels install their module trees.
pub const MODULES_ROOT: &str = "/usr/lib/modules";

/// Kernel version banner, e.g. `Linux version 6.9.7-arch1-1 (...) ...`.
pub const PROC_VERSION: &str = "/proc/version";

/// Sound subsystem directory inside a kernel version directory.
const SOUND_SUBDIR: &str = "kernel/sound";

/// Extract the kernel release from a `/proc/version` style banner.
///
/// The release is the third whitespace-separated token.
pub fn parse_kernel_release(banner: &str) -> Result<String> {
    match banner.split_whitespace().nth(2) {
        Some(release) => Ok(release.to_string()),
        None => bail!("Kernel version string has no release field: {:?}", banner.trim()),
    }
}

/// Find the module directory of the running kernel.
///
/// With a single kernel installed its directory is used as-is. Otherwise
/// the release named in `proc_version` picks the directory.
pub fn find_kernel_dir(modules_root: &Path, proc_version: &Path) -> Result<PathBuf> {
    let mut subdirs = Vec::new();
    let entries = fs::read_dir(modules_root)
        .with_context(|| format!("Failed to read {}", modules_root.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            subdirs.push(path);
        }
    }

    if subdirs.len() == 1 {
        let dir = subdirs.remove(0);
        tracing::debug!("Single kernel installed: {}", dir.display());
        return Ok(dir);
    }

    let banner = fs::read_to_string(proc_version)
        .with_context(|| format!("Failed to read {}", proc_version.display()))?;
    let release = parse_kernel_release(&banner)?;
    tracing::debug!(
        "{} kernels installed, running release is {}",
        subdirs.len(),
        release
    );

    Ok(modules_root.join(release))
}

/// Every regular file below the running kernel's `kernel/sound` directory.
///
/// Returned in path order so repeated runs see the same sequence.
pub fn sound_modules(modules_root: &Path, proc_version: &Path) -> Result<Vec<PathBuf>> {
    let sound = find_kernel_dir(modules_root, proc_version)?.join(SOUND_SUBDIR);

    let mut modules = Vec::new();
    for entry in WalkDir::new(&sound).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", sound.display()))?;
        if entry.path().is_file() {
            modules.push(entry.into_path());
        }
    }

    tracing::debug!("Found {} files under {}", modules.len(), sound.display());
    Ok(modules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_kernel_release() {
        let banner = "Linux version 6.9.7-arch1-1 (linux@archlinux) (gcc (GCC) 14.1.1) #1 SMP\n";
        assert_eq!(parse_kernel_release(banner).unwrap(), "6.9.7-arch1-1");
    }

    #[test]
    fn test_parse_kernel_release_too_short() {
        assert!(parse_kernel_release("Linux version").is_err());
        assert!(parse_kernel_release("").is_err());
    }

    #[test]
    fn test_single_kernel_ignores_proc_version() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("modules");
        fs::create_dir_all(root.join("6.1.0-lts")).unwrap();
        // Stray files next to the version directory do not count.
        fs::write(root.join("README"), "").unwrap();

        let dir = find_kernel_dir(&root, &tmp.path().join("missing")).unwrap();
        assert_eq!(dir, root.join("6.1.0-lts"));
    }

    #[test]
    fn test_multiple_kernels_use_proc_version() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("modules");
        fs::create_dir_all(root.join("6.1.0-lts")).unwrap();
        fs::create_dir_all(root.join("6.9.7-arch1-1")).unwrap();
        let version = tmp.path().join("version");
        fs::write(&version, "Linux version 6.9.7-arch1-1 (builder) #1\n").unwrap();

        let dir = find_kernel_dir(&root, &version).unwrap();
        assert_eq!(dir, root.join("6.9.7-arch1-1"));
    }

    #[test]
    fn test_missing_modules_root_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = find_kernel_dir(&tmp.path().join("nope"), &tmp.path().join("v")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
