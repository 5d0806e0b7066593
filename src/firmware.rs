//! Firmware files provided by a package.
//!
//! The package manager reports a package's file list (its manifest) as one
//! path per line. Only regular files under [`FIRMWARE_ROOT`] are kept, with
//! that root stripped so they compare equal to the paths modules declare.

use anyhow::Result;
use std::path::{Component, Path, PathBuf};

use crate::process::Cmd;

/// Where packages install firmware blobs, relative to `/`.
pub const FIRMWARE_ROOT: &str = "usr/lib/firmware";

/// Firmware paths relative to [`FIRMWARE_ROOT`], in manifest order.
///
/// Duplicates are kept as the manifest lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirmwareSet {
    paths: Vec<PathBuf>,
}

impl FirmwareSet {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    /// Remove the first occurrence of `path`. Returns false if absent.
    pub fn remove_first(&mut self, path: &Path) -> bool {
        match self.paths.iter().position(|p| p == path) {
            Some(index) => {
                self.paths.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.paths.iter()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn into_vec(self) -> Vec<PathBuf> {
        self.paths
    }
}

impl FromIterator<PathBuf> for FirmwareSet {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Path as written by a tool, with `.` components dropped.
///
/// `./ess/a.fw` and `ess/a.fw` name the same firmware file.
pub fn normalize_path(raw: &str) -> PathBuf {
    Path::new(raw)
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

/// Source of a package's file list.
pub trait ManifestQuery {
    /// Raw file list output for `package`.
    fn file_list(&self, package: &str) -> Result<String>;
}

/// `pacman -Flq`: file list from the local sync database, quiet format.
pub struct Pacman {
    program: String,
}

impl Pacman {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Pacman {
    fn default() -> Self {
        Self::new("pacman")
    }
}

impl ManifestQuery for Pacman {
    fn file_list(&self, package: &str) -> Result<String> {
        // Missing package or unsynced database both exit non-zero and must stop the run.
        let result = Cmd::new(&self.program)
            .args(["-Flq", package])
            .error_msg(format!("Failed to list files of package '{}'", package))
            .run()?;
        Ok(result.stdout)
    }
}

/// Extract firmware paths from a package file list.
///
/// Directory entries (trailing `/`) are skipped. A leading `"<package> "`
/// column, as printed without `-q`, is tolerated.
pub fn parse_file_list(package: &str, text: &str) -> FirmwareSet {
    let prefix = format!("{} ", package);

    text.lines()
        .filter(|line| !line.ends_with('/'))
        .map(|line| line.strip_prefix(prefix.as_str()).unwrap_or(line))
        .map(normalize_path)
        .filter_map(|path| path.strip_prefix(FIRMWARE_ROOT).map(Path::to_path_buf).ok())
        .filter(|relative| !relative.as_os_str().is_empty())
        .collect()
}

/// Every firmware file `package` installs.
pub fn firmware_files(query: &dyn ManifestQuery, package: &str) -> Result<FirmwareSet> {
    let listing = query.file_list(package)?;
    let firmware = parse_file_list(package, &listing);
    tracing::debug!("Package {} provides {} firmware files", package, firmware.len());
    Ok(firmware)
}
