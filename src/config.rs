//! Configuration for sndfw.
//!
//! Every value has a default matching a stock Arch Linux system, so running
//! with nothing set inspects `alsa-firmware` against the running kernel.
//! `main` fills a [`Config`] from flags, environment variables and `.env`.

use std::path::PathBuf;

use crate::kernel::{MODULES_ROOT, PROC_VERSION};

/// Package whose firmware is cross-referenced by default.
pub const DEFAULT_PACKAGE: &str = "alsa-firmware";

/// sndfw configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Package whose firmware files are inspected (SNDFW_PACKAGE)
    pub package: String,
    /// Root of the installed kernel module trees (SNDFW_MODULES_ROOT)
    pub modules_root: PathBuf,
    /// Kernel version banner used to pick between kernels (SNDFW_PROC_VERSION)
    pub proc_version: PathBuf,
    /// Package manager queried for file lists (SNDFW_PACMAN)
    pub pacman: String,
    /// Module metadata tool (SNDFW_MODINFO)
    pub modinfo: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            modules_root: PathBuf::from(MODULES_ROOT),
            proc_version: PathBuf::from(PROC_VERSION),
            pacman: "pacman".to_string(),
            modinfo: "modinfo".to_string(),
        }
    }
}

impl Config {
    /// Print configuration for debugging.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  SNDFW_PACKAGE: {}", self.package);
        println!("  SNDFW_MODULES_ROOT: {}", self.modules_root.display());
        println!("  SNDFW_PROC_VERSION: {}", self.proc_version.display());
        println!("  SNDFW_PACMAN: {}", self.pacman);
        println!("  SNDFW_MODINFO: {}", self.modinfo);
    }
}
