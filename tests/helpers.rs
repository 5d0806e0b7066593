//! Shared test utilities for sndfw tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::Result;
use sndfw::config::Config;
use sndfw::error::CommandFailure;
use sndfw::firmware::ManifestQuery;
use sndfw::modinfo::MetadataQuery;
use tempfile::TempDir;

/// Test environment: a fake `/usr/lib/modules`, `/proc/version` and tool dir.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Stand-in for /usr/lib/modules
    pub modules_root: PathBuf,
    /// Stand-in for /proc/version
    pub proc_version: PathBuf,
    /// Directory holding fake pacman/modinfo scripts
    pub bin_dir: PathBuf,
}

impl TestEnv {
    /// Create a new test environment with temporary directories.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path();

        let modules_root = base.join("modules");
        let proc_version = base.join("proc_version");
        let bin_dir = base.join("bin");

        fs::create_dir_all(&modules_root).expect("Failed to create modules root");
        fs::create_dir_all(&bin_dir).expect("Failed to create bin dir");

        Self {
            _temp_dir: temp_dir,
            modules_root,
            proc_version,
            bin_dir,
        }
    }

    /// Create an (empty) installed kernel.
    pub fn add_kernel(&self, release: &str) -> PathBuf {
        let dir = self.modules_root.join(release);
        fs::create_dir_all(dir.join("kernel/sound")).expect("Failed to create kernel dir");
        dir
    }

    /// Write a file under `<release>/kernel/sound`.
    ///
    /// The fake modinfo prints a module file's content as its metadata, so
    /// `content` is what the module "declares".
    pub fn add_sound_file(&self, release: &str, relative: &str, content: &str) -> PathBuf {
        let path = self
            .modules_root
            .join(release)
            .join("kernel/sound")
            .join(relative);
        fs::create_dir_all(path.parent().unwrap()).expect("Failed to create module dir");
        fs::write(&path, content).expect("Failed to write module");
        path
    }

    pub fn set_running_kernel(&self, release: &str) {
        fs::write(
            &self.proc_version,
            format!("Linux version {} (builder@host) (gcc 14.1.1) #1 SMP PREEMPT_DYNAMIC\n", release),
        )
        .expect("Failed to write proc version");
    }

    /// Write an executable shell script into the tool dir.
    pub fn write_tool(&self, name: &str, script: &str) -> PathBuf {
        let path = self.bin_dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{}", script)).expect("Failed to write tool");
        let mut perms = fs::metadata(&path).expect("Failed to get metadata").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("Failed to set permissions");
        path
    }

    /// Fake `pacman -Flq` printing `listing`.
    pub fn fake_pacman(&self, listing: &str) -> PathBuf {
        let listing_path = self.bin_dir.join("listing.txt");
        fs::write(&listing_path, listing).expect("Failed to write listing");
        self.write_tool("pacman", &format!("cat '{}'\n", listing_path.display()))
    }

    /// Fake pacman that fails the way a missing package does.
    pub fn failing_pacman(&self, stderr: &str) -> PathBuf {
        self.write_tool("pacman", &format!("printf '%s\\n' \"{}\" >&2\nexit 1\n", stderr))
    }

    /// Fake modinfo: `*.ko*` files print their content, anything else is unknown.
    pub fn fake_modinfo(&self) -> PathBuf {
        self.write_tool(
            "modinfo",
            "case \"$1\" in\n\
             *.ko*) cat \"$1\" ;;\n\
             *) echo \"modinfo: ERROR: Module $1 not found.\" >&2; exit 1 ;;\n\
             esac\n",
        )
    }

    pub fn config(&self) -> Config {
        Config {
            package: "alsa-firmware".to_string(),
            modules_root: self.modules_root.clone(),
            proc_version: self.proc_version.clone(),
            pacman: self.bin_dir.join("pacman").display().to_string(),
            modinfo: self.bin_dir.join("modinfo").display().to_string(),
        }
    }

    /// Run the sndfw binary against this environment.
    pub fn run_sndfw(&self, args: &[&str]) -> Output {
        let config = self.config();
        Command::new(env!("CARGO_BIN_EXE_sndfw"))
            .args(args)
            .env("SNDFW_PACKAGE", &config.package)
            .env("SNDFW_MODULES_ROOT", &config.modules_root)
            .env("SNDFW_PROC_VERSION", &config.proc_version)
            .env("SNDFW_PACMAN", &config.pacman)
            .env("SNDFW_MODINFO", &config.modinfo)
            .env_remove("RUST_LOG")
            .current_dir(self._temp_dir.path())
            .output()
            .expect("Failed to run sndfw")
    }
}

/// In-memory package manager keyed by package name.
pub struct FakeManifest(pub HashMap<String, String>);

impl FakeManifest {
    pub fn single(package: &str, listing: &str) -> Self {
        Self(HashMap::from([(package.to_string(), listing.to_string())]))
    }
}

impl ManifestQuery for FakeManifest {
    fn file_list(&self, package: &str) -> Result<String> {
        match self.0.get(package) {
            Some(listing) => Ok(listing.clone()),
            None => Err(CommandFailure {
                program: "pacman".to_string(),
                code: 1,
                message: format!("Failed to list files of package '{}'", package),
                stderr: format!("error: package '{}' was not found\n", package),
            }
            .into()),
        }
    }
}

/// In-memory modinfo keyed by module path; unknown paths are unresolvable.
#[derive(Default)]
pub struct FakeModinfo(pub HashMap<PathBuf, String>);

impl FakeModinfo {
    pub fn with(mut self, module: impl AsRef<Path>, metadata: &str) -> Self {
        self.0.insert(module.as_ref().to_path_buf(), metadata.to_string());
        self
    }
}

impl MetadataQuery for FakeModinfo {
    fn module_metadata(&self, module: &Path) -> Result<Option<String>> {
        Ok(self.0.get(module).cloned())
    }
}

/// Build `modinfo`-style text.
pub fn modinfo_text(name: &str, description: &str, firmware: &[&str]) -> String {
    let mut text = format!("filename:       /lib/modules/x/{}.ko.zst\n", name);
    for fw in firmware {
        text.push_str(&format!("firmware:       {}\n", fw));
    }
    text.push_str("license:        GPL\n");
    text.push_str(&format!("description:    {}\n", description));
    text.push_str(&format!("name:           {}\n", name));
    text
}

/// Package listing for `alsa-firmware` with the given firmware files.
pub fn firmware_listing(files: &[&str]) -> String {
    let mut listing = String::from("usr/\nusr/lib/\nusr/lib/firmware/\n");
    for file in files {
        listing.push_str(&format!("usr/lib/firmware/{}\n", file));
    }
    listing.push_str("usr/share/licenses/alsa-firmware/LICENSE\n");
    listing
}
