//! Kernel module metadata as reported by `modinfo`.
//!
//! The join only ever sees [`ModuleMetadata`]; the textual `key: value`
//! format stays in [`parse_module_metadata`].

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::error::MetadataError;
use crate::firmware::normalize_path;
use crate::process::Cmd;

/// Fields of one module's metadata that the report cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleMetadata {
    pub name: String,
    pub description: String,
    /// Declared firmware, in the order the metadata lists it.
    pub firmware: Vec<PathBuf>,
}

/// Parse `modinfo` style output.
///
/// A repeated `name:` or `description:` line replaces the earlier one. Every
/// `firmware:` line adds its path. A missing description is left empty.
pub fn parse_module_metadata(text: &str) -> Result<ModuleMetadata, MetadataError> {
    let mut name = None;
    let mut description = String::new();
    let mut firmware = Vec::new();

    for line in text.lines() {
        if line.starts_with("description:") {
            description = line
                .split_once(char::is_whitespace)
                .map(|(_, rest)| rest.trim_start().to_string())
                .unwrap_or_default();
        } else if line.starts_with("firmware:") {
            firmware.push(normalize_path(value_token("firmware", line)?));
        } else if line.starts_with("name:") {
            name = Some(value_token("name", line)?.to_string());
        }
    }

    Ok(ModuleMetadata {
        name: name.ok_or(MetadataError::MissingName)?,
        description,
        firmware,
    })
}

/// Second whitespace-separated token of a `key: value` line.
fn value_token<'a>(key: &'static str, line: &'a str) -> Result<&'a str, MetadataError> {
    line.split_whitespace()
        .nth(1)
        .ok_or_else(|| MetadataError::MissingValue(key, line.to_string()))
}

/// Source of per-module metadata text.
pub trait MetadataQuery {
    /// Metadata for the module file at `module`.
    ///
    /// `Ok(None)` means the tool could not resolve the file as a module.
    fn module_metadata(&self, module: &Path) -> Result<Option<String>>;
}

/// Runs `modinfo <path>`.
pub struct Modinfo {
    program: String,
}

impl Modinfo {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Modinfo {
    fn default() -> Self {
        Self::new("modinfo")
    }
}

impl MetadataQuery for Modinfo {
    fn module_metadata(&self, module: &Path) -> Result<Option<String>> {
        let result = Cmd::new(&self.program).arg_path(module).allow_fail().run()?;
        if result.success() {
            Ok(Some(result.stdout))
        } else {
            Ok(None)
        }
    }
}
