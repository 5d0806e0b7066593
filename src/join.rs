//! Matching sound modules to the firmware a package provides.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::firmware::FirmwareSet;
use crate::modinfo::{parse_module_metadata, MetadataQuery};

/// A module that needs at least one firmware file from the package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleRecord {
    pub name: String,
    pub description: String,
    /// Declared firmware that the package provides, in declaration order.
    pub firmware: Vec<PathBuf>,
}

/// Modules from `modules` whose declared firmware overlaps `firmware`.
///
/// Files the metadata tool cannot resolve are skipped. The result is sorted
/// by module name; modules sharing a name keep their discovery order.
pub fn modules_requiring_firmware(
    modules: &[PathBuf],
    firmware: &FirmwareSet,
    query: &dyn MetadataQuery,
) -> Result<Vec<ModuleRecord>> {
    let mut records = Vec::new();

    for module in modules {
        let Some(text) = query.module_metadata(module)? else {
            continue;
        };

        let metadata = parse_module_metadata(&text)
            .with_context(|| format!("Unreadable metadata for {}", module.display()))?;

        let provided: Vec<PathBuf> = metadata
            .firmware
            .into_iter()
            .filter(|path| firmware.contains(path))
            .collect();

        if !provided.is_empty() {
            records.push(ModuleRecord {
                name: metadata.name,
                description: metadata.description,
                firmware: provided,
            });
        }
    }

    records.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::debug!("{} modules use firmware from the package", records.len());
    Ok(records)
}
