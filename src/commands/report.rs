//! Report command - the sound module / firmware cross-reference.

use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;

use crate::config::Config;
use crate::firmware::{firmware_files, ManifestQuery, Pacman};
use crate::join::modules_requiring_firmware;
use crate::kernel;
use crate::modinfo::{MetadataQuery, Modinfo};
use crate::report::{Format, Report};

/// Join `modules` against the firmware `package` provides.
///
/// Nothing is printed; a failing package query returns before any output
/// could be produced.
pub fn cross_reference(
    package: &str,
    modules: &[PathBuf],
    manifest: &dyn ManifestQuery,
    metadata: &dyn MetadataQuery,
) -> Result<Report> {
    let firmware = firmware_files(manifest, package)?;
    let records = modules_requiring_firmware(modules, &firmware, metadata)?;
    Ok(Report::build(package, records, firmware))
}

/// Execute the report command.
pub fn cmd_report(config: &Config, format: Format) -> Result<()> {
    let modules = kernel::sound_modules(&config.modules_root, &config.proc_version)?;

    let report = cross_reference(
        &config.package,
        &modules,
        &Pacman::new(&config.pacman),
        &Modinfo::new(&config.modinfo),
    )?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report.write(format, &mut out)?;
    out.flush()?;
    Ok(())
}
