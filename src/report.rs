//! Rendering the cross-reference report.
//!
//! [`Report::build`] does the bookkeeping (which firmware went unused) and
//! keeps the matched module names as plain data. Text only appears in
//! [`Report::write_text`] and [`ModulesTuple`]'s `Display`.

use anyhow::Result;
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;

use crate::firmware::FirmwareSet;
use crate::join::ModuleRecord;

/// Matched module names, rendered as a parenthesized literal for pasting
/// into other source files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModulesTuple(pub Vec<String>);

impl fmt::Display for ModulesTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self.0.iter().map(|name| format!("\t'{}'", name)).collect();
        write!(f, "modules = (\n{}\n)", entries.join(",\n"))
    }
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// The finished cross-reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub package: String,
    pub modules: Vec<ModuleRecord>,
    /// Package firmware no matched module asked for, in manifest order.
    pub unused_firmware: Vec<PathBuf>,
    pub modules_tuple: ModulesTuple,
}

impl Report {
    /// Assemble the report, consuming the package's firmware set.
    ///
    /// Each firmware reference of a matched module removes at most one entry
    /// from the set; whatever is left is reported as unused.
    pub fn build(package: &str, modules: Vec<ModuleRecord>, mut firmware: FirmwareSet) -> Self {
        for module in &modules {
            for path in &module.firmware {
                firmware.remove_first(path);
            }
        }

        let names = modules.iter().map(|m| m.name.clone()).collect();

        Self {
            package: package.to_string(),
            modules,
            unused_firmware: firmware.into_vec(),
            modules_tuple: ModulesTuple(names),
        }
    }

    /// Human-readable report.
    pub fn write_text(&self, out: &mut impl Write) -> Result<()> {
        writeln!(
            out,
            "Sound LKMs with firmware provided by the `{}` package: \n",
            self.package
        )?;

        for module in &self.modules {
            writeln!(out, "       name: {}", module.name)?;
            writeln!(out, "description: {}", module.description)?;
            for path in &module.firmware {
                writeln!(out, "   firmware: {}", path.display())?;
            }
            writeln!(out)?;
        }

        writeln!(out, "Firmware files without a match to a sound LKM:")?;
        for path in &self.unused_firmware {
            writeln!(out, "{}", path.display())?;
        }

        writeln!(out, "\nModules tuple:\n{}", self.modules_tuple)?;
        Ok(())
    }

    /// The same report as pretty-printed JSON.
    pub fn write_json(&self, out: &mut impl Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        Ok(())
    }

    pub fn write(&self, format: Format, out: &mut impl Write) -> Result<()> {
        match format {
            Format::Text => self.write_text(out),
            Format::Json => self.write_json(out),
        }
    }
}
