//! Show command - displays information.

use anyhow::Result;

use crate::config::Config;
use crate::kernel;

/// Show target for the show command.
pub enum ShowTarget {
    /// Show configuration
    Config,
    /// Show the sound module files that would be inspected
    Modules,
}

/// Execute the show command.
pub fn cmd_show(target: ShowTarget, config: &Config) -> Result<()> {
    match target {
        ShowTarget::Config => config.print(),
        ShowTarget::Modules => {
            for module in kernel::sound_modules(&config.modules_root, &config.proc_version)? {
                println!("{}", module.display());
            }
        }
    }
    Ok(())
}
