//! CLI command handlers.
//!
//! Each submodule handles a specific CLI command:
//! - `report` - Cross-reference sound modules and package firmware
//! - `show` - Display information
//! - `preflight` - Run preflight checks

mod preflight;
pub mod report;
pub mod show;

pub use preflight::cmd_preflight;
pub use report::cmd_report;
pub use show::cmd_show;
