//! sndfw - which sound kernel modules need firmware from a package.
//!
//! Cross-references the firmware files a package ships (`pacman -Flq`)
//! against the `firmware:` declarations of the running kernel's sound
//! modules (`modinfo`), then prints:
//! - every sound module that needs one of those files
//! - the package's firmware that no sound module asks for
//! - the matched module names as a literal for pasting elsewhere

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use sndfw::commands;
use sndfw::config::{Config, DEFAULT_PACKAGE};
use sndfw::error::CommandFailure;
use sndfw::kernel::{MODULES_ROOT, PROC_VERSION};
use sndfw::report::Format;

#[derive(Parser)]
#[command(name = "sndfw")]
#[command(about = "Match sound kernel modules to the firmware a package provides")]
#[command(
    after_help = "QUICK START:\n  sndfw            Report modules needing alsa-firmware\n  sndfw preflight  Check tools and module tree\n  sndfw show config"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Args)]
struct ConfigArgs {
    /// Package whose firmware files are inspected
    #[arg(
        long,
        global = true,
        env = "SNDFW_PACKAGE",
        default_value = DEFAULT_PACKAGE,
        value_parser = clap::builder::NonEmptyStringValueParser::new()
    )]
    package: String,

    /// Root of the installed kernel module trees
    #[arg(long, global = true, env = "SNDFW_MODULES_ROOT", default_value = MODULES_ROOT)]
    modules_root: PathBuf,

    /// Kernel version banner used when several kernels are installed
    #[arg(long, global = true, env = "SNDFW_PROC_VERSION", default_value = PROC_VERSION)]
    proc_version: PathBuf,

    /// Package manager used to list package files
    #[arg(long, global = true, env = "SNDFW_PACMAN", default_value = "pacman")]
    pacman: String,

    /// Tool used to read module metadata
    #[arg(long, global = true, env = "SNDFW_MODINFO", default_value = "modinfo")]
    modinfo: String,
}

impl From<ConfigArgs> for Config {
    fn from(args: ConfigArgs) -> Self {
        Self {
            package: args.package,
            modules_root: args.modules_root,
            proc_version: args.proc_version,
            pacman: args.pacman,
            modinfo: args.modinfo,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cross-reference report (default)
    Report {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show information
    Show {
        #[command(subcommand)]
        what: ShowTarget,
    },

    /// Check host tools and the module tree
    Preflight {
        /// Fail if any checks fail (exit code 1)
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum ShowTarget {
    /// Show current configuration
    Config,
    /// List the sound module files of the running kernel
    Modules,
}

fn main() -> ExitCode {
    // Load .env if present, before clap reads the environment
    dotenvy::dotenv().ok();

    // stdout carries the report, diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<CommandFailure>() {
                // The tool already explained itself; pass its words through untouched.
                Some(failure) => eprint!("{}", failure.stderr),
                None => eprintln!("Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::from(cli.config);
    tracing::debug!("Using {:?}", config);

    match cli.command {
        None => commands::cmd_report(&config, Format::Text)?,

        Some(Commands::Report { format }) => {
            let format = match format {
                OutputFormat::Text => Format::Text,
                OutputFormat::Json => Format::Json,
            };
            commands::cmd_report(&config, format)?;
        }

        Some(Commands::Show { what }) => {
            let show_target = match what {
                ShowTarget::Config => commands::show::ShowTarget::Config,
                ShowTarget::Modules => commands::show::ShowTarget::Modules,
            };
            commands::cmd_show(show_target, &config)?;
        }

        Some(Commands::Preflight { strict }) => {
            commands::cmd_preflight(&config, strict)?;
        }
    }

    Ok(())
}
