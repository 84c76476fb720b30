use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use xyzpsf::core::io::psf::RowWrap;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    name = "xyz2psf",
    version,
    about = "xyz2psf - Convert an extended XYZ geometry into a PSF topology, inferring bonds, angles and dihedrals from interatomic distances.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert an XYZ file into a PSF topology written to standard output.
    Convert(ConvertArgs),
    /// Report atom and connectivity counts for an XYZ file without writing a topology.
    Inspect(InspectArgs),
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    // --- Core Arguments ---
    /// Path to the XYZ file to be converted.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub file: PathBuf,

    /// Id number of the fragment, written into the molecule and residue columns.
    #[arg(long, value_name = "INT", allow_negative_numbers = true)]
    pub id: Option<i64>,

    /// Write the PSF here instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Connectivity Overrides ---
    /// Consider atoms as isolated: keep the counts but write no connectivity rows.
    #[arg(long)]
    pub isolated: bool,

    /// Only atom pairs closer than this distance are bonded (input length units).
    #[arg(short = 't', long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub bond_threshold: Option<f64>,

    // --- Output Overrides ---
    /// TOML file of element symbol to mass overrides.
    #[arg(short = 'm', long, value_name = "PATH")]
    pub mass_table: Option<PathBuf>,

    /// Title line written into the PSF header.
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Row layout of the connectivity sections: 'legacy' or 'complete'.
    #[arg(long, value_name = "MODE")]
    pub row_wrap: Option<RowWrap>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the XYZ file to inspect.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub file: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only atom pairs closer than this distance are bonded (input length units).
    #[arg(short = 't', long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub bond_threshold: Option<f64>,

    /// TOML file of element symbol to mass overrides.
    #[arg(short = 'm', long, value_name = "PATH")]
    pub mass_table: Option<PathBuf>,
}
