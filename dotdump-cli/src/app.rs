use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use dotdump::render::HexCase;

/// dotdump - .NET metadata table dumper with EnC delta support
#[derive(Debug, Parser)]
#[command(name = "dotdump", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit listings as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// An EnC delta to apply before dumping.
#[derive(Debug, Args)]
pub struct DeltaArgs {
    /// Delta metadata file (.dmeta).
    #[arg(long, value_name = "FILE", requires = "delta_il")]
    pub delta_meta: Option<PathBuf>,

    /// Delta IL file (.dil).
    #[arg(long, value_name = "FILE", requires = "delta_meta")]
    pub delta_il: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List metadata tables and row counts.
    List {
        /// Path to the .NET module or metadata image.
        #[arg(value_name = "FILE")]
        path: PathBuf,

        #[command(flatten)]
        delta: DeltaArgs,
    },

    /// Render metadata tables as text.
    Dump {
        /// Path to the .NET module or metadata image.
        #[arg(value_name = "FILE")]
        path: PathBuf,

        #[command(flatten)]
        delta: DeltaArgs,

        /// Tables to dump, by name (TypeDef, Method, MethodDef) or index (0x06).
        #[arg(short, long = "table", value_name = "TABLE", required = true, num_args = 1..)]
        tables: Vec<String>,

        /// Letter case of hex dump bytes.
        #[arg(long, value_enum, default_value_t = HexCaseArg::Upper)]
        hex_case: HexCaseArg,

        /// Write to this file instead of stdout.
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HexCaseArg {
    Upper,
    Lower,
}

impl From<HexCaseArg> for HexCase {
    fn from(arg: HexCaseArg) -> Self {
        match arg {
            HexCaseArg::Upper => HexCase::Upper,
            HexCaseArg::Lower => HexCase::Lower,
        }
    }
}
