use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mitoscan_core::AlignmentMode;
use std::path::PathBuf;

mod commands;
mod config;
mod error;
mod fasta;

use commands::align::AlignOptions;
use config::Config;
use error::{print_error_and_exit, CliError};

#[derive(Parser)]
#[command(name = "mitoscan")]
#[command(about = "MitoScan - pairwise alignment and motif search for mitochondrial genomes")]
#[command(version)]
#[command(long_about = "
MitoScan loads the records of a FASTA file, aligns them pairwise with
Needleman-Wunsch or Smith-Waterman, and locates motifs with an FM-index.

Examples:
  mitoscan list --fasta mito.fasta
  mitoscan align --fasta mito.fasta --id1 NC_012920.1 --id2 NC_001807.4 --mode local
  mitoscan motif --fasta mito.fasta --motif GATC --json
  mitoscan reference --fasta mito.fasta --reference-id NC_012920.1
  mitoscan config > mitoscan.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of threads to use
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Align two records from a FASTA file
    Align {
        /// FASTA file (.fa/.fasta/.fna, optionally gzipped)
        #[arg(long, required = true)]
        fasta: PathBuf,

        /// Id of the first record
        #[arg(long, required = true)]
        id1: String,

        /// Id of the second record
        #[arg(long, required = true)]
        id2: String,

        /// Alignment mode (global or local)
        #[arg(long)]
        mode: Option<AlignmentMode>,

        /// Match score
        #[arg(long = "match", allow_hyphen_values = true)]
        match_score: Option<i32>,

        /// Mismatch score
        #[arg(long, allow_hyphen_values = true)]
        mismatch: Option<i32>,

        /// Gap score
        #[arg(long, allow_hyphen_values = true)]
        gap: Option<i32>,

        /// Columns per output block
        #[arg(long)]
        width: Option<usize>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Locate a motif in every record
    Motif {
        /// FASTA file (.fa/.fasta/.fna, optionally gzipped)
        #[arg(long, required = true)]
        fasta: PathBuf,

        /// Motif to search for
        #[arg(long, required = true)]
        motif: String,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Align every record against a reference record
    Reference {
        /// FASTA file (.fa/.fasta/.fna, optionally gzipped)
        #[arg(long, required = true)]
        fasta: PathBuf,

        /// Id of the reference record
        #[arg(long, required = true)]
        reference_id: String,

        /// Alignment mode (global or local)
        #[arg(long)]
        mode: Option<AlignmentMode>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List records with length and GC content
    List {
        /// FASTA file (.fa/.fasta/.fna, optionally gzipped)
        #[arg(long, required = true)]
        fasta: PathBuf,
    },

    /// Print an example configuration file
    Config,
}

fn setup_logging(verbose: u8, quiet: bool) -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        let level = if quiet {
            "error"
        } else {
            match verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        };
        std::env::set_var("RUST_LOG", level);
    }

    env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .init();

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.verbose, cli.quiet)?;

    let config = Config::load(cli.config.as_deref())?;

    let threads = cli.threads.unwrap_or(config.general.threads);
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to set thread count")?;
    }

    match cli.command {
        Commands::Align {
            fasta,
            id1,
            id2,
            mode,
            match_score,
            mismatch,
            gap,
            width,
            json,
        } => {
            let opts = AlignOptions {
                mode,
                match_score,
                mismatch,
                gap,
                width,
                json,
            };
            commands::align::execute(&config, &fasta, &id1, &id2, opts)?;
        }

        Commands::Motif { fasta, motif, json } => {
            commands::motif::execute(&fasta, &motif, json)?;
        }

        Commands::Reference {
            fasta,
            reference_id,
            mode,
            json,
        } => {
            commands::reference::execute(&config, &fasta, &reference_id, mode, json)?;
        }

        Commands::List { fasta } => {
            commands::list::execute(&fasta)?;
        }

        Commands::Config => {
            print!("{}", Config::example_toml()?);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        if let Some(cli_err) = err.downcast_ref::<CliError>() {
            print_error_and_exit(cli_err);
        }
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_align_with_negative_scores() {
        let cli = Cli::try_parse_from([
            "mitoscan", "align", "--fasta", "m.fasta", "--id1", "a", "--id2", "b",
            "--mode", "local", "--mismatch", "-3", "--gap", "-4",
        ])
        .unwrap();

        match cli.command {
            Commands::Align { mode, mismatch, gap, match_score, .. } => {
                assert_eq!(mode, Some(AlignmentMode::Local));
                assert_eq!(mismatch, Some(-3));
                assert_eq!(gap, Some(-4));
                assert_eq!(match_score, None);
            }
            _ => panic!("expected align command"),
        }
    }

    #[test]
    fn test_parse_bad_mode() {
        let parsed = Cli::try_parse_from([
            "mitoscan", "reference", "--fasta", "m.fasta", "--reference-id", "r", "--mode", "fast",
        ]);
        assert!(parsed.is_err());
    }
}
