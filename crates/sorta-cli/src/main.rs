use anyhow::Result;
use clap::{Parser, Subcommand};
use sorta_core::decompress::WorkflowOptions;
use sorta_core::{compress, execute, CancelToken, Error, Operation, Outcome};
use std::path::PathBuf;
use std::process;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod runner;

#[derive(Parser)]
#[command(name = "sorta")]
#[command(author, version, about = "Tidy up a directory of downloaded archives", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every archive under a directory and flatten the result
    Decompress {
        /// Directory to scan for archives
        directory: PathBuf,

        /// Delete the original archives after extraction
        #[arg(long)]
        delete_archives: bool,
    },

    /// Compress a folder into a single zip archive
    Compress {
        /// Folder to compress
        directory: PathBuf,

        /// Output archive path (default: <parent>/<folder>.zip)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Collect scattered images into an Images/ subfolder
    Images {
        /// Directory to organize
        directory: PathBuf,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    // Ctrl-C flips the shared token; the running operation notices at its
    // next cancellation checkpoint and winds down cooperatively.
    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        warn!("Could not install interrupt handler: {}", e);
    }

    match run(cli, cancel) {
        Ok(outcome) => {
            println!("{}", outcome);
            process::exit(0);
        }
        Err(e) => {
            error!("Error: {}", e);
            process::exit(exit_code(&e));
        }
    }
}

/// Cancellation and fatal precondition errors get their own exit codes so
/// scripts can tell them apart.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<Error>() {
        Some(Error::Cancelled) => 130,
        Some(Error::NotFound(_)) | Some(Error::NoArchivesFound(_)) => 2,
        _ => 1,
    }
}

fn run(cli: Cli, cancel: CancelToken) -> Result<Outcome> {
    let show_progress = !cli.quiet;

    let outcome = match cli.command {
        Commands::Decompress {
            directory,
            delete_archives,
        } => {
            info!("Decompressing archives under {:?}", directory);
            let options = WorkflowOptions { delete_archives };
            runner::run(show_progress, cancel, move |sink, cancel| {
                execute(
                    Operation::DecompressArchives,
                    &directory,
                    options,
                    sink,
                    cancel,
                )
            })?
        }

        Commands::Compress { directory, output } => {
            info!("Compressing folder {:?}", directory);
            runner::run(show_progress, cancel, move |sink, cancel| {
                let report = compress::compress_folder(&directory, output, sink, cancel)?;
                if !report.failed.is_empty() {
                    warn!("{} file(s) could not be added", report.failed.len());
                }
                Ok(Outcome::Compressed {
                    archive: report.output,
                })
            })?
        }

        Commands::Images { directory } => {
            info!("Organizing images under {:?}", directory);
            runner::run(show_progress, cancel, move |sink, cancel| {
                execute(
                    Operation::ExtractImages,
                    &directory,
                    WorkflowOptions::default(),
                    sink,
                    cancel,
                )
            })?
        }
    };

    Ok(outcome)
}
