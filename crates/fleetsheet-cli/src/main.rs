mod commands;
mod logger;
mod output;

use clap::{Parser, Subcommand};
use fleetsheet_core::error::FleetsheetError;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "fleetsheet",
    version,
    about = "Build the service overview raw sheet from carrier service reports"
)]
struct Cli {
    /// Debug logging for the extraction pipeline
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert, extract and write the raw sheet for every service file
    Build {
        /// TOML run configuration
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Directory holding the legacy .xls service files
        #[arg(long, value_name = "DIR")]
        source: Option<PathBuf>,

        /// Directory the converted .xlsx files are written to
        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,

        /// Workbook listing the known service codes in column A
        #[arg(long, value_name = "FILE")]
        reference: Option<PathBuf>,

        /// Output workbook
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Workbook whose other sheets are carried into the output
        #[arg(long, value_name = "FILE")]
        template: Option<PathBuf>,

        /// Name of the output sheet
        #[arg(long, value_name = "NAME")]
        sheet: Option<String>,

        /// Read .xlsx files from the destination directory as they are
        #[arg(long)]
        no_convert: bool,
    },
    /// Resolve a single service file and print its rows
    Inspect {
        /// Path to a converted .xlsx service file
        input_file: PathBuf,

        /// Workbook listing the known service codes in column A
        #[arg(long, value_name = "FILE")]
        reference: Option<PathBuf>,

        /// TOML run configuration
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Print the default configuration as TOML
    Config,
}

fn main() {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose);

    let result = match cli.command {
        Commands::Build {
            config,
            source,
            dest,
            reference,
            output,
            template,
            sheet,
            no_convert,
        } => commands::build::run(commands::build::BuildArgs {
            config,
            source,
            dest,
            reference,
            output,
            template,
            sheet,
            no_convert,
        }),
        Commands::Inspect {
            input_file,
            reference,
            config,
            output,
        } => commands::inspect::run(input_file, reference, config, &output),
        Commands::Config => commands::config::run(),
    };

    if let Err(e) = result {
        eprintln!("{}", report_failure(&e));
        std::process::exit(1);
    }
}

/// Log the failure at the batch boundary and return the message for stderr.
fn report_failure(e: &FleetsheetError) -> String {
    tracing::error!(error = %e, "run failed");
    format!("Error: {e}")
}
