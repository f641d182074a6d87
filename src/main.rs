use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use navstack::core::config::{self, CliOverrides};
use navstack::core::script::{self, Script};
use simplelog::{ConfigBuilder, WriteLogger};

#[derive(Parser)]
#[command(name = "navstack", about = "Navigation stack sync engine and host simulator")]
struct Args {
    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log file path
    #[arg(long, global = true)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive host simulator (default)
    Tui,
    /// Replay a TOML script against a fresh router and print the trace
    Replay {
        script: PathBuf,
        /// Print the trace as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: {e}. Using defaults.");
            config::NavstackConfig::default()
        }
    };
    let cli = CliOverrides {
        log_level: args.log_level,
        log_file: args.log_file,
    };
    let resolved = config::resolve(&file_config, &cli);

    // Initialize file logger - the TUI owns the terminal, so logs go to disk
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!("navstack starting up with config: {:?}", resolved);

    match args.command.unwrap_or(Command::Tui) {
        Command::Tui => match navstack::tui::run(resolved) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
        Command::Replay { script: path, json } => {
            let script = match Script::load(&path) {
                Ok(s) => s,
                Err(e) => {
                    log::warn!("Replay aborted: {}", e);
                    eprintln!("Error: {e}");
                    return ExitCode::FAILURE;
                }
            };
            let trace = script::replay(&script, resolved.allow_duplicates);
            if json {
                match serde_json::to_string_pretty(&trace) {
                    Ok(out) => println!("{out}"),
                    Err(e) => {
                        eprintln!("Error: {e}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print!("{}", trace.render_table());
            }
            if trace.is_consistent() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
