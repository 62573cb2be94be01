//! fileseq - numbered file sequence tool
//!
//! This is the main library entry point that exposes all modules
//! and runs the command-line application.

// Module declarations
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod files;
pub mod sequence;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SeqError};
pub use files::SequenceOps;
pub use types::*;

use clap::Parser;
use log::{debug, info};
use std::io::{self, Write};
use std::process::ExitCode;

use cli::{Action, Args};
use commands::OutputStyle;
use config::AppConfig;

fn init_logging(args: &Args, config: &AppConfig) {
    let level = args
        .verbosity_level()
        .unwrap_or(config.log_level.as_str())
        .to_string();
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .try_init();
}

fn output_style(args: &Args, config: &AppConfig) -> OutputStyle {
    if args.json {
        OutputStyle::Json
    } else if args.no_color || !config.color {
        OutputStyle::Plain
    } else {
        OutputStyle::Color
    }
}

fn dispatch(args: &Args, config: &AppConfig) -> anyhow::Result<bool> {
    let ops = SequenceOps::from_config(config);
    let style = output_style(args, config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let report = match args.action() {
        Action::List => {
            let root =
                commands::resolve_root(args.path.as_deref()).map_err(anyhow::Error::msg)?;
            commands::list(&root, style, &mut out)?;
            None
        }
        Action::Reverse(notation) => {
            commands::expand(&notation, style, &mut out)?;
            None
        }
        Action::Copy(pair) => Some(commands::copy(&ops, &pair, args.force)?),
        Action::Move(pair) => Some(commands::move_files(&ops, &pair, args.force)?),
        Action::Reseq(pair) => Some(commands::reseq(&ops, &pair)?),
        Action::Delete(notation) => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            match commands::delete(&ops, &notation, args.force, args.trash, &mut input, &mut out)? {
                Some(result) => Some(result),
                None => return Ok(false),
            }
        }
    };

    if let Some(result) = report {
        info!("{}", result.message);
    }
    out.flush()?;
    Ok(true)
}

/// Run the command-line application
pub fn run() -> ExitCode {
    let args = Args::parse();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&args, &config);
    debug!("Running with {:?}", config);

    match dispatch(&args, &config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
