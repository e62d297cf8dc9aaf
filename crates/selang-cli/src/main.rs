//! Command-line host for selang scripts.
//!
//! Supplies the program source and the input queue, runs the program under
//! a time budget, and prints the output queue.
//!
//! # Usage
//!
//! ```bash
//! # Run a script, feeding two input values
//! selang run fizzbuzz.sl -i 15
//!
//! # Read the script from stdin and print JSON (output + final variables)
//! cat sum.sl | selang run --format json
//!
//! # Give up after one second
//! selang run loop.sl --timeout-ms 1000
//!
//! # Syntax-check only
//! selang check fizzbuzz.sl
//!
//! # Dump the token stream
//! selang tokens fizzbuzz.sl
//! ```

mod config;
mod host;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use crate::config::{OutputFormat, SelangConfig};
use crate::host::{run_with_budget, HostError, RunReport};

/// Run selang scripts.
#[derive(Parser)]
#[command(name = "selang")]
#[command(about = "Run scripts written in the selang language")]
#[command(version)]
struct Cli {
    /// Path to a config file (defaults to ~/.selang/config.json)
    #[arg(long, env = "SELANG_CONFIG")]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, env = "SELANG_LOG_FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile and run a script
    Run {
        /// Path to the script file (reads stdin if omitted)
        script: Option<PathBuf>,
        /// Value to append to the input queue (repeatable, consumed in order)
        #[arg(short, long = "input", value_name = "VALUE")]
        inputs: Vec<String>,
        /// Execution time budget in milliseconds
        #[arg(short, long, env = "SELANG_TIMEOUT_MS")]
        timeout_ms: Option<u64>,
        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },
    /// Compile a script without running it
    Check {
        /// Path to the script file (reads stdin if omitted)
        script: Option<PathBuf>,
    },
    /// Print the token stream of a script
    Tokens {
        /// Path to the script file (reads stdin if omitted)
        script: Option<PathBuf>,
    },
}

#[derive(Debug)]
enum CliError {
    Io(std::io::Error),
    Compile(selang_core::Error),
    Runtime(selang_core::RuntimeError),
    Host(HostError),
    Output(String),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Compile(e) => e.exit_code().into(),
            CliError::Runtime(_) => 3,
            CliError::Io(_) | CliError::Output(_) => 4,
            CliError::Host(HostError::Timeout(_)) => 124,
            CliError::Host(HostError::Worker(_)) => 5,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::Compile(e) => write!(f, "{}", e),
            CliError::Runtime(e) => write!(f, "Runtime error: {}", e),
            CliError::Host(e) => write!(f, "{}", e),
            CliError::Output(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<selang_core::Error> for CliError {
    fn from(e: selang_core::Error) -> Self {
        CliError::Compile(e)
    }
}

fn init_tracing(log_file: Option<&Path>) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    match log_file {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let name = path.file_name().ok_or_else(|| {
                CliError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("Invalid log file path: {}", path.display()),
                ))
            })?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(name.to_string_lossy().into_owned())
                .build(dir)
                .map_err(|e| {
                    CliError::Io(std::io::Error::other(format!(
                        "Cannot open log file {}: {}",
                        path.display(),
                        e
                    )))
                })?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file_appender)
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn read_source(script: Option<&Path>) -> Result<String, CliError> {
    match script {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn print_report(report: &RunReport, format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => {
            for line in &report.output {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report)
                .map_err(|e| CliError::Output(e.to_string()))?;
            println!("{}", json);
        }
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = SelangConfig::load(cli.config.as_deref());

    match cli.command {
        Command::Run { script, inputs, timeout_ms, format } => {
            let source = read_source(script.as_deref())?;
            let program = selang_core::compile(&source)?;
            info!(statements = program.statements().len(), "compiled script");

            let budget = Duration::from_millis(timeout_ms.unwrap_or_else(|| config.timeout_ms()));
            let format = format.unwrap_or_else(|| config.format());
            let report = run_with_budget(program, inputs, budget)
                .await
                .map_err(CliError::Host)?;

            print_report(&report, format)?;
            match report.error {
                Some(e) => Err(CliError::Runtime(e)),
                None => Ok(()),
            }
        }
        Command::Check { script } => {
            let source = read_source(script.as_deref())?;
            let program = selang_core::compile(&source)?;
            debug!(statements = program.statements().len(), "script ok");
            println!("ok");
            Ok(())
        }
        Command::Tokens { script } => {
            let source = read_source(script.as_deref())?;
            let tokens = selang_core::lexer::tokenize(&source)
                .map_err(|e| CliError::Compile(e.into()))?;
            for token in tokens {
                println!("{}\t{}", token.line, token.kind);
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.log_file.as_deref()) {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }

    // Exit explicitly: a timed-out worker thread is still running.
    match run(cli).await {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_cover_every_failure() {
        let io = CliError::Io(std::io::Error::other("disk"));
        assert_eq!(io.exit_code(), 4);
        assert_eq!(CliError::Output("broken pipe".to_string()).exit_code(), 4);
        assert_eq!(
            CliError::Host(HostError::Timeout(Duration::from_millis(10))).exit_code(),
            124
        );
        assert_eq!(
            CliError::Host(HostError::Worker("gone".to_string())).exit_code(),
            5
        );

        let runtime = selang_core::RuntimeError::MissingInput { target: "n".to_string() };
        assert_eq!(CliError::Runtime(runtime).exit_code(), 3);
    }
}
