use std::{ffi::OsString, path::PathBuf, process};

use clap::{error::ErrorKind, ArgAction, Parser};
use dp_extract::{ExtractError, Extractor, ExtractorConfig, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const PROGRAM: &str = "dp-extract";

/// Extract the JSON payload from an MCP temp file and strip U+2028/U+2029.
#[derive(Parser, Debug)]
#[command(name = PROGRAM, version)]
struct Cli {
    /// MCP tool-result temp file (use `--` before paths starting with `-`)
    input: PathBuf,

    /// Where to write the cleaned payload (overwritten)
    output: PathBuf,

    // Anything after the two paths is ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    extra: Vec<OsString>,

    /// Config file (.json/.toml) or inline JSON
    #[arg(long)]
    config: Option<String>,

    /// Log to stderr: -v for info, -vv for debug
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<String> {
    let config = match &cli.config {
        Some(config) => ExtractorConfig::from_config(config)?,
        None => ExtractorConfig::default(),
    };
    debug!(%config, "loaded config");

    let extractor = Extractor::builder().with_config(config).build()?;
    let summary = extractor.run(&cli.input, &cli.output)?;
    summary.to_json_line()
}

fn fail(err: ExtractError) -> ! {
    if err.is_usage() {
        eprintln!("{err}");
    } else {
        eprintln!("Error: {err}");
    }
    process::exit(err.exit_code());
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            ErrorKind::MissingRequiredArgument => fail(ExtractError::Usage {
                program: PROGRAM.to_string(),
            }),
            _ => {
                let _ = err.print();
                process::exit(1);
            }
        },
    };

    init_tracing(cli.verbose);
    if !cli.extra.is_empty() {
        debug!(count = cli.extra.len(), "ignoring extra arguments");
    }

    match run(&cli) {
        Ok(line) => println!("{line}"),
        Err(err) => fail(err),
    }
}
