use std::{
    fs::read_to_string,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser;
use flight::SourceFile;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flight")]
#[command(about = "Checks and runs flight programs", long_about = None)]
struct Cli {
    /// Source files, pooled into one program
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Only report diagnostics, do not run `main`
    #[arg(long)]
    check: bool,

    /// Log more (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_sources(files: &[PathBuf]) -> Result<Vec<SourceFile>> {
    files
        .iter()
        .map(|path| {
            let contents = read_to_string(path)
                .with_context(|| format!("Failed to read '{}'", path.display()))?;
            Ok(SourceFile::new(path.to_string_lossy(), contents))
        })
        .collect()
}

fn execute(cli: &Cli) -> Result<()> {
    let sources = read_sources(&cli.files)?;
    let start = Instant::now();

    if cli.check {
        flight::compile(&sources)?;
        info!(elapsed = ?start.elapsed(), "checked");
        return Ok(());
    }

    let stdout = io::stdout();
    let mut output = stdout.lock();
    flight::run(&sources, &mut output)?;
    output.flush()?;
    info!(elapsed = ?start.elapsed(), "finished");

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{:#}", error);
            ExitCode::FAILURE
        }
    }
}
