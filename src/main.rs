//! `tiltcard` — replay a script of pointer events against one card and print
//! the resulting actions as JSON lines.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use tiltcard::card::Card;
use tiltcard::config::TiltConfig;
use tiltcard::error::ConfigError;
use tiltcard::geometry::Rect;
use tiltcard::input::PointerEvent;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("io: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: {source}")]
    Event {
        line: usize,
        source: serde_json::Error,
    },
    #[error("encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(
    name = "tiltcard",
    about = "Replay pointer events against a tilting card"
)]
struct Cli {
    /// JSON-lines event script; reads stdin when omitted.
    script: Option<PathBuf>,

    #[arg(long, default_value_t = 0.0)]
    top: f64,

    #[arg(long, default_value_t = 0.0)]
    left: f64,

    #[arg(long, default_value_t = 300.0)]
    width: f64,

    #[arg(long, default_value_t = 400.0)]
    height: f64,

    /// Log state transitions to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = TiltConfig::from_env()?;
    let rect = Rect::new(cli.top, cli.left, cli.width, cli.height);
    info!(?rect, ?config, "replaying");

    let reader: Box<dyn BufRead> = match &cli.script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let mut out = BufWriter::new(io::stdout().lock());
    let mut card = Card::with_config(rect, config);

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let event: PointerEvent = match serde_json::from_str(trimmed) {
            Ok(event) => event,
            Err(source) => {
                return Err(CliError::Event {
                    line: index + 1,
                    source,
                });
            }
        };
        debug!(?event, "event");
        for action in card.handle(event) {
            serde_json::to_writer(&mut out, &action)?;
            out.write_all(b"\n")?;
        }
    }
    out.flush()?;
    Ok(())
}
