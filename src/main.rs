//! lineterm - echo loop over the interactive line reader
//! Main entry point

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::{Context, Result};
use lineterm::constants::env;
use lineterm::{is_interactive, LineSource, LinerConfig, PlainLines, StdioLiner};
use tracing_subscriber::EnvFilter;

const PROMPT: &str = "> ";

/// Log to a file when `LINETERM_LOG` is set; the terminal itself is busy
fn init_logging() -> Result<()> {
    let Ok(directives) = std::env::var(env::LOG) else {
        return Ok(());
    };
    let path = std::env::var(env::LOG_FILE).unwrap_or_else(|_| env::DEFAULT_LOG_FILE.to_string());
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {path}"))?;

    // a subscriber may already be installed by an embedding process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn run_interactive(config: LinerConfig) -> Result<()> {
    let mut liner = StdioLiner::stdio(config).context("opening the terminal")?;
    let mut stdout = io::stdout();

    while liner.has_next() {
        write!(stdout, "{PROMPT}")?;
        stdout.flush()?;

        let line = match liner.read_line() {
            Ok(line) => line,
            Err(err) if err.is_end_of_input() => break,
            Err(err) => return Err(err).context("reading a line"),
        };
        if line == "\n" {
            liner.release(line);
            break;
        }

        write!(stdout, "{}", line.replace('\n', "\r\n"))?;
        liner.release(line);
    }
    Ok(())
}

fn run_plain() -> Result<()> {
    let mut lines = PlainLines::new(io::stdin().lock());
    let mut stdout = io::stdout();

    while lines.has_next() {
        match lines.read_line() {
            Ok(line) => write!(stdout, "{line}")?,
            Err(err) if err.is_end_of_input() => break,
            Err(err) => return Err(err).context("reading a line"),
        }
    }
    stdout.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;
    let config = LinerConfig::from_env();
    tracing::info!(?config, "starting");

    if is_interactive() {
        run_interactive(config)
    } else {
        run_plain()
    }
}
