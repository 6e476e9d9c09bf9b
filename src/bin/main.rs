use aac_core::core::types::parse_detections;
use aac_core::{EngineConfig, SentenceEngine};
use clap::Parser;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Line-oriented suggestion server: detections in on stdin, envelopes out on stdout.
///
/// Commands, one per line:
///   SUGGEST <json array of {name, confidence}>
///   CORE_WORDS
///   EXIT
#[derive(Parser, Debug)]
#[command(name = "aac_engine")]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON config file; built-in defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the configured symbol directory
    #[arg(long)]
    symbols_dir: Option<PathBuf>,

    /// Overrides the configured vocabulary map
    #[arg(long)]
    map: Option<PathBuf>,

    /// Overrides the configured core vocabulary file
    #[arg(long)]
    core_words: Option<PathBuf>,

    /// Verbosity level (logs go to stderr)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    aac_core::init_tracing(cli.verbose)?;

    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(dir) = cli.symbols_dir {
        config.symbols_dir = dir;
    }
    if let Some(path) = cli.map {
        config.vocabulary_map_path = path;
    }
    if let Some(path) = cli.core_words {
        config.core_words_path = path;
    }

    let engine = SentenceEngine::from_config(&config)?;
    tracing::info!(
        symbols = engine.corpus().len(),
        mapped = engine.vocabulary().len(),
        "AAC engine ready"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let input = line?;
        let (command, payload) = match input.trim().split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (input.trim(), ""),
        };

        match command {
            "SUGGEST" => {
                let detections = match parse_detections(payload) {
                    Ok(detections) => detections,
                    Err(err) => {
                        tracing::warn!(error = %err, "SUGGEST payload is not a JSON array; treating as empty");
                        Vec::new()
                    }
                };
                let envelope = engine.suggest(&detections);
                writeln!(stdout, "{}", serde_json::to_string(&envelope)?)?;
            }
            "CORE_WORDS" => {
                writeln!(stdout, "{}", serde_json::to_string(&engine.core_word_icons())?)?;
            }
            "EXIT" => {
                tracing::info!("received EXIT");
                break;
            }
            "" => continue,
            other => {
                tracing::warn!(command = other, "unknown command");
                continue;
            }
        }
        stdout.flush()?;
    }

    tracing::info!("shutting down");
    Ok(())
}
