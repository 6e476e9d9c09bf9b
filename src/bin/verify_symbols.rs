use aac_core::core::corpus::SymbolCorpusIndex;
use aac_core::core::vocabulary::uncovered_core_words;
use aac_core::persistence::{load_core_vocabulary, load_vocabulary_map, scan_symbol_directory};
use aac_core::EngineConfig;
use clap::Parser;
use crossterm::style::Stylize;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

/// Checks a built map against the symbol directory and the core vocabulary.
/// Exits non-zero when the map points at files that no longer exist.
#[derive(Parser, Debug)]
#[command(name = "verify_symbols")]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    symbols_dir: Option<PathBuf>,

    #[arg(long)]
    map: Option<PathBuf>,

    #[arg(long)]
    core_words: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
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

    let corpus = SymbolCorpusIndex::build(
        scan_symbol_directory(&config.symbols_dir, config.extension()),
        config.extension(),
    );
    let map = load_vocabulary_map(&config.vocabulary_map_path)?;
    let core = load_core_vocabulary(&config.core_words_path)?;

    let audit = map.audit(&corpus, &config.icons);
    println!("{}", "Symbol map check".bold());
    println!("  symbols on disk:  {}", corpus.len());
    println!("  map entries:      {}", map.len());
    println!("  resolved:         {}", audit.existing.len().to_string().green());
    println!("  no-symbol marker: {}", audit.sentinel.len());

    if !audit.missing.is_empty() {
        println!();
        println!("{}", "Entries pointing at missing files:".red().bold());
        for (word, file) in &audit.missing {
            println!("  {} -> {}", word, file.as_str().red());
        }
    }

    let uncovered = uncovered_core_words(&core, &map);
    println!();
    if uncovered.is_empty() {
        println!("{}", "Every core word has a symbol.".green());
    } else {
        println!(
            "{} {}/{}",
            "Core words using the fallback icon:".yellow().bold(),
            uncovered.len(),
            core.len()
        );
        println!("  {}", uncovered.join(", "));
    }

    Ok(if audit.is_clean() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
