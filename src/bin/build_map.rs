use aac_core::builder::{BuildReport, VocabularyBuilder, WordOutcome};
use aac_core::core::corpus::SymbolCorpusIndex;
use aac_core::persistence::{
    load_core_vocabulary, load_overrides, save_vocabulary_map, scan_symbol_directory,
};
use aac_core::EngineConfig;
use clap::Parser;
use crossterm::style::Stylize;
use std::error::Error;
use std::path::PathBuf;

/// Builds the word -> symbol map from the symbol directory and vocabulary lists.
#[derive(Parser, Debug)]
#[command(name = "build_aac_map")]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON config file; built-in defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    symbols_dir: Option<PathBuf>,

    #[arg(long)]
    core_words: Option<PathBuf>,

    /// Curator overrides (word -> file name)
    #[arg(long)]
    overrides: Option<PathBuf>,

    /// Where to write the map; defaults to the configured vocabulary map path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List every word with the tier that resolved it
    #[arg(long)]
    details: bool,

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
    if let Some(path) = cli.core_words {
        config.core_words_path = path;
    }
    if let Some(path) = cli.overrides {
        config.overrides_path = path;
    }
    if let Some(path) = cli.output {
        config.vocabulary_map_path = path;
    }

    let core = load_core_vocabulary(&config.core_words_path)?;
    let overrides = load_overrides(&config.overrides_path)?;
    let corpus = SymbolCorpusIndex::build(
        scan_symbol_directory(&config.symbols_dir, config.extension()),
        config.extension(),
    );
    if corpus.is_empty() {
        println!(
            "{} no symbols found in {}",
            "warning:".yellow().bold(),
            config.symbols_dir.display()
        );
    }

    let builder = VocabularyBuilder::new(&config.builder, &config.icons);
    let report = builder.build(
        &core,
        &config.builder.extra_verbs,
        &config.builder.extra_nouns,
        &corpus,
        &overrides,
    );
    save_vocabulary_map(&report.map, &config.vocabulary_map_path)?;

    print_summary(&report, cli.details);
    println!(
        "{} {}",
        "Saved".green().bold(),
        config.vocabulary_map_path.display()
    );
    Ok(())
}

fn print_summary(report: &BuildReport, details: bool) {
    println!("{}", "AAC vocabulary map".bold());
    println!("  symbols mapped: {}", report.map.len().to_string().green());
    println!("  from overrides: {}", report.override_count());
    println!("  auto-matched:   {}", report.matched_count());

    if details {
        println!();
        for word in &report.words {
            match &word.outcome {
                WordOutcome::Override { file_name } => {
                    println!("  {:<12} {} (override)", word.word, file_name)
                }
                WordOutcome::Matched { file_name, tier } => {
                    println!("  {:<12} {} ({})", word.word, file_name, tier)
                }
                WordOutcome::Unmatched => println!("  {:<12} {}", word.word, "-".dark_grey()),
            }
        }
    }

    let rejected: Vec<_> = report.rejected_overrides().collect();
    if !rejected.is_empty() {
        println!();
        println!("{}", "Overrides naming missing symbols:".red().bold());
        for (word, file) in rejected {
            println!("  {} -> {}", word, file.red());
        }
    }

    let unmatched: Vec<_> = report.unmatched().collect();
    if !unmatched.is_empty() {
        println!();
        println!("{}", "No symbol found for:".yellow().bold());
        println!("  {}", unmatched.join(", "));
    }
}
