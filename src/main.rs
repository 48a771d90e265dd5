use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result};
use beamalign::{
    export, BeamAligner, DEFAULT_DELETION_COST, DEFAULT_INSERTION_COST, DEFAULT_SUBSTITUTION_COST,
};
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use simplelog::{ColorChoice, TermLogger, TerminalMode};

mod beamalign;

#[derive(Parser)]
struct Cli {
    /// The minimum importance of log messages to output.
    #[clap(long, short = 'l', default_value = "info")]
    log_level: LevelFilter,

    /// The file holding the source token sequence.
    source: PathBuf,

    /// The file holding the target token sequence.
    target: PathBuf,

    /// How the input files are split into tokens.
    #[clap(long, short = 't', default_value = "word")]
    tokenizer: Tokenizer,

    /// The number of hypotheses kept between expansion rounds.
    ///
    /// Wider beams find cheaper alignments at the price of more work per
    /// round.
    #[clap(long, short = 'b', default_value_t = 128)]
    beam_width: usize,

    /// The cost of substituting one token for another.
    #[clap(long, default_value_t = DEFAULT_SUBSTITUTION_COST)]
    substitution_cost: f64,

    /// The cost of inserting a token that is in the target but not in the
    /// source.
    #[clap(long, default_value_t = DEFAULT_INSERTION_COST)]
    insertion_cost: f64,

    /// The cost of deleting a token that is in the source but not in the
    /// target.
    #[clap(long, default_value_t = DEFAULT_DELETION_COST)]
    deletion_cost: f64,

    /// Write the alignment as CSV to this path in addition to printing it.
    #[clap(long, short = 'o')]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Eq, PartialEq, ValueEnum)]
enum Tokenizer {
    /// Split on whitespace.
    Word,
    /// Split into individual characters.
    Character,
    /// Split into lines.
    Line,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    TermLogger::init(
        cli.log_level,
        Default::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    info!("Logging initialised");

    let source_text = read_input(&cli.source)?;
    let target_text = read_input(&cli.target)?;
    let source_tokens = tokenize(&source_text, &cli.tokenizer);
    let target_tokens = tokenize(&target_text, &cli.tokenizer);

    info!(
        "Loaded {} source tokens and {} target tokens",
        source_tokens.len(),
        target_tokens.len()
    );

    let aligner = BeamAligner::with_costs(
        cli.beam_width,
        cli.substitution_cost,
        cli.insertion_cost,
        cli.deletion_cost,
    )?;

    let start_time = Instant::now();
    let alignment = aligner.align(&source_tokens, &target_tokens);
    let duration = start_time.elapsed();

    info!("Alignment cost {}", alignment.cost());
    info!("Runtime: {:.2}s", duration.as_secs_f64());

    print!("{}", alignment.pretty());

    if let Some(path) = &cli.output {
        export::write_csv_file(&alignment, path)?;
        info!("Wrote alignment to {path:?}");
    }

    info!("Terminating");

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    info!("Loading input file {path:?}");
    fs::read_to_string(path).with_context(|| format!("Error loading file: {path:?}"))
}

fn tokenize<'text>(text: &'text str, tokenizer: &Tokenizer) -> Vec<&'text str> {
    match tokenizer {
        Tokenizer::Word => text.split_whitespace().collect(),
        Tokenizer::Character => text
            .char_indices()
            .map(|(offset, character)| &text[offset..offset + character.len_utf8()])
            .collect(),
        Tokenizer::Line => text.lines().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{tokenize, Tokenizer};

    #[test]
    fn tokenizes_words() {
        assert_eq!(
            tokenize("the quick  brown\nfox", &Tokenizer::Word),
            ["the", "quick", "brown", "fox"]
        );
    }

    #[test]
    fn tokenizes_characters() {
        assert_eq!(
            tokenize("naïve", &Tokenizer::Character),
            ["n", "a", "ï", "v", "e"]
        );
    }

    #[test]
    fn tokenizes_lines() {
        assert_eq!(tokenize("one\ntwo\n", &Tokenizer::Line), ["one", "two"]);
        assert!(tokenize("", &Tokenizer::Line).is_empty());
    }
}
