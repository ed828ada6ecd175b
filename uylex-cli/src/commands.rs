//! Subcommand handlers
//!
//! Each handler reads its inputs, runs one pipeline stage from
//! `uylex-core` and writes the result. Errors come back as ready-to-print
//! messages.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use uylex_config::UylexConfig;
use uylex_core::lexicon::expansion::Expander;
use uylex_core::lexicon::grammar::{Pertainyms, StemRules, SuffixGrammar};
use uylex_core::lexicon::loader::LexiconLoader;
use uylex_core::lexicon::normalizer::Normalizer;
use uylex_core::lexicon::postag::{tag_lines, HeuristicTagger, PosTagger};
use uylex_core::lexicon::stemmer::Stemmer;

/// Read a whole file, or stdin when no path is given
pub fn read_input(path: Option<&str>) -> Result<LexiconLoader, String> {
    match path {
        Some(path) => LexiconLoader::from_path(path)
            .map_err(|e| format!("Failed to read '{}': {}", path, e)),
        None => LexiconLoader::from_reader(io::stdin().lock())
            .map_err(|e| format!("Failed to read stdin: {}", e)),
    }
}

/// Create a file for writing, or use stdout when no path is given
pub fn open_output(path: Option<&str>) -> Result<Box<dyn Write>, String> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| format!("Failed to create '{}': {}", path, e))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

fn read_file(path: &str) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("Failed to read '{}': {}", path, e))
}

fn write_error(e: io::Error) -> String {
    format!("Failed to write output: {}", e)
}

pub struct NormalizeArgs<'a> {
    pub input: Option<&'a str>,
    pub output: Option<&'a str>,
    pub explanation: Option<&'a str>,
    pub stats_json: bool,
}

/// Normalize a flat dictionary
pub fn normalize(config: &UylexConfig, args: NormalizeArgs<'_>) -> Result<(), String> {
    let options = config.normalize.options();
    tracing::debug!(?options, "normalizing");

    let loader = read_input(args.input)?;
    let lexicon = loader
        .with(Normalizer::new(options).transform())
        .map_err(|e| format!("Normalization failed: {}", e))?;

    let mut out = open_output(args.output)?;
    lexicon.write_lexicon(&mut out).map_err(write_error)?;
    out.flush().map_err(write_error)?;

    if let Some(path) = args.explanation {
        let mut report = open_output(Some(path))?;
        lexicon.write_explanation(&mut report).map_err(write_error)?;
        report.flush().map_err(write_error)?;
    }

    if args.stats_json {
        let json = serde_json::to_string(&lexicon.stats)
            .map_err(|e| format!("JSON serialization failed: {}", e))?;
        eprintln!("{}", json);
    } else {
        eprintln!("{}", lexicon.stats);
    }
    Ok(())
}

/// Print the head tag of every input line
///
/// With `lexicon`, input lines are lexicon entries and their targets are
/// tagged.
pub fn pos_tag(input: Option<&str>, output: Option<&str>, lexicon: bool) -> Result<(), String> {
    let loader = read_input(input)?;
    let tagger = HeuristicTagger::new();
    let mut out = open_output(output)?;

    if lexicon {
        let entries = loader.entries().map_err(|e| e.to_string())?;
        for entry in &entries {
            writeln!(out, "{}", tagger.head_tag(&entry.target)).map_err(write_error)?;
        }
    } else {
        for tag in tag_lines(&tagger, loader.source_ref()) {
            writeln!(out, "{}", tag).map_err(write_error)?;
        }
    }
    out.flush().map_err(write_error)
}

/// Stem a tagged lexicon
///
/// Reads `<lexicon>` and `<lexicon>.postags`, writes `<lexicon>.stemmed`
/// and `<lexicon>.stemmed.postags` (extensions come from the config).
pub fn stem(config: &UylexConfig, grammar: &str, lexicon: &str) -> Result<(), String> {
    let rules = StemRules::parse(&read_file(grammar)?)
        .map_err(|e| format!("Invalid grammar '{}': {}", grammar, e))?;
    let stemmer = Stemmer::new(rules);

    let tags_path = format!("{}.{}", lexicon, config.stem.tags_extension);
    let entries = read_input(Some(lexicon))?
        .entries()
        .map_err(|e| format!("{}: {}", lexicon, e))?;
    let tags = read_input(Some(tags_path.as_str()))?
        .tags()
        .map_err(|e| format!("{}: {}", tags_path, e))?;
    if entries.len() != tags.len() {
        tracing::warn!(
            entries = entries.len(),
            tags = tags.len(),
            "lexicon and tag file differ in length"
        );
    }

    let stemmed_path = format!("{}.{}", lexicon, config.stem.output_extension);
    let stemmed_tags_path = format!("{}.{}", stemmed_path, config.stem.tags_extension);
    let mut lexicon_out = open_output(Some(stemmed_path.as_str()))?;
    let mut tags_out = open_output(Some(stemmed_tags_path.as_str()))?;

    let mut written = 0;
    for (entry, tag) in stemmer.stem(&entries, tags) {
        writeln!(lexicon_out, "{}", entry).map_err(write_error)?;
        writeln!(tags_out, "{}", tag).map_err(write_error)?;
        written += 1;
    }
    lexicon_out.flush().map_err(write_error)?;
    tags_out.flush().map_err(write_error)?;

    tracing::info!(written, path = %stemmed_path, "wrote stemmed lexicon");
    Ok(())
}

pub struct ExpandArgs<'a> {
    pub grammar: &'a str,
    pub pertainyms: &'a str,
    pub input: Option<&'a str>,
    pub output: Option<&'a str>,
}

/// Expand every lexicon entry with its suffixed forms
pub fn expand(config: &UylexConfig, args: ExpandArgs<'_>) -> Result<(), String> {
    let grammar = SuffixGrammar::parse(&read_file(args.grammar)?);
    let pertainyms = Pertainyms::parse(&read_file(args.pertainyms)?);
    tracing::info!(pertainyms = pertainyms.len(), "loaded pertainyms");

    let expander = Expander::new(grammar, pertainyms)
        .with_skip_categories(config.expand.skip_categories.iter().cloned());
    let entries = read_input(args.input)?
        .entries()
        .map_err(|e| e.to_string())?;

    let mut out = open_output(args.output)?;
    for entry in expander.expand_all(&entries) {
        writeln!(out, "{}", entry).map_err(write_error)?;
    }
    out.flush().map_err(write_error)
}
