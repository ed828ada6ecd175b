//! Command-line interface for uylex
//! This binary cleans, tags, stems and expands Uyghur–English lexicons.
//!
//! Usage:
//!   uylex normalize [-i `<in>`] [-o `<out>`] [-e `<report>`] [options]   - Normalize a flat dictionary
//!   uylex pos-tag [-i `<in>`] [-o `<out>`] [--lexicon]                    - Tag the head of every line
//!   uylex stem `<grammar>` `<lexicon>`                                     - Stem a tagged lexicon
//!   uylex expand `<grammar>` `<pertainyms>` [-i `<in>`] [-o `<out>`]       - Expand suffixed forms

mod commands;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::EnvFilter;
use uylex_config::{Loader, UylexConfig};

fn input_arg() -> Arg {
    Arg::new("input")
        .long("infile")
        .short('i')
        .help("Input file (default: stdin)")
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("outfile")
        .short('o')
        .help("Output file (default: stdout)")
}

fn build_cli() -> Command {
    Command::new("uylex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A toolchain for cleaning and expanding Uyghur-English lexicons")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Log more (-v info, -vv debug); RUST_LOG takes precedence"),
        )
        .subcommand(
            Command::new("normalize")
                .about("Normalize a flat dictionary into short phrase pairs")
                .arg(input_arg())
                .arg(output_arg())
                .arg(
                    Arg::new("explanation")
                        .long("explainfile")
                        .short('e')
                        .help("Write a per-source report of original and normalized targets"),
                )
                .arg(
                    Arg::new("nosplit")
                        .long("nosplit")
                        .short('n')
                        .action(ArgAction::SetTrue)
                        .help("Don't split on commas, semicolons, slashes or 'or'"),
                )
                .arg(
                    Arg::new("targetlimit")
                        .long("targetlimit")
                        .short('l')
                        .value_parser(value_parser!(usize))
                        .help("Maximum number of words of a target after splitting"),
                )
                .arg(
                    Arg::new("earlytargetlimit")
                        .long("earlytargetlimit")
                        .short('L')
                        .value_parser(value_parser!(usize))
                        .help("Maximum number of words of a target before splitting"),
                )
                .arg(
                    Arg::new("singletons")
                        .long("singletons")
                        .short('s')
                        .action(ArgAction::SetTrue)
                        .help("Only emit word-level pairs derived from multi-word entries"),
                )
                .arg(
                    Arg::new("removelowercased")
                        .long("removelowercased")
                        .action(ArgAction::SetTrue)
                        .help("Remove lowercased variants of capitalized translations"),
                )
                .arg(
                    Arg::new("no-sentence-split")
                        .long("no-sentence-split")
                        .visible_alias("nosentencesplit")
                        .action(ArgAction::SetTrue)
                        .help("Don't split targets into sentences"),
                )
                .arg(
                    Arg::new("stats-json")
                        .long("stats-json")
                        .action(ArgAction::SetTrue)
                        .help("Print the statistics as JSON"),
                ),
        )
        .subcommand(
            Command::new("pos-tag")
                .about("Print the part of speech of the head of every line")
                .arg(input_arg())
                .arg(output_arg())
                .arg(
                    Arg::new("lexicon")
                        .long("lexicon")
                        .action(ArgAction::SetTrue)
                        .help("Input lines are lexicon entries; tag their targets"),
                ),
        )
        .subcommand(
            Command::new("stem")
                .about("Stem a lexicon using the tags in <lexicon>.postags")
                .arg(
                    Arg::new("grammar")
                        .help("Grammar file with stemming rules")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("lexicon")
                        .help("Lexicon file")
                        .required(true)
                        .index(2),
                ),
        )
        .subcommand(
            Command::new("expand")
                .about("Add suffixed forms of every lexicon entry")
                .arg(
                    Arg::new("grammar")
                        .help("Grammar file with noun suffixes")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("pertainyms")
                        .help("Pertainym file pairing nouns with adjectives")
                        .required(true)
                        .index(2),
                )
                .arg(input_arg())
                .arg(output_arg()),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    init_tracing(matches.get_count("verbose"), &config.log.level);

    let result = match matches.subcommand() {
        Some(("normalize", sub)) => commands::normalize(
            &config,
            commands::NormalizeArgs {
                input: opt_str(sub, "input"),
                output: opt_str(sub, "output"),
                explanation: opt_str(sub, "explanation"),
                stats_json: sub.get_flag("stats-json"),
            },
        ),
        Some(("pos-tag", sub)) => commands::pos_tag(
            opt_str(sub, "input"),
            opt_str(sub, "output"),
            sub.get_flag("lexicon"),
        ),
        Some(("stem", sub)) => commands::stem(
            &config,
            required_str(sub, "grammar"),
            required_str(sub, "lexicon"),
        ),
        Some(("expand", sub)) => commands::expand(
            &config,
            commands::ExpandArgs {
                grammar: required_str(sub, "grammar"),
                pertainyms: required_str(sub, "pertainyms"),
                input: opt_str(sub, "input"),
                output: opt_str(sub, "output"),
            },
        ),
        _ => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn opt_str<'a>(matches: &'a ArgMatches, id: &str) -> Option<&'a str> {
    matches.get_one::<String>(id).map(String::as_str)
}

fn required_str<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    // clap enforces required positionals before we get here
    opt_str(matches, id).unwrap_or_default()
}

/// Layer defaults, the user's file and command-line flags
fn load_config(matches: &ArgMatches) -> Result<UylexConfig, String> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }

    if let Some(("normalize", sub)) = matches.subcommand() {
        let flags = [
            ("nosplit", "normalize.split", false),
            ("singletons", "normalize.singletons", true),
            ("removelowercased", "normalize.remove_lowercased", true),
            ("no-sentence-split", "normalize.sentence_split", false),
        ];
        for (flag, key, value) in flags {
            if sub.get_flag(flag) {
                loader = loader
                    .set_override(key, value)
                    .map_err(|e| format!("Invalid override for {}: {}", key, e))?;
            }
        }

        let limits = [
            ("targetlimit", "normalize.target_limit"),
            ("earlytargetlimit", "normalize.early_target_limit"),
        ];
        for (arg, key) in limits {
            if let Some(limit) = sub.get_one::<usize>(arg) {
                loader = loader
                    .set_override(key, *limit as i64)
                    .map_err(|e| format!("Invalid override for {}: {}", key, e))?;
            }
        }
    }

    loader
        .build()
        .map_err(|e| format!("Failed to load configuration: {}", e))
}

fn init_tracing(verbosity: u8, default_level: &str) {
    let level = match verbosity {
        0 => default_level,
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        build_cli().debug_assert();
    }

    #[test]
    fn flags_override_config() {
        let matches = build_cli()
            .try_get_matches_from(["uylex", "normalize", "-n", "-l", "6", "--removelowercased"])
            .unwrap();
        let config = load_config(&matches).unwrap();
        let options = config.normalize.options();

        assert!(!options.split);
        assert_eq!(options.target_limit, 6);
        assert!(options.remove_lowercased);
        assert!(options.sentence_split);
        assert_eq!(options.early_target_limit, 20);
    }

    #[test]
    fn defaults_without_flags() {
        let matches = build_cli()
            .try_get_matches_from(["uylex", "stem", "grammar.txt", "dict"])
            .unwrap();
        let config = load_config(&matches).unwrap();
        assert_eq!(config.stem.output_extension, "stemmed");
    }
}
