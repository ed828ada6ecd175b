use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const GRAMMAR: &str = "\
::uig /(.*)لار$/$1/ ::synt lexical noun stemming
::uig لىق ::synt noun suffix ::function adjectivizer
::uig دا ::synt noun suffix ::function locative ::eng in
::uig نىڭ ::synt noun suffix ::function genitive ::eng 's
";

fn write(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn normalize_from_stdin() {
    let mut cmd = cargo_bin_cmd!("uylex");
    cmd.arg("normalize")
        .write_stdin("ئات\tDICT\thorse; steed\nbroken\n");

    cmd.assert()
        .success()
        .stdout("ئات\tDICT\thorse\nئات\tDICT\tsteed\n")
        .stderr(predicate::str::contains("1 bad 0 too many target words 2 wrote"));
}

#[test]
fn normalize_carriage_return_input() {
    let mut cmd = cargo_bin_cmd!("uylex");
    cmd.arg("normalize")
        .write_stdin("ئات\tDICT\thorse\rئالما\tDICT\tapple\r");

    cmd.assert()
        .success()
        .stdout("ئات\tDICT\thorse\nئالما\tDICT\tapple\n")
        .stderr(predicate::str::contains("0 bad 0 too many target words 2 wrote"));
}

#[test]
fn normalize_files_and_explanation() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "dict.flat", "ئات\tDICT\thorse, steed\n");
    let output = dir.path().join("dict.lex");
    let report = dir.path().join("dict.explain");

    let mut cmd = cargo_bin_cmd!("uylex");
    cmd.arg("normalize")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("-e")
        .arg(&report)
        .arg("--nosplit");
    cmd.assert().success();

    assert_eq!(fs::read_to_string(&output).unwrap(), "ئات\tDICT\thorse, steed\n");
    assert!(fs::read_to_string(&report).unwrap().starts_with("»ئات«\n(original)\n"));
}

#[test]
fn normalize_stats_json() {
    let mut cmd = cargo_bin_cmd!("uylex");
    cmd.arg("normalize")
        .arg("--stats-json")
        .write_stdin("ئات\tDICT\thorse\n");

    cmd.assert().success().stderr(predicate::str::contains(
        r#"{"bad":0,"too_many_words":0,"written":1}"#,
    ));
}

#[test]
fn normalize_reads_config_file() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "uylex.toml", "[normalize]\nsplit = false\n");

    let mut cmd = cargo_bin_cmd!("uylex");
    cmd.arg("--config")
        .arg(&config)
        .arg("normalize")
        .write_stdin("ئات\tDICT\thorse; steed\n");

    cmd.assert().success().stdout("ئات\tDICT\thorse; steed\n");
}

#[test]
fn pos_tag_lines() {
    let mut cmd = cargo_bin_cmd!("uylex");
    cmd.arg("pos-tag").write_stdin("horse\nto run\nred\n");

    cmd.assert().success().stdout("NOUN\nVERB\nADJ\n");
}

#[test]
fn pos_tag_lexicon_targets() {
    let mut cmd = cargo_bin_cmd!("uylex");
    cmd.arg("pos-tag")
        .arg("--lexicon")
        .write_stdin("ئات\tDICT\thorse\nبارماق\tDICT\tto go\n");

    cmd.assert().success().stdout("NOUN\nVERB\n");
}

#[test]
fn stem_writes_sibling_files() {
    let dir = TempDir::new().unwrap();
    let grammar = write(&dir, "grammar.txt", GRAMMAR);
    let lexicon = write(&dir, "dict", "ئاتلار\tDICT\thorses\nقىزىللار\tDICT\treds\n");
    write(&dir, "dict.postags", "NOUN\nADJ\n");

    let mut cmd = cargo_bin_cmd!("uylex");
    cmd.arg("stem").arg(&grammar).arg(&lexicon);
    cmd.assert().success();

    let stemmed = fs::read_to_string(dir.path().join("dict.stemmed")).unwrap();
    let tags = fs::read_to_string(dir.path().join("dict.stemmed.postags")).unwrap();
    assert_eq!(stemmed, "ئات\tDICT\thorses\n");
    assert_eq!(tags, "NOUN\n");
}

#[test]
fn stem_missing_tags_fails() {
    let dir = TempDir::new().unwrap();
    let grammar = write(&dir, "grammar.txt", GRAMMAR);
    let lexicon = write(&dir, "dict", "ئاتلار\tDICT\thorses\n");

    let mut cmd = cargo_bin_cmd!("uylex");
    cmd.arg("stem").arg(&grammar).arg(&lexicon);
    cmd.assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: Failed to read"));
}

#[test]
fn expand_from_stdin() {
    let dir = TempDir::new().unwrap();
    let grammar = write(&dir, "grammar.txt", GRAMMAR);
    let pertainyms = write(&dir, "pertainyms.txt", "::s-noun gold ::t-adj golden\n");

    let mut cmd = cargo_bin_cmd!("uylex");
    cmd.arg("expand")
        .arg(&grammar)
        .arg(&pertainyms)
        .write_stdin("ئالتۇن\tDICT\tgold\nئەخمەت\tPER\tAhmet\n");

    cmd.assert().success().stdout(
        "ئالتۇن\tDICT\tgold\n\
         ئالتۇنلىق\tDICT\tgolden\n\
         ئالتۇندا\tDICT\tin gold\n\
         ئالتۇننىڭ\tDICT\tgold 's\n\
         ئەخمەت\tPER\tAhmet\n\
         ئەخمەتلىق\tPER\tAhmet\n\
         ئەخمەتنىڭ\tPER\tAhmet 's\n",
    );
}

#[test]
fn expand_rejects_malformed_lines() {
    let dir = TempDir::new().unwrap();
    let grammar = write(&dir, "grammar.txt", GRAMMAR);
    let pertainyms = write(&dir, "pertainyms.txt", "");

    let mut cmd = cargo_bin_cmd!("uylex");
    cmd.arg("expand")
        .arg(&grammar)
        .arg(&pertainyms)
        .write_stdin("not a lexicon line\n");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("line 1: expected 3 tab-separated fields"));
}
