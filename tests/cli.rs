use assert_cmd::prelude::*;
use std::process::Command;

const TEXT: &str = "The cat sat on the mat. Dogs run fast.\n";
// The first sentence is made of function words only.
const ENGLISH_TEXT: &str = "It is what it is. Cats chase dogs.\n";

fn summarizer() -> Command {
    let mut cmd = Command::cargo_bin("luhn-summarizer").unwrap();
    cmd.env_remove("LUHN_INPUT")
        .env_remove("SUMMARY_BACKEND")
        .env_remove("SENTENCES_COUNT")
        .env_remove("LUHN_MAX_GAP_SIZE")
        .env_remove("LUHN_SIGNIFICANT_PERCENTAGE")
        .env_remove("STOPWORDS")
        .env_remove("STOPWORDS_FILE")
        .env_remove("STEMMER");
    cmd
}

fn input_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
    write_input(dir, TEXT)
}

fn write_input(dir: &tempfile::TempDir, text: &str) -> std::path::PathBuf {
    let path = dir.path().join("doc.txt");
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn one_shot_prints_selected_sentences() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, ENGLISH_TEXT);
    summarizer()
        .arg("--input")
        .arg(&input)
        .args(["--sentences-count", "1"])
        .assert()
        .success()
        .stdout("Cats chase dogs.\n");

    // Without stopwords the function words are significant too.
    summarizer()
        .arg("--input")
        .arg(&input)
        .args(["--sentences-count", "1", "--stopwords", "none"])
        .assert()
        .success()
        .stdout("It is what it is.\n");
}

#[test]
fn stemmer_flag_merges_word_forms() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "Cat cats. Ant ant.\n");
    let base = [
        "--sentences-count",
        "1",
        "--stopwords",
        "none",
        "--significant-percentage",
        "0.67",
    ];
    summarizer()
        .arg("--input")
        .arg(&input)
        .args(base)
        .assert()
        .success()
        .stdout("Cat cats.\n");
    summarizer()
        .arg("--input")
        .arg(&input)
        .args(base)
        .args(["--stemmer", "english"])
        .assert()
        .success()
        .stdout("Ant ant.\n");
}

#[test]
fn custom_stopword_file_changes_the_pick() {
    let dir = tempfile::tempdir().unwrap();
    let input = input_file(&dir);
    let stop = dir.path().join("stop.txt");
    std::fs::write(&stop, "the\na\n").unwrap();
    summarizer()
        .arg("--input")
        .arg(&input)
        .args(["--sentences-count", "1", "--stopwords", "none"])
        .arg("--stopwords-file")
        .arg(&stop)
        .assert()
        .success()
        .stdout("The cat sat on the mat.\n");
}

#[test]
fn percentage_count_keeps_document_order() {
    let dir = tempfile::tempdir().unwrap();
    let input = input_file(&dir);
    summarizer()
        .arg("--input")
        .arg(&input)
        .args(["--sentences-count", "100%"])
        .assert()
        .success()
        .stdout("The cat sat on the mat.\nDogs run fast.\n");
}

#[test]
fn lead_backend_takes_first_sentence() {
    let dir = tempfile::tempdir().unwrap();
    let input = input_file(&dir);
    summarizer()
        .arg("--input")
        .arg(&input)
        .args(["--sentences-count", "1", "--summary-backend", "lead"])
        .assert()
        .success()
        .stdout("The cat sat on the mat.\n");
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    summarizer()
        .arg("--input")
        .arg(dir.path().join("absent.txt"))
        .assert()
        .failure()
        .code(1);
}

#[test]
fn invalid_settings_fail_before_reading_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = input_file(&dir);
    summarizer()
        .arg("--input")
        .arg(&input)
        .args(["--max-gap-size", "0"])
        .assert()
        .failure()
        .code(2);
    summarizer()
        .arg("--input")
        .arg(&input)
        .args(["--stemmer", "klingon"])
        .assert()
        .failure()
        .code(2);
}
