use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn aardvark() -> Command {
    Command::cargo_bin("aardvark").unwrap()
}

fn source_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn prints_usage_on_help_flag() {
    aardvark()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: aardvark"));
}

#[test]
fn runs_a_file_and_prints_its_result() {
    let file = source_file("return 1 + 2 * 3");
    aardvark().arg(file.path()).assert().success().stdout(predicate::str::contains("7"));
}

#[test]
fn print_builtin_writes_to_stdout() {
    let file = source_file(r#"print("hello")"#);
    aardvark().arg(file.path()).assert().success().stdout(predicate::str::contains("hello"));
}

#[test]
fn token_dump_flag_lists_token_kinds() {
    let file = source_file("var x = 1");
    aardvark()
        .arg("-t")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Token list:").and(predicate::str::contains("VAR")));
}

#[test]
fn syntax_tree_dump_flag_prints_the_tree() {
    let file = source_file("var x = 1");
    aardvark()
        .arg("-s")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Parse tree:").and(predicate::str::contains("DECLARATION")));
}

#[test]
fn unknown_variable_reference_fails_with_diagnostic() {
    let file = source_file("print(y)");
    aardvark()
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Variable not in scope"));
}

#[test]
fn missing_file_fails_with_diagnostic() {
    aardvark().arg("/nonexistent/path/to/nothing.av").assert().failure();
}

#[test]
fn unknown_flag_is_rejected_before_any_file_access() {
    aardvark().arg("-z").assert().failure().stderr(predicate::str::contains("invalid arguments"));
}
