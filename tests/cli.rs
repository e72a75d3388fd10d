#![cfg(feature = "cli")]
use assert_cmd::Command;
use predicates::str::contains;
use rstest::rstest;
use std::fs;
use tempfile::tempdir;

fn imvertor() -> Command {
    Command::cargo_bin("imvertor").unwrap()
}

#[rstest]
#[case("person.xml", &["--name", "Person"], "person/person.json")]
#[case("person13.xml", &["--name", "Person"], "person/person.json")]
#[case("gebieden.json", &["--encoding", "utf-8"], "buurten/buurten.json")]
#[case("gebieden.json", &["--postfix", "v2"], "wijken/wijken-v2.json")]
fn converts_fixture(#[case] fixture: &str, #[case] args: &[&str], #[case] expected: &str) {
    let dir = tempdir().unwrap();

    imvertor()
        .arg(format!("tests/fixtures/{fixture}"))
        .args(args)
        .arg("--output-dir")
        .arg(dir.path())
        .assert()
        .success();

    let output = fs::read_to_string(dir.path().join(expected)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["type"], "object");
    assert_eq!(json["additionalProperties"], false);
}

#[test]
fn unsupported_extension_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("model.txt");
    fs::write(&input, "irrelevant").unwrap();

    imvertor()
        .arg(&input)
        .arg("--output-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(contains("unsupported file format"));
}

#[test]
fn parser_override_ignores_extension() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("export.txt");
    fs::copy("tests/fixtures/person.xml", &input).unwrap();

    imvertor()
        .arg(&input)
        .args(["--parser", "uml", "--name", "Person", "--output-dir"])
        .arg(dir.path())
        .assert()
        .success();

    assert!(dir.path().join("person").join("person.json").is_file());
}

#[test]
fn readme_is_rendered_from_template() {
    let dir = tempdir().unwrap();

    imvertor()
        .arg("tests/fixtures/gebieden.json")
        .args(["--template", "tests/fixtures/readme.tpl.md", "--output-dir"])
        .arg(dir.path())
        .assert()
        .success();

    let readme = fs::read_to_string(dir.path().join("wijken").join("README.md")).unwrap();
    assert!(readme.starts_with("# wijken\n\nWijken\n"));
    assert!(readme.contains("Taal: en"));
}

#[test]
fn missing_input_fails() {
    imvertor()
        .arg("tests/fixtures/does-not-exist.xml")
        .assert()
        .failure()
        .stderr(contains("failed to access"));
}
