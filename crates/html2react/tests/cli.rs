use std::fs;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::tempdir;

fn html2react() -> Command {
    Command::cargo_bin("html2react").unwrap()
}

#[test]
fn converts_stdin_with_configured_components() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("html2react.toml");
    fs::write(&config, "[components]\nWidget = \"MyWidget\"\n").unwrap();

    html2react()
        .arg("--config")
        .arg(&config)
        .args(["convert", "--format", "jsx"])
        .write_stdin(r#"<Widget foo="1"/>"#)
        .assert()
        .success()
        .stdout("<MyWidget foo=\"1\" key=\"0\" />\n");
}

#[test]
fn prints_parsed_ast() {
    html2react()
        .current_dir(tempdir().unwrap().path())
        .arg("ast")
        .write_stdin("<p class=x>Hi</p>")
        .assert()
        .success()
        .stdout(contains(r#""tag": "p""#))
        .stdout(contains(r#""class": "x""#));
}

#[test]
fn maps_attribute_names() {
    html2react()
        .args(["attrs", "class", "data-id"])
        .assert()
        .success()
        .stdout("class -> className\ndata-id -> data-id\n");
}

#[test]
fn reports_parse_errors() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("broken.html");
    fs::write(&input, "<div class=\"open").unwrap();

    html2react()
        .current_dir(temp.path())
        .arg("convert")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("Unterminated attribute value"));
}
