use assert_cmd::Command;
use predicates::prelude::*;

fn reckon_cmd() -> Command {
    let mut cmd = Command::cargo_bin("reckon").unwrap();
    cmd.env_remove("RECKON_API_URL").env_remove("RECKON_API_KEY");
    cmd
}

#[test]
fn test_login_no_args_shows_current_settings() {
    let dir = tempfile::tempdir().unwrap();
    let assert = reckon_cmd()
        .arg("-d")
        .arg(dir.path())
        .arg("login")
        .assert();

    assert
        .success()
        .stdout(predicate::str::contains("Current API settings:"))
        .stdout(predicate::str::contains("API URL: http://localhost:3000"))
        .stdout(predicate::str::contains("API Key: Not set"));

    // nothing was provided, so nothing is saved
    assert!(!dir.path().join("credentials.json").exists());
}

#[test]
fn test_login_key_masking() {
    let dir = tempfile::tempdir().unwrap();
    let assert = reckon_cmd()
        .arg("-d")
        .arg(dir.path())
        .arg("login")
        .arg("--api-key")
        .arg("abcdefghijklmnopqrstuvwxyz")
        .assert();

    assert
        .success()
        .stdout(predicate::str::contains("**********************wxyz"))
        .stdout(predicate::str::contains("abcdefghijklmnopqrstuvwxyz").not());
}

#[test]
fn test_login_saves_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    reckon_cmd()
        .arg("-d")
        .arg(dir.path())
        .arg("login")
        .arg("--api-key")
        .arg("user1-key")
        .arg("--api-url")
        .arg("http://calc.example.com")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved credentials to"));

    let saved = std::fs::read_to_string(dir.path().join("credentials.json")).unwrap();
    assert!(saved.contains("http://calc.example.com"));

    reckon_cmd()
        .arg("-d")
        .arg(dir.path())
        .arg("login")
        .assert()
        .success()
        .stdout(predicate::str::contains("API URL: http://calc.example.com"))
        .stdout(predicate::str::contains("**********************-key"));
}

#[test]
fn test_eval_locally() {
    reckon_cmd()
        .args(["--compact", "eval", "addition", "10.5", "3", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""result":15.5"#))
        .stdout(predicate::str::contains(r#""kind":"addition""#));

    reckon_cmd()
        .args(["--compact", "eval", "modulus", "-7", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""result":2.0"#));

    reckon_cmd()
        .args(["--compact", "eval", "sin", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""kind":"sine""#));
}

#[test]
fn test_eval_failures() {
    reckon_cmd()
        .args(["eval", "division", "1", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Cannot divide by zero"));

    reckon_cmd()
        .args(["eval", "cube", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported calculation type: cube"));

    reckon_cmd()
        .args(["eval", "power", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("At least two numbers are required"));
}

#[test]
fn test_kinds() {
    reckon_cmd()
        .arg("kinds")
        .assert()
        .success()
        .stdout(predicate::str::contains("exponential"))
        .stdout(predicate::str::contains("min_inputs"));
}
