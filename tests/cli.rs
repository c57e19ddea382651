//! CLI integration tests for the `assistant` binary.
//!
//! Uses `assert_cmd` to spawn the binary as a subprocess, pipe stdin,
//! and assert on stdout/stderr/exit code.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// Path to the data directory (bundled in the repo).
fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn assistant_cmd() -> Command {
    Command::from(cargo_bin_cmd!("assistant"))
}

// ---------------------------------------------------------------------------
// Basic CLI behavior
// ---------------------------------------------------------------------------

#[test]
fn help_flag() {
    assistant_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("keyword-matching website chatbot"));
}

#[test]
fn version_flag() {
    assistant_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("assistant-cli"));
}

#[test]
fn delay_flags_conflict() {
    assistant_cmd()
        .args(["--no-delay", "--delay-ms", "5"])
        .write_stdin("")
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// Conversation loop
// ---------------------------------------------------------------------------

#[test]
fn greeting_on_startup() {
    assistant_cmd()
        .args(["--seed", "42", "--no-delay"])
        .write_stdin("/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Giggs Assistant: Hey! 👋 I'm your virtual assistant.",
        ));
}

#[test]
fn eof_exits_cleanly() {
    assistant_cmd()
        .args(["--seed", "42", "--no-delay"])
        .write_stdin("")
        .assert()
        .success();
}

#[test]
fn exit_command_is_case_insensitive() {
    assistant_cmd()
        .args(["--seed", "42", "--no-delay"])
        .write_stdin("/EXIT\nhello\n")
        .assert()
        .success()
        .stdout(predicate::function(|output: &str| {
            output.matches("Giggs Assistant:").count() == 1
        }));
}

#[test]
fn plain_quit_is_a_message() {
    // "quit" without a slash is chat text; it matches the goodbye entry.
    assistant_cmd()
        .args(["--seed", "42", "--no-delay"])
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::function(|output: &str| {
            output.matches("Giggs Assistant:").count() == 2
        }));
}

#[test]
fn empty_lines_are_skipped() {
    assistant_cmd()
        .args(["--seed", "42", "--no-delay"])
        .write_stdin("\n   \n\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::function(|output: &str| {
            output.matches("Giggs Assistant:").count() == 1
        }));
}

#[test]
fn reply_with_action_link() {
    assistant_cmd()
        .args(["--seed", "42", "--no-delay"])
        .write_stdin("How much does this cost?\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Our pricing is tailored"))
        .stdout(predicate::str::contains("→ 📞 Contact Us (/contact)"));
}

#[test]
fn fallback_has_no_link() {
    assistant_cmd()
        .args(["--seed", "42", "--no-delay"])
        .write_stdin("asdkjaslkdj\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("→").not());
}

#[test]
fn quick_reply_commands() {
    assistant_cmd()
        .args(["--seed", "42", "--no-delay"])
        .write_stdin("/quick\n/quick 2\n/quick 9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("2. 🛡️ Cybersecurity"))
        .stdout(predicate::str::contains("→ 🛡️ Cybersecurity (/services/cybersecurity)"))
        .stderr(predicate::str::contains("No quick reply #9"));
}

#[test]
fn history_command_lists_turns() {
    assistant_cmd()
        .args(["--seed", "42", "--no-delay"])
        .write_stdin("hello\n/history\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[You] hello"))
        .stdout(predicate::str::contains("[Giggs Assistant] Hey! 👋"));
}

#[test]
fn unknown_command_reported() {
    assistant_cmd()
        .args(["--seed", "42", "--no-delay"])
        .write_stdin("/dance\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown command: /dance"));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn config_flag_loads_overrides() {
    assistant_cmd()
        .args([
            "--seed",
            "42",
            "--config",
            data_dir().join("overrides.example.toml").to_str().unwrap(),
        ])
        .write_stdin("what's the price?\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Loading config from"))
        .stderr(predicate::str::contains("Config loaded"))
        .stdout(predicate::str::contains("Support Bot: Hi! Ask me about pricing or support."))
        .stdout(predicate::str::contains("→ 💰 See Pricing (/pricing)"));
}

#[test]
fn missing_config_fails() {
    assistant_cmd()
        .args(["--config", "/nonexistent/path/assistant.toml"])
        .write_stdin("/quit\n")
        .assert()
        .failure();
}

#[test]
fn invalid_config_fails() {
    let path = std::env::temp_dir().join("assistant_cli_test_invalid.toml");
    std::fs::write(&path, "fallbacks = []\n").unwrap();

    assistant_cmd()
        .args(["--config", path.to_str().unwrap()])
        .write_stdin("/quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("fallback list is empty"));

    let _ = std::fs::remove_file(&path);
}

// ---------------------------------------------------------------------------
// Deterministic output with --seed
// ---------------------------------------------------------------------------

#[test]
fn seed_produces_deterministic_output() {
    let run = || {
        assistant_cmd()
            .args(["--seed", "123", "--no-delay"])
            .write_stdin("hi\nthanks\nbye\n/quit\n")
            .output()
            .expect("should run")
    };

    let out1 = run();
    let out2 = run();

    assert_eq!(
        out1.stdout, out2.stdout,
        "same seed should produce identical stdout"
    );
}
