//! Integration tests for Shuttle
//!
//! The library tests drive argument forwarding and resume planning through
//! the public API. The binary tests run `shuttle` against a temporary home
//! directory populated with fake session stores.

use assert_cmd::Command;
use predicates::prelude::*;
use shuttle_cli::config::Config;
use shuttle_cli::forward::{self, FlagKey, FlagValue};
use shuttle_cli::resume::{self, ResumeMode, ResumeRequest};
use shuttle_cli::tools::Tool;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

// =============================================================================
// Test Helpers
// =============================================================================

const CLAUDE_SESSION: &str = "550e8400-e29b-41d4-a716-446655440000";
const CODEX_SESSION: &str = "7d3f1a2b-0c4d-4e5f-8a9b-0c1d2e3f4a5b";

fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|s| s.to_string()).collect()
}

fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().expect("path has a parent")).expect("create dirs");
    fs::write(path, content).expect("write file");
}

/// A home directory holding one Claude Code and one Codex CLI session.
fn fake_home() -> TempDir {
    let home = tempdir().expect("Failed to create temp directory");
    write_file(
        &home
            .path()
            .join(format!(".claude/projects/-home-me-app/{CLAUDE_SESSION}.jsonl")),
        "{\"type\":\"user\"}\n",
    );
    write_file(
        &home.path().join(format!(
            ".codex/sessions/2025/01/15/rollout-2025-01-15T10-00-00-{CODEX_SESSION}.jsonl"
        )),
        "{}\n",
    );
    home
}

/// `shuttle` with HOME pointed at `home` and no environment overrides.
fn shuttle(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("shuttle").expect("binary is built");
    cmd.env("HOME", home)
        .env_remove("SHUTTLE_COUNTDOWN")
        .env_remove("SHUTTLE_DEFAULT_TARGET")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

// =============================================================================
// Forwarding
// =============================================================================

mod forward_tests {
    use super::*;

    #[test]
    fn test_gemini_add_dir_becomes_include_directories() {
        let resolution = forward::resolve(Tool::Gemini, &args(&["--add-dir", "/tmp/workspace"]));
        assert_eq!(
            resolution.mapped_args,
            vec!["--include-directories", "/tmp/workspace"]
        );
        assert!(resolution.passthrough_args.is_empty());
    }

    #[test]
    fn test_codex_bypass_collapses_lower_permission_flags() {
        let resolution = forward::resolve(
            Tool::Codex,
            &args(&["--full-auto", "--sandbox", "read-only", "--yolo"]),
        );
        assert_eq!(
            resolution.mapped_args,
            vec!["--dangerously-bypass-approvals-and-sandbox"]
        );
        assert!(resolution.passthrough_args.is_empty());
        assert!(!resolution.warnings.is_empty());
    }

    #[test]
    fn test_cursor_boolean_sandbox_is_enabled() {
        let resolution = forward::resolve(Tool::Cursor, &args(&["--sandbox"]));
        assert_eq!(resolution.mapped_args, vec!["--sandbox", "enabled"]);
    }

    #[test]
    fn test_unknown_flags_keep_their_position() {
        let raw = args(&["--verbose", "-m", "gpt-5", "--trace", "x"]);
        let resolution = forward::resolve(Tool::Opencode, &raw);
        assert_eq!(resolution.mapped_args, vec!["--model", "gpt-5"]);
        assert_eq!(resolution.passthrough_args, vec!["--verbose", "--trace", "x"]);
        assert_eq!(resolution.consumed_indices, vec![1, 2]);
    }

    #[test]
    fn test_parsed_occurrences_are_exposed() {
        let resolution = forward::resolve(Tool::Claude, &args(&["--model=opus", "--yolo"]));
        let keys: Vec<FlagKey> = resolution
            .parsed
            .occurrences
            .iter()
            .map(|occ| occ.key)
            .collect();
        assert_eq!(keys, vec![FlagKey::Model, FlagKey::Yolo]);
        assert_eq!(
            resolution.parsed.occurrences[0].value,
            FlagValue::Text("opus".to_string())
        );
    }

    #[test]
    fn test_empty_directory_list_is_forwarded() {
        let raw = args(&["--add-dir", ",", "--allowed-tools", ""]);
        let resolution = forward::resolve(Tool::Gemini, &raw);
        assert!(resolution.mapped_args.is_empty());
        assert_eq!(resolution.passthrough_args, raw);
        assert!(resolution.consumed_indices.is_empty());
    }

    #[test]
    fn test_unrecognised_sandbox_survives_later_toggle() {
        let resolution = forward::resolve(
            Tool::Gemini,
            &args(&["--sandbox", "docker", "--sandbox", "disabled"]),
        );
        assert_eq!(resolution.passthrough_args, vec!["--sandbox", "docker"]);
        assert_eq!(resolution.consumed_indices, vec![2, 3]);
    }

    #[test]
    fn test_droid_is_identity() {
        let raw = args(&["--yolo", "--model", "x"]);
        let resolution = forward::resolve(Tool::Droid, &raw);
        assert_eq!(resolution.extra_args, raw);
        assert!(resolution.warnings.is_empty());
    }
}

// =============================================================================
// Resume planning
// =============================================================================

mod resume_tests {
    use super::*;

    #[test]
    fn test_handoff_invocation_precedes_forwarded_args() {
        let request = ResumeRequest {
            session_id: CLAUDE_SESSION.to_string(),
            source: Tool::Claude,
            target: Tool::Opencode,
            extra_args: args(&["--agent", "build", "--print-logs"]),
            transcript: Some("/h/.claude/projects/p/s.jsonl".into()),
        };
        let plan = resume::plan(&request, &Config::default()).expect("plan");

        assert_eq!(plan.mode, ResumeMode::Handoff);
        assert_eq!(plan.program, "opencode");
        assert_eq!(plan.args[0], "--prompt");
        assert_eq!(&plan.args[2..], &["--agent", "build", "--print-logs"]);
        assert!(plan
            .preview()
            .ends_with("--agent build --print-logs"));
    }

    #[test]
    fn test_native_resume_for_every_tool() {
        for tool in Tool::ALL {
            let request = ResumeRequest {
                session_id: "abc".to_string(),
                source: *tool,
                target: *tool,
                extra_args: Vec::new(),
                transcript: None,
            };
            let plan = resume::plan(&request, &Config::default()).expect("plan");
            assert_eq!(plan.mode, ResumeMode::Native, "{tool}");
            assert_eq!(plan.program, tool.binary(), "{tool}");
            assert_eq!(plan.args, tool.native_resume_args("abc"), "{tool}");
        }
    }
}

// =============================================================================
// Binary
// =============================================================================

mod binary_tests {
    use super::*;

    #[test]
    fn test_help_lists_commands() {
        let home = tempdir().expect("temp dir");
        shuttle(home.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("resume"))
            .stdout(predicate::str::contains("translate"));
    }

    #[test]
    fn test_completions_for_bash() {
        let home = tempdir().expect("temp dir");
        shuttle(home.path())
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("_shuttle"))
            .stdout(predicate::str::contains("translate"));
    }

    #[test]
    fn test_flags_lists_canonical_table() {
        let home = tempdir().expect("temp dir");
        shuttle(home.path())
            .arg("flags")
            .assert()
            .success()
            .stdout(predicate::str::contains("--include-directories"))
            .stdout(predicate::str::contains("askForApproval"));
    }

    #[test]
    fn test_translate_to_gemini() {
        let home = tempdir().expect("temp dir");
        shuttle(home.path())
            .args(["translate", "--to", "gemini", "--", "--add-dir", "/tmp/workspace"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "--include-directories /tmp/workspace",
            ));
    }

    #[test]
    fn test_translate_json() {
        let home = tempdir().expect("temp dir");
        let output = shuttle(home.path())
            .args(["translate", "--to", "cursor", "--format", "json", "--", "--yolo"])
            .output()
            .expect("run shuttle");
        assert!(output.status.success());

        let json: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("valid JSON");
        assert_eq!(json["target"], "cursor");
        assert_eq!(json["mapped_args"], serde_json::json!(["--force"]));
    }

    #[test]
    fn test_sessions_lists_fake_home() {
        let home = fake_home();
        shuttle(home.path())
            .args(["sessions"])
            .assert()
            .success()
            .stdout(predicate::str::contains(CLAUDE_SESSION))
            .stdout(predicate::str::contains(CODEX_SESSION));
    }

    #[test]
    fn test_sessions_empty_home() {
        let home = tempdir().expect("temp dir");
        shuttle(home.path())
            .args(["sessions", "--tool", "gemini"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No sessions found."));
    }

    #[test]
    fn test_resume_dry_run_native() {
        let home = fake_home();
        shuttle(home.path())
            .args(["resume", "7d3f", "--dry-run"])
            .assert()
            .success()
            .stdout(predicate::str::contains(format!(
                "codex resume {CODEX_SESSION}"
            )));
    }

    #[test]
    fn test_resume_dry_run_handoff_translates_extra_args() {
        let home = fake_home();
        shuttle(home.path())
            .args([
                "resume",
                "550e8400",
                "--to",
                "gemini",
                "--dry-run",
                "--",
                "--add-dir",
                "/tmp/workspace",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("gemini -i '"))
            .stdout(predicate::str::contains(
                "--include-directories /tmp/workspace",
            ));
    }

    #[test]
    fn test_resume_unknown_session_fails() {
        let home = fake_home();
        shuttle(home.path())
            .args(["resume", "ffffffff", "--dry-run"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No session matching 'ffffffff'"));
    }

    #[test]
    fn test_resume_handoff_without_transcript_fails() {
        let home = tempdir().expect("temp dir");
        shuttle(home.path())
            .args(["resume", "abc", "--from", "codex", "--to", "claude", "--dry-run"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No transcript found"));
    }

    #[test]
    fn test_config_set_then_get() {
        let home = tempdir().expect("temp dir");
        shuttle(home.path())
            .args(["config", "set", "countdown_seconds", "0"])
            .assert()
            .success();
        shuttle(home.path())
            .args(["config", "get", "countdown_seconds"])
            .assert()
            .success()
            .stdout(predicate::str::contains("0"));
        assert!(home.path().join(".shuttle/config.yaml").exists());
    }

    #[test]
    fn test_config_set_rejects_unknown_key() {
        let home = tempdir().expect("temp dir");
        shuttle(home.path())
            .args(["config", "set", "colour", "blue"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn test_default_target_from_config() {
        let home = fake_home();
        write_file(
            &home.path().join(".shuttle/config.yaml"),
            "default_target: copilot\n",
        );
        shuttle(home.path())
            .args(["resume", CLAUDE_SESSION, "--dry-run"])
            .assert()
            .success()
            .stdout(predicate::str::contains("copilot -i '"));
    }
}
