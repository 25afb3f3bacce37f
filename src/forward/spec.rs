//! Canonical flag table.
//!
//! Every flag spelling the forwarding engine recognises, across every
//! supported tool, maps to exactly one [`FlagKey`]. The table is a plain
//! ordered list: the matcher tries specs in declaration order and the first
//! spelling that matches a token wins.

use serde::Serialize;

/// A tool-agnostic flag intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FlagKey {
    Model,
    Sandbox,
    AskForApproval,
    ApprovalMode,
    PermissionMode,
    FullAuto,
    DangerouslyBypass,
    DangerouslySkipPermissions,
    Yolo,
    Force,
    AllowAllTools,
    AddDir,
    AllowedTools,
    Agent,
    ApproveMcps,
}

impl FlagKey {
    /// The camelCase name used in JSON output and the `flags` listing.
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagKey::Model => "model",
            FlagKey::Sandbox => "sandbox",
            FlagKey::AskForApproval => "askForApproval",
            FlagKey::ApprovalMode => "approvalMode",
            FlagKey::PermissionMode => "permissionMode",
            FlagKey::FullAuto => "fullAuto",
            FlagKey::DangerouslyBypass => "dangerouslyBypass",
            FlagKey::DangerouslySkipPermissions => "dangerouslySkipPermissions",
            FlagKey::Yolo => "yolo",
            FlagKey::Force => "force",
            FlagKey::AllowAllTools => "allowAllTools",
            FlagKey::AddDir => "addDir",
            FlagKey::AllowedTools => "allowedTools",
            FlagKey::Agent => "agent",
            FlagKey::ApproveMcps => "approveMcps",
        }
    }
}

impl std::fmt::Display for FlagKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a flag takes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlagArity {
    /// Boolean flag, never looks ahead (e.g. `--full-auto`).
    #[serde(rename = "none")]
    NoValue,
    /// Needs a value, either inline (`--model=x`) or as the next token.
    #[serde(rename = "required")]
    RequiresValue,
    /// Takes a value when one follows, otherwise acts as a boolean.
    #[serde(rename = "optional")]
    OptionalValue,
}

/// A single entry of the canonical flag table.
#[derive(Debug, Clone, Serialize)]
pub struct FlagSpec {
    pub key: FlagKey,
    /// Every literal spelling, across all tools, in match order.
    pub spellings: &'static [&'static str],
    pub arity: FlagArity,
    /// Human-readable description (for the `flags` listing).
    pub description: &'static str,
}

/// The canonical flag table, in match order.
pub static FLAG_SPECS: &[FlagSpec] = &[
    FlagSpec {
        key: FlagKey::Model,
        spellings: &["--model", "-m"],
        arity: FlagArity::RequiresValue,
        description: "Model override",
    },
    FlagSpec {
        key: FlagKey::Sandbox,
        spellings: &["--sandbox", "-s"],
        arity: FlagArity::OptionalValue,
        description: "Sandbox mode (codex scale or enabled/disabled)",
    },
    FlagSpec {
        key: FlagKey::AskForApproval,
        spellings: &["--ask-for-approval", "-a"],
        arity: FlagArity::RequiresValue,
        description: "Codex approval policy",
    },
    FlagSpec {
        key: FlagKey::ApprovalMode,
        spellings: &["--approval-mode"],
        arity: FlagArity::RequiresValue,
        description: "Gemini approval mode",
    },
    FlagSpec {
        key: FlagKey::PermissionMode,
        spellings: &["--permission-mode"],
        arity: FlagArity::RequiresValue,
        description: "Claude permission mode",
    },
    FlagSpec {
        key: FlagKey::FullAuto,
        spellings: &["--full-auto"],
        arity: FlagArity::NoValue,
        description: "Low-friction automatic execution",
    },
    FlagSpec {
        key: FlagKey::DangerouslyBypass,
        spellings: &["--dangerously-bypass-approvals-and-sandbox"],
        arity: FlagArity::NoValue,
        description: "Skip every approval and the sandbox",
    },
    FlagSpec {
        key: FlagKey::DangerouslySkipPermissions,
        spellings: &["--dangerously-skip-permissions"],
        arity: FlagArity::NoValue,
        description: "Skip permission prompts",
    },
    FlagSpec {
        key: FlagKey::Yolo,
        spellings: &["--yolo", "-y"],
        arity: FlagArity::NoValue,
        description: "Approve everything automatically",
    },
    FlagSpec {
        key: FlagKey::Force,
        spellings: &["--force", "-f"],
        arity: FlagArity::NoValue,
        description: "Force-allow commands",
    },
    FlagSpec {
        key: FlagKey::AllowAllTools,
        spellings: &["--allow-all-tools"],
        arity: FlagArity::NoValue,
        description: "Allow every tool without asking",
    },
    FlagSpec {
        key: FlagKey::AddDir,
        spellings: &["--add-dir", "--include-directories"],
        arity: FlagArity::RequiresValue,
        description: "Extra directories the agent may access",
    },
    FlagSpec {
        key: FlagKey::AllowedTools,
        spellings: &["--allowed-tools", "--allowedTools", "--allow-tool"],
        arity: FlagArity::RequiresValue,
        description: "Tools allowed without confirmation",
    },
    FlagSpec {
        key: FlagKey::Agent,
        spellings: &["--agent"],
        arity: FlagArity::RequiresValue,
        description: "Named agent to run",
    },
    FlagSpec {
        key: FlagKey::ApproveMcps,
        spellings: &["--approve-mcps"],
        arity: FlagArity::NoValue,
        description: "Approve all MCP servers",
    },
];

/// Whether a token looks like another flag rather than a value.
pub fn is_flag_like(token: &str) -> bool {
    token.starts_with('-')
}

/// Looks up the table entry for a canonical key.
pub fn spec_for(key: FlagKey) -> Option<&'static FlagSpec> {
    FLAG_SPECS.iter().find(|spec| spec.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_spellings_are_globally_unique() {
        let mut seen = HashSet::new();
        for spec in FLAG_SPECS {
            for spelling in spec.spellings {
                assert!(seen.insert(*spelling), "duplicate spelling {spelling}");
            }
        }
    }

    #[test]
    fn test_every_key_has_exactly_one_spec() {
        let mut keys = HashSet::new();
        for spec in FLAG_SPECS {
            assert!(keys.insert(spec.key), "key {} declared twice", spec.key);
            assert!(!spec.spellings.is_empty());
        }
    }

    #[test]
    fn test_every_spelling_is_flag_like() {
        for spec in FLAG_SPECS {
            for spelling in spec.spellings {
                assert!(is_flag_like(spelling));
            }
        }
    }

    #[test]
    fn test_spec_for_finds_aliases() {
        let spec = spec_for(FlagKey::AddDir).unwrap();
        assert!(spec.spellings.contains(&"--include-directories"));
        assert_eq!(spec.arity, FlagArity::RequiresValue);
    }

    #[test]
    fn test_is_flag_like() {
        assert!(is_flag_like("--model"));
        assert!(is_flag_like("-m"));
        assert!(!is_flag_like("gpt-5"));
        assert!(!is_flag_like(""));
    }
}
