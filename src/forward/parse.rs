//! Flag matcher: raw tokens → canonical occurrences.
//!
//! A single left-to-right pass over the token stream. At each position the
//! table is tried in declaration order; the first spelling that matches
//! decides what happens to that position. Positions are claimed greedily, so
//! an occurrence never overlaps one found earlier.

use serde::{Serialize, Serializer};

use super::spec::{is_flag_like, FlagArity, FlagKey, FlagSpec, FLAG_SPECS};

/// The value carried by a flag occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    /// Boolean presence (no value was given or none is accepted).
    Switch,
    /// A string value, inline (`--model=x`) or from the next token.
    Text(String),
}

impl FlagValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlagValue::Switch => None,
            FlagValue::Text(value) => Some(value),
        }
    }
}

impl Serialize for FlagValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FlagValue::Switch => serializer.serialize_bool(true),
            FlagValue::Text(value) => serializer.serialize_str(value),
        }
    }
}

/// One recognised instance of a canonical flag in the token stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagOccurrence {
    pub key: FlagKey,
    /// Token positions this occurrence claimed, ascending and never empty.
    pub raw_indices: Vec<usize>,
    pub value: FlagValue,
    /// The literal spelling the user typed (without any inline value).
    pub spelling: &'static str,
}

impl FlagOccurrence {
    /// Position of the flag token itself.
    pub fn first_index(&self) -> usize {
        self.raw_indices[0]
    }

    /// The occurrence as the user wrote it, e.g. `--sandbox read-only`.
    pub fn describe(&self) -> String {
        match &self.value {
            FlagValue::Switch => self.spelling.to_string(),
            FlagValue::Text(value) => format!("{} {}", self.spelling, value),
        }
    }
}

/// The immutable parse of a token stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedFlags {
    pub tokens: Vec<String>,
    /// Occurrences in ascending order of their first index.
    pub occurrences: Vec<FlagOccurrence>,
}

/// Outcome of trying the table at one position.
enum Match {
    Found(FlagOccurrence),
    /// A required-value flag with nothing to consume. The position is left
    /// untouched so the raw token survives as passthrough.
    MissingValue(&'static str),
    NoMatch,
}

/// Parses tokens against the canonical flag table.
pub fn parse_flags(tokens: &[String]) -> ParsedFlags {
    parse_flags_with(tokens, FLAG_SPECS)
}

/// Parses tokens against an explicit spec table.
pub fn parse_flags_with(tokens: &[String], specs: &[FlagSpec]) -> ParsedFlags {
    let mut occurrences = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        match match_at(tokens, i, specs) {
            Match::Found(occurrence) => {
                tracing::debug!(
                    key = %occurrence.key,
                    spelling = occurrence.spelling,
                    index = i,
                    "matched flag"
                );
                i += occurrence.raw_indices.len();
                occurrences.push(occurrence);
            }
            Match::MissingValue(spelling) => {
                tracing::debug!(spelling, index = i, "flag is missing its value, leaving it raw");
                i += 1;
            }
            Match::NoMatch => i += 1,
        }
    }

    ParsedFlags {
        tokens: tokens.to_vec(),
        occurrences,
    }
}

fn match_at(tokens: &[String], i: usize, specs: &[FlagSpec]) -> Match {
    let token = tokens[i].as_str();

    for spec in specs {
        for &spelling in spec.spellings {
            if token == spelling {
                return take_value(spec, spelling, tokens, i);
            }

            if spec.arity == FlagArity::NoValue {
                continue;
            }

            if let Some(inline) = token
                .strip_prefix(spelling)
                .and_then(|rest| rest.strip_prefix('='))
            {
                return Match::Found(FlagOccurrence {
                    key: spec.key,
                    raw_indices: vec![i],
                    value: FlagValue::Text(inline.to_string()),
                    spelling,
                });
            }
        }
    }

    Match::NoMatch
}

fn take_value(spec: &FlagSpec, spelling: &'static str, tokens: &[String], i: usize) -> Match {
    let switch = |spec: &FlagSpec| FlagOccurrence {
        key: spec.key,
        raw_indices: vec![i],
        value: FlagValue::Switch,
        spelling,
    };

    match spec.arity {
        FlagArity::NoValue => Match::Found(switch(spec)),
        FlagArity::RequiresValue | FlagArity::OptionalValue => match tokens.get(i + 1) {
            Some(next) if !is_flag_like(next) => Match::Found(FlagOccurrence {
                key: spec.key,
                raw_indices: vec![i, i + 1],
                value: FlagValue::Text(next.clone()),
                spelling,
            }),
            _ if spec.arity == FlagArity::OptionalValue => Match::Found(switch(spec)),
            _ => Match::MissingValue(spelling),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_empty() {
        let parsed = parse_flags(&[]);
        assert!(parsed.tokens.is_empty());
        assert!(parsed.occurrences.is_empty());
    }

    #[test]
    fn test_parse_value_from_next_token() {
        let parsed = parse_flags(&tokens(&["--model", "gpt-5"]));
        assert_eq!(parsed.occurrences.len(), 1);
        let occ = &parsed.occurrences[0];
        assert_eq!(occ.key, FlagKey::Model);
        assert_eq!(occ.raw_indices, vec![0, 1]);
        assert_eq!(occ.value, FlagValue::Text("gpt-5".to_string()));
        assert_eq!(occ.spelling, "--model");
    }

    #[test]
    fn test_parse_inline_value() {
        let parsed = parse_flags(&tokens(&["-m=o3", "--add-dir=/tmp/a"]));
        assert_eq!(parsed.occurrences.len(), 2);
        assert_eq!(parsed.occurrences[0].value.as_str(), Some("o3"));
        assert_eq!(parsed.occurrences[0].raw_indices, vec![0]);
        assert_eq!(parsed.occurrences[1].key, FlagKey::AddDir);
        assert_eq!(parsed.occurrences[1].value.as_str(), Some("/tmp/a"));
        assert_eq!(parsed.occurrences[1].raw_indices, vec![1]);
    }

    #[test]
    fn test_parse_inline_not_attempted_for_boolean_flags() {
        let parsed = parse_flags(&tokens(&["--yolo=true"]));
        assert!(parsed.occurrences.is_empty());
    }

    #[test]
    fn test_parse_boolean_flag_never_looks_ahead() {
        let parsed = parse_flags(&tokens(&["--full-auto", "value"]));
        assert_eq!(parsed.occurrences.len(), 1);
        assert_eq!(parsed.occurrences[0].value, FlagValue::Switch);
        assert_eq!(parsed.occurrences[0].raw_indices, vec![0]);
    }

    #[test]
    fn test_parse_required_value_missing_is_left_untouched() {
        let parsed = parse_flags(&tokens(&["--model"]));
        assert!(parsed.occurrences.is_empty());

        let parsed = parse_flags(&tokens(&["--agent", "--yolo"]));
        assert_eq!(parsed.occurrences.len(), 1);
        assert_eq!(parsed.occurrences[0].key, FlagKey::Yolo);
        assert_eq!(parsed.occurrences[0].raw_indices, vec![1]);
    }

    #[test]
    fn test_parse_optional_value_missing_becomes_switch() {
        let parsed = parse_flags(&tokens(&["--sandbox", "--model", "x"]));
        assert_eq!(parsed.occurrences.len(), 2);
        assert_eq!(parsed.occurrences[0].key, FlagKey::Sandbox);
        assert_eq!(parsed.occurrences[0].value, FlagValue::Switch);
        assert_eq!(parsed.occurrences[0].raw_indices, vec![0]);

        let parsed = parse_flags(&tokens(&["-s"]));
        assert_eq!(parsed.occurrences[0].value, FlagValue::Switch);
    }

    #[test]
    fn test_parse_unknown_tokens_are_skipped() {
        let parsed = parse_flags(&tokens(&["--search", "--unknown-flag", "value"]));
        assert!(parsed.occurrences.is_empty());
        assert_eq!(parsed.tokens.len(), 3);
    }

    #[test]
    fn test_parse_claimed_value_is_not_rematched() {
        // The agent name claims position 1, so scanning resumes at 2.
        let parsed = parse_flags(&tokens(&["--agent", "reviewer", "--yolo"]));
        assert_eq!(parsed.occurrences.len(), 2);
        assert_eq!(parsed.occurrences[0].raw_indices, vec![0, 1]);
        assert_eq!(parsed.occurrences[1].raw_indices, vec![2]);
    }

    #[test]
    fn test_parse_occurrences_in_input_order() {
        let parsed = parse_flags(&tokens(&[
            "--yolo",
            "--model",
            "a",
            "extra",
            "-m",
            "b",
            "--approve-mcps",
        ]));
        let firsts: Vec<usize> = parsed.occurrences.iter().map(|o| o.first_index()).collect();
        assert_eq!(firsts, vec![0, 1, 4, 6]);
    }

    #[test]
    fn test_parse_aliases_share_a_key() {
        let parsed = parse_flags(&tokens(&["--allowedTools", "Edit", "--allow-tool", "Bash"]));
        assert!(parsed
            .occurrences
            .iter()
            .all(|o| o.key == FlagKey::AllowedTools));
        assert_eq!(parsed.occurrences[0].spelling, "--allowedTools");
        assert_eq!(parsed.occurrences[1].spelling, "--allow-tool");
    }

    #[test]
    fn test_parse_prefix_without_equals_does_not_match() {
        // "--models" shares a prefix with "--model" but is a different flag.
        let parsed = parse_flags(&tokens(&["--models", "x"]));
        assert!(parsed.occurrences.is_empty());
    }

    #[test]
    fn test_describe() {
        let parsed = parse_flags(&tokens(&["--sandbox", "read-only", "--yolo"]));
        assert_eq!(parsed.occurrences[0].describe(), "--sandbox read-only");
        assert_eq!(parsed.occurrences[1].describe(), "--yolo");
    }

    #[test]
    fn test_flag_value_serializes_switch_as_true() {
        assert_eq!(serde_json::to_string(&FlagValue::Switch).unwrap(), "true");
        assert_eq!(
            serde_json::to_string(&FlagValue::Text("x".into())).unwrap(),
            "\"x\""
        );
    }
}
