//! Cross-tool argument forwarding.
//!
//! Turns a raw trailing argument list, typed against any supported tool's
//! grammar, into arguments for a chosen target tool:
//!
//! ```text
//! raw tokens → parse (canonical occurrences) → target mapper → mapped ++ passthrough
//! ```
//!
//! Nothing here fails. Unknown flags, and known flags the target mapper does
//! not handle, are forwarded verbatim; lossy translations show up as
//! warnings.

pub mod context;
pub mod mappers;
pub mod parse;
pub mod spec;

use serde::Serialize;

use crate::tools::Tool;

pub use context::ForwardContext;
pub use mappers::{mapper_for, normalize_sandbox, Mapper, MapperOutput, SandboxToggle};
pub use parse::{parse_flags, FlagOccurrence, FlagValue, ParsedFlags};
pub use spec::{FlagArity, FlagKey, FlagSpec, FLAG_SPECS};

/// The full outcome of forwarding a token list to a target tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForwardResolution {
    pub target: Tool,
    /// Flags rendered in the target's grammar.
    pub mapped_args: Vec<String>,
    /// Unconsumed tokens, in their original order.
    pub passthrough_args: Vec<String>,
    /// `mapped_args` followed by `passthrough_args`.
    pub extra_args: Vec<String>,
    pub warnings: Vec<String>,
    pub parsed: ParsedFlags,
    pub consumed_indices: Vec<usize>,
}

impl ForwardResolution {
    /// A resolution that forwards every token unchanged.
    pub fn identity(target: Tool, raw: &[String]) -> Self {
        Self {
            target,
            mapped_args: Vec::new(),
            passthrough_args: raw.to_vec(),
            extra_args: raw.to_vec(),
            warnings: Vec::new(),
            parsed: ParsedFlags {
                tokens: raw.to_vec(),
                occurrences: Vec::new(),
            },
            consumed_indices: Vec::new(),
        }
    }
}

/// Resolves raw tokens for a target using its registered mapper.
pub fn resolve(target: Tool, raw: &[String]) -> ForwardResolution {
    resolve_with(target, raw, mapper_for(target))
}

/// Resolves raw tokens for a target with an explicit mapper.
///
/// Empty input or a missing mapper yields the identity resolution.
pub fn resolve_with(target: Tool, raw: &[String], mapper: Option<Mapper>) -> ForwardResolution {
    let Some(mapper) = mapper.filter(|_| !raw.is_empty()) else {
        return ForwardResolution::identity(target, raw);
    };

    let parsed = parse_flags(raw);
    let mut ctx = ForwardContext::new(&parsed);
    let output = mapper(&mut ctx);
    let passthrough_args = ctx.passthrough_args();
    let consumed_indices = ctx.consumed_indices();

    tracing::debug!(
        target_tool = %target,
        mapped = output.mapped_args.len(),
        passthrough = passthrough_args.len(),
        warnings = output.warnings.len(),
        "resolved forwarded arguments"
    );

    let mut extra_args = output.mapped_args.clone();
    extra_args.extend(passthrough_args.iter().cloned());

    ForwardResolution {
        target,
        mapped_args: output.mapped_args,
        passthrough_args,
        extra_args,
        warnings: output.warnings,
        parsed,
        consumed_indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_identity_without_mapper() {
        let raw = tokens(&["--yolo", "--model", "x", "prompt"]);
        let resolution = resolve(Tool::Droid, &raw);

        assert!(resolution.mapped_args.is_empty());
        assert_eq!(resolution.passthrough_args, raw);
        assert_eq!(resolution.extra_args, raw);
        assert!(resolution.warnings.is_empty());
        assert!(resolution.consumed_indices.is_empty());
    }

    #[test]
    fn test_identity_for_empty_input() {
        for tool in Tool::ALL {
            let resolution = resolve(*tool, &[]);
            assert!(resolution.mapped_args.is_empty());
            assert!(resolution.passthrough_args.is_empty());
            assert!(resolution.extra_args.is_empty());
        }
    }

    #[test]
    fn test_extra_args_are_mapped_then_passthrough() {
        let raw = tokens(&["--verbose", "--add-dir", "/w", "--debug"]);
        let resolution = resolve(Tool::Gemini, &raw);

        assert_eq!(resolution.mapped_args, vec!["--include-directories", "/w"]);
        assert_eq!(resolution.passthrough_args, vec!["--verbose", "--debug"]);
        assert_eq!(
            resolution.extra_args,
            vec!["--include-directories", "/w", "--verbose", "--debug"]
        );
        assert_eq!(resolution.consumed_indices, vec![1, 2]);
    }

    #[test]
    fn test_unknown_flags_pass_through_for_every_tool() {
        let raw = tokens(&["--search", "--unknown-flag", "value"]);
        for tool in Tool::ALL {
            let resolution = resolve(*tool, &raw);
            assert!(resolution.mapped_args.is_empty(), "{tool}");
            assert_eq!(resolution.passthrough_args, raw, "{tool}");
        }
    }

    #[test]
    fn test_custom_mapper_is_used() {
        fn drop_everything(ctx: &mut ForwardContext<'_>) -> MapperOutput {
            let all: Vec<FlagKey> = FLAG_SPECS.iter().map(|spec| spec.key).collect();
            ctx.consume_keys(&all);
            MapperOutput {
                mapped_args: Vec::new(),
                warnings: vec!["dropped".to_string()],
            }
        }

        let raw = tokens(&["--yolo", "keep"]);
        let resolution = resolve_with(Tool::Droid, &raw, Some(drop_everything as Mapper));
        assert_eq!(resolution.passthrough_args, vec!["keep"]);
        assert_eq!(resolution.warnings, vec!["dropped"]);
    }
}
