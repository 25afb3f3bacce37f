//! Per-target flag mappers.
//!
//! A mapper reads canonical occurrences through a [`ForwardContext`],
//! consumes the ones its tool can express and renders them in that tool's
//! grammar. Whatever a mapper leaves alone is forwarded verbatim.
//!
//! Mapped flags are emitted in a fixed order per tool (model first, then
//! permission level, then sandbox, directories and tools) regardless of
//! the order the user typed them in.

use super::context::ForwardContext;
use super::parse::FlagOccurrence;
use super::spec::FlagKey;
use crate::tools::Tool;

/// Rendered flags and warnings produced by a mapper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapperOutput {
    pub mapped_args: Vec<String>,
    pub warnings: Vec<String>,
}

impl MapperOutput {
    fn flag(&mut self, flag: &str) {
        self.mapped_args.push(flag.to_string());
    }

    fn flag_value(&mut self, flag: &str, value: &str) {
        self.mapped_args.push(flag.to_string());
        self.mapped_args.push(value.to_string());
    }

    fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }
}

/// A target tool's translation function.
pub type Mapper = fn(&mut ForwardContext<'_>) -> MapperOutput;

/// Returns the mapper registered for a tool, if any.
///
/// Tools without a mapper get an identity resolution: every token is
/// passed through unchanged.
pub fn mapper_for(tool: Tool) -> Option<Mapper> {
    match tool {
        Tool::Claude => Some(map_claude as Mapper),
        Tool::Codex => Some(map_codex as Mapper),
        Tool::Gemini => Some(map_gemini as Mapper),
        Tool::Copilot => Some(map_copilot as Mapper),
        Tool::Cursor => Some(map_cursor as Mapper),
        Tool::Opencode => Some(map_opencode as Mapper),
        Tool::Droid => None,
    }
}

/// The on/off sandbox vocabulary shared by gemini and cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SandboxToggle {
    Enabled,
    Disabled,
}

impl SandboxToggle {
    pub fn as_str(&self) -> &'static str {
        match self {
            SandboxToggle::Enabled => "enabled",
            SandboxToggle::Disabled => "disabled",
        }
    }
}

/// Normalizes a sandbox value onto the enabled/disabled scale.
///
/// `read-only` and `workspace-write` still confine the agent, so they count
/// as enabled; `danger-full-access` is disabled. Values already on the
/// on/off scale map to themselves. Anything else is `None`.
pub fn normalize_sandbox(raw: &str) -> Option<SandboxToggle> {
    match raw {
        "read-only" | "workspace-write" | "enabled" => Some(SandboxToggle::Enabled),
        "danger-full-access" | "disabled" => Some(SandboxToggle::Disabled),
        _ => None,
    }
}

/// Intents that mean "never ask, allow everything".
const BYPASS_KEYS: &[FlagKey] = &[
    FlagKey::DangerouslyBypass,
    FlagKey::DangerouslySkipPermissions,
    FlagKey::Yolo,
    FlagKey::Force,
    FlagKey::AllowAllTools,
];

const CODEX_SANDBOX_MODES: &[&str] = &["read-only", "workspace-write", "danger-full-access"];
const CODEX_BYPASS: &str = "--dangerously-bypass-approvals-and-sandbox";
const CLAUDE_BYPASS: &str = "--dangerously-skip-permissions";

fn approval_modes<'a>(ctx: &ForwardContext<'a>, mode: &str) -> Vec<&'a FlagOccurrence> {
    ctx.all(&[FlagKey::ApprovalMode])
        .into_iter()
        .filter(|occ| occ.value.as_str() == Some(mode))
        .collect()
}

fn take_with_modes<'a>(
    ctx: &mut ForwardContext<'a>,
    keys: &[FlagKey],
    mode: &str,
) -> Vec<&'a FlagOccurrence> {
    let mut found = ctx.all(keys);
    found.extend(approval_modes(ctx, mode));
    found.sort_by_key(|occ| occ.first_index());
    ctx.consume(&found);
    found
}

/// Consumes every bypass intent, `--approval-mode yolo` included.
fn take_bypass<'a>(ctx: &mut ForwardContext<'a>) -> Vec<&'a FlagOccurrence> {
    take_with_modes(ctx, BYPASS_KEYS, "yolo")
}

/// Consumes every full-automation intent, `--approval-mode auto_edit` included.
fn take_full_auto<'a>(ctx: &mut ForwardContext<'a>) -> Vec<&'a FlagOccurrence> {
    take_with_modes(ctx, &[FlagKey::FullAuto], "auto_edit")
}

fn merge_in_order<'a>(
    mut first: Vec<&'a FlagOccurrence>,
    second: Vec<&'a FlagOccurrence>,
) -> Vec<&'a FlagOccurrence> {
    first.extend(second);
    first.sort_by_key(|occ| occ.first_index());
    first
}

fn describe_all(occurrences: &[&FlagOccurrence]) -> String {
    occurrences
        .iter()
        .map(|occ| occ.describe())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Warns that lower-precedence flags were dropped in favour of `winner`.
fn warn_collapsed(out: &mut MapperOutput, tool: Tool, collapsed: &[&FlagOccurrence], winner: &str) {
    if collapsed.is_empty() {
        return;
    }
    out.warn(format!(
        "{} overrides {} ({} accepts a single permission level)",
        winner,
        describe_all(collapsed),
        tool.display_name()
    ));
}

/// Warns about occurrences whose spelling is not native to the target.
fn warn_renamed(
    out: &mut MapperOutput,
    tool: Tool,
    occurrences: &[&FlagOccurrence],
    rendered: &str,
    native: &[&str],
) {
    let renamed: Vec<&FlagOccurrence> = occurrences
        .iter()
        .copied()
        .filter(|occ| !native.contains(&occ.spelling))
        .collect();
    if renamed.is_empty() {
        return;
    }
    out.warn(format!(
        "{} translated to {} for {}",
        describe_all(&renamed),
        rendered,
        tool.display_name()
    ));
}

fn map_model(ctx: &mut ForwardContext<'_>, out: &mut MapperOutput) {
    if let Some(model) = ctx
        .consume_latest(&[FlagKey::Model])
        .and_then(|occ| occ.value.as_str())
    {
        out.flag_value("--model", model);
    }
}

fn map_agent(ctx: &mut ForwardContext<'_>, out: &mut MapperOutput) {
    if let Some(agent) = ctx
        .consume_latest(&[FlagKey::Agent])
        .and_then(|occ| occ.value.as_str())
    {
        out.flag_value("--agent", agent);
    }
}

/// Latest sandbox occurrence on the on/off scale; a bare `--sandbox` is on.
fn latest_sandbox_toggle<'a>(
    ctx: &ForwardContext<'a>,
) -> Option<(&'a FlagOccurrence, SandboxToggle)> {
    let latest = ctx.latest(&[FlagKey::Sandbox])?;
    let toggle = match latest.value.as_str() {
        None => SandboxToggle::Enabled,
        Some(raw) => normalize_sandbox(raw)?,
    };
    Some((latest, toggle))
}

/// Consumes the sandbox occurrences whose value `known` accepts (bare flags
/// always count). Unrecognised values stay in passthrough.
fn consume_sandbox(ctx: &mut ForwardContext<'_>, known: impl Fn(&str) -> bool) {
    let recognised: Vec<&FlagOccurrence> = ctx
        .all(&[FlagKey::Sandbox])
        .into_iter()
        .filter(|occ| occ.value.as_str().map_or(true, &known))
        .collect();
    ctx.consume(&recognised);
}

fn is_sandbox_toggle(raw: &str) -> bool {
    normalize_sandbox(raw).is_some()
}

fn map_codex(ctx: &mut ForwardContext<'_>) -> MapperOutput {
    let mut out = MapperOutput::default();
    map_model(ctx, &mut out);

    // bypass > full-auto > explicit sandbox / approval policy
    let bypass = take_bypass(ctx);
    let full_auto = take_full_auto(ctx);
    if !bypass.is_empty() || !full_auto.is_empty() {
        let lower = ctx.consume_keys(&[FlagKey::Sandbox, FlagKey::AskForApproval]);
        if bypass.is_empty() {
            out.flag("--full-auto");
            warn_renamed(&mut out, Tool::Codex, &full_auto, "--full-auto", &["--full-auto"]);
            warn_collapsed(&mut out, Tool::Codex, &lower, "--full-auto");
        } else {
            out.flag(CODEX_BYPASS);
            warn_renamed(&mut out, Tool::Codex, &bypass, CODEX_BYPASS, &[CODEX_BYPASS, "--yolo"]);
            let collapsed = merge_in_order(full_auto, lower);
            warn_collapsed(&mut out, Tool::Codex, &collapsed, CODEX_BYPASS);
        }
    } else {
        map_codex_sandbox(ctx, &mut out);
        if let Some(policy) = ctx
            .consume_latest(&[FlagKey::AskForApproval])
            .and_then(|occ| occ.value.as_str())
        {
            out.flag_value("--ask-for-approval", policy);
        }
    }

    for dir in ctx.consume_all_csv_strings(&[FlagKey::AddDir]) {
        out.flag_value("--add-dir", &dir);
    }

    out
}

fn map_codex_sandbox(ctx: &mut ForwardContext<'_>, out: &mut MapperOutput) {
    let Some(latest) = ctx.latest(&[FlagKey::Sandbox]) else {
        return;
    };

    let native = latest
        .value
        .as_str()
        .filter(|raw| CODEX_SANDBOX_MODES.contains(raw));
    let mode = match native {
        Some(mode) => mode,
        None => match latest_sandbox_toggle(ctx) {
            Some((_, SandboxToggle::Enabled)) => "workspace-write",
            Some((_, SandboxToggle::Disabled)) => "danger-full-access",
            None => return,
        },
    };

    consume_sandbox(ctx, |raw| {
        CODEX_SANDBOX_MODES.iter().any(|mode| *mode == raw) || is_sandbox_toggle(raw)
    });
    out.flag_value("--sandbox", mode);
    if native.is_none() {
        out.warn(format!(
            "{} translated to --sandbox {} for {}",
            latest.describe(),
            mode,
            Tool::Codex.display_name()
        ));
    }
}

fn map_claude(ctx: &mut ForwardContext<'_>) -> MapperOutput {
    let mut out = MapperOutput::default();
    map_model(ctx, &mut out);

    // bypass > explicit permission mode > full-auto
    let bypass = take_bypass(ctx);
    let full_auto = take_full_auto(ctx);
    if !bypass.is_empty() {
        let modes = ctx.consume_keys(&[FlagKey::PermissionMode]);
        out.flag(CLAUDE_BYPASS);
        warn_renamed(&mut out, Tool::Claude, &bypass, CLAUDE_BYPASS, &[CLAUDE_BYPASS]);
        let collapsed = merge_in_order(full_auto, modes);
        warn_collapsed(&mut out, Tool::Claude, &collapsed, CLAUDE_BYPASS);
    } else if let Some(mode) = ctx
        .consume_latest(&[FlagKey::PermissionMode])
        .and_then(|occ| occ.value.as_str())
    {
        out.flag_value("--permission-mode", mode);
        let winner = format!("--permission-mode {mode}");
        warn_collapsed(&mut out, Tool::Claude, &full_auto, &winner);
    } else if !full_auto.is_empty() {
        out.flag_value("--permission-mode", "acceptEdits");
        warn_renamed(
            &mut out,
            Tool::Claude,
            &full_auto,
            "--permission-mode acceptEdits",
            &[],
        );
    }

    for dir in ctx.consume_all_csv_strings(&[FlagKey::AddDir]) {
        out.flag_value("--add-dir", &dir);
    }

    let tools = ctx.consume_all_csv_strings(&[FlagKey::AllowedTools]);
    if !tools.is_empty() {
        out.flag_value("--allowed-tools", &tools.join(","));
    }

    map_agent(ctx, &mut out);
    out
}

fn map_gemini(ctx: &mut ForwardContext<'_>) -> MapperOutput {
    let mut out = MapperOutput::default();
    map_model(ctx, &mut out);

    // bypass > explicit approval mode > full-auto
    let bypass = take_bypass(ctx);
    let full_auto = take_full_auto(ctx);
    if !bypass.is_empty() {
        let modes = ctx.consume_keys(&[FlagKey::ApprovalMode]);
        out.flag("--yolo");
        warn_renamed(
            &mut out,
            Tool::Gemini,
            &bypass,
            "--yolo",
            &["--yolo", "-y", "--approval-mode"],
        );
        let collapsed = merge_in_order(full_auto, modes);
        warn_collapsed(&mut out, Tool::Gemini, &collapsed, "--yolo");
    } else if let Some(mode) = ctx
        .consume_latest(&[FlagKey::ApprovalMode])
        .and_then(|occ| occ.value.as_str())
    {
        out.flag_value("--approval-mode", mode);
        let winner = format!("--approval-mode {mode}");
        warn_collapsed(&mut out, Tool::Gemini, &full_auto, &winner);
    } else if !full_auto.is_empty() {
        out.flag_value("--approval-mode", "auto_edit");
        warn_renamed(
            &mut out,
            Tool::Gemini,
            &full_auto,
            "--approval-mode auto_edit",
            &["--approval-mode"],
        );
    }

    if let Some((latest, toggle)) = latest_sandbox_toggle(ctx) {
        consume_sandbox(ctx, is_sandbox_toggle);
        match toggle {
            SandboxToggle::Enabled => {
                out.flag("--sandbox");
                if latest.value.as_str().is_some() {
                    out.warn(format!(
                        "{} translated to --sandbox for {}",
                        latest.describe(),
                        Tool::Gemini.display_name()
                    ));
                }
            }
            SandboxToggle::Disabled => out.warn(format!(
                "{} dropped: {} runs without a sandbox unless --sandbox is given",
                latest.describe(),
                Tool::Gemini.display_name()
            )),
        }
    }

    let dirs = ctx.consume_all_csv_strings(&[FlagKey::AddDir]);
    if !dirs.is_empty() {
        out.flag_value("--include-directories", &dirs.join(","));
    }

    let tools = ctx.consume_all_csv_strings(&[FlagKey::AllowedTools]);
    if !tools.is_empty() {
        out.flag_value("--allowed-tools", &tools.join(","));
    }

    out
}

fn map_cursor(ctx: &mut ForwardContext<'_>) -> MapperOutput {
    let mut out = MapperOutput::default();
    map_model(ctx, &mut out);

    let bypass = take_bypass(ctx);
    if !bypass.is_empty() {
        out.flag("--force");
        warn_renamed(&mut out, Tool::Cursor, &bypass, "--force", &["--force", "-f"]);
    }

    if let Some((latest, toggle)) = latest_sandbox_toggle(ctx) {
        consume_sandbox(ctx, is_sandbox_toggle);
        out.flag_value("--sandbox", toggle.as_str());
        if latest.value.as_str() != Some(toggle.as_str()) {
            out.warn(format!(
                "{} translated to --sandbox {} for {}",
                latest.describe(),
                toggle.as_str(),
                Tool::Cursor.display_name()
            ));
        }
    }

    if ctx.consume_any_boolean(&[FlagKey::ApproveMcps]) {
        out.flag("--approve-mcps");
    }

    out
}

fn map_copilot(ctx: &mut ForwardContext<'_>) -> MapperOutput {
    let mut out = MapperOutput::default();
    map_model(ctx, &mut out);

    let bypass = take_bypass(ctx);
    if !bypass.is_empty() {
        out.flag("--allow-all-tools");
        warn_renamed(
            &mut out,
            Tool::Copilot,
            &bypass,
            "--allow-all-tools",
            &["--allow-all-tools"],
        );
    }

    for tool in ctx.consume_all_csv_strings(&[FlagKey::AllowedTools]) {
        out.flag_value("--allow-tool", &tool);
    }

    for dir in ctx.consume_all_csv_strings(&[FlagKey::AddDir]) {
        out.flag_value("--add-dir", &dir);
    }

    map_agent(ctx, &mut out);
    out
}

fn map_opencode(ctx: &mut ForwardContext<'_>) -> MapperOutput {
    let mut out = MapperOutput::default();
    map_model(ctx, &mut out);
    map_agent(ctx, &mut out);
    out
}
