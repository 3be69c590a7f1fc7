//! Data types (results, receipts, config) for tfcheck.
//!
//! This crate is intentionally "dumb": DTOs with serde + schemars, plus the
//! pure projections that derive status from a [`CheckResult`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ── Schema Identifiers ─────────────────────────────────────────
pub const CHECK_SCHEMA_V1: &str = "tfcheck.check.v1";

// ── Report Markers ─────────────────────────────────────────────
// The renderer wraps plan output in these lines and the truncator removes
// whatever sits between them. Both sides must agree byte-for-byte.
pub const PLAN_DETAILS_OPEN: &str = "<details><summary>Show Plan</summary>";
pub const PLAN_DETAILS_CLOSE: &str = "</details>";

/// Separator placed between the renderings of individual targets.
pub const TARGET_SEPARATOR: &str = "\n\n---\n\n";

/// Report size (bytes) above which plan details are stripped.
pub const DEFAULT_REPORT_SIZE_LIMIT: usize = 65536;

pub const DEFAULT_TERRAFORM_BIN: &str = "terraform";

/// Outcome of one target, or of a whole run.
///
/// Ordered by dominance: `Failed > ChangesPending > Clean`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    Clean,
    Failed,
    ChangesPending,
}

impl Outcome {
    /// Interpret a `plan -detailed-exitcode` return code.
    ///
    /// Codes other than 0 and 2 all become `Failed`, so the exit code is 1
    /// rather than the raw plan code.
    pub fn from_plan_code(code: i32) -> Self {
        match code {
            0 => Outcome::Clean,
            2 => Outcome::ChangesPending,
            _ => Outcome::Failed,
        }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Clean => 0,
            Outcome::Failed => 1,
            Outcome::ChangesPending => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Clean => "clean",
            Outcome::Failed => "failed",
            Outcome::ChangesPending => "changes_pending",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Outcome::Clean => "✅Passed: there are no changes✅",
            Outcome::Failed => "⛔️Failed: see details⛔️",
            Outcome::ChangesPending => "⚠️There are changes: see details⚠️",
        }
    }

    fn rank(self) -> u8 {
        match self {
            Outcome::Clean => 0,
            Outcome::ChangesPending => 1,
            Outcome::Failed => 2,
        }
    }

    /// Fold another outcome into this one; the dominant outcome wins.
    pub fn combine(self, other: Outcome) -> Outcome {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Init,
    Fmt,
    Validate,
    Plan,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Init, Stage::Fmt, Stage::Validate, Stage::Plan];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Init => "init",
            Stage::Fmt => "fmt",
            Stage::Validate => "validate",
            Stage::Plan => "plan",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Success,
    Failed,
}

impl StageStatus {
    pub fn from_success(success: bool) -> Self {
        if success {
            StageStatus::Success
        } else {
            StageStatus::Failed
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StageStatus::Success => "success",
            StageStatus::Failed => "failed",
        }
    }
}

/// Captured result of one external invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Combined stdout + stderr.
    pub output: String,
    pub returncode: i32,
}

impl CommandResult {
    pub fn new(output: impl Into<String>, returncode: i32) -> Self {
        Self {
            output: output.into(),
            returncode,
        }
    }

    pub fn success(&self) -> bool {
        self.returncode == 0
    }
}

/// Four-stage outcome for one target directory.
///
/// Build it with [`CheckResult::from_stages`] so that `plan_success` and
/// `plan_changes` always agree with `plan_returncode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CheckResult {
    pub path: String,
    pub init_success: bool,
    pub init_output: String,
    pub fmt_success: bool,
    pub fmt_output: String,
    pub validate_success: bool,
    pub validate_output: String,
    pub plan_returncode: i32,
    pub plan_success: bool,
    pub plan_changes: bool,
    pub plan_output: String,
}

impl CheckResult {
    pub fn from_stages(
        path: impl Into<String>,
        init: CommandResult,
        fmt: CommandResult,
        validate: CommandResult,
        plan: CommandResult,
    ) -> Self {
        Self {
            path: path.into(),
            init_success: init.success(),
            init_output: init.output,
            fmt_success: fmt.success(),
            fmt_output: fmt.output,
            validate_success: validate.success(),
            validate_output: validate.output,
            // 2 = succeeded with a non-empty diff
            plan_returncode: plan.returncode,
            plan_success: matches!(plan.returncode, 0 | 2),
            plan_changes: plan.returncode == 2,
            plan_output: plan.output,
        }
    }

    pub fn plan_outcome(&self) -> Outcome {
        Outcome::from_plan_code(self.plan_returncode)
    }

    /// Format or validation failures dominate whatever plan reported.
    pub fn outcome(&self) -> Outcome {
        if self.fmt_success && self.validate_success {
            self.plan_outcome()
        } else {
            Outcome::Failed
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.outcome().exit_code()
    }

    pub fn check_result_msg(&self) -> &'static str {
        self.outcome().message()
    }

    pub fn plan_msg(&self) -> &'static str {
        self.plan_outcome().message()
    }

    pub fn init_result(&self) -> StageStatus {
        StageStatus::from_success(self.init_success)
    }

    pub fn fmt_result(&self) -> StageStatus {
        StageStatus::from_success(self.fmt_success)
    }

    pub fn validate_result(&self) -> StageStatus {
        StageStatus::from_success(self.validate_success)
    }

    pub fn plan_result(&self) -> StageStatus {
        StageStatus::from_success(self.plan_success)
    }

    pub fn stage_result(&self, stage: Stage) -> StageStatus {
        match stage {
            Stage::Init => self.init_result(),
            Stage::Fmt => self.fmt_result(),
            Stage::Validate => self.validate_result(),
            Stage::Plan => self.plan_result(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// One target's entry in the JSON receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TargetReceipt {
    #[serde(flatten)]
    pub result: CheckResult,
    pub outcome: Outcome,
    pub exit_code: i32,
}

impl From<CheckResult> for TargetReceipt {
    fn from(result: CheckResult) -> Self {
        let outcome = result.outcome();
        Self {
            result,
            outcome,
            exit_code: outcome.exit_code(),
        }
    }
}

/// Machine-readable summary of a whole `tfcheck check` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CheckReceipt {
    pub schema: String,
    pub tool: ToolMeta,
    /// RFC 3339 timestamp.
    pub started_at: String,
    /// RFC 3339 timestamp.
    pub ended_at: String,
    pub results: Vec<TargetReceipt>,
    pub outcome: Outcome,
    pub exit_code: i32,
}

/// The on-disk configuration file (`tfcheck.toml`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ConfigFile {
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Defaults {
    /// Executable used for every stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terraform_bin: Option<String>,

    /// Extra arguments appended to the plan command.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plan_args: Vec<String>,

    /// Drop state-refresh progress lines from plan output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip_refresh: Option<bool>,

    /// Byte size above which the report loses its plan details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_size_limit: Option<usize>,

    /// Link to the full report, shown when a report is truncated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_url: Option<String>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            terraform_bin: Some(DEFAULT_TERRAFORM_BIN.to_string()),
            plan_args: vec![],
            strip_refresh: Some(false),
            report_size_limit: Some(DEFAULT_REPORT_SIZE_LIMIT),
            run_url: None,
        }
    }
}
