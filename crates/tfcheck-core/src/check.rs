use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use tfcheck_types::{CheckResult, DEFAULT_TERRAFORM_BIN, Outcome};

use crate::refresh::strip_refresh_noise;
use crate::runner::{CommandRunner, RunError};

/// The four fixed command lines, one per stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageCommands {
    pub init: String,
    pub fmt: String,
    pub validate: String,
    /// Base plan command; extra plan arguments are appended per run.
    pub plan: String,
}

impl StageCommands {
    pub fn for_binary(bin: &str) -> Self {
        Self {
            init: format!("{bin} init -no-color"),
            fmt: format!("{bin} fmt -check=true -write=false -recursive -diff"),
            validate: format!("{bin} validate -no-color"),
            plan: format!("{bin} plan -detailed-exitcode -no-color"),
        }
    }

    pub fn plan_with_args(&self, plan_args: &[String]) -> String {
        if plan_args.is_empty() {
            return self.plan.clone();
        }
        format!("{} {}", self.plan, plan_args.join(" "))
    }
}

impl Default for StageCommands {
    fn default() -> Self {
        Self::for_binary(DEFAULT_TERRAFORM_BIN)
    }
}

/// Per-run knobs shared by every target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOptions {
    pub plan_args: Vec<String>,
    pub strip_refresh: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRun {
    pub results: Vec<CheckResult>,
    pub outcome: Outcome,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

impl CheckRun {
    pub fn exit_code(&self) -> i32 {
        self.outcome.exit_code()
    }
}

/// Drives the init → fmt → validate → plan sequence for each target.
pub struct CheckOrchestrator<R> {
    runner: R,
    commands: StageCommands,
}

impl<R: CommandRunner> CheckOrchestrator<R> {
    pub fn new(runner: R, commands: StageCommands) -> Self {
        Self { runner, commands }
    }

    /// Run all four stages against `path`.
    ///
    /// Every stage runs even if an earlier one failed. Only a launch failure
    /// aborts the sequence.
    pub fn check(&self, path: &str, plan_args: &[String]) -> Result<CheckResult, RunError> {
        let dir = Path::new(path);
        info!("Checking target: {}", path);

        let init = self.runner.run(&self.commands.init, dir)?;
        let fmt = self.runner.run(&self.commands.fmt, dir)?;
        let validate = self.runner.run(&self.commands.validate, dir)?;
        let plan = self
            .runner
            .run(&self.commands.plan_with_args(plan_args), dir)?;

        let result = CheckResult::from_stages(path, init, fmt, validate, plan);
        debug!(
            "Target {} finished: init={} fmt={} validate={} plan={} (rc={})",
            path,
            result.init_result().as_str(),
            result.fmt_result().as_str(),
            result.validate_result().as_str(),
            result.plan_result().as_str(),
            result.plan_returncode
        );
        Ok(result)
    }

    /// Check each target in order and reduce their outcomes.
    ///
    /// `on_result` is called once per target as soon as it finishes, after the
    /// optional refresh filter has been applied.
    pub fn check_all<P, F>(
        &self,
        paths: &[P],
        options: &CheckOptions,
        mut on_result: F,
    ) -> Result<CheckRun, RunError>
    where
        P: AsRef<str>,
        F: FnMut(&CheckResult),
    {
        let started_at = Utc::now();
        let mut results = Vec::with_capacity(paths.len());
        let mut outcome = Outcome::Clean;

        for path in paths {
            let mut result = self.check(path.as_ref(), &options.plan_args)?;
            if options.strip_refresh {
                strip_refresh_noise(&mut result);
            }
            outcome = outcome.combine(result.outcome());
            on_result(&result);
            results.push(result);
        }

        info!(
            "Checked {} target(s): {} (exit={})",
            results.len(),
            outcome.as_str(),
            outcome.exit_code()
        );

        Ok(CheckRun {
            results,
            outcome,
            started_at,
            ended_at: Utc::now(),
        })
    }
}

/// Reduce outcomes with the dominance order failed > changes pending > clean.
pub fn reduce_outcomes<I>(outcomes: I) -> Outcome
where
    I: IntoIterator<Item = Outcome>,
{
    outcomes
        .into_iter()
        .fold(Outcome::Clean, |acc, next| acc.combine(next))
}

/// Integer form of [`reduce_outcomes`] for per-target exit codes.
///
/// 0 is clean, 2 is changes pending, anything else is a failure.
pub fn reduce_exit_codes<I>(codes: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    reduce_outcomes(codes.into_iter().map(Outcome::from_plan_code)).exit_code()
}
