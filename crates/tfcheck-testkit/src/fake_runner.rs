//! Scripted command runner for orchestration tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use tfcheck_core::{CommandRunner, RunError};
use tfcheck_types::{CommandResult, Stage};

/// One invocation seen by a [`FakeRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub command: String,
    pub dir: PathBuf,
    pub stage: Stage,
}

/// A [`CommandRunner`] that answers from a script instead of spawning.
///
/// Responses are keyed by target directory and stage. Stages without a
/// scripted response succeed with empty output.
#[derive(Debug, Default)]
pub struct FakeRunner {
    responses: BTreeMap<(PathBuf, &'static str), CommandResult>,
    unlaunchable: BTreeSet<PathBuf>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the output and return code of `stage` in `dir`.
    pub fn respond(mut self, dir: &str, stage: Stage, output: &str, returncode: i32) -> Self {
        self.responses.insert(
            (PathBuf::from(dir), stage.as_str()),
            CommandResult::new(output, returncode),
        );
        self
    }

    /// Script fmt, validate and plan return codes for `dir` in one go.
    pub fn target(self, dir: &str, fmt: i32, validate: i32, plan: i32) -> Self {
        self.respond(dir, Stage::Fmt, "", fmt)
            .respond(dir, Stage::Validate, "", validate)
            .respond(dir, Stage::Plan, "", plan)
    }

    /// Every command in `dir` fails to launch.
    pub fn unlaunchable(mut self, dir: &str) -> Self {
        self.unlaunchable.insert(PathBuf::from(dir));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }
}

fn stage_of(command: &str) -> Stage {
    let verb = command.split_whitespace().nth(1).unwrap_or_default();
    Stage::ALL
        .into_iter()
        .find(|s| s.as_str() == verb)
        .unwrap_or_else(|| panic!("FakeRunner: unrecognised command '{command}'"))
}

impl CommandRunner for FakeRunner {
    fn run(&self, command: &str, working_dir: &Path) -> Result<CommandResult, RunError> {
        let stage = stage_of(command);
        self.calls.borrow_mut().push(RecordedCall {
            command: command.to_string(),
            dir: working_dir.to_path_buf(),
            stage,
        });

        if self.unlaunchable.contains(working_dir) {
            return Err(RunError::Spawn {
                command: command.to_string(),
                dir: working_dir.display().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "scripted launch failure"),
            });
        }

        Ok(self
            .responses
            .get(&(working_dir.to_path_buf(), stage.as_str()))
            .cloned()
            .unwrap_or_else(|| CommandResult::new("", 0)))
    }
}
