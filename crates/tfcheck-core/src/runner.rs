use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{info, warn};

use tfcheck_types::CommandResult;

/// Width of the banner printed around each echoed command.
const BANNER_WIDTH: usize = 77;

/// Failure to run an external command at all.
///
/// A non-zero exit status is not an error; it comes back as data in
/// [`CommandResult::returncode`].
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("empty command")]
    EmptyCommand,

    #[error("failed to launch '{command}' in '{dir}': {source}")]
    Spawn {
        command: String,
        dir: String,
        source: std::io::Error,
    },

    #[error("failed to capture output of '{command}': {source}")]
    Capture {
        command: String,
        source: std::io::Error,
    },
}

/// Executes one command in one working directory.
pub trait CommandRunner {
    fn run(&self, command: &str, working_dir: &Path) -> Result<CommandResult, RunError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, command: &str, working_dir: &Path) -> Result<CommandResult, RunError> {
        (**self).run(command, working_dir)
    }
}

/// Runs commands as real child processes.
///
/// The command line is split on whitespace; arguments that would need shell
/// quoting are not supported. Stdout and stderr share one pipe so their
/// interleaving is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, command: &str, working_dir: &Path) -> Result<CommandResult, RunError> {
        let argv: Vec<&str> = command.split_whitespace().collect();
        let (program, args) = argv.split_first().ok_or(RunError::EmptyCommand)?;

        let capture_err = |source: std::io::Error| RunError::Capture {
            command: command.to_string(),
            source,
        };

        let (mut reader, writer) = std::io::pipe().map_err(capture_err)?;
        let writer_err = writer.try_clone().map_err(capture_err)?;

        // The Command (and its copies of the pipe's write end) is dropped at
        // the end of this statement, so the read below sees EOF once the
        // child exits.
        let mut child = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(writer_err)
            .spawn()
            .map_err(|source| RunError::Spawn {
                command: command.to_string(),
                dir: working_dir.display().to_string(),
                source,
            })?;

        let mut raw = Vec::new();
        let read = reader.read_to_end(&mut raw);
        let status = child.wait().map_err(capture_err)?;
        read.map_err(capture_err)?;

        let output = String::from_utf8_lossy(&raw).into_owned();
        let returncode = match status.code() {
            Some(code) => code,
            None => {
                warn!("'{}' terminated by signal ({})", command, status);
                -1
            }
        };

        let rule = "-".repeat(BANNER_WIDTH);
        info!(
            "\n{rule}\n{command} (path: {})\n{rule}\n{output}",
            working_dir.display()
        );

        Ok(CommandResult { output, returncode })
    }
}
