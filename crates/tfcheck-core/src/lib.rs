//! Core engine: runs the terraform stages, aggregates outcomes, renders and
//! truncates the Markdown report.

mod check;
mod receipt;
mod refresh;
mod render;
mod runner;
mod truncate;

pub use check::{
    CheckOptions, CheckOrchestrator, CheckRun, StageCommands, reduce_exit_codes, reduce_outcomes,
};
pub use receipt::build_receipt;
pub use refresh::{REFRESH_NOISE_MARKERS, filter_refresh_noise, strip_refresh_noise};
pub use render::{render_markdown_for_result, render_markdown_for_results};
pub use runner::{CommandRunner, ProcessRunner, RunError};
pub use truncate::{TruncationNotice, truncate_report};
