//! Size-bounded report truncation.
//!
//! Oversized reports lose their plan-detail blocks (the lines between
//! [`PLAN_DETAILS_OPEN`] and [`PLAN_DETAILS_CLOSE`], markers included). Every
//! other line is kept verbatim and a notice pointing at the full report is
//! prepended once. The size limit is advisory: if the remaining content alone
//! is over the limit, the result is still over the limit.

use tracing::{debug, info, warn};

use tfcheck_types::{PLAN_DETAILS_CLOSE, PLAN_DETAILS_OPEN};

/// Callout prepended to a report whose plan details were removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TruncationNotice {
    /// Where the untruncated report can be read (e.g. a CI run summary).
    pub full_report_url: Option<String>,
}

impl TruncationNotice {
    pub fn new(full_report_url: Option<String>) -> Self {
        Self { full_report_url }
    }

    pub fn render(&self) -> String {
        let pointer = match &self.full_report_url {
            Some(url) => format!("see [the full report]({url})"),
            None => "check the workflow summary to view the full report".to_string(),
        };
        format!("> [!NOTE]\n> The plan is too long to include here, {pointer}.\n\n---\n\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Including,
    Excluding,
}

/// Shrink `report` if it is longer than `size_limit` bytes.
///
/// Reports at or under the limit, and reports without any plan block, come
/// back unchanged.
pub fn truncate_report(report: &str, size_limit: usize, notice: &TruncationNotice) -> String {
    if report.len() <= size_limit {
        return report.to_string();
    }

    let (body, removed) = strip_plan_blocks(report);
    if removed == 0 {
        debug!(
            "Report is {} bytes (limit {}) but has no plan blocks to remove",
            report.len(),
            size_limit
        );
        return body;
    }

    let mut out = notice.render();
    out.push_str(&body);
    info!(
        "Removed {} plan block(s): {} -> {} bytes (limit {})",
        removed,
        report.len(),
        out.len(),
        size_limit
    );
    if out.len() > size_limit {
        warn!(
            "Truncated report is still {} bytes, over the {} byte limit",
            out.len(),
            size_limit
        );
    }
    out
}

/// Run the include/exclude automaton over the lines of `report`.
///
/// Returns the kept text and the number of blocks that were opened.
fn strip_plan_blocks(report: &str) -> (String, usize) {
    let mut state = State::Including;
    let mut out = String::with_capacity(report.len());
    let mut removed = 0;

    for line in report.split_inclusive('\n') {
        let bare = without_terminator(line);
        match state {
            State::Including if bare == PLAN_DETAILS_OPEN => {
                state = State::Excluding;
                removed += 1;
            }
            State::Including => out.push_str(line),
            State::Excluding if bare == PLAN_DETAILS_CLOSE => state = State::Including,
            State::Excluding => {}
        }
    }

    if state == State::Excluding {
        warn!("Unterminated plan block; dropped the rest of the report");
    }

    (out, removed)
}

fn without_terminator(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(l) => l.strip_suffix('\r').unwrap_or(l),
        None => line,
    }
}
