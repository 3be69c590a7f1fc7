//! Proptest strategies for generating test inputs.
//!
//! # Bounds
//!
//! To keep tests fast:
//! - Max segments per report: 8
//! - Max lines per segment: 12
//! - Max line length: 60 chars

use proptest::prelude::*;

use tfcheck_types::{Outcome, PLAN_DETAILS_CLOSE, PLAN_DETAILS_OPEN};

pub const MAX_SEGMENTS: usize = 8;
pub const MAX_LINES_PER_SEGMENT: usize = 12;

/// Strategy for generating Outcome values.
pub fn arb_outcome() -> impl Strategy<Value = Outcome> {
    prop_oneof![
        Just(Outcome::Clean),
        Just(Outcome::Failed),
        Just(Outcome::ChangesPending),
    ]
}

/// Strategy for plan return codes, weighted toward the meaningful ones.
pub fn arb_plan_code() -> impl Strategy<Value = i32> {
    prop_oneof![
        3 => prop_oneof![Just(0), Just(1), Just(2)],
        1 => -5i32..300,
    ]
}

/// A single report line that is never one of the block markers.
pub fn arb_report_line() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 #|`<>/=+~.:-]{0,60}")
        .expect("valid regex")
        .prop_filter("must not be a marker", |l| {
            l != PLAN_DETAILS_OPEN && l != PLAN_DETAILS_CLOSE
        })
}

#[derive(Debug, Clone)]
enum Segment {
    Text(Vec<String>),
    Block(Vec<String>),
}

/// A generated report together with what truncation must keep.
#[derive(Debug, Clone)]
pub struct ReportCase {
    pub report: String,
    /// Lines outside any plan block, in order.
    pub kept_lines: Vec<String>,
    /// Number of plan blocks in the report.
    pub blocks: usize,
}

fn arb_segment() -> impl Strategy<Value = Segment> {
    let lines = || prop::collection::vec(arb_report_line(), 0..MAX_LINES_PER_SEGMENT);
    prop_oneof![
        lines().prop_map(Segment::Text),
        lines().prop_map(Segment::Block),
    ]
}

/// Strategy for Markdown-ish reports mixing plain lines and plan blocks.
///
/// The last block may be left unterminated.
pub fn arb_report_case() -> impl Strategy<Value = ReportCase> {
    (
        prop::collection::vec(arb_segment(), 0..MAX_SEGMENTS),
        any::<bool>(),
    )
        .prop_map(|(segments, leave_open)| {
            let mut report = String::new();
            let mut kept_lines = Vec::new();
            let mut blocks = 0;
            let last_block = segments
                .iter()
                .rposition(|s| matches!(s, Segment::Block(_)));

            for (i, segment) in segments.into_iter().enumerate() {
                match segment {
                    Segment::Text(lines) => {
                        for line in lines {
                            report.push_str(&line);
                            report.push('\n');
                            kept_lines.push(line);
                        }
                    }
                    Segment::Block(lines) => {
                        blocks += 1;
                        report.push_str(PLAN_DETAILS_OPEN);
                        report.push('\n');
                        for line in lines {
                            report.push_str(&line);
                            report.push('\n');
                        }
                        if leave_open && Some(i) == last_block {
                            // Nothing after an unterminated block survives.
                            break;
                        }
                        report.push_str(PLAN_DETAILS_CLOSE);
                        report.push('\n');
                    }
                }
            }

            ReportCase {
                report,
                kept_lines,
                blocks,
            }
        })
}
