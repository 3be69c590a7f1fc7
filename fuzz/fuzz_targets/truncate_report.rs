//! Fuzz target for report truncation.
//!
//! Builds reports out of plain lines and plan blocks (some unterminated) and
//! checks the truncation invariants.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use tfcheck_core::{TruncationNotice, truncate_report};
use tfcheck_types::{PLAN_DETAILS_CLOSE, PLAN_DETAILS_OPEN};

#[derive(Arbitrary, Debug)]
enum Piece {
    Line(String),
    Open,
    Close,
    CrlfOpen,
}

#[derive(Arbitrary, Debug)]
struct TruncateInput {
    pieces: Vec<Piece>,
    size_limit: u16,
    run_url: Option<String>,
}

fuzz_target!(|input: TruncateInput| {
    let mut report = String::new();
    for piece in &input.pieces {
        match piece {
            Piece::Line(text) => {
                report.push_str(&text.replace(['\n', '\r'], " "));
                report.push('\n');
            }
            Piece::Open => {
                report.push_str(PLAN_DETAILS_OPEN);
                report.push('\n');
            }
            Piece::Close => {
                report.push_str(PLAN_DETAILS_CLOSE);
                report.push('\n');
            }
            Piece::CrlfOpen => {
                report.push_str(PLAN_DETAILS_OPEN);
                report.push_str("\r\n");
            }
        }
    }

    let notice = TruncationNotice::new(input.run_url.filter(|u| !u.contains('\n')));
    let limit = usize::from(input.size_limit);

    let once = truncate_report(&report, limit, &notice);
    if report.len() <= limit {
        assert_eq!(once, report);
        return;
    }

    // Stripping never grows the body; only the notice is added.
    assert!(once.len() <= report.len() + notice.render().len());

    let twice = truncate_report(&once, limit, &notice);
    if once.len() > limit {
        assert_eq!(twice, once, "truncation is not idempotent");
    }
});
