use chrono::SecondsFormat;

use tfcheck_types::{CHECK_SCHEMA_V1, CheckReceipt, TargetReceipt, ToolMeta};

use crate::check::CheckRun;

/// Build the JSON receipt for a finished run.
pub fn build_receipt(run: &CheckRun) -> CheckReceipt {
    CheckReceipt {
        schema: CHECK_SCHEMA_V1.to_string(),
        tool: ToolMeta {
            name: "tfcheck".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at: run.started_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        ended_at: run.ended_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        results: run.results.iter().cloned().map(TargetReceipt::from).collect(),
        outcome: run.outcome,
        exit_code: run.outcome.exit_code(),
    }
}
