use tfcheck_types::{CheckResult, PLAN_DETAILS_CLOSE, PLAN_DETAILS_OPEN, Stage, TARGET_SEPARATOR};

/// Render one target as a self-contained Markdown section.
///
/// The plan output sits between [`PLAN_DETAILS_OPEN`] and
/// [`PLAN_DETAILS_CLOSE`] on lines of their own; `truncate_report` relies on
/// that exact layout.
///
/// The plan output is not escaped. A plan line that is exactly
/// `</details>` closes the block early, and whatever follows it is kept by
/// `truncate_report`.
pub fn render_markdown_for_result(result: &CheckResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("## Terraform check: `{}`\n\n", result.path));
    out.push_str(&format!("**{}**\n\n", result.check_result_msg()));

    out.push_str("| Stage | Result |\n");
    out.push_str("|---|---|\n");
    for stage in Stage::ALL {
        out.push_str(&format!(
            "| `{}` | {} |\n",
            stage.as_str(),
            result.stage_result(stage).as_str()
        ));
    }
    out.push('\n');

    out.push_str(&format!("### Plan: {}\n\n", result.plan_msg()));
    out.push_str(PLAN_DETAILS_OPEN);
    out.push_str("\n\n```\n");
    out.push_str(result.plan_output.trim_end_matches(['\n', '\r']));
    out.push_str("\n```\n\n");
    out.push_str(PLAN_DETAILS_CLOSE);
    out.push('\n');
    out
}

/// Render several targets, separated by a horizontal rule.
pub fn render_markdown_for_results(results: &[CheckResult]) -> String {
    results
        .iter()
        .map(render_markdown_for_result)
        .collect::<Vec<_>>()
        .join(TARGET_SEPARATOR)
}
