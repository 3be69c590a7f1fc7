//! BDD tests for the Markdown reports and the JSON receipt.

use tfcheck_types::{CHECK_SCHEMA_V1, CheckReceipt, Outcome, PLAN_DETAILS_OPEN};

use super::workspace::TestWorkspace;

fn large_plan(bytes: usize) -> String {
    let line = "  + resource \"null_resource\" \"padding\" {}\n";
    line.repeat(bytes / line.len() + 1)
}

/// Scenario: a small report is written whole.
///
/// Given: A target with pending changes
/// When: Running check with --report
/// Then: The report holds the stage table and the plan block
#[test]
fn given_small_run_when_report_requested_then_report_has_plan_block() {
    let ws = TestWorkspace::new();
    ws.stage_code("envs/dev", "plan", 2);

    let result = ws.check(&["envs/dev"], &["--report", "out/report.md"]);
    result.assert_exit_code(2);

    let report = ws.read_file("out/report.md");
    assert!(report.starts_with("## Terraform check: `envs/dev`"));
    assert!(report.contains("| `fmt` | success |"));
    assert!(report.contains(PLAN_DETAILS_OPEN));
    assert!(report.contains("fake plan -detailed-exitcode -no-color"));
    assert!(report.contains("fake plan stderr"));
}

/// Scenario: reports for several targets are separated.
///
/// Given: Two targets
/// When: Running check with --report
/// Then: Both sections appear in order, separated by a rule
#[test]
fn given_two_targets_when_report_requested_then_sections_in_order() {
    let ws = TestWorkspace::new();
    ws.target("a").target("b");

    ws.check(&["a", "b"], &["--report", "report.md"])
        .assert_exit_code(0);

    let report = ws.read_file("report.md");
    let a = report.find("## Terraform check: `a`").expect("section a");
    let b = report.find("## Terraform check: `b`").expect("section b");
    assert!(a < b);
    assert!(report[a..b].contains("\n---\n"));
}

/// Scenario: an oversized report loses its plan details.
///
/// Given: A plan whose output is larger than the size limit
/// When: Running check with --report and --full-report
/// Then: The report is truncated with a notice and the full report is intact
#[test]
fn given_oversized_plan_when_reports_requested_then_report_truncated() {
    let ws = TestWorkspace::new();
    ws.stage_code("envs/prod", "plan", 2)
        .stage_output("envs/prod", "plan", &large_plan(70_000));

    let result = ws.check(
        &["envs/prod"],
        &["--report", "report.md", "--full-report", "full.md"],
    );
    result.assert_exit_code(2);

    let full = ws.read_file("full.md");
    assert!(full.len() > 65_536);
    assert!(full.contains(PLAN_DETAILS_OPEN));

    let report = ws.read_file("report.md");
    assert!(report.starts_with("> [!NOTE]\n"));
    assert!(report.contains("check the workflow summary to view the full report"));
    assert!(!report.contains(PLAN_DETAILS_OPEN));
    assert!(!report.contains("null_resource"));
    assert!(report.contains("## Terraform check: `envs/prod`"));
    assert!(report.len() < 4_096);
}

/// Scenario: the truncation notice links to the run.
///
/// Given: An oversized plan and a run URL in the GitHub Actions environment
/// When: Running check with --report
/// Then: The notice links to that run
#[test]
fn given_actions_env_when_report_truncated_then_notice_links_run() {
    let ws = TestWorkspace::new();
    ws.stage_output("envs/prod", "plan", &large_plan(70_000));

    let mut cmd = ws.command();
    cmd.arg("check")
        .arg("envs/prod")
        .arg("--terraform-bin")
        .arg(&ws.terraform)
        .args(["--report", "report.md"])
        .env("GITHUB_SERVER_URL", "https://github.com")
        .env("GITHUB_REPOSITORY", "acme/infra")
        .env("GITHUB_RUN_ID", "77");
    cmd.assert().code(0);

    let report = ws.read_file("report.md");
    assert!(report.contains(
        "see [the full report](https://github.com/acme/infra/actions/runs/77)"
    ));
}

/// Scenario: a lower size limit forces truncation.
///
/// Given: A small run and --size-limit below its report size
/// When: Running check with --report
/// Then: The plan block is removed
#[test]
fn given_low_size_limit_when_report_requested_then_plan_removed() {
    let ws = TestWorkspace::new();
    ws.target("envs/dev");

    ws.check(
        &["envs/dev"],
        &["--report", "report.md", "--size-limit", "100"],
    )
    .assert_exit_code(0);

    let report = ws.read_file("report.md");
    assert!(report.starts_with("> [!NOTE]\n"));
    assert!(!report.contains(PLAN_DETAILS_OPEN));
}

/// Scenario: the report can go to stdout.
///
/// Given: A clean target
/// When: Running check with --report -
/// Then: The report is printed after the summary line
#[test]
fn given_dash_when_report_requested_then_report_on_stdout() {
    let ws = TestWorkspace::new();
    ws.target("envs/dev");

    let result = ws.check(&["envs/dev"], &["--report", "-"]);
    result.assert_exit_code(0);

    let stdout = result.stdout();
    let summary = stdout.find("Terraform check on envs/dev").expect("summary");
    let report = stdout
        .find("## Terraform check: `envs/dev`")
        .expect("report");
    assert!(summary < report);
}

/// Scenario: the JSON receipt mirrors the run.
///
/// Given: A clean target and a failing target
/// When: Running check with --out
/// Then: The receipt has both results, the failed outcome and exit code 1
#[test]
fn given_out_flag_when_checked_then_receipt_written() {
    let ws = TestWorkspace::new();
    ws.target("a").stage_code("b", "plan", 1);

    ws.check(&["a", "b"], &["--out", "artifacts/tfcheck.json"])
        .assert_exit_code(1);

    let receipt: CheckReceipt =
        serde_json::from_str(&ws.read_file("artifacts/tfcheck.json")).expect("parse receipt");
    assert_eq!(receipt.schema, CHECK_SCHEMA_V1);
    assert_eq!(receipt.tool.name, "tfcheck");
    assert_eq!(receipt.outcome, Outcome::Failed);
    assert_eq!(receipt.exit_code, 1);

    let paths: Vec<&str> = receipt
        .results
        .iter()
        .map(|r| r.result.path.as_str())
        .collect();
    assert_eq!(paths, vec!["a", "b"]);
    assert_eq!(receipt.results[0].outcome, Outcome::Clean);
    assert_eq!(receipt.results[1].result.plan_returncode, 1);
    assert!(!receipt.results[1].result.plan_success);
}
