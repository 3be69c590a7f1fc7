//! BDD tests for the tri-state exit code and the per-target summary lines.

use super::workspace::TestWorkspace;

const PASSED: &str = "✅Passed: there are no changes✅";
const FAILED: &str = "⛔️Failed: see details⛔️";
const CHANGES: &str = "⚠️There are changes: see details⚠️";

/// Scenario: a single clean target.
///
/// Given: A target whose stages all succeed and whose plan exits 0
/// When: Running check
/// Then: Exit code is 0 and the summary line says it passed
#[test]
fn given_clean_target_when_checked_then_exit_0() {
    let ws = TestWorkspace::new();
    ws.target("envs/dev");

    let result = ws.check(&["envs/dev"], &[]);
    result.assert_exit_code(0);
    assert!(
        result
            .stdout()
            .contains(&format!("Terraform check on envs/dev {PASSED}"))
    );
}

/// Scenario: pending changes.
///
/// Given: A target whose plan exits 2
/// When: Running check
/// Then: Exit code is 2
#[test]
fn given_plan_with_changes_when_checked_then_exit_2() {
    let ws = TestWorkspace::new();
    ws.stage_code("envs/dev", "plan", 2);

    let result = ws.check(&["envs/dev"], &[]);
    result.assert_exit_code(2);
    assert!(result.stdout().contains(CHANGES));
}

/// Scenario: formatting failure masks plan changes.
///
/// Given: A target whose fmt stage fails and whose plan exits 2
/// When: Running check
/// Then: Exit code is 1
#[test]
fn given_fmt_failure_and_changes_when_checked_then_exit_1() {
    let ws = TestWorkspace::new();
    ws.stage_code("envs/dev", "fmt", 3)
        .stage_code("envs/dev", "plan", 2);

    let result = ws.check(&["envs/dev"], &[]);
    result.assert_exit_code(1);
    assert!(result.stdout().contains(FAILED));
}

/// Scenario: init failure alone does not fail the target.
///
/// Given: A target whose init stage fails but every other stage succeeds
/// When: Running check
/// Then: Exit code is 0
#[test]
fn given_only_init_failure_when_checked_then_exit_0() {
    let ws = TestWorkspace::new();
    ws.stage_code("envs/dev", "init", 1);

    let result = ws.check(&["envs/dev"], &[]);
    result.assert_exit_code(0);
}

/// Scenario: changes dominate clean across targets.
///
/// Given: Three targets with plan codes 0, 2, 0
/// When: Running check over all of them
/// Then: Exit code is 2 and one summary line per target is printed in order
#[test]
fn given_one_target_with_changes_among_clean_when_checked_then_exit_2() {
    let ws = TestWorkspace::new();
    ws.target("a").stage_code("b", "plan", 2).target("c");

    let result = ws.check(&["a", "b", "c"], &[]);
    result.assert_exit_code(2);

    let stdout = result.stdout();
    let lines: Vec<&str> = stdout
        .lines()
        .filter(|l| l.starts_with("Terraform check on "))
        .collect();
    assert_eq!(
        lines,
        vec![
            format!("Terraform check on a {PASSED}"),
            format!("Terraform check on b {CHANGES}"),
            format!("Terraform check on c {PASSED}"),
        ]
    );
}

/// Scenario: failure dominates changes across targets.
///
/// Given: Three targets with plan codes 0, 2, 1
/// When: Running check over all of them
/// Then: Exit code is 1
#[test]
fn given_failure_and_changes_across_targets_when_checked_then_exit_1() {
    let ws = TestWorkspace::new();
    ws.target("a")
        .stage_code("b", "plan", 2)
        .stage_code("c", "plan", 1);

    let result = ws.check(&["a", "b", "c"], &[]);
    result.assert_exit_code(1);
}

/// Scenario: a failing target does not stop later targets.
///
/// Given: A failing first target and a clean second target
/// When: Running check over both
/// Then: Both targets get a summary line
#[test]
fn given_failing_first_target_when_checked_then_later_targets_still_run() {
    let ws = TestWorkspace::new();
    ws.stage_code("a", "validate", 1).target("b");

    let result = ws.check(&["a", "b"], &[]);
    result.assert_exit_code(1);
    assert!(
        result
            .stdout()
            .contains(&format!("Terraform check on a {FAILED}"))
    );
    assert!(
        result
            .stdout()
            .contains(&format!("Terraform check on b {PASSED}"))
    );
}
