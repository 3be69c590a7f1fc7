//! BDD tests for `tfcheck.toml` loading.

use tfcheck_types::PLAN_DETAILS_OPEN;

use super::workspace::TestWorkspace;

/// Scenario: the default config file supplies the binary and plan args.
///
/// Given: A tfcheck.toml in the working directory naming the fake binary
/// When: Running check without --terraform-bin
/// Then: The configured binary and plan args are used
#[test]
fn given_default_config_file_when_checked_then_its_defaults_apply() {
    let ws = TestWorkspace::new();
    ws.target("envs/dev");
    ws.write_file(
        "tfcheck.toml",
        &format!(
            r#"
[defaults]
terraform_bin = "{}"
plan_args = ["-refresh=false"]
"#,
            ws.terraform.display()
        ),
    );

    let mut cmd = ws.command();
    cmd.args(["check", "envs/dev", "--full-report", "full.md"]);
    cmd.assert().code(0);

    assert!(
        ws.read_file("full.md")
            .contains("fake plan -detailed-exitcode -no-color -refresh=false")
    );
}

/// Scenario: CLI plan args replace configured ones.
///
/// Given: A config with plan_args
/// When: Running check with --plan-args
/// Then: Only the CLI args reach the plan stage
#[test]
fn given_config_plan_args_when_cli_plan_args_given_then_cli_wins() {
    let ws = TestWorkspace::new();
    ws.target("envs/dev");
    ws.write_file(
        "tfcheck.toml",
        "[defaults]\nplan_args = [\"-refresh=false\"]\n",
    );

    ws.check(
        &["envs/dev"],
        &["--plan-args", "-lock=false", "--full-report", "full.md"],
    )
    .assert_exit_code(0);

    let full = ws.read_file("full.md");
    assert!(full.contains("fake plan -detailed-exitcode -no-color -lock=false"));
    assert!(!full.contains("-refresh=false"));
}

/// Scenario: size limit and strip_refresh from an explicit config with env expansion.
///
/// Given: A config passed with --config that reads its limit from the environment
/// When: Running check with --report
/// Then: The configured limit truncates the report
#[test]
fn given_explicit_config_with_env_when_checked_then_limit_applies() {
    let ws = TestWorkspace::new();
    ws.target("envs/dev");
    ws.write_file(
        "ci/tfcheck.toml",
        "[defaults]\nreport_size_limit = ${TFCHECK_TEST_LIMIT:-100}\nstrip_refresh = true\n",
    );

    let mut cmd = ws.command();
    cmd.arg("check")
        .arg("envs/dev")
        .arg("--terraform-bin")
        .arg(&ws.terraform)
        .args(["--config", "ci/tfcheck.toml", "--report", "report.md"])
        .env_remove("TFCHECK_TEST_LIMIT");
    cmd.assert().code(0);

    let report = ws.read_file("report.md");
    assert!(report.starts_with("> [!NOTE]\n"));
    assert!(!report.contains(PLAN_DETAILS_OPEN));
}

/// Scenario: an explicit config that does not exist.
///
/// Given: No config file
/// When: Running check with --config pointing at a missing file
/// Then: Exit code is 1 and the error names the file
#[test]
fn given_missing_explicit_config_when_checked_then_exit_1() {
    let ws = TestWorkspace::new();
    ws.target("envs/dev");

    let result = ws.check(&["envs/dev"], &["--config", "missing.toml"]);
    result.assert_exit_code(1);
    assert!(result.stderr().contains("missing.toml"));
}

/// Scenario: a malformed config file.
///
/// Given: A tfcheck.toml that is not valid TOML
/// When: Running check
/// Then: Exit code is 1 before any stage runs
#[test]
fn given_invalid_config_when_checked_then_exit_1_without_running() {
    let ws = TestWorkspace::new();
    ws.target("envs/dev");
    ws.write_file("tfcheck.toml", "[defaults\n");

    let result = ws.check(&["envs/dev"], &[]);
    result.assert_exit_code(1);
    assert!(result.stderr().contains("parse config"));
    assert!(!result.stdout().contains("Terraform check on"));
}
