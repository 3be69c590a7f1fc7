//! Common test fixtures for tfcheck.

use tfcheck_types::{CheckResult, CommandResult, PLAN_DETAILS_CLOSE, PLAN_DETAILS_OPEN};

// =============================================================================
// Sample Plan Output
// =============================================================================

/// Terraform plan output as it appears on the console with `-no-color`.
pub mod sample_plans {
    pub const NO_CHANGES: &str = "\
No changes. Your infrastructure matches the configuration.

Terraform has compared your real infrastructure against your configuration
and found no differences, so no changes are needed.
";

    pub const WITH_CHANGES: &str = "\
Terraform used the selected providers to generate the following execution
plan. Resource actions are indicated with the following symbols:
  + create

Terraform will perform the following actions:

  # aws_s3_bucket.artifacts will be created
  + resource \"aws_s3_bucket\" \"artifacts\" {
      + bucket = \"artifacts\"
    }

Plan: 1 to add, 0 to change, 0 to destroy.
";

    pub const WITH_REFRESH_NOISE: &str = "\
data.aws_caller_identity.current: Reading...
data.aws_caller_identity.current: Read complete after 0s [id=123456789012]
aws_s3_bucket.artifacts: Refreshing state... [id=artifacts]

No changes. Your infrastructure matches the configuration.
";

    pub const ERROR: &str = "\
Error: No valid credential sources found

  with provider[\"registry.terraform.io/hashicorp/aws\"],
  on main.tf line 1, in provider \"aws\":
";
}

// =============================================================================
// Sample Results
// =============================================================================

pub mod sample_results {
    use super::*;

    fn ok(output: &str) -> CommandResult {
        CommandResult::new(output, 0)
    }

    /// All stages pass, plan reports no changes.
    pub fn clean(path: &str) -> CheckResult {
        CheckResult::from_stages(
            path,
            ok("Terraform has been successfully initialized!\n"),
            ok(""),
            ok("Success! The configuration is valid.\n"),
            ok(sample_plans::NO_CHANGES),
        )
    }

    /// All stages pass, plan has pending changes.
    pub fn changes(path: &str) -> CheckResult {
        CheckResult::from_stages(
            path,
            ok("Terraform has been successfully initialized!\n"),
            ok(""),
            ok("Success! The configuration is valid.\n"),
            CommandResult::new(sample_plans::WITH_CHANGES, 2),
        )
    }

    /// fmt reports a diff while plan still has changes.
    pub fn fmt_failed_with_changes(path: &str) -> CheckResult {
        CheckResult::from_stages(
            path,
            ok("Terraform has been successfully initialized!\n"),
            CommandResult::new("main.tf\n--- old/main.tf\n+++ new/main.tf\n", 3),
            ok("Success! The configuration is valid.\n"),
            CommandResult::new(sample_plans::WITH_CHANGES, 2),
        )
    }

    /// Plan itself errored.
    pub fn plan_error(path: &str) -> CheckResult {
        CheckResult::from_stages(
            path,
            ok("Terraform has been successfully initialized!\n"),
            ok(""),
            ok("Success! The configuration is valid.\n"),
            CommandResult::new(sample_plans::ERROR, 1),
        )
    }
}

// =============================================================================
// Sample Reports
// =============================================================================

pub mod sample_reports {
    use super::*;

    /// A report of exactly `other_bytes + block_bytes` bytes, where
    /// `block_bytes` covers one plan block including its marker lines.
    ///
    /// Both sizes must leave room for the markers and line breaks.
    pub fn with_plan_block(other_bytes: usize, block_bytes: usize) -> String {
        let markers = PLAN_DETAILS_OPEN.len() + PLAN_DETAILS_CLOSE.len() + 3;
        assert!(block_bytes > markers, "block too small for its markers");
        assert!(other_bytes >= 2, "other content too small");

        let head = other_bytes / 2;
        let tail = other_bytes - head;

        let mut report = String::with_capacity(other_bytes + block_bytes);
        report.push_str(&filler_line(head));
        report.push_str(PLAN_DETAILS_OPEN);
        report.push('\n');
        report.push_str(&filler_line(block_bytes - markers));
        report.push('\n');
        report.push_str(PLAN_DETAILS_CLOSE);
        report.push('\n');
        report.push_str(&filler_line(tail));
        report
    }

    /// `len` bytes of text ending in a newline.
    fn filler_line(len: usize) -> String {
        let mut s = "x".repeat(len - 1);
        s.push('\n');
        s
    }
}
