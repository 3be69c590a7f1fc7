//! Shared test utilities for the tfcheck workspace.
//!
//! This crate provides:
//! - **fake_runner**: a scripted [`CommandRunner`](tfcheck_core::CommandRunner)
//!   that never spawns a process
//! - **arb**: Proptest strategies for outcomes, plan codes and reports
//! - **fixtures**: sample terraform output, results and reports
//!
//! # Example
//!
//! ```rust,ignore
//! use tfcheck_core::{CheckOrchestrator, StageCommands};
//! use tfcheck_testkit::FakeRunner;
//! use tfcheck_types::Stage;
//!
//! let runner = FakeRunner::new().respond("envs/prod", Stage::Plan, "+ create", 2);
//! let orch = CheckOrchestrator::new(&runner, StageCommands::default());
//! assert_eq!(orch.check("envs/prod", &[]).unwrap().exit_code(), 2);
//! ```

pub mod arb;
pub mod fake_runner;
pub mod fixtures;

pub use arb::{ReportCase, arb_outcome, arb_plan_code, arb_report_case};
pub use fake_runner::{FakeRunner, RecordedCall};
pub use fixtures::{sample_plans, sample_reports, sample_results};
