//! Shared benchmarking scaffolding used by the Criterion benches and the
//! `genbench` runner.
//!
//! Centralizing the case bodies here keeps Criterion and the CLI measuring
//! exactly the same code paths.

pub mod cases;
pub mod report;
pub mod runner;

pub use cases::{Case, CaseGroup, CaseOutcome, Role, catalogue};
pub use runner::{RunnerConfig, SuiteRun, run_suite};
