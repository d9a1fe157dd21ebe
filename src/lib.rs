//! Accessibility assertions for test suites.
//!
//! Inputs are mounted into a shared document, evaluated by an external
//! [`RuleEngine`], and the document is restored before the check resolves.
//! [`assert_no_violations!`] turns the engine's results into a readable
//! failure.

pub mod assert;
pub mod engine;
pub mod errors;
pub mod harness;
pub mod logging;

pub use a11y_core_types as core_types;
pub use a11y_dom_sandbox as dom;
pub use a11y_run_options as options;
pub use a11y_violation_report as report;

pub use engine::{evaluate, EngineCallback, EngineError, RuleEngine};
pub use errors::{CheckError, HarnessResult};
pub use harness::{configure, Harness, HarnessBuilder, PendingCheck};

pub use a11y_dom_sandbox::{CheckInput, Element, FrameworkElement, SharedDocument};
pub use a11y_run_options::{HarnessConfig, RunOptions};
pub use a11y_violation_report::{to_have_no_violations, AuditResults, MatcherOutcome};
