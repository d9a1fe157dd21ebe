//! Assertion helpers for test suites.

use a11y_violation_report::{to_have_no_violations, AuditResults, MatcherOutcome, ReportError};

/// Evaluates the no-violations assertion without panicking.
pub fn expect_no_violations(results: &AuditResults) -> Result<MatcherOutcome, ReportError> {
    to_have_no_violations(results)
}

/// Panics with the formatted report when `results` contains violations.
///
/// ```ignore
/// let results = harness.run("<img src=\"#\">", None).await?;
/// a11y_harness::assert_no_violations!(results);
/// ```
#[macro_export]
macro_rules! assert_no_violations {
    ($results:expr $(,)?) => {{
        match $crate::assert::expect_no_violations(&$results) {
            Ok(outcome) => {
                if let Some(message) = outcome.failure_message() {
                    panic!("{}", message);
                }
            }
            Err(err) => panic!("{}", err),
        }
    }};
    ($results:expr, $($context:tt)+) => {{
        match $crate::assert::expect_no_violations(&$results) {
            Ok(outcome) => {
                if let Some(message) = outcome.failure_message() {
                    panic!("{}\n\n{}", format_args!($($context)+), message);
                }
            }
            Err(err) => panic!("{}: {}", format_args!($($context)+), err),
        }
    }};
}
