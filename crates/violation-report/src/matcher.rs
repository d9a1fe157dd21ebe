use tracing::debug;

use crate::errors::ReportError;
use crate::filter::relevant_violations;
use crate::format::format;
use crate::model::{AuditResults, Violation};

pub const MATCHER_HINT: &str = "expect(received).to_have_no_violations()";

/// Outcome of asserting that a results object has no violations.
#[derive(Clone, Debug, PartialEq)]
pub struct MatcherOutcome {
    pub actual: Vec<Violation>,
    pub pass: bool,
    report: String,
}

impl MatcherOutcome {
    /// The report text when failing; passing assertions carry no message.
    pub fn message(&self) -> Option<String> {
        if self.pass {
            None
        } else {
            Some(self.report.clone())
        }
    }

    pub fn hint() -> &'static str {
        MATCHER_HINT
    }

    /// Hint header followed by the report, as shown by a failing assertion.
    pub fn failure_message(&self) -> Option<String> {
        self.message()
            .map(|report| format!("{MATCHER_HINT}\n\n{report}"))
    }
}

/// Accepts full or partial results objects; one without a `violations`
/// field is rejected rather than treated as clean.
pub fn to_have_no_violations(results: &AuditResults) -> Result<MatcherOutcome, ReportError> {
    let actual = relevant_violations(results)?;
    let report = format(&actual);
    debug!(
        violations = actual.len(),
        pass = report.pass,
        "evaluated no-violations assertion"
    );
    Ok(MatcherOutcome {
        actual,
        pass: report.pass,
        report: report.text,
    })
}
