use a11y_core_types::Impact;

use crate::errors::ReportError;
use crate::model::{AuditResults, Violation};

/// Keeps violations whose impact is listed. An empty list keeps everything.
pub fn filter_by_impact(violations: &[Violation], impact_levels: &[Impact]) -> Vec<Violation> {
    if impact_levels.is_empty() {
        return violations.to_vec();
    }
    violations
        .iter()
        .filter(|violation| {
            violation
                .impact
                .is_some_and(|impact| impact_levels.contains(&impact))
        })
        .cloned()
        .collect()
}

/// The violations an assertion should consider, honouring
/// `toolOptions.impactLevels`.
pub fn relevant_violations(results: &AuditResults) -> Result<Vec<Violation>, ReportError> {
    let violations = results.violations()?;
    Ok(filter_by_impact(violations, results.impact_levels()))
}
