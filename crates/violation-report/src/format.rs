use crate::errors::ReportError;
use crate::filter::relevant_violations;
use crate::model::{AuditResults, NodeResult, Violation};

const LINE_BREAK: &str = "\n\n";
pub const HORIZONTAL_LINE: &str = "\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormattedReport {
    pub text: String,
    pub pass: bool,
}

/// Renders one block per violation, in the order given, with one
/// sub-block per affected node.
pub fn format(violations: &[Violation]) -> FormattedReport {
    let pass = violations.is_empty();
    if pass {
        return FormattedReport {
            text: String::new(),
            pass,
        };
    }
    let separator = format!("{LINE_BREAK}{HORIZONTAL_LINE}{LINE_BREAK}");
    let text = violations
        .iter()
        .map(format_violation)
        .collect::<Vec<_>>()
        .join(&separator);
    FormattedReport { text, pass }
}

/// Formats the violations an assertion would consider.
pub fn format_results(results: &AuditResults) -> Result<FormattedReport, ReportError> {
    let violations = relevant_violations(results)?;
    Ok(format(&violations))
}

fn format_violation(violation: &Violation) -> String {
    violation
        .nodes
        .iter()
        .map(|node| format_node(violation, node))
        .collect::<Vec<_>>()
        .join(LINE_BREAK)
}

fn format_node(violation: &Violation, node: &NodeResult) -> String {
    let mut block = format!(
        "Expected the HTML found at $('{}') to have no violations:",
        node.selector()
    );
    block.push_str(LINE_BREAK);
    block.push_str(&node.html);
    block.push_str(LINE_BREAK);
    block.push_str("Received:");
    block.push_str(LINE_BREAK);
    block.push_str(&format!("{} ({})", violation.help, violation.id));
    block.push_str(LINE_BREAK);
    block.push_str(node.failure_summary.as_deref().unwrap_or_default());
    if let Some(help_url) = violation.help_url.as_deref().filter(|url| !url.is_empty()) {
        block.push_str(LINE_BREAK);
        block.push_str("You can find more information on this issue here:\n");
        block.push_str(help_url);
    }
    block
}
