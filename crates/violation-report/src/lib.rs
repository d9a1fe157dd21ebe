pub mod errors;
pub mod filter;
pub mod format;
pub mod matcher;
pub mod model;

pub use errors::ReportError;
pub use filter::{filter_by_impact, relevant_violations};
pub use format::{format, format_results, FormattedReport, HORIZONTAL_LINE};
pub use matcher::{to_have_no_violations, MatcherOutcome, MATCHER_HINT};
pub use model::{AuditResults, CheckResult, NodeResult, TargetSelector, ToolOptions, Violation};
