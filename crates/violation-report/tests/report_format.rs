use a11y_violation_report::{
    format, format_results, to_have_no_violations, AuditResults, ReportError, HORIZONTAL_LINE,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn image_alt_results() -> Value {
    json!({
        "violations": [{
            "id": "image-alt",
            "impact": "critical",
            "tags": ["cat.text-alternatives", "wcag2a", "wcag111", "section508", "section508.22.a"],
            "description": "Ensures <img> elements have alternate text or a role of none or presentation",
            "help": "Images must have alternate text",
            "helpUrl": "https://dequeuniversity.com/rules/axe/2.6/image-alt?application=axeAPI",
            "nodes": [{
                "any": [
                    {"id": "has-alt", "data": null, "relatedNodes": [], "impact": "critical", "message": "Element does not have an alt attribute"},
                    {"id": "aria-label", "data": null, "relatedNodes": [], "impact": "serious", "message": "aria-label attribute does not exist or is empty"}
                ],
                "all": [],
                "none": [],
                "impact": "critical",
                "html": "<img src=\"\">",
                "target": ["body > img"],
                "failureSummary": "Fix any of the following:\n  Element does not have an alt attribute\n  aria-label attribute does not exist or is empty"
            }]
        }]
    })
}

const IMAGE_ALT_REPORT: &str = "Expected the HTML found at $('body > img') to have no violations:

<img src=\"\">

Received:

Images must have alternate text (image-alt)

Fix any of the following:
  Element does not have an alt attribute
  aria-label attribute does not exist or is empty

You can find more information on this issue here:
https://dequeuniversity.com/rules/axe/2.6/image-alt?application=axeAPI";

#[test]
fn failing_results_produce_the_expected_message() {
    let results = AuditResults::from_json(image_alt_results()).unwrap();
    let outcome = to_have_no_violations(&results).unwrap();

    assert!(!outcome.pass);
    assert_eq!(outcome.actual, results.violations.clone().unwrap());
    assert_eq!(outcome.message().as_deref(), Some(IMAGE_ALT_REPORT));
}

#[test]
fn one_violation_with_two_nodes_has_two_sub_blocks() {
    let results = AuditResults::from_json(json!({
        "violations": [{
            "id": "link-name",
            "help": "Links must have discernible text",
            "helpUrl": "https://example.test/link-name",
            "nodes": [
                {"html": "<a href=\"#link-name\"></a>", "target": ["a[href=\"#link-name\"]"], "failureSummary": "summary one"},
                {"html": "<a href=\"#link-name-2\"></a>", "target": ["a[href=\"#link-name-2\"]"], "failureSummary": "summary two"}
            ]
        }]
    }))
    .unwrap();

    let report = format_results(&results).unwrap();
    assert!(!report.pass);
    assert!(!report.text.contains(HORIZONTAL_LINE));

    let sub_blocks: Vec<&str> = report
        .text
        .split("\n\nExpected the HTML")
        .collect();
    assert_eq!(sub_blocks.len(), 2);
    assert!(sub_blocks[0].contains("<a href=\"#link-name\"></a>"));
    assert!(sub_blocks[0].contains("summary one"));
    assert!(sub_blocks[1].contains("<a href=\"#link-name-2\"></a>"));
    assert!(sub_blocks[1].contains("summary two"));
    assert!(report
        .text
        .contains("https://example.test/link-name\n\nExpected the HTML found at $('a[href=\"#link-name-2\"]')"));
}

#[test]
fn violation_blocks_are_separated_by_a_rule_in_engine_order() {
    let results = AuditResults::from_json(json!({
        "violations": [
            {"id": "link-name", "help": "Links must have discernible text", "nodes": [{"html": "<a></a>", "target": ["a"], "failureSummary": "A"}]},
            {"id": "image-alt", "help": "Images must have alternate text", "nodes": [{"html": "<img>", "target": ["img"], "failureSummary": "B"}]},
            {"id": "label", "help": "Form elements must have labels", "nodes": [{"html": "<input>", "target": ["input"], "failureSummary": "C"}]}
        ]
    }))
    .unwrap();

    let text = format_results(&results).unwrap().text;
    let separator = format!("\n\n{HORIZONTAL_LINE}\n\n");
    let blocks: Vec<&str> = text.split(separator.as_str()).collect();
    assert_eq!(blocks.len(), 3);
    assert!(blocks[0].contains("(link-name)"));
    assert!(blocks[1].contains("(image-alt)"));
    assert!(blocks[2].contains("(label)"));
    assert!(blocks[0].ends_with("\n\nA"));
    assert_eq!(HORIZONTAL_LINE.chars().count(), 8);
}

#[test]
fn impact_levels_can_turn_a_failure_into_a_pass() {
    let mut raw = image_alt_results();
    raw["toolOptions"] = json!({"impactLevels": ["minor"]});
    let results = AuditResults::from_json(raw).unwrap();

    let outcome = to_have_no_violations(&results).unwrap();
    assert!(outcome.pass);
    assert!(outcome.actual.is_empty());
    assert_eq!(outcome.message(), None);
}

#[test]
fn empty_violations_pass() {
    let results = AuditResults::from_json(json!({"violations": []})).unwrap();
    let outcome = to_have_no_violations(&results).unwrap();
    assert!(outcome.pass);
    assert_eq!(outcome.message(), None);
    assert_eq!(format(&[]).text, "");
}

#[test]
fn results_without_violations_field_fail_loudly() {
    let results = AuditResults::from_json(json!({})).unwrap();
    assert!(matches!(
        to_have_no_violations(&results),
        Err(ReportError::MalformedResultsObject)
    ));
    assert!(matches!(
        format_results(&results),
        Err(ReportError::MalformedResultsObject)
    ));
}
