use serde_json::Value;
use tracing::debug;

use super::ValidationReport;
use super::required_fields::is_blank;

pub(super) fn check_sections(
    record: &Value,
    sections_field: &str,
    heading_field: &str,
    report: &mut ValidationReport,
) {
    let Some(sections) = record.get(sections_field) else {
        debug!(field = sections_field, "sections field absent; skipping integrity check");
        return;
    };

    let Some(items) = sections.as_array() else {
        report
            .errors
            .push(format!("'{sections_field}' field is not a list."));
        return;
    };

    if items.is_empty() {
        report
            .warnings
            .push(format!("'{sections_field}' array is empty."));
    }

    for (index, item) in items.iter().enumerate() {
        let Some(section) = item.as_object() else {
            report.warnings.push(format!(
                "Item at index {index} in '{sections_field}' is not a valid object."
            ));
            continue;
        };

        if section.get(heading_field).is_none_or(is_blank) {
            report.warnings.push(format!(
                "Section at index {index} is missing a '{heading_field}'."
            ));
        }
    }

    debug!(
        field = sections_field,
        section_count = items.len(),
        "checked section integrity"
    );
}
