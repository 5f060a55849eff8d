//! Canonical override block formatting
//!
//! Writes records back to the source format. Parsing the output reproduces
//! the records exactly, which lets maintainers normalize hand-edited files.

use crate::record::OverrideRecord;

/// Format a single record as a canonical override block
pub fn format_record(record: &OverrideRecord) -> String {
    let mut result = String::new();

    result.push_str("<override namespace=\"");
    result.push_str(&record.namespace);
    result.push_str("\">\n");

    if let Some(signature) = &record.signature {
        result.push_str("<signature>");
        result.push_str(signature);
        result.push_str("</signature>\n");
    }

    result.push_str("<paramnames>[");
    for (i, param) in record.param_names.iter().enumerate() {
        if i > 0 {
            result.push_str(", ");
        }
        result.push('\'');
        result.push_str(&param.token());
        result.push('\'');
    }
    result.push_str("]</paramnames>\n");

    result.push_str("<description>\n");
    if !record.description.is_empty() {
        result.push_str(&record.description);
        result.push('\n');
    }
    result.push_str("</description>\n");

    result.push_str("</override>");
    result
}

/// Format multiple records, one blank line between blocks
pub fn format_records<'a>(records: impl IntoIterator<Item = &'a OverrideRecord>) -> String {
    records
        .into_iter()
        .map(format_record)
        .collect::<Vec<_>>()
        .join("\n\n")
}
