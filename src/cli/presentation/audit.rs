//! Audit report presentation.

use super::{to_json, verdict};
use crate::audit::AuditReport;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;

pub fn format_audit_text(report: &AuditReport, color: bool) -> String {
    let mut output = format!("Profiles root: {}\n\n", report.root.display());
    if report.entries.is_empty() {
        output.push_str("No profiles found.\n");
        return output;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Kind", "Id", "Status", "Errors", "Warnings"]);
    for entry in &report.entries {
        table.add_row(vec![
            entry.kind.to_string(),
            entry.id.clone(),
            verdict(entry.result.ok, color),
            entry.result.errors.join("\n"),
            entry.result.warnings.join("\n"),
        ]);
    }
    output.push_str(&format!("{}\n\n", table));

    let summary = &report.summary;
    output.push_str(&format!(
        "Total: {}  valid: {}  invalid: {}  with warnings: {}\n",
        summary.total, summary.valid, summary.invalid, summary.with_warnings
    ));
    output
}

pub fn format_audit_json(report: &AuditReport) -> String {
    to_json(report)
}
