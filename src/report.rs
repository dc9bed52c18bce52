//! Assembles detector findings into the ranked report consumed by the
//! output writers: decodes each finding's metrics payload, attaches
//! remediation advice, and orders entries by severity then file path.

use serde::Serialize;
use serde_json::Value;

use crate::advice::{advise, AdviceBundle};
use crate::core::codec;
use crate::core::metrics::SmellMetrics;
use crate::core::{Finding, Severity, SmellKind};

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub file_path: String,
    pub rule_id: SmellKind,
    pub severity: Severity,
    pub message: String,
    pub custom_metrics: Value,
    pub suggestion: Option<AdviceBundle>,
}

/// Build the final ranked report. Entries sort by severity (CRITICAL first),
/// ties broken by file path; the sort is stable so findings from one file
/// keep their arrival order.
pub fn build_report(findings: &[Finding]) -> Vec<ReportEntry> {
    let mut entries: Vec<ReportEntry> = findings.iter().map(entry_for).collect();
    entries.sort_by(|a, b| {
        a.severity
            .sort_rank()
            .cmp(&b.severity.sort_rank())
            .then_with(|| a.file_path.cmp(&b.file_path))
    });
    entries
}

fn entry_for(finding: &Finding) -> ReportEntry {
    let file_path = finding.file.display().to_string();
    let (payload, detail) = codec::decode(&finding.message);
    let decoded = payload.and_then(|value| {
        serde_json::from_value::<SmellMetrics>(value.clone())
            .ok()
            .map(|metrics| (value, metrics))
    });
    match decoded {
        Some((value, metrics)) => ReportEntry {
            file_path,
            rule_id: finding.smell,
            severity: metrics.severity(),
            message: detail,
            custom_metrics: value,
            suggestion: Some(advise(finding.smell.rule_id(), &metrics)),
        },
        None => {
            log::warn!(
                "Unreadable metrics payload for {} in {}",
                finding.smell,
                file_path
            );
            ReportEntry {
                file_path,
                rule_id: finding.smell,
                severity: Severity::Unknown,
                message: detail,
                custom_metrics: Value::Object(Default::default()),
                suggestion: None,
            }
        }
    }
}
