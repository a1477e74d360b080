//! Markdown report generation

use crate::benchmark::comparator::ComparisonRow;
use crate::benchmark::report::terminal::{format_diff, format_hz, format_rme};
use crate::benchmark::BenchmarkResult;
use chrono::{DateTime, Utc};
use std::path::Path;

/// Run metadata printed in the report header
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub library_version: String,
    pub threshold_pct: f64,
    pub generated_at: DateTime<Utc>,
}

pub struct MarkdownReporter;

impl MarkdownReporter {
    pub fn save(
        rows: &[ComparisonRow],
        meta: &ReportMeta,
        path: impl AsRef<Path>,
    ) -> BenchmarkResult<()> {
        std::fs::write(path, Self::generate(rows, meta))?;
        Ok(())
    }

    pub fn generate(rows: &[ComparisonRow], meta: &ReportMeta) -> String {
        let with_baseline = rows.iter().any(|r| r.baseline.is_some());

        let (header, rule) = if with_baseline {
            (
                "| Test | Ops/sec | MoE | Samples | Prev ops/sec | Prev MoE | Prev samples | Diff |",
                "|------|--------:|----:|--------:|-------------:|---------:|-------------:|-----:|",
            )
        } else {
            (
                "| Test | Ops/sec | MoE | Samples |",
                "|------|--------:|----:|--------:|",
            )
        };

        let body = rows
            .iter()
            .map(|row| {
                let r = &row.result;
                let mut cells = vec![escape(&r.name)];
                if r.is_failed() {
                    cells.extend(["**FAILED**".to_string(), "-".to_string(), "-".to_string()]);
                } else {
                    cells.extend([format_hz(r.hz), format_rme(r.rme), r.size.to_string()]);
                }
                if with_baseline {
                    match &row.baseline {
                        Some(b) => {
                            let diff = format_diff(b.percent_diff);
                            cells.extend([
                                format_hz(b.previous_hz),
                                format_rme(b.previous_rme),
                                b.previous_size.to_string(),
                                if b.significant {
                                    format!("**{}**", diff)
                                } else {
                                    diff
                                },
                            ]);
                        }
                        None => cells.extend(std::iter::repeat("-".to_string()).take(4)),
                    }
                }
                format!("| {} |", cells.join(" | "))
            })
            .collect::<Vec<_>>()
            .join("\n");

        let errors = rows
            .iter()
            .filter_map(|row| {
                row.result.error.as_ref().map(|e| {
                    format!(
                        "### {}\n\n```\n{}\n```",
                        escape(&row.result.name),
                        e.stack_or_message()
                    )
                })
            })
            .collect::<Vec<_>>();

        format!(
            r#"# Schema Benchmark Report

**Library version**: {}
**Significance threshold**: ±{}%
**Generated**: {}

## Results

{}
{}
{}

## Errors

{}
"#,
            meta.library_version,
            meta.threshold_pct,
            meta.generated_at.to_rfc3339(),
            header,
            rule,
            body,
            if errors.is_empty() {
                "None".to_string()
            } else {
                errors.join("\n\n")
            }
        )
    }
}

fn escape(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::comparator::{compare, rows_without_baseline};
    use crate::benchmark::{ErrorInfo, Report, TrialOutcome, TrialResult};
    use chrono::TimeZone;

    fn meta() -> ReportMeta {
        ReportMeta {
            library_version: "2.1.0".to_string(),
            threshold_pct: 10.0,
            generated_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    #[test]
    fn test_header_and_plain_table() {
        let report: Report = [TrialResult::measured("a|b", 250.0, 0.5, 12)]
            .into_iter()
            .collect();
        let md = MarkdownReporter::generate(&rows_without_baseline(&report), &meta());
        assert!(md.contains("**Library version**: 2.1.0"));
        assert!(md.contains("2026-01-02T03:04:05+00:00"));
        assert!(md.contains("| a\\|b | 250 | ±0.50% | 12 |"));
        assert!(md.contains("## Errors\n\nNone"));
    }

    #[test]
    fn test_significant_diff_is_bold_and_errors_listed() {
        let current: Report = [
            TrialResult::measured("fast", 300.0, 1.0, 10),
            TrialResult::from_outcome("broken", TrialOutcome::Failed(ErrorInfo::new("boom"))),
        ]
        .into_iter()
        .collect();
        let previous: Report = [TrialResult::measured("fast", 100.0, 1.0, 10)]
            .into_iter()
            .collect();

        let md = MarkdownReporter::generate(&compare(&current, &previous, 10.0), &meta());
        assert!(md.contains("**+200.00%**"));
        assert!(md.contains("| broken | **FAILED** | - | - | - | - | - | - |"));
        assert!(md.contains("### broken\n\n```\nboom\n```"));
    }
}
