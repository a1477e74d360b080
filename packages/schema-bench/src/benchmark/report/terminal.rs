//! Terminal (pretty-print) report generation

use crate::benchmark::comparator::{ComparisonRow, Verdict};

const BASE_HEADERS: [&str; 4] = ["Name", "Ops/sec", "MoE", "Samples"];
const BASELINE_HEADERS: [&str; 4] = ["Prev ops/sec", "Prev MoE", "Prev samples", "Diff"];

pub struct TerminalReporter;

impl TerminalReporter {
    pub fn print(rows: &[ComparisonRow]) {
        print!("{}", Self::render(rows));
    }

    /// Table followed by the error summary
    ///
    /// Comparison columns appear when any row has a previous-run entry.
    pub fn render(rows: &[ComparisonRow]) -> String {
        let with_baseline = rows.iter().any(|r| r.baseline.is_some());

        let mut headers: Vec<&str> = BASE_HEADERS.to_vec();
        if with_baseline {
            headers.extend(BASELINE_HEADERS);
        }
        let cells: Vec<Vec<String>> = rows.iter().map(|r| row_cells(r, with_baseline)).collect();

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &cells {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let mut lines = Vec::with_capacity(rows.len() + 6);
        lines.push(border('┌', '┬', '┐', &widths));
        lines.push(line(
            &headers.iter().map(|h| h.to_string()).collect::<Vec<_>>(),
            &widths,
        ));
        lines.push(border('├', '┼', '┤', &widths));
        for (row, cell) in rows.iter().zip(&cells) {
            let mut text = line(cell, &widths);
            if let Some(marker) = marker(row) {
                text.push(' ');
                text.push_str(marker);
            }
            lines.push(text);
        }
        lines.push(border('└', '┴', '┘', &widths));

        if with_baseline {
            lines.push(summary(rows));
        }

        let failed: Vec<_> = rows.iter().filter(|r| r.result.is_failed()).collect();
        if !failed.is_empty() {
            lines.push(String::new());
            lines.push(format!("Errors ({}):", failed.len()));
            for row in failed {
                lines.push(format!("  ❌ {}", row.result.name));
                if let Some(error) = &row.result.error {
                    for l in error.stack_or_message().lines() {
                        lines.push(format!("     {}", l));
                    }
                }
            }
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

fn row_cells(row: &ComparisonRow, with_baseline: bool) -> Vec<String> {
    let r = &row.result;
    let mut cells = vec![r.name.clone()];
    if r.is_failed() {
        cells.extend(["FAILED".to_string(), "-".to_string(), "-".to_string()]);
    } else {
        cells.extend([format_hz(r.hz), format_rme(r.rme), r.size.to_string()]);
    }

    if with_baseline {
        match &row.baseline {
            Some(b) => cells.extend([
                format_hz(b.previous_hz),
                format_rme(b.previous_rme),
                b.previous_size.to_string(),
                format_diff(b.percent_diff),
            ]),
            None => cells.extend(std::iter::repeat("-".to_string()).take(4)),
        }
    }
    cells
}

fn marker(row: &ComparisonRow) -> Option<&'static str> {
    if row.result.is_failed() {
        return Some("❌");
    }
    match row.verdict() {
        Verdict::Slower => Some("🔻"),
        Verdict::Faster => Some("🔺"),
        _ => None,
    }
}

fn summary(rows: &[ComparisonRow]) -> String {
    let count = |v: Verdict| rows.iter().filter(|r| r.verdict() == v).count();
    format!(
        "{} faster, {} slower, {} unchanged, {} n/a, {} new",
        count(Verdict::Faster),
        count(Verdict::Slower),
        count(Verdict::Unchanged),
        count(Verdict::Unavailable),
        count(Verdict::New)
    )
}

fn border(left: char, mid: char, right: char, widths: &[usize]) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}", left, segments.join(mid.to_string().as_str()), right)
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, w))| {
            let pad = w - cell.chars().count();
            // names left-aligned, numbers right-aligned
            if i == 0 {
                format!(" {}{} ", cell, " ".repeat(pad))
            } else {
                format!(" {}{} ", " ".repeat(pad), cell)
            }
        })
        .collect();
    format!("│{}│", padded.join("│"))
}

/// Two decimals below 100 ops/sec, none above; thousands grouped
pub fn format_hz(hz: f64) -> String {
    let fixed = if hz < 100.0 {
        format!("{:.2}", hz)
    } else {
        format!("{:.0}", hz)
    };
    let (int, frac) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let digits: Vec<char> = int.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    match frac {
        Some(f) => format!("{}.{}", grouped, f),
        None => grouped,
    }
}

pub fn format_rme(rme: f64) -> String {
    format!("±{:.2}%", rme)
}

pub fn format_diff(diff: Option<f64>) -> String {
    match diff {
        Some(d) => format!("{:+.2}%", d),
        None => "N/A".to_string(),
    }
}
