//! Text rendering of a run report

use crate::pipeline::RunReport;
use std::fmt::Write;

/// Default width of the longest bar, in cells
pub const DEFAULT_BAR_WIDTH: usize = 40;

/// Horizontal bar chart of `(word, count)` pairs under `title`
///
/// Bars are scaled so the largest count spans `width` cells; any non-zero
/// count gets at least one cell.
pub fn render_bar_chart(title: &str, words: &[(String, u64)], width: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));

    if words.is_empty() {
        let _ = writeln!(out, "(no words counted)");
        return out;
    }

    let label_width = words
        .iter()
        .map(|(word, _)| word.chars().count())
        .max()
        .unwrap_or(0);
    let max = words.iter().map(|(_, count)| *count).max().unwrap_or(0).max(1);

    for (word, count) in words {
        let cells = ((*count as u128 * width as u128) / max as u128) as usize;
        let cells = if *count > 0 { cells.max(1) } else { 0 };
        let _ = writeln!(
            out,
            "{word:<label_width$} | {} {count}",
            "█".repeat(cells)
        );
    }
    out
}

/// Chart of the top words followed by a summary of the sources
pub fn render_report(title: &str, report: &RunReport, width: usize) -> String {
    let mut out = render_bar_chart(title, &report.top_words(), width);
    let failures = report.failures();

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Sources: {} succeeded, {} failed ({} words, {} distinct) in {:.2?}",
        report.succeeded(),
        failures.len(),
        report.result.total(),
        report.result.len(),
        report.elapsed
    );
    for failure in failures {
        let _ = writeln!(
            out,
            "  ❌ {}: {} (after {} attempt(s))",
            failure.url, failure.reason, failure.attempts
        );
    }
    out
}
