//! Plain-text table rendering for result sets and the session history.

use colored::Colorize;
use querybench_core::{History, ResultSet};

/// Cells longer than this are truncated with an ellipsis.
const MAX_COLUMN_WIDTH: usize = 32;

pub fn result_table(set: &ResultSet) -> String {
    if set.columns.is_empty() {
        return "(no results)".to_string();
    }
    let cells: Vec<Vec<String>> = set
        .rows
        .iter()
        .map(|row| row.iter().map(|v| truncate(&v.to_string())).collect())
        .collect();
    let header: Vec<String> = set.columns.iter().map(|c| truncate(c)).collect();
    table(&header, &cells)
}

pub fn history_table(history: &History) -> String {
    let header: Vec<String> = ["query", "status", "time (ms)", "rows", "started"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let cells: Vec<Vec<String>> = history
        .iter()
        .map(|r| {
            vec![
                truncate(&r.label),
                if r.success { "ok".into() } else { "failed".into() },
                format!("{:.1}", r.elapsed_ms()),
                r.row_count.to_string(),
                r.started_at.format("%H:%M:%S").to_string(),
            ]
        })
        .collect();
    table(&header, &cells)
}

pub fn status_line(label: &str, success: bool, elapsed_ms: f64) -> String {
    if success {
        format!("{} {} completed in {:.1} ms", "ok".green(), label, elapsed_ms)
    } else {
        format!("{} {} failed after {:.1} ms", "failed".red(), label, elapsed_ms)
    }
}

fn table(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let mut out = String::new();
    push_row(&mut out, header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell, width = w))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

fn truncate(value: &str) -> String {
    if value.chars().count() <= MAX_COLUMN_WIDTH {
        value.to_string()
    } else {
        let kept: String = value.chars().take(MAX_COLUMN_WIDTH - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use querybench_core::{ExecutionRecord, ResultSet, Value};
    use std::time::Duration;

    #[test]
    fn result_table_aligns_columns() {
        let mut set = ResultSet::new(vec!["street_name".into(), "violations".into()]);
        set.push_row(vec![Value::Text("Broadway".into()), Value::Int(120)]);
        set.push_row(vec![Value::Null, Value::Int(7)]);
        let rendered = result_table(&set);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("street_name"));
        assert!(lines[1].starts_with("-----------"));
        assert!(lines[2].contains("Broadway"));
        assert!(lines[3].contains("NULL"));
    }

    #[test]
    fn long_cells_are_truncated() {
        let mut set = ResultSet::new(vec!["s".into()]);
        set.push_row(vec![Value::Text("x".repeat(100))]);
        let rendered = result_table(&set);
        assert!(rendered.lines().nth(2).expect("row").ends_with("..."));
        assert!(rendered.lines().nth(2).expect("row").len() <= MAX_COLUMN_WIDTH);
    }

    #[test]
    fn empty_set_renders_placeholder() {
        assert_eq!(result_table(&ResultSet::empty()), "(no results)");
    }

    #[test]
    fn history_table_lists_runs_in_order() {
        let mut history = querybench_core::History::new();
        history.record(ExecutionRecord::new(
            "Q1",
            "SELECT 1",
            Duration::from_millis(15),
            true,
            1,
        ));
        history.record(ExecutionRecord::new(
            "Q2",
            "SELECT 2",
            Duration::from_millis(80),
            false,
            0,
        ));
        let rendered = history_table(&history);
        let q1 = rendered.find("Q1").expect("q1");
        let q2 = rendered.find("Q2").expect("q2");
        assert!(q1 < q2);
        assert!(rendered.contains("failed"));
    }
}
