//! Plain-text report adapter implementing ReportPort.
//!
//! Renders the transaction log and the summary table. All amounts are floored
//! to whole numbers for display; statistics without data show as `-`.

use std::io::Write;

use crate::domain::backtest::BacktestResult;
use crate::domain::config_validation::DATE_FORMAT;
use crate::domain::error::EquityError;
use crate::domain::signal::Transaction;
use crate::domain::summary::Summary;
use crate::ports::report_port::ReportPort;

const NO_DATA: &str = "-";

pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for TextReportAdapter {
    fn render(&self, result: &BacktestResult, out: &mut dyn Write) -> Result<(), EquityError> {
        writeln!(out, "Transactions ({})", result.window_size)?;
        out.write_all(format_transactions(&result.transactions).as_bytes())?;
        writeln!(out)?;
        writeln!(out, "Summary")?;
        out.write_all(format_summary(&result.summary()).as_bytes())?;
        Ok(())
    }
}

pub fn floor_display(value: f64) -> String {
    (value.floor() as i64).to_string()
}

fn optional(value: Option<f64>) -> String {
    value.map(floor_display).unwrap_or_else(|| NO_DATA.to_string())
}

fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let render_row = |cells: Vec<&str>| -> String {
        let line: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{:<width$}", c, width = widths[i]))
            .collect();
        format!("{}\n", line.join("  ").trim_end())
    };

    let mut table = render_row(headers.to_vec());
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    table.push_str(&format!("{}\n", rule.join("  ")));
    for row in rows {
        table.push_str(&render_row(row.iter().map(String::as_str).collect()));
    }
    table
}

pub fn format_transactions(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions.\n".to_string();
    }

    let rows: Vec<Vec<String>> = transactions
        .iter()
        .enumerate()
        .map(|(i, t)| {
            vec![
                (i + 1).to_string(),
                floor_display(t.buy_price),
                t.buy_date.format(DATE_FORMAT).to_string(),
                floor_display(t.sell_price),
                t.sell_date.format(DATE_FORMAT).to_string(),
                floor_display(t.change),
            ]
        })
        .collect();

    format_table(
        &["S.No", "Buy", "Buy Date", "Sell", "Sell Date", "Change"],
        &rows,
    )
}

pub fn format_summary(summary: &Summary) -> String {
    let row = match summary {
        Summary::NoData => vec![
            "0".to_string(),
            "0".to_string(),
            NO_DATA.to_string(),
            "0".to_string(),
            NO_DATA.to_string(),
            NO_DATA.to_string(),
            "0".to_string(),
        ],
        Summary::Stats(s) => vec![
            s.played.to_string(),
            s.wins.to_string(),
            format!("{} %", s.win_pct),
            s.loses.to_string(),
            optional(s.avg_win),
            optional(s.avg_loss),
            floor_display(s.net),
        ],
    };

    format_table(
        &[
            "Played",
            "Wins",
            "Win %",
            "Loses",
            "Avg Win Amount",
            "Avg Loss Amount",
            "Net",
        ],
        &[row],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::moving_average::WindowSize;
    use crate::domain::signal::OpenPosition;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn trade(buy: f64, sell: f64) -> Transaction {
        Transaction::close(
            OpenPosition {
                buy_price: buy,
                buy_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            },
            sell,
            NaiveDate::from_ymd_opt(2024, 2, 3).unwrap(),
        )
    }

    fn sample_result() -> BacktestResult {
        BacktestResult {
            window_size: WindowSize::new(100).unwrap(),
            averages: vec![],
            transactions: vec![trade(100.5, 110.25), trade(120.0, 99.5)],
        }
    }

    #[test]
    fn floor_display_rounds_down() {
        assert_eq!(floor_display(9.99), "9");
        assert_eq!(floor_display(-20.5), "-21");
        assert_eq!(floor_display(0.0), "0");
    }

    #[test]
    fn transactions_table_rows() {
        let table = format_transactions(&sample_result().transactions);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("S.No"));
        assert!(lines[0].contains("Sell Date"));
        assert!(lines[1].starts_with("----"));
        assert!(lines[2].starts_with("1"));
        assert!(lines[2].contains("100"));
        assert!(lines[2].contains("2024-01-02"));
        assert!(lines[2].contains("2024-02-03"));
        assert!(lines[2].ends_with("9"));
        assert!(lines[3].ends_with("-21"));
    }

    #[test]
    fn empty_transactions() {
        assert_eq!(format_transactions(&[]), "No transactions.\n");
    }

    #[test]
    fn summary_table_with_stats() {
        let summary = sample_result().summary();
        let table = format_summary(&summary);
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].contains("Avg Loss Amount"));
        let cells: Vec<&str> = lines[2].split_whitespace().collect();
        assert_eq!(cells, vec!["2", "1", "50", "%", "1", "9", "20", "-11"]);
    }

    #[test]
    fn summary_table_no_data() {
        let table = format_summary(&Summary::NoData);
        let cells: Vec<&str> = table.lines().nth(2).unwrap().split_whitespace().collect();
        assert_eq!(cells, vec!["0", "0", "-", "0", "-", "-", "0"]);
    }

    #[test]
    fn render_writes_both_tables() {
        let mut buf = Vec::new();
        TextReportAdapter::new()
            .render(&sample_result(), &mut buf)
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Transactions (SMA(100))"));
        assert!(text.contains("\nSummary\n"));
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("report.txt");
        TextReportAdapter::default()
            .write(&sample_result(), &path)
            .unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("Summary"));
    }
}
