//! Result tables and CSV output
//!
//! A [`ResultTable`] holds a fixed header and the rows of one scan variant in
//! file-processing order. Rows are never sorted.

use crate::types::{FileResult, Result};
use std::io::Write;

/// Single field written for a slot overflow row
pub const OVERFLOW_MARKER: &str = "ERROR too many targets";

/// Options controlling table output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableOptions {
    /// Append a `Complete` column with each row's completeness flag
    pub completeness_column: bool,
}

/// Header plus ordered rows of one scan variant
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    header: Vec<String>,
    rows: Vec<FileResult>,
}

impl ResultTable {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: FileResult) {
        self.rows.push(row);
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[FileResult] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the table as CSV: header first, then rows in insertion order
    pub fn write_csv<W: Write>(&self, out: &mut W, options: TableOptions) -> Result<()> {
        let mut header = self.header.clone();
        if options.completeness_column {
            header.push("Complete".to_string());
        }
        write_record(out, &header)?;

        for row in &self.rows {
            let mut fields = row.record();
            if options.completeness_column && !row.is_overflow() {
                fields.push((!row.is_incomplete()).to_string());
            }
            write_record(out, &fields)?;
        }

        out.flush()?;
        Ok(())
    }
}

impl FileResult {
    /// CSV fields of this row, in header order
    pub fn record(&self) -> Vec<String> {
        match self {
            FileResult::Intro { label, line_number, solve_time, .. } => {
                vec![label.to_string(), line_number.to_string(), format_float(*solve_time)]
            }
            FileResult::Pointing { label, timings, mean_distance, fails, .. } => {
                let mut fields = vec![label.to_string()];
                fields.extend(timings.iter().map(|t| format_float(*t)));
                fields.push(format_float(*mean_distance));
                fields.push(fails.to_string());
                fields
            }
            FileResult::SlotOverflow { .. } => vec![OVERFLOW_MARKER.to_string()],
            FileResult::Rating {
                label,
                good_time,
                good_fails,
                bad_time,
                bad_fails,
                average_time,
                average_fails,
                ..
            } => vec![
                label.to_string(),
                format_float(*good_time),
                good_fails.to_string(),
                format_float(*bad_time),
                bad_fails.to_string(),
                format_float(*average_time),
                average_fails.to_string(),
            ],
            FileResult::Cutting { label, count, last_timestamp, .. } => vec![
                label.to_string(),
                count.to_string(),
                last_timestamp.map(format_float).unwrap_or_default(),
            ],
        }
    }
}

/// Shortest round-trip float text, keeping `.0` on integral values
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

fn write_record<W: Write>(out: &mut W, fields: &[String]) -> Result<()> {
    let line = fields
        .iter()
        .map(|f| quote_field(f))
        .collect::<Vec<_>>()
        .join(",");
    out.write_all(line.as_bytes())?;
    out.write_all(b"\r\n")?;
    Ok(())
}

fn quote_field(field: &str) -> String {
    if field.contains(|c: char| matches!(c, ',' | '"' | '\r' | '\n')) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileLabel;
    use std::path::Path;

    fn label(path: &str) -> FileLabel {
        FileLabel::new(1, Path::new(path), 45)
    }

    fn render(table: &ResultTable, options: TableOptions) -> String {
        let mut out = Vec::new();
        table.write_csv(&mut out, options).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(5.5), "5.5");
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_quote_field() {
        assert_eq!(quote_field("plain"), "plain");
        assert_eq!(quote_field("a,b"), "\"a,b\"");
        assert_eq!(quote_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_header_only() {
        let table = ResultTable::new(vec!["File".into(), "CuttingCount".into(), "SolveTime".into()]);
        assert!(table.is_empty());
        assert_eq!(render(&table, TableOptions::default()), "File,CuttingCount,SolveTime\r\n");
    }

    #[test]
    fn test_rows_in_insertion_order() {
        let mut table = ResultTable::new(vec!["File".into(), "Line Number".into(), "SolveTime".into()]);
        table.push(FileResult::Intro {
            label: label("b.log"),
            line_number: 4,
            solve_time: 5.5,
            incomplete: false,
        });
        table.push(FileResult::Intro {
            label: label("a.log"),
            line_number: 2,
            solve_time: 3.0,
            incomplete: true,
        });
        assert_eq!(
            render(&table, TableOptions::default()),
            "File,Line Number,SolveTime\r\nFile 1 b.log,4,5.5\r\nFile 1 a.log,2,3.0\r\n"
        );
    }

    #[test]
    fn test_completeness_column() {
        let mut table = ResultTable::new(vec!["File".into(), "CuttingCount".into(), "SolveTime".into()]);
        table.push(FileResult::Cutting {
            label: label("c.log"),
            count: 3,
            last_timestamp: None,
            incomplete: true,
        });
        table.push(FileResult::SlotOverflow {
            label: label("c.log"),
            line_number: 1,
        });
        let options = TableOptions { completeness_column: true };
        assert_eq!(
            render(&table, options),
            "File,CuttingCount,SolveTime,Complete\r\nFile 1 c.log,3,,false\r\nERROR too many targets\r\n"
        );
    }

    #[test]
    fn test_label_with_comma_is_quoted() {
        let mut table = ResultTable::new(vec!["File".into(), "CuttingCount".into(), "SolveTime".into()]);
        table.push(FileResult::Cutting {
            label: label("x,y.log"),
            count: 1,
            last_timestamp: Some(2.0),
            incomplete: false,
        });
        assert!(render(&table, TableOptions::default()).ends_with("\"File 1 x,y.log\",1,2.0\r\n"));
    }
}
