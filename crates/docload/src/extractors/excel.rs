//! Spreadsheet extraction using calamine.
//!
//! Every sheet is rendered as a `[Sheet: name]` header followed by its rows
//! in CSV form, matching the shape of the plain-text corpus downstream
//! consumers expect.

use crate::{Error, Result};
use crate::extractors::TextExtractor;
use async_trait::async_trait;
use calamine::{open_workbook_auto, Data, Reader};
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// Excel extractor (.xlsx, .xls).
pub struct ExcelExtractor;

impl ExcelExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExcelExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextExtractor for ExcelExtractor {
    fn name(&self) -> &str {
        "excel-extractor"
    }

    fn extensions(&self) -> &[&str] {
        &[".xlsx", ".xls"]
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| Error::parsing(format!("Failed to open workbook: {e}")))?;

        let sheet_names = workbook.sheet_names();
        let mut parts: Vec<String> = Vec::with_capacity(sheet_names.len());

        for name in &sheet_names {
            let range = workbook
                .worksheet_range(name)
                .map_err(|e| Error::parsing(format!("Failed to read sheet '{name}': {e}")))?;

            let mut section = format!("[Sheet: {name}]\n");
            for row in range.rows() {
                let cells: Vec<String> = row.iter().map(format_cell_value).collect();
                section.push_str(&cells.join(","));
                section.push('\n');
            }
            parts.push(section);
        }

        Ok(parts.join("\n"))
    }
}

fn format_cell_value(data: &Data) -> String {
    let mut buffer = String::new();
    match data {
        Data::Empty => {}
        Data::String(s) => buffer.push_str(s),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                write!(buffer, "{:.1}", f).unwrap();
            } else {
                write!(buffer, "{}", f).unwrap();
            }
        }
        Data::Int(i) => {
            write!(buffer, "{}", i).unwrap();
        }
        Data::Bool(b) => buffer.push_str(if *b { "true" } else { "false" }),
        Data::DateTime(dt) => {
            if let Some(datetime) = dt.as_datetime() {
                write!(buffer, "{}", datetime.format("%Y-%m-%d %H:%M:%S")).unwrap();
            } else {
                write!(buffer, "{:?}", dt).unwrap();
            }
        }
        Data::Error(e) => {
            write!(buffer, "#ERR: {:?}", e).unwrap();
        }
        Data::DateTimeIso(s) => buffer.push_str(s),
        Data::DurationIso(s) => buffer.push_str(s),
    }
    buffer
}
