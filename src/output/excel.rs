//! Spreadsheet export
//!
//! Writes all six record fields to an XLSX workbook named
//! deterministically from the query string.

use crate::output::traits::{OutputError, OutputResult, RecordSink, ReportContext};
use crate::record::EnrichedRecord;
use rust_xlsxwriter::{Format, Workbook};
use std::path::{Path, PathBuf};

/// Column headers, in record-field order
const HEADERS: [&str; 6] = ["#", "Host", "IP", "Port", "Location", "CDN"];

/// Sink that exports enriched records to an XLSX file
pub struct ExcelSink {
    export_dir: PathBuf,

    /// Path of the last written workbook
    pub last_export: Option<PathBuf>,
}

impl ExcelSink {
    pub fn new(export_dir: &Path) -> Self {
        Self {
            export_dir: export_dir.to_path_buf(),
            last_export: None,
        }
    }
}

impl RecordSink for ExcelSink {
    fn name(&self) -> &'static str {
        "excel"
    }

    fn write(&mut self, context: &ReportContext, records: &[EnrichedRecord]) -> OutputResult<()> {
        let path = self.export_dir.join(export_file_name(&context.query));

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let bold = Format::new().set_bold();

        for (col, header) in HEADERS.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, *header, &bold)
                .map_err(|e| OutputError::Spreadsheet(e.to_string()))?;
        }

        for (row, record) in records.iter().enumerate() {
            let row = (row + 1) as u32;
            worksheet
                .write_number(row, 0, record.index as f64)
                .and_then(|ws| ws.write_string(row, 1, record.hostname.as_str()))
                .and_then(|ws| ws.write_string(row, 2, record.ip.as_str()))
                .and_then(|ws| ws.write_number(row, 3, record.port as f64))
                .and_then(|ws| ws.write_string(row, 4, record.location_label()))
                .and_then(|ws| ws.write_string(row, 5, record.cdn.to_string()))
                .map_err(|e| OutputError::Spreadsheet(e.to_string()))?;
        }

        workbook
            .save(&path)
            .map_err(|e| OutputError::Spreadsheet(e.to_string()))?;

        tracing::info!(path = %path.display(), rows = records.len(), "Exported spreadsheet");
        self.last_export = Some(path);
        Ok(())
    }
}

/// Derives the export file name from a query string
///
/// ASCII alphanumerics are kept, spaces become underscores, and all other
/// characters are dropped, so the same query always maps to the same file.
pub fn export_file_name(query: &str) -> String {
    let sanitized: String = query
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() {
                Some(c)
            } else if c == ' ' {
                Some('_')
            } else {
                None
            }
        })
        .collect();

    format!("hostlens_{}.xlsx", sanitized)
}
