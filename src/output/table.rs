//! Console table rendering
//!
//! Prints a pagination summary followed by a UTF-8 table of the enriched
//! records, keyed by index.

use crate::output::traits::{OutputResult, RecordSink, ReportContext};
use crate::record::EnrichedRecord;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

/// Sink that renders enriched records to stdout
pub struct TableSink;

impl TableSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TableSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordSink for TableSink {
    fn name(&self) -> &'static str {
        "table"
    }

    fn write(&mut self, context: &ReportContext, records: &[EnrichedRecord]) -> OutputResult<()> {
        println!();
        println!(
            "Page {} (size {}) of {} total results",
            context.pagination.page_index, context.pagination.page_size, context.pagination.total
        );
        println!("Query: {}", context.query);

        println!("{}", render_table(records));
        Ok(())
    }
}

/// Renders the record table as a string
pub fn render_table(records: &[EnrichedRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Host", "IP", "Port", "Location", "CDN"]);

    for record in records {
        table.add_row(vec![
            record.index.to_string(),
            record.hostname.clone(),
            record.ip.clone(),
            record.port.to_string(),
            record.location_label().to_string(),
            record.cdn.to_string(),
        ]);
    }

    table
}
