pub mod csv_export;
pub mod html;
pub mod summary;

pub use csv_export::{csv_bytes, export_csv, write_csv, CSV_HEADER, DEFAULT_CSV_FILE};
pub use html::{export_html, render_html_page, render_html_table, DEFAULT_HTML_FILE};
pub use summary::{RunSummary, SEED_LEXICON_NOTICE};

use chrono::{DateTime, Utc};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}
