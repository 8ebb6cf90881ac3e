use crate::format_timestamp;
use sentiment_core::{AnalysisResult, CoreError, ExportError};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub const DEFAULT_CSV_FILE: &str = "reddit_sentiment.csv";

pub const CSV_HEADER: [&str; 8] = [
    "Subreddit",
    "Title",
    "Cleaned Text",
    "Sentiment",
    "Author",
    "Upvotes",
    "Comments",
    "Timestamp",
];

fn csv_error(e: impl Into<csv::Error>) -> CoreError {
    CoreError::Export(ExportError::Csv(e.into()))
}

/// Writes one row per record in result order. Titles are written as plain
/// text, without the anchor markup used for display.
pub fn write_csv<W: Write>(result: &AnalysisResult, writer: W) -> Result<(), CoreError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER).map_err(csv_error)?;

    for record in result {
        let upvotes = record.upvotes.to_string();
        let comments = record.comments.to_string();
        let timestamp = format_timestamp(&record.timestamp);
        wtr.write_record([
            record.subreddit.as_str(),
            record.title.as_str(),
            record.cleaned_text.as_str(),
            record.sentiment.as_str(),
            record.author.as_str(),
            upvotes.as_str(),
            comments.as_str(),
            timestamp.as_str(),
        ])
        .map_err(csv_error)?;
    }

    wtr.flush().map_err(csv_error)
}

pub fn csv_bytes(result: &AnalysisResult) -> Result<Vec<u8>, CoreError> {
    let mut buffer = Vec::new();
    write_csv(result, &mut buffer)?;
    Ok(buffer)
}

pub fn export_csv(result: &AnalysisResult, path: &Path) -> Result<(), CoreError> {
    let file = File::create(path).map_err(|e| ExportError::WriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    write_csv(result, file)?;
    info!("Exported {} records to {}", result.len(), path.display());
    Ok(())
}
