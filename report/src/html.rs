use crate::csv_export::CSV_HEADER;
use crate::format_timestamp;
use sentiment_core::markup::escape_html;
use sentiment_core::{AnalysisResult, CoreError, ExportError};
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

pub const DEFAULT_HTML_FILE: &str = "reddit_sentiment.html";

const PAGE_STYLE: &str = "body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse}\
th,td{border:1px solid #ccc;padding:4px 8px;text-align:left}\
th{background:#f0f0f0}";

/// Renders the records as a `<table>`. Each row carries its sentiment color;
/// the title cell links to the post.
pub fn render_html_table(result: &AnalysisResult) -> String {
    let mut html = String::from("<table>\n<thead>\n<tr>");
    for column in CSV_HEADER {
        let _ = write!(html, "<th>{}</th>", column);
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for record in result {
        let _ = writeln!(
            html,
            "<tr style=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            record.sentiment.style(),
            escape_html(&record.subreddit),
            record.display_title,
            escape_html(record.cleaned_text.as_str()),
            record.sentiment,
            escape_html(&record.author),
            record.upvotes,
            record.comments,
            format_timestamp(&record.timestamp),
        );
    }

    html.push_str("</tbody>\n</table>\n");
    html
}

pub fn render_html_page(result: &AnalysisResult) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Reddit Sentiment</title>\n<style>{}</style>\n</head>\n<body>\n\
         <h1>Reddit Sentiment</h1>\n{}</body>\n</html>\n",
        PAGE_STYLE,
        render_html_table(result)
    )
}

pub fn export_html(result: &AnalysisResult, path: &Path) -> Result<(), CoreError> {
    std::fs::write(path, render_html_page(result)).map_err(|e| ExportError::WriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    info!("Rendered {} records to {}", result.len(), path.display());
    Ok(())
}
