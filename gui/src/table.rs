use crate::Message;
use iced::widget::{button, column, row, scrollable, text, Column};
use iced::{Color, Element, Length, Theme};
use sentiment_core::{AnalysisResult, AnalyzedRecord, SentimentLabel};

/// Green, red and amber, matching the exported HTML.
pub fn sentiment_color(label: SentimentLabel) -> Color {
    match label {
        SentimentLabel::Positive => Color::from_rgb(0.0, 0.6, 0.0),
        SentimentLabel::Negative => Color::from_rgb(0.8, 0.0, 0.0),
        SentimentLabel::Neutral => Color::from_rgb(1.0, 0.65, 0.0),
    }
}

// (header, width portion)
const COLUMNS: [(&str, u16); 8] = [
    ("Subreddit", 2),
    ("Title", 6),
    ("Cleaned Text", 5),
    ("Sentiment", 2),
    ("Author", 2),
    ("Upvotes", 1),
    ("Comments", 1),
    ("Timestamp", 3),
];

fn cell<'a>(content: String, portion: u16, color: Color) -> Element<'a, Message, Theme> {
    text(content)
        .size(13)
        .style(color)
        .width(Length::FillPortion(portion))
        .into()
}

fn header_row<'a>() -> Element<'a, Message, Theme> {
    COLUMNS
        .iter()
        .fold(row![].spacing(8), |header, (name, portion)| {
            header.push(
                text(*name)
                    .size(14)
                    .width(Length::FillPortion(*portion)),
            )
        })
        .into()
}

fn record_row(record: &AnalyzedRecord) -> Element<'_, Message, Theme> {
    let color = sentiment_color(record.sentiment);
    let title = button(text(&record.title).size(13).style(color))
        .style(iced::theme::Button::Text)
        .padding(0)
        .on_press(Message::OpenLink(record.link.clone()))
        .width(Length::FillPortion(COLUMNS[1].1));

    row![
        cell(record.subreddit.clone(), COLUMNS[0].1, color),
        title,
        cell(record.cleaned_text.to_string(), COLUMNS[2].1, color),
        cell(record.sentiment.to_string(), COLUMNS[3].1, color),
        cell(record.author.clone(), COLUMNS[4].1, color),
        cell(record.upvotes.to_string(), COLUMNS[5].1, color),
        cell(record.comments.to_string(), COLUMNS[6].1, color),
        cell(report::format_timestamp(&record.timestamp), COLUMNS[7].1, color),
    ]
    .spacing(8)
    .into()
}

/// Scrollable table, one row per record, colored by sentiment. Titles open
/// the post in the browser.
pub fn view(result: &AnalysisResult) -> Element<'_, Message, Theme> {
    let rows = result
        .iter()
        .fold(Column::new().spacing(6), |rows, record| rows.push(record_row(record)));

    column![header_row(), scrollable(rows).height(Length::Fill)]
        .spacing(10)
        .into()
}
