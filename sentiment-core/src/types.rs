use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A post as handed over by the fetch client, before any analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPost {
    pub title: Option<String>,
    /// Path relative to the forum root, e.g. `/r/rust/comments/abc123/title/`.
    pub permalink: String,
    pub author: Option<String>,
    pub score: i64,
    pub num_comments: u64,
    pub created_utc: DateTime<Utc>,
}

/// Lowercase alphabetic tokens joined by single spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn from_tokens<'a, I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self(tokens.into_iter().collect::<Vec<_>>().join(" "))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|t| !t.is_empty())
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub const POSITIVE_THRESHOLD: f64 = 0.05;
    pub const NEGATIVE_THRESHOLD: f64 = -0.05;

    /// Buckets a compound score. Both thresholds are exclusive, so an empty
    /// text (score 0.0) lands in `Neutral`.
    pub fn from_compound(score: f64) -> Self {
        if score > Self::POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if score < Self::NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }

    /// Inline CSS for table rows: green, red, and amber for neutral.
    pub fn style(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "color:green",
            SentimentLabel::Negative => "color:red",
            SentimentLabel::Neutral => "color:orange",
        }
    }

    pub fn all() -> [SentimentLabel; 3] {
        [
            SentimentLabel::Positive,
            SentimentLabel::Neutral,
            SentimentLabel::Negative,
        ]
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Proportions and compound score produced by the polarity model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

impl SentimentScores {
    pub fn label(&self) -> SentimentLabel {
        SentimentLabel::from_compound(self.compound)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedRecord {
    pub subreddit: String,
    pub title: String,
    /// Anchor markup pointing at `link`, opened in a new browsing context.
    pub display_title: String,
    pub cleaned_text: NormalizedText,
    pub sentiment: SentimentLabel,
    pub compound: f64,
    pub author: String,
    pub upvotes: i64,
    pub comments: u64,
    pub timestamp: DateTime<Utc>,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    records: Vec<AnalyzedRecord>,
}

impl AnalysisResult {
    pub fn new(records: Vec<AnalyzedRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[AnalyzedRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnalyzedRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn sentiment_counts(&self) -> SentimentCounts {
        let mut counts = SentimentCounts::default();
        for record in &self.records {
            match record.sentiment {
                SentimentLabel::Positive => counts.positive += 1,
                SentimentLabel::Neutral => counts.neutral += 1,
                SentimentLabel::Negative => counts.negative += 1,
            }
        }
        counts
    }

    pub fn into_records(self) -> Vec<AnalyzedRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a AnalysisResult {
    type Item = &'a AnalyzedRecord;
    type IntoIter = std::slice::Iter<'a, AnalyzedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    pub fn get(&self, label: SentimentLabel) -> usize {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Negative => self.negative,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}
