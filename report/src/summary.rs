use sentiment_core::{AnalysisResult, SentimentCounts, SentimentLabel};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub counts: SentimentCounts,
    /// Scored with the compiled-in seed lexicon instead of the full one.
    pub seed_lexicon: bool,
}

pub const SEED_LEXICON_NOTICE: &str =
    "scored with the built-in seed lexicon, labels are approximate";

impl RunSummary {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            total: result.len(),
            counts: result.sentiment_counts(),
            seed_lexicon: false,
        }
    }

    pub fn with_seed_lexicon(self, seed_lexicon: bool) -> Self {
        Self {
            seed_lexicon,
            ..self
        }
    }

    pub fn count(&self, label: SentimentLabel) -> usize {
        self.counts.get(label)
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Analyzed {} posts ({} positive, {} neutral, {} negative)",
            self.total, self.counts.positive, self.counts.neutral, self.counts.negative
        )?;
        if self.seed_lexicon {
            write!(f, "; {}", SEED_LEXICON_NOTICE)?;
        }
        Ok(())
    }
}
