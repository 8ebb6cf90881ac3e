use crate::analyzer::SentimentAnalyzer;
use crate::lexicon::{LexiconLoader, LexiconOrigin, SentimentLexicon};
use crate::normalizer::TextNormalizer;
use sentiment_core::{CoreError, NormalizedText, SentimentLabel, SentimentScores, Settings};
use tracing::{info, warn};

/// Read-only state shared by every analysis run: the stopword-aware
/// normalizer and the lexicon-backed analyzer. Built once at startup.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    normalizer: TextNormalizer,
    analyzer: SentimentAnalyzer,
}

impl AnalysisContext {
    pub fn new(normalizer: TextNormalizer, analyzer: SentimentAnalyzer) -> Self {
        Self {
            normalizer,
            analyzer,
        }
    }

    pub fn with_lexicon(lexicon: SentimentLexicon) -> Result<Self, CoreError> {
        Ok(Self::new(
            TextNormalizer::new()?,
            SentimentAnalyzer::new(lexicon),
        ))
    }

    /// Resolves the lexicon according to `settings` (explicit file, cache,
    /// download, then the built-in seed only if `allow_seed_lexicon` is set).
    pub async fn load(settings: &Settings) -> Result<Self, CoreError> {
        let loader = LexiconLoader::new()
            .with_path(settings.lexicon_path.clone())
            .with_cache_dir(settings.cache_dir.clone())
            .with_seed_fallback(settings.allow_seed_lexicon);
        let lexicon = loader.load().await?;
        if lexicon.origin().is_seed() {
            warn!(
                "Analysis context uses the {}-entry seed lexicon; labels are approximate",
                lexicon.len()
            );
        } else {
            info!(
                "Analysis context ready: {} lexicon entries ({:?})",
                lexicon.len(),
                lexicon.origin()
            );
        }
        Self::with_lexicon(lexicon)
    }

    /// Context backed by the compiled-in seed lexicon; never touches the network.
    pub fn builtin() -> Result<Self, CoreError> {
        Self::with_lexicon(SentimentLexicon::builtin())
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    pub fn analyzer(&self) -> &SentimentAnalyzer {
        &self.analyzer
    }

    pub fn lexicon_origin(&self) -> LexiconOrigin {
        self.analyzer.lexicon().origin()
    }

    pub fn uses_seed_lexicon(&self) -> bool {
        self.lexicon_origin().is_seed()
    }

    pub fn normalize(&self, title: Option<&str>) -> NormalizedText {
        self.normalizer.normalize(title)
    }

    pub fn score(&self, text: &NormalizedText) -> SentimentScores {
        self.analyzer.polarity_scores(text.as_str())
    }

    pub fn classify(&self, text: &NormalizedText) -> SentimentLabel {
        self.analyzer.classify(text)
    }
}
