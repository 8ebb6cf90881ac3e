//! Title cleaning, lexicon-based polarity scoring and per-run aggregation.

pub mod aggregator;
pub mod analyzer;
pub mod context;
pub mod lexicon;
pub mod normalizer;
pub mod stopwords;

pub use aggregator::{
    analyze_communities, build_record, canonical_url, parse_community_list, run_analysis,
    AnalysisRequest, PostSource, DELETED_AUTHOR, REDDIT_BASE_URL,
};
pub use analyzer::SentimentAnalyzer;
pub use context::AnalysisContext;
pub use lexicon::{LexiconLoader, LexiconOrigin, SentimentLexicon};
pub use normalizer::TextNormalizer;
