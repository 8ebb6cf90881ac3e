//! Word-to-valence lexicon for the polarity model.
//!
//! The full lexicon is the published VADER `vader_lexicon.txt`. It is looked up
//! once per process: an explicitly configured file first, then a cached copy,
//! then a download that refreshes the cache. When none of those is available
//! loading fails, unless the caller opted into the compiled-in seed of common
//! valences. Runs on the seed are marked as such all the way to the summary.

use sentiment_core::{CoreError, LexiconError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const VADER_RELEASE: &str = "3.3.2";
pub const VADER_LEXICON_URL: &str =
    "https://raw.githubusercontent.com/cjhutto/vaderSentiment/3.3.2/vaderSentiment/vader_lexicon.txt";
/// Versioned so a cache filled from another release is never picked up.
pub const LEXICON_FILE_NAME: &str = "vader_lexicon-3.3.2.txt";
pub const CACHE_SUBDIR: &str = "subreddit-sentiment";

/// Where a loaded lexicon came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexiconOrigin {
    File,
    Cache,
    Download,
    Builtin,
}

impl LexiconOrigin {
    /// True for the compiled-in seed, which covers only a few dozen words.
    pub fn is_seed(self) -> bool {
        self == LexiconOrigin::Builtin
    }
}

#[derive(Debug, Clone)]
pub struct SentimentLexicon {
    valences: HashMap<String, f64>,
    origin: LexiconOrigin,
}

impl SentimentLexicon {
    /// Parses the tab-separated VADER format: `token<TAB>mean<TAB>std<TAB>ratings`.
    /// Only the first two columns are used.
    pub fn parse(content: &str, origin: LexiconOrigin) -> Result<Self, CoreError> {
        let mut valences = HashMap::new();

        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let mut columns = line.split('\t');
            let token = columns.next().map(str::trim).unwrap_or_default();
            let measure = columns
                .next()
                .and_then(|value| value.trim().parse::<f64>().ok());

            match measure {
                Some(valence) if !token.is_empty() => {
                    valences.insert(token.to_lowercase(), valence);
                }
                _ => {
                    return Err(CoreError::Lexicon(LexiconError::MalformedEntry {
                        line: index + 1,
                        content: line.chars().take(80).collect(),
                    }));
                }
            }
        }

        if valences.is_empty() {
            return Err(CoreError::Lexicon(LexiconError::Empty {
                source_name: format!("{:?}", origin),
            }));
        }

        Ok(Self { valences, origin })
    }

    pub fn from_file(path: &Path, origin: LexiconOrigin) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path).map_err(|_| {
            CoreError::Lexicon(LexiconError::FileNotFound {
                path: path.display().to_string(),
            })
        })?;
        Self::parse(&content, origin)
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let valences = entries
            .into_iter()
            .map(|(word, valence)| (word.as_ref().to_lowercase(), valence))
            .collect();
        Self {
            valences,
            origin: LexiconOrigin::Builtin,
        }
    }

    /// Seed valences taken from the VADER lexicon for frequent headline words.
    pub fn builtin() -> Self {
        Self::from_entries(SEED_VALENCES.iter().copied())
    }

    pub fn valence(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.valences.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }

    pub fn origin(&self) -> LexiconOrigin {
        self.origin
    }
}

/// Resolves and loads the lexicon at startup.
#[derive(Debug, Clone)]
pub struct LexiconLoader {
    explicit_path: Option<PathBuf>,
    cache_dir: Option<PathBuf>,
    url: String,
    allow_download: bool,
    allow_seed: bool,
}

impl Default for LexiconLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconLoader {
    pub fn new() -> Self {
        Self {
            explicit_path: None,
            cache_dir: dirs::cache_dir().map(|dir| dir.join(CACHE_SUBDIR)),
            url: VADER_LEXICON_URL.to_string(),
            allow_download: true,
            allow_seed: false,
        }
    }

    pub fn with_path(mut self, path: Option<PathBuf>) -> Self {
        self.explicit_path = path;
        self
    }

    pub fn with_cache_dir(mut self, cache_dir: Option<PathBuf>) -> Self {
        if cache_dir.is_some() {
            self.cache_dir = cache_dir;
        }
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn offline(mut self) -> Self {
        self.allow_download = false;
        self
    }

    /// Accept the compiled-in seed when nothing better can be loaded.
    pub fn with_seed_fallback(mut self, allow: bool) -> Self {
        self.allow_seed = allow;
        self
    }

    pub fn cache_path(&self) -> Option<PathBuf> {
        self.cache_dir
            .as_ref()
            .map(|dir| dir.join(LEXICON_FILE_NAME))
    }

    pub async fn load(&self) -> Result<SentimentLexicon, CoreError> {
        if let Some(path) = &self.explicit_path {
            info!("Loading sentiment lexicon from {}", path.display());
            return SentimentLexicon::from_file(path, LexiconOrigin::File);
        }

        let cache_path = self.cache_path();
        if let Some(path) = cache_path.as_deref().filter(|p| p.exists()) {
            match SentimentLexicon::from_file(path, LexiconOrigin::Cache) {
                Ok(lexicon) => {
                    info!(
                        "Loaded {} lexicon entries from cache {}",
                        lexicon.len(),
                        path.display()
                    );
                    return Ok(lexicon);
                }
                Err(e) => warn!("Ignoring unreadable lexicon cache {}: {}", path.display(), e),
            }
        }

        let mut reason = match cache_path.as_deref() {
            Some(path) => format!("no usable cache at {}", path.display()),
            None => "no cache directory".to_string(),
        };

        if self.allow_download {
            match self.download().await {
                Ok(content) => {
                    let lexicon = SentimentLexicon::parse(&content, LexiconOrigin::Download)?;
                    if let Some(path) = cache_path.as_deref() {
                        store_cache(path, &content);
                    }
                    info!("Downloaded {} lexicon entries", lexicon.len());
                    return Ok(lexicon);
                }
                Err(e) => {
                    warn!("Lexicon download failed: {}", e);
                    reason = format!("{reason}, {e}");
                }
            }
        } else {
            reason = format!("{reason}, download disabled");
        }

        if !self.allow_seed {
            return Err(CoreError::Lexicon(LexiconError::Unavailable { reason }));
        }
        warn!(
            "Falling back to the built-in seed lexicon ({}); sentiment labels are approximate",
            reason
        );
        Ok(SentimentLexicon::builtin())
    }

    async fn download(&self) -> Result<String, CoreError> {
        debug!("Downloading sentiment lexicon from {}", self.url);
        let failed = |_: reqwest::Error| {
            CoreError::Lexicon(LexiconError::DownloadFailed {
                url: self.url.clone(),
            })
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        let response = client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(failed)?;
        response.text().await.map_err(failed)
    }
}

fn store_cache(path: &Path, content: &str) {
    let result = path
        .parent()
        .map_or(Ok(()), std::fs::create_dir_all)
        .and_then(|_| std::fs::write(path, content));

    match result {
        Ok(()) => debug!("Cached lexicon at {}", path.display()),
        Err(e) => warn!("Could not cache lexicon at {}: {}", path.display(), e),
    }
}

const SEED_VALENCES: &[(&str, f64)] = &[
    ("amazing", 2.8),
    ("angry", -2.3),
    ("awesome", 3.1),
    ("awful", -2.0),
    ("bad", -2.5),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("brilliant", 2.8),
    ("broken", -1.8),
    ("crisis", -3.1),
    ("dead", -3.3),
    ("death", -2.9),
    ("disaster", -3.1),
    ("excellent", 2.7),
    ("excited", 1.4),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("fantastic", 2.6),
    ("fear", -2.2),
    ("free", 2.3),
    ("fun", 2.3),
    ("glad", 2.0),
    ("good", 1.9),
    ("great", 3.1),
    ("happy", 2.7),
    ("hate", -2.7),
    ("help", 1.7),
    ("hope", 1.9),
    ("horrible", -2.5),
    ("hurt", -2.4),
    ("kill", -3.7),
    ("killed", -3.5),
    ("like", 2.0),
    ("lost", -1.3),
    ("love", 3.2),
    ("nice", 1.8),
    ("perfect", 2.7),
    ("problem", -1.7),
    ("problems", -1.7),
    ("sad", -2.1),
    ("scary", -2.2),
    ("stupid", -2.4),
    ("success", 2.7),
    ("terrible", -2.1),
    ("thanks", 1.9),
    ("ugly", -2.3),
    ("war", -2.9),
    ("win", 2.8),
    ("wonderful", 2.7),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
];
