use crate::stopwords::english_stopwords;
use regex::Regex;
use sentiment_core::{CoreError, NormalizedText};
use std::collections::HashSet;

/// Anything that starts with "http" up to the next whitespace.
const URL_PATTERN: &str = r"http\S+";

/// Turns a raw post title into lowercase alphabetic tokens with stopwords
/// removed. Built once per process and shared read-only.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    url_regex: Regex,
    stopwords: HashSet<&'static str>,
}

impl TextNormalizer {
    pub fn new() -> Result<Self, CoreError> {
        Self::with_stopwords(english_stopwords())
    }

    pub fn with_stopwords(stopwords: HashSet<&'static str>) -> Result<Self, CoreError> {
        let url_regex = Regex::new(URL_PATTERN).map_err(|e| CoreError::Internal {
            message: format!("invalid URL pattern: {}", e),
        })?;
        Ok(Self {
            url_regex,
            stopwords,
        })
    }

    /// An absent title normalizes to the empty text.
    pub fn normalize(&self, title: Option<&str>) -> NormalizedText {
        match title {
            Some(text) => self.normalize_str(text),
            None => NormalizedText::default(),
        }
    }

    pub fn normalize_str(&self, text: &str) -> NormalizedText {
        let lowered = text.to_lowercase();
        let without_urls = self.url_regex.replace_all(&lowered, "");

        // Digits, punctuation and non-ASCII letters all become separators.
        let letters_only: String = without_urls
            .chars()
            .map(|c| if c.is_ascii_alphabetic() { c } else { ' ' })
            .collect();

        NormalizedText::from_tokens(
            letters_only
                .split_whitespace()
                .filter(|token| !self.is_stopword(token)),
        )
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stopwords::ENGLISH_STOPWORDS;

    fn normalizer() -> TextNormalizer {
        TextNormalizer::new().unwrap()
    }

    #[test]
    fn test_example_title() {
        let text = normalizer().normalize(Some("This is AMAZING news!! http://x.co"));
        assert_eq!(text.as_str(), "amazing news");
    }

    #[test]
    fn test_absent_title_is_empty() {
        assert!(normalizer().normalize(None).is_empty());
    }

    #[test]
    fn test_urls_removed() {
        let n = normalizer();
        let inputs = [
            "Check https://example.com/path?q=1 now",
            "HTTPS://EXAMPLE.COM shouting link",
            "two links http://a.io and http://b.io/x",
            "glued:https://example.com/abc",
        ];
        for input in inputs {
            let out = n.normalize_str(input);
            assert!(!out.as_str().contains("http"), "{:?} -> {:?}", input, out);
        }
        assert_eq!(
            n.normalize_str("Check https://example.com/path?q=1 now").as_str(),
            "check"
        );
    }

    #[test]
    fn test_output_alphabet() {
        let n = normalizer();
        let inputs = [
            "Rust 1.75 released!!! 🎉🎉",
            "  tabs\tand\nnewlines  ",
            "Café naïve résumé",
            "C++ vs. C#: which wins?",
            "12345 !!!",
            "",
        ];
        for input in inputs {
            let out = n.normalize_str(input);
            let s = out.as_str();
            assert!(
                s.chars().all(|c| c.is_ascii_lowercase() || c == ' '),
                "{:?} -> {:?}",
                input,
                s
            );
            assert!(!s.contains("  "));
            assert!(!s.starts_with(' ') && !s.ends_with(' '));
        }
    }

    #[test]
    fn test_non_letters_split_tokens() {
        let n = normalizer();
        assert_eq!(n.normalize_str("Café résumé").as_str(), "caf r sum");
        assert_eq!(n.normalize_str("state-of-the-art").as_str(), "state art");
        assert_eq!(n.normalize_str("Rust 1.75 released").as_str(), "rust released");
    }

    #[test]
    fn test_each_stopword_alone_is_empty() {
        let n = normalizer();
        for word in ENGLISH_STOPWORDS {
            assert!(n.normalize_str(word).is_empty(), "stopword {:?} survived", word);
            assert!(n.normalize_str(&word.to_uppercase()).is_empty());
        }
    }

    #[test]
    fn test_contractions_collapse_to_stopwords() {
        // The apostrophe becomes a separator, leaving "don" and "t".
        assert!(normalizer().normalize_str("Don't").is_empty());
    }

    #[test]
    fn test_bare_http_without_suffix_is_kept() {
        // The URL rule needs at least one character after "http".
        assert_eq!(normalizer().normalize_str("http").as_str(), "http");
    }

    #[test]
    fn test_custom_stopwords() {
        let n = TextNormalizer::with_stopwords(["rust"].into_iter().collect()).unwrap();
        assert_eq!(n.normalize_str("Rust is great").as_str(), "is great");
        assert_eq!(n.stopword_count(), 1);
    }
}
