use crate::error::*;
use std::fmt::Display;
use tracing::{error, info, warn};

/// Logging and presentation helpers shared by every error enum.
pub trait ErrorExt: Display {
    /// Stable machine-readable code, e.g. `REDDIT_RATE_LIMIT`.
    fn error_code(&self) -> &'static str;

    /// Sentence suitable for the status line.
    fn user_friendly_message(&self) -> String;

    fn log_error(&self) -> &Self {
        error!(code = self.error_code(), "{}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!(code = self.error_code(), "{}", self);
        self
    }
}

impl CoreError {
    /// Configuration problems stop the program before any analysis runs.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CoreError::Config(_))
    }
}

impl ErrorExt for CoreError {
    fn error_code(&self) -> &'static str {
        match self {
            CoreError::RedditApi(_) => "REDDIT_API",
            CoreError::Config(_) => "CONFIG",
            CoreError::Lexicon(_) => "LEXICON",
            CoreError::Export(_) => "EXPORT",
            CoreError::Io(_) => "IO",
            CoreError::Serialization(_) => "SERIALIZATION",
            CoreError::Network(_) => "NETWORK",
            CoreError::InvalidInput { .. } => "INVALID_INPUT",
            CoreError::Internal { .. } => "INTERNAL",
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::RedditApi(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Lexicon(e) => e.user_friendly_message(),
            CoreError::Export(e) => e.user_friendly_message(),
            CoreError::Network(_) => "Could not reach Reddit. Check your connection.".to_string(),
            CoreError::InvalidInput { message } => format!("Invalid request: {}.", message),
            CoreError::Io(_) | CoreError::Serialization(_) | CoreError::Internal { .. } => {
                "Something went wrong while analyzing. See the log for details.".to_string()
            }
        }
    }

    fn log_error(&self) -> &Self {
        let source = match self {
            CoreError::RedditApi(e) => Some(e.error_code()),
            CoreError::Config(e) => Some(e.error_code()),
            CoreError::Lexicon(e) => Some(e.error_code()),
            CoreError::Export(e) => Some(e.error_code()),
            _ => None,
        };
        error!(code = self.error_code(), detail = source, "{}", self);
        self
    }
}

impl ErrorExt for RedditApiError {
    fn error_code(&self) -> &'static str {
        match self {
            RedditApiError::AuthenticationFailed { .. } => "REDDIT_AUTH_FAILED",
            RedditApiError::RateLimitExceeded { .. } => "REDDIT_RATE_LIMIT",
            RedditApiError::Forbidden { .. } => "REDDIT_FORBIDDEN",
            RedditApiError::SubredditNotFound { .. } => "REDDIT_SUBREDDIT_NOT_FOUND",
            RedditApiError::InvalidToken => "REDDIT_INVALID_TOKEN",
            RedditApiError::RequestTimeout => "REDDIT_TIMEOUT",
            RedditApiError::InvalidResponse { .. } => "REDDIT_INVALID_RESPONSE",
            RedditApiError::ServerError { .. } => "REDDIT_SERVER_ERROR",
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            RedditApiError::AuthenticationFailed { .. } | RedditApiError::InvalidToken => {
                "Reddit rejected the app credentials. Check REDDIT_CLIENT_ID and REDDIT_CLIENT_SECRET."
                    .to_string()
            }
            RedditApiError::RateLimitExceeded { retry_after } => {
                format!("Reddit is rate limiting requests. Try again in {}s.", retry_after)
            }
            RedditApiError::Forbidden { resource } => {
                format!("{} is private, banned or quarantined.", resource)
            }
            RedditApiError::SubredditNotFound { subreddit } => {
                format!("r/{} does not exist.", subreddit)
            }
            RedditApiError::RequestTimeout => "Reddit took too long to answer.".to_string(),
            RedditApiError::InvalidResponse { .. } | RedditApiError::ServerError { .. } => {
                "Reddit returned an unexpected response. Try again later.".to_string()
            }
        }
    }
}

impl ErrorExt for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND",
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
            ConfigError::MissingEnvironmentVariable { .. } => "CONFIG_MISSING_ENV_VAR",
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR",
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::FileNotFound { path } => format!("Settings file '{}' is missing.", path),
            ConfigError::InvalidValue { field, value } => {
                format!("Setting '{}' has an unusable value '{}'.", field, value)
            }
            ConfigError::MissingEnvironmentVariable { var_name } => format!(
                "Reddit API credentials missing: '{}' must be set in the environment or .env file.",
                var_name
            ),
            ConfigError::Parse(_) => "Settings file is not valid TOML.".to_string(),
        }
    }
}

impl ErrorExt for LexiconError {
    fn error_code(&self) -> &'static str {
        match self {
            LexiconError::FileNotFound { .. } => "LEXICON_NOT_FOUND",
            LexiconError::MalformedEntry { .. } => "LEXICON_MALFORMED",
            LexiconError::Empty { .. } => "LEXICON_EMPTY",
            LexiconError::DownloadFailed { .. } => "LEXICON_DOWNLOAD_FAILED",
            LexiconError::Unavailable { .. } => "LEXICON_UNAVAILABLE",
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            LexiconError::FileNotFound { path } => {
                format!("Sentiment lexicon not found at '{}'.", path)
            }
            LexiconError::MalformedEntry { line, .. } => {
                format!("Sentiment lexicon is corrupt near line {}.", line)
            }
            LexiconError::Empty { .. } => "Sentiment lexicon contains no entries.".to_string(),
            LexiconError::DownloadFailed { .. } => {
                "The sentiment lexicon could not be downloaded.".to_string()
            }
            LexiconError::Unavailable { .. } => "No sentiment lexicon is available. Set \
                 lexicon_path, connect to download it, or set allow_seed_lexicon = true \
                 to accept approximate labels."
                .to_string(),
        }
    }
}

impl ErrorExt for ExportError {
    fn error_code(&self) -> &'static str {
        match self {
            ExportError::Csv(_) => "EXPORT_CSV",
            ExportError::WriteFailed { .. } => "EXPORT_WRITE_FAILED",
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ExportError::Csv(_) => "The CSV file could not be produced.".to_string(),
            ExportError::WriteFailed { path, .. } => format!("Could not save '{}'.", path),
        }
    }
}

/// Central sink for errors surfaced at the program edge (CLI, GUI status).
#[derive(Debug, Clone, Copy)]
pub struct ErrorReporter {
    errors: bool,
    warnings: bool,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            errors: true,
            warnings: true,
        }
    }

    pub fn with_error_reporting(self, errors: bool) -> Self {
        Self { errors, ..self }
    }

    pub fn with_warning_reporting(self, warnings: bool) -> Self {
        Self { warnings, ..self }
    }

    /// Logs the error and returns the message to show the user.
    pub fn report_error(&self, error: &CoreError) -> String {
        let message = error.user_friendly_message();
        if self.errors {
            error.log_error();
            info!(code = error.error_code(), "shown to user: {}", message);
        }
        message
    }

    pub fn report_warning(&self, error: &CoreError) -> String {
        if self.warnings {
            error.log_warn();
        }
        error.user_friendly_message()
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}
