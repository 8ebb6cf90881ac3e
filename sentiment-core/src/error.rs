use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("reddit fetch failed: {0}")]
    RedditApi(#[from] RedditApiError),

    #[error("configuration problem: {0}")]
    Config(#[from] ConfigError),

    #[error("lexicon unavailable: {0}")]
    Lexicon(#[from] LexiconError),

    #[error("export failed: {0}")]
    Export(#[from] ExportError),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP transport failure: {0}")]
    Network(#[from] reqwest::Error),

    #[error("rejected input: {message}")]
    InvalidInput { message: String },

    #[error("internal failure: {message}")]
    Internal { message: String },
}

/// Failures reported by the Reddit listing endpoint or its token exchange.
#[derive(Error, Debug, Clone)]
pub enum RedditApiError {
    #[error("token exchange rejected: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("rate limited, retry in {retry_after}s")]
    RateLimitExceeded { retry_after: u64 },

    #[error("access to {resource} is forbidden")]
    Forbidden { resource: String },

    #[error("r/{subreddit} does not exist")]
    SubredditNotFound { subreddit: String },

    #[error("bearer token was refused")]
    InvalidToken,

    #[error("listing request timed out")]
    RequestTimeout,

    #[error("unexpected listing payload: {details}")]
    InvalidResponse { details: String },

    #[error("reddit returned HTTP {status_code}")]
    ServerError { status_code: u16 },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("settings file {path} could not be read")]
    FileNotFound { path: String },

    #[error("{field} = {value} is out of range")]
    InvalidValue { field: String, value: String },

    #[error("{var_name} is not set")]
    MissingEnvironmentVariable { var_name: String },

    #[error("settings file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("no lexicon file at {path}")]
    FileNotFound { path: String },

    #[error("line {line} is not `token<TAB>valence`: {content}")]
    MalformedEntry { line: usize, content: String },

    #[error("{source_name} holds no entries")]
    Empty { source_name: String },

    #[error("could not download {url}")]
    DownloadFailed { url: String },

    #[error("no lexicon could be loaded: {reason}")]
    Unavailable { reason: String },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV writer: {0}")]
    Csv(#[from] csv::Error),

    #[error("{path}: {reason}")]
    WriteFailed { path: String, reason: String },
}
