use sentiment_core::{
    ConfigError, CoreError, ErrorExt, ErrorReporter, ExportError, LexiconError, RedditApiError,
    Settings,
};
use std::io::Write;

#[test]
fn test_error_codes() {
    let reddit_error = CoreError::RedditApi(RedditApiError::InvalidToken);
    assert_eq!(reddit_error.error_code(), "REDDIT_API");

    let config_error = CoreError::Config(ConfigError::MissingEnvironmentVariable {
        var_name: "REDDIT_CLIENT_ID".to_string(),
    });
    assert_eq!(config_error.error_code(), "CONFIG");

    let lexicon_error = CoreError::Lexicon(LexiconError::Empty {
        source_name: "builtin".to_string(),
    });
    assert_eq!(lexicon_error.error_code(), "LEXICON");

    let export_error = CoreError::Export(ExportError::WriteFailed {
        path: "out.csv".to_string(),
        reason: "permission denied".to_string(),
    });
    assert_eq!(export_error.error_code(), "EXPORT");
}

#[test]
fn test_only_config_errors_are_fatal() {
    let config_error = CoreError::Config(ConfigError::MissingEnvironmentVariable {
        var_name: "REDDIT_USER_AGENT".to_string(),
    });
    assert!(config_error.is_fatal());

    let upstream_error = CoreError::RedditApi(RedditApiError::ServerError { status_code: 503 });
    assert!(!upstream_error.is_fatal());
}

#[test]
fn test_user_friendly_messages() {
    let reddit_error = CoreError::RedditApi(RedditApiError::SubredditNotFound {
        subreddit: "nosuchplace".to_string(),
    });
    let message = reddit_error.user_friendly_message();
    assert!(message.contains("nosuchplace"));

    let config_error = CoreError::Config(ConfigError::MissingEnvironmentVariable {
        var_name: "REDDIT_CLIENT_SECRET".to_string(),
    });
    let message = config_error.user_friendly_message();
    assert!(message.contains("credentials missing"));
    assert!(message.contains("REDDIT_CLIENT_SECRET"));
}

#[test]
fn test_sub_error_codes() {
    assert_eq!(
        RedditApiError::RateLimitExceeded { retry_after: 30 }.error_code(),
        "REDDIT_RATE_LIMIT"
    );
    assert_eq!(
        LexiconError::DownloadFailed {
            url: "https://example.com".to_string()
        }
        .error_code(),
        "LEXICON_DOWNLOAD_FAILED"
    );
}

#[test]
fn test_missing_lexicon_points_at_seed_opt_in() {
    let error = CoreError::Lexicon(LexiconError::Unavailable {
        reason: "download failed and no cache".to_string(),
    });
    assert_eq!(error.error_code(), "LEXICON");
    assert!(!error.is_fatal());
    let message = error.user_friendly_message();
    assert!(message.contains("allow_seed_lexicon"));
    assert!(message.contains("lexicon_path"));
}

#[test]
fn test_error_reporter_returns_user_message() {
    let reporter = ErrorReporter::new()
        .with_error_reporting(true)
        .with_warning_reporting(false);
    let error = CoreError::RedditApi(RedditApiError::RateLimitExceeded { retry_after: 42 });

    let shown = reporter.report_error(&error);
    assert_eq!(shown, error.user_friendly_message());
    assert!(shown.contains("42"));
    assert_eq!(reporter.report_warning(&error), shown);
}

#[test]
fn test_settings_loaded_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "default_subreddits = \"worldnews\"").unwrap();
    writeln!(file, "default_limit = 25").unwrap();

    let settings = Settings::from_file(file.path()).unwrap();
    assert_eq!(settings.default_subreddits, "worldnews");
    assert_eq!(settings.default_limit, 25);
    assert!(settings.lexicon_path.is_none());
}
