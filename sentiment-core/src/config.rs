use crate::error::{ConfigError, CoreError};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const CLIENT_ID_VAR: &str = "REDDIT_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "REDDIT_CLIENT_SECRET";
pub const USER_AGENT_VAR: &str = "REDDIT_USER_AGENT";
pub const CONFIG_PATH_VAR: &str = "SENTIMENT_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "sentiment.toml";

pub const MIN_POST_LIMIT: u32 = 5;
pub const MAX_POST_LIMIT: u32 = 50;
pub const DEFAULT_POST_LIMIT: u32 = 20;
pub const DEFAULT_SUBREDDITS: &str = "technology,AskReddit";

/// The three values every run needs before it may talk to Reddit.
#[derive(Clone, PartialEq, Eq)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

impl RedditCredentials {
    pub fn new(client_id: String, client_secret: String, user_agent: String) -> Self {
        Self {
            client_id,
            client_secret,
            user_agent,
        }
    }

    /// Reads the credentials from the process environment. A `.env` file in the
    /// working directory is loaded first if present.
    pub fn from_env() -> Result<Self, CoreError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |var_name: &str| -> Result<String, CoreError> {
            lookup(var_name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| {
                    CoreError::Config(ConfigError::MissingEnvironmentVariable {
                        var_name: var_name.to_string(),
                    })
                })
        };

        Ok(Self {
            client_id: require(CLIENT_ID_VAR)?,
            client_secret: require(CLIENT_SECRET_VAR)?,
            user_agent: require(USER_AGENT_VAR)?,
        })
    }
}

impl fmt::Debug for RedditCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedditCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Non-secret defaults, optionally read from a TOML file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_subreddits: String,
    pub default_limit: u32,
    pub lexicon_path: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
    /// Run with the small compiled-in lexicon when the real one cannot be
    /// loaded. Labels are approximate in that mode.
    pub allow_seed_lexicon: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_subreddits: DEFAULT_SUBREDDITS.to_string(),
            default_limit: DEFAULT_POST_LIMIT,
            lexicon_path: None,
            cache_dir: None,
            allow_seed_lexicon: false,
        }
    }
}

impl Settings {
    pub fn from_toml_str(content: &str) -> Result<Self, CoreError> {
        let settings: Settings = toml::from_str(content).map_err(ConfigError::Parse)?;
        check_post_limit(settings.default_limit).map_err(|_| {
            CoreError::Config(ConfigError::InvalidValue {
                field: "default_limit".to_string(),
                value: settings.default_limit.to_string(),
            })
        })?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path).map_err(|_| {
            CoreError::Config(ConfigError::FileNotFound {
                path: path.display().to_string(),
            })
        })?;
        Self::from_toml_str(&content)
    }

    /// Uses `$SENTIMENT_CONFIG` when set (the file must then exist), otherwise
    /// `./sentiment.toml` when present, otherwise built-in defaults.
    pub fn load() -> Result<Self, CoreError> {
        if let Ok(explicit) = std::env::var(CONFIG_PATH_VAR) {
            info!("Loading settings from {}", explicit);
            return Self::from_file(Path::new(&explicit));
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            info!("Loading settings from {}", local.display());
            return Self::from_file(local);
        }

        debug!("No settings file found, using defaults");
        Ok(Self::default())
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: RedditCredentials,
    pub settings: Settings,
}

impl AppConfig {
    pub fn load() -> Result<Self, CoreError> {
        let credentials = RedditCredentials::from_env()?;
        let settings = Settings::load()?;
        Ok(Self {
            credentials,
            settings,
        })
    }
}

pub fn check_post_limit(limit: u32) -> Result<u32, CoreError> {
    if (MIN_POST_LIMIT..=MAX_POST_LIMIT).contains(&limit) {
        Ok(limit)
    } else {
        Err(CoreError::InvalidInput {
            message: format!(
                "post limit must be between {} and {}, got {}",
                MIN_POST_LIMIT, MAX_POST_LIMIT, limit
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_credentials_from_lookup() {
        let lookup = lookup_from(&[
            (CLIENT_ID_VAR, "id"),
            (CLIENT_SECRET_VAR, "secret"),
            (USER_AGENT_VAR, "sentiment/0.1 by tester"),
        ]);
        let credentials = RedditCredentials::from_lookup(lookup).unwrap();
        assert_eq!(credentials.client_id, "id");
        assert_eq!(credentials.client_secret, "secret");
        assert_eq!(credentials.user_agent, "sentiment/0.1 by tester");
    }

    #[test]
    fn test_missing_credential_is_fatal() {
        let lookup = lookup_from(&[(CLIENT_ID_VAR, "id"), (USER_AGENT_VAR, "ua")]);
        let err = RedditCredentials::from_lookup(lookup).unwrap_err();
        assert!(err.is_fatal());
        match err {
            CoreError::Config(ConfigError::MissingEnvironmentVariable { var_name }) => {
                assert_eq!(var_name, CLIENT_SECRET_VAR);
            }
            other => panic!("Expected missing variable error, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_credential_counts_as_missing() {
        let lookup = lookup_from(&[
            (CLIENT_ID_VAR, "   "),
            (CLIENT_SECRET_VAR, "secret"),
            (USER_AGENT_VAR, "ua"),
        ]);
        assert!(RedditCredentials::from_lookup(lookup).is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let credentials =
            RedditCredentials::new("id".to_string(), "hunter2".to_string(), "ua".to_string());
        let rendered = format!("{:?}", credentials);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_settings_from_toml() {
        let settings = Settings::from_toml_str(
            r#"
            default_subreddits = "rust,programming"
            default_limit = 10
            lexicon_path = "/tmp/vader_lexicon.txt"
            "#,
        )
        .unwrap();
        assert_eq!(settings.default_subreddits, "rust,programming");
        assert_eq!(settings.default_limit, 10);
        assert_eq!(
            settings.lexicon_path,
            Some(PathBuf::from("/tmp/vader_lexicon.txt"))
        );
        assert_eq!(settings.cache_dir, None);
        assert!(!settings.allow_seed_lexicon);
    }

    #[test]
    fn test_seed_lexicon_is_opt_in() {
        assert!(!Settings::default().allow_seed_lexicon);
        let settings = Settings::from_toml_str("allow_seed_lexicon = true").unwrap();
        assert!(settings.allow_seed_lexicon);
    }

    #[test]
    fn test_settings_defaults_for_empty_file() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_rejects_out_of_range_limit() {
        let err = Settings::from_toml_str("default_limit = 500").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Config(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_settings_from_missing_file() {
        let err = Settings::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Config(ConfigError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_post_limit_bounds() {
        assert!(check_post_limit(4).is_err());
        assert_eq!(check_post_limit(5).unwrap(), 5);
        assert_eq!(check_post_limit(50).unwrap(), 50);
        assert!(check_post_limit(51).is_err());
    }
}
