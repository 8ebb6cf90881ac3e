use crate::{AuthState, RedditAuthenticator, RedditClient, RedditToken, REDDIT_TOKEN_URL};
use sentiment_core::RedditCredentials;
use std::time::{Duration, SystemTime};

fn create_test_credentials() -> RedditCredentials {
    RedditCredentials::new(
        "test_client_id".to_string(),
        "test_client_secret".to_string(),
        "subreddit-sentiment/1.0 by test_user".to_string(),
    )
}

fn token(expires_at: SystemTime) -> RedditToken {
    RedditToken {
        access_token: "token_value".to_string(),
        expires_at,
        scope: vec!["*".to_string()],
    }
}

#[test]
fn test_client_creation() {
    let client = RedditClient::new(create_test_credentials()).unwrap();
    assert_eq!(client.credentials().client_id, "test_client_id");
    assert_eq!(
        client.api().user_agent(),
        "subreddit-sentiment/1.0 by test_user"
    );
    assert!(!tokio_test::block_on(client.is_authenticated()));
    assert_eq!(
        tokio_test::block_on(client.auth_state()),
        AuthState::NotAuthenticated
    );
}

#[test]
fn test_authenticator_uses_token_endpoint() {
    let credentials = create_test_credentials();
    let authenticator =
        RedditAuthenticator::new(&credentials, reqwest::Client::new()).unwrap();
    assert_eq!(authenticator.token_url(), Some(REDDIT_TOKEN_URL));
}

#[test]
fn test_authenticator_rejects_bad_endpoint() {
    let credentials = create_test_credentials();
    let result =
        RedditAuthenticator::with_token_url(&credentials, reqwest::Client::new(), "not a url");
    assert!(result.is_err());
}

#[test]
fn test_token_expiry() {
    let now = SystemTime::now();
    assert!(!token(now + Duration::from_secs(3600)).is_expired());
    assert!(token(now - Duration::from_secs(3600)).is_expired());
    // inside the renewal margin
    assert!(token(now + Duration::from_secs(10)).is_expired());
}

#[test]
fn test_set_token_updates_state() {
    let client = RedditClient::new(create_test_credentials()).unwrap();
    let now = SystemTime::now();

    tokio_test::block_on(client.set_token(token(now + Duration::from_secs(3600))));
    assert!(tokio_test::block_on(client.is_authenticated()));
    assert!(matches!(
        tokio_test::block_on(client.auth_state()),
        AuthState::Authenticated(_)
    ));

    tokio_test::block_on(client.set_token(token(now - Duration::from_secs(3600))));
    assert!(!tokio_test::block_on(client.is_authenticated()));
    assert_eq!(
        tokio_test::block_on(client.auth_state()),
        AuthState::TokenExpired
    );
}

#[test]
fn test_auth_state_valid_token() {
    let now = SystemTime::now();
    let state = AuthState::from_token(token(now + Duration::from_secs(3600)));
    assert_eq!(
        state.valid_token().map(|t| t.access_token.as_str()),
        Some("token_value")
    );
    assert!(AuthState::NotAuthenticated.valid_token().is_none());
    assert!(AuthState::TokenExpired.valid_token().is_none());
}

#[test]
fn test_token_serialization() {
    let original = token(SystemTime::now() + Duration::from_secs(3600));
    let json = serde_json::to_string(&original).unwrap();
    let restored: RedditToken = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, original);
}
