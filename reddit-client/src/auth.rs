//! Application-only OAuth2 for Reddit.
//!
//! Read-only listing access needs no user login: the app exchanges its client
//! id and secret for a bearer token with the client-credentials grant.

use oauth2::basic::{BasicClient, BasicTokenResponse};
use oauth2::{
    AuthUrl, ClientId, ClientSecret, HttpRequest, HttpResponse, TokenResponse, TokenUrl,
};
use reqwest::Client;
use sentiment_core::{CoreError, RedditApiError, RedditCredentials};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};
use tracing::{debug, error, info};

pub const REDDIT_AUTHORIZE_URL: &str = "https://www.reddit.com/api/v1/authorize";
pub const REDDIT_TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(3600);
/// Tokens this close to expiry are treated as already expired.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedditToken {
    pub access_token: String,
    pub expires_at: SystemTime,
    pub scope: Vec<String>,
}

impl RedditToken {
    pub fn is_expired(&self) -> bool {
        SystemTime::now() + EXPIRY_MARGIN >= self.expires_at
    }

    fn from_response(response: &BasicTokenResponse) -> Self {
        let lifetime = response.expires_in().unwrap_or(DEFAULT_TOKEN_LIFETIME);
        Self {
            access_token: response.access_token().secret().clone(),
            expires_at: SystemTime::now() + lifetime,
            scope: response
                .scopes()
                .map(|scopes| scopes.iter().map(|s| s.as_str().to_owned()).collect())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    NotAuthenticated,
    Authenticated(RedditToken),
    TokenExpired,
}

impl AuthState {
    pub fn from_token(token: RedditToken) -> Self {
        if token.is_expired() {
            AuthState::TokenExpired
        } else {
            AuthState::Authenticated(token)
        }
    }

    /// The bearer token, if one is held and still valid.
    pub fn valid_token(&self) -> Option<&RedditToken> {
        match self {
            AuthState::Authenticated(token) if !token.is_expired() => Some(token),
            _ => None,
        }
    }
}

pub struct RedditAuthenticator {
    oauth_client: BasicClient,
    http_client: Client,
}

impl RedditAuthenticator {
    pub fn new(credentials: &RedditCredentials, http_client: Client) -> Result<Self, CoreError> {
        Self::with_token_url(credentials, http_client, REDDIT_TOKEN_URL)
    }

    pub fn with_token_url(
        credentials: &RedditCredentials,
        http_client: Client,
        token_url: &str,
    ) -> Result<Self, CoreError> {
        let invalid_url = |e: oauth2::url::ParseError| CoreError::Internal {
            message: format!("invalid OAuth endpoint: {}", e),
        };

        let oauth_client = BasicClient::new(
            ClientId::new(credentials.client_id.clone()),
            Some(ClientSecret::new(credentials.client_secret.clone())),
            AuthUrl::new(REDDIT_AUTHORIZE_URL.to_string()).map_err(invalid_url)?,
            Some(TokenUrl::new(token_url.to_string()).map_err(invalid_url)?),
        );

        Ok(Self {
            oauth_client,
            http_client,
        })
    }

    pub fn token_url(&self) -> Option<&str> {
        self.oauth_client.token_url().map(|url| url.as_str())
    }

    pub async fn request_token(&self) -> Result<RedditToken, CoreError> {
        info!("Requesting application-only Reddit token");
        let http_client = self.http_client.clone();

        let response = self
            .oauth_client
            .exchange_client_credentials()
            .request_async(|request| send_oauth_request(http_client.clone(), request))
            .await
            .map_err(|e| {
                error!("Token request failed: {}", e);
                CoreError::RedditApi(RedditApiError::AuthenticationFailed {
                    reason: e.to_string(),
                })
            })?;

        let token = RedditToken::from_response(&response);
        debug!("Received token expiring at {:?}", token.expires_at);
        Ok(token)
    }
}

/// Sends the token request through our own client so it carries the
/// configured User-Agent, which Reddit requires.
async fn send_oauth_request(
    client: Client,
    request: HttpRequest,
) -> Result<HttpResponse, reqwest::Error> {
    let response = client
        .request(request.method, request.url.as_str())
        .headers(request.headers)
        .body(request.body)
        .send()
        .await?;

    let status_code = response.status();
    let headers = response.headers().clone();
    let body = response.bytes().await?.to_vec();

    Ok(HttpResponse {
        status_code,
        headers,
        body,
    })
}
