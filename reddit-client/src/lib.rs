pub mod api;
pub mod auth;

#[cfg(test)]
mod tests;

pub use api::{RedditApiClient, RedditListing, RedditPostData, REDDIT_API_BASE};
pub use auth::{AuthState, RedditAuthenticator, RedditToken, REDDIT_TOKEN_URL};

use sentiment_core::{CoreError, RawPost, RedditCredentials};
use sentiment_engine::PostSource;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Read-only Reddit client authenticated with application credentials.
///
/// The token is requested lazily on the first fetch and renewed when it
/// expires, so one client can be shared across analysis runs.
pub struct RedditClient {
    credentials: RedditCredentials,
    api: RedditApiClient,
    authenticator: RedditAuthenticator,
    auth_state: RwLock<AuthState>,
}

impl RedditClient {
    pub fn new(credentials: RedditCredentials) -> Result<Self, CoreError> {
        let api = RedditApiClient::new(credentials.user_agent.clone())?;
        let authenticator = RedditAuthenticator::new(&credentials, api.http_client().clone())?;

        Ok(Self {
            credentials,
            api,
            authenticator,
            auth_state: RwLock::new(AuthState::NotAuthenticated),
        })
    }

    pub fn credentials(&self) -> &RedditCredentials {
        &self.credentials
    }

    pub fn api(&self) -> &RedditApiClient {
        &self.api
    }

    pub async fn authenticate(&self) -> Result<RedditToken, CoreError> {
        let token = self.authenticator.request_token().await?;
        *self.auth_state.write().await = AuthState::Authenticated(token.clone());
        info!("Authenticated with Reddit as {}", self.credentials.user_agent);
        Ok(token)
    }

    pub async fn set_token(&self, token: RedditToken) {
        *self.auth_state.write().await = AuthState::from_token(token);
    }

    pub async fn auth_state(&self) -> AuthState {
        let mut state = self.auth_state.write().await;
        if let AuthState::Authenticated(token) = &*state {
            if token.is_expired() {
                *state = AuthState::TokenExpired;
            }
        }
        state.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.auth_state.read().await.valid_token().is_some()
    }

    async fn access_token(&self) -> Result<String, CoreError> {
        {
            let state = self.auth_state.read().await;
            if let Some(token) = state.valid_token() {
                return Ok(token.access_token.clone());
            }
        }

        debug!("No valid token held, authenticating");
        Ok(self.authenticate().await?.access_token)
    }

    /// Up to `limit` posts from the community's hot listing, in listing order.
    pub async fn fetch_posts(&self, subreddit: &str, limit: u32) -> Result<Vec<RawPost>, CoreError> {
        let token = self.access_token().await?;
        let listing = self.api.get_hot_posts(&token, subreddit, limit).await?;

        let mut posts = listing.into_raw_posts();
        posts.truncate(limit as usize);
        debug!("Kept {} posts from r/{}", posts.len(), subreddit);
        Ok(posts)
    }
}

impl PostSource for RedditClient {
    async fn fetch_hot_posts(&self, community: &str, limit: u32) -> Result<Vec<RawPost>, CoreError> {
        self.fetch_posts(community, limit).await
    }
}
