use chrono::{DateTime, TimeZone, Utc};
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, Response, StatusCode};
use sentiment_core::{CoreError, RawPost, RedditApiError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub const REDDIT_API_BASE: &str = "https://oauth.reddit.com";
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListing<T> {
    pub kind: String,
    pub data: RedditListingData<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingData<T> {
    pub children: Vec<RedditListingChild<T>>,
    pub after: Option<String>,
    pub before: Option<String>,
    pub dist: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingChild<T> {
    pub kind: String,
    pub data: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditPostData {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub subreddit: String,
    pub permalink: String,
    #[serde(default)]
    pub url: Option<String>,
    pub created_utc: f64,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub num_comments: u64,
    #[serde(default)]
    pub stickied: bool,
    #[serde(default)]
    pub over_18: bool,
}

/// Thin wrapper over the OAuth-scoped Reddit API.
#[derive(Debug, Clone)]
pub struct RedditApiClient {
    http_client: Client,
    user_agent: String,
    base_url: String,
}

impl RedditApiClient {
    pub fn new(user_agent: String) -> Result<Self, CoreError> {
        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            user_agent,
            base_url: REDDIT_API_BASE.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn http_client(&self) -> &Client {
        &self.http_client
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub async fn make_request(
        &self,
        method: Method,
        endpoint: &str,
        access_token: &str,
        query_params: Option<&[(&str, &str)]>,
    ) -> Result<Response, CoreError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let mut request_builder = self
            .http_client
            .request(method.clone(), &url)
            .bearer_auth(access_token);

        if let Some(params) = query_params {
            request_builder = request_builder.query(params);
        }

        info!("Making Reddit API request: {} {}", method, endpoint);
        match request_builder.send().await {
            Ok(response) => {
                debug!("Response {} for {}", response.status(), endpoint);
                Ok(response)
            }
            Err(e) => {
                error!("Network error for {} {}: {}", method, endpoint, e);
                if e.is_timeout() {
                    Err(CoreError::RedditApi(RedditApiError::RequestTimeout))
                } else {
                    Err(CoreError::Network(e))
                }
            }
        }
    }

    /// Lists up to `limit` posts in the community's "hot" order.
    pub async fn get_hot_posts(
        &self,
        access_token: &str,
        subreddit: &str,
        limit: u32,
    ) -> Result<RedditListing<RedditPostData>, CoreError> {
        let endpoint = format!("/r/{}/hot", subreddit);
        let limit_str = limit.to_string();
        let params = [("limit", limit_str.as_str()), ("raw_json", "1")];

        let response = self
            .make_request(Method::GET, &endpoint, access_token, Some(&params[..]))
            .await?;

        if let Some(api_error) = status_error(response.status(), response.headers(), subreddit) {
            error!(
                "Request failed with status {} for r/{}: {}",
                response.status(),
                subreddit,
                api_error
            );
            return Err(CoreError::RedditApi(api_error));
        }

        let listing: RedditListing<RedditPostData> = response.json().await.map_err(|e| {
            error!("Failed to parse subreddit posts: {}", e);
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("Failed to parse posts for r/{}", subreddit),
            })
        })?;

        info!(
            "Retrieved {} posts from r/{}",
            listing.data.children.len(),
            subreddit
        );
        Ok(listing)
    }
}

/// Maps a non-success status to the matching API error. Success statuses
/// yield `None`.
pub fn status_error(
    status: StatusCode,
    headers: &HeaderMap,
    subreddit: &str,
) -> Option<RedditApiError> {
    if status.is_success() {
        return None;
    }

    let error = match status {
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = ["retry-after", "x-ratelimit-reset"]
                .iter()
                .filter_map(|name| headers.get(*name))
                .filter_map(|value| value.to_str().ok())
                .filter_map(|value| value.trim().parse::<f64>().ok())
                .map(|secs| secs.ceil() as u64)
                .next()
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            warn!("Rate limited, retry after {} seconds", retry_after);
            RedditApiError::RateLimitExceeded { retry_after }
        }
        StatusCode::UNAUTHORIZED => RedditApiError::InvalidToken,
        StatusCode::FORBIDDEN => RedditApiError::Forbidden {
            resource: format!("r/{}", subreddit),
        },
        StatusCode::NOT_FOUND => RedditApiError::SubredditNotFound {
            subreddit: subreddit.to_string(),
        },
        s if s.is_server_error() => RedditApiError::ServerError {
            status_code: s.as_u16(),
        },
        s => RedditApiError::InvalidResponse {
            details: format!("Unexpected status {} for r/{}", s.as_u16(), subreddit),
        },
    };
    Some(error)
}

fn timestamp_from_epoch(seconds: f64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds.trunc() as i64, 0)
        .single()
        .unwrap_or_default()
}

impl From<RedditPostData> for RawPost {
    fn from(post_data: RedditPostData) -> Self {
        Self {
            title: post_data.title,
            permalink: post_data.permalink,
            author: post_data.author,
            score: post_data.score,
            num_comments: post_data.num_comments,
            created_utc: timestamp_from_epoch(post_data.created_utc),
        }
    }
}

impl RedditListing<RedditPostData> {
    /// Posts in listing order; non-post children are skipped.
    pub fn into_raw_posts(self) -> Vec<RawPost> {
        self.data
            .children
            .into_iter()
            .filter(|child| child.kind == "t3")
            .map(|child| child.data.into())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn post_data() -> RedditPostData {
        RedditPostData {
            id: "test123".to_string(),
            title: Some("Test Post".to_string()),
            author: Some("test_user".to_string()),
            subreddit: "test".to_string(),
            permalink: "/r/test/comments/test123/test_post/".to_string(),
            url: Some("https://example.com/article".to_string()),
            created_utc: 1640995200.7,
            score: 42,
            num_comments: 5,
            stickied: false,
            over_18: false,
        }
    }

    #[test]
    fn test_api_client_creation() {
        let client = RedditApiClient::new("test-user-agent/1.0".to_string()).unwrap();
        assert_eq!(client.user_agent(), "test-user-agent/1.0");
        assert_eq!(client.base_url, REDDIT_API_BASE);
    }

    #[test]
    fn test_raw_post_conversion() {
        let raw: RawPost = post_data().into();
        assert_eq!(raw.title.as_deref(), Some("Test Post"));
        assert_eq!(raw.permalink, "/r/test/comments/test123/test_post/");
        assert_eq!(raw.author.as_deref(), Some("test_user"));
        assert_eq!(raw.score, 42);
        assert_eq!(raw.num_comments, 5);
        assert_eq!(raw.created_utc.timestamp(), 1640995200);
    }

    #[test]
    fn test_listing_deserialization() {
        let json = r#"{
            "kind": "Listing",
            "data": {
                "after": "t3_def",
                "before": null,
                "dist": 2,
                "children": [
                    {"kind": "t3", "data": {
                        "id": "abc", "title": "First &amp; best", "author": "alice",
                        "subreddit": "rust", "permalink": "/r/rust/comments/abc/first/",
                        "created_utc": 1700000000.0, "score": 10, "num_comments": 2,
                        "stickied": true
                    }},
                    {"kind": "t3", "data": {
                        "id": "def", "title": null, "author": null,
                        "subreddit": "rust", "permalink": "/r/rust/comments/def/second/",
                        "created_utc": 1700000100.0
                    }}
                ]
            }
        }"#;

        let listing: RedditListing<RedditPostData> = serde_json::from_str(json).unwrap();
        let posts = listing.into_raw_posts();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title.as_deref(), Some("First &amp; best"));
        assert_eq!(posts[0].author.as_deref(), Some("alice"));
        assert_eq!(posts[1].title, None);
        assert_eq!(posts[1].author, None);
        assert_eq!(posts[1].score, 0);
        assert_eq!(posts[1].num_comments, 0);
    }

    #[test]
    fn test_status_error_mapping() {
        let headers = HeaderMap::new();
        assert!(status_error(StatusCode::OK, &headers, "rust").is_none());
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, &headers, "rust"),
            Some(RedditApiError::InvalidToken)
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, &headers, "secret"),
            Some(RedditApiError::Forbidden { resource }) if resource == "r/secret"
        ));
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, &headers, "nosuch"),
            Some(RedditApiError::SubredditNotFound { subreddit }) if subreddit == "nosuch"
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, &headers, "rust"),
            Some(RedditApiError::ServerError { status_code: 502 })
        ));
        assert!(matches!(
            status_error(StatusCode::IM_A_TEAPOT, &headers, "rust"),
            Some(RedditApiError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn test_rate_limit_reads_reset_header() {
        let mut headers = HeaderMap::new();
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, &headers, "rust"),
            Some(RedditApiError::RateLimitExceeded { retry_after: 60 })
        ));

        headers.insert("x-ratelimit-reset", HeaderValue::from_static("12.4"));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, &headers, "rust"),
            Some(RedditApiError::RateLimitExceeded { retry_after: 13 })
        ));
    }
}
