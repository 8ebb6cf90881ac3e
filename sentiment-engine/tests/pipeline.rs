use chrono::{TimeZone, Utc};
use sentiment_core::{CoreError, RawPost, RedditApiError, SentimentLabel};
use sentiment_engine::{
    analyze_communities, parse_community_list, run_analysis, AnalysisContext, AnalysisRequest,
    PostSource,
};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct MockSource {
    posts: HashMap<String, Vec<RawPost>>,
    failing: Option<String>,
    calls: Mutex<Vec<(String, u32)>>,
}

impl MockSource {
    fn with_posts(mut self, community: &str, titles: &[&str]) -> Self {
        let posts = titles
            .iter()
            .enumerate()
            .map(|(i, title)| RawPost {
                title: Some(title.to_string()),
                permalink: format!("/r/{}/comments/{}/", community, i),
                author: Some(format!("user{}", i)),
                score: i as i64 * 10,
                num_comments: i as u64,
                created_utc: Utc.timestamp_opt(1_700_000_000 + i as i64, 0).unwrap(),
            })
            .collect();
        self.posts.insert(community.to_string(), posts);
        self
    }

    fn failing_on(mut self, community: &str) -> Self {
        self.failing = Some(community.to_string());
        self
    }

    fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

impl PostSource for MockSource {
    async fn fetch_hot_posts(&self, community: &str, limit: u32) -> Result<Vec<RawPost>, CoreError> {
        self.calls
            .lock()
            .unwrap()
            .push((community.to_string(), limit));

        if self.failing.as_deref() == Some(community) {
            return Err(CoreError::RedditApi(RedditApiError::ServerError {
                status_code: 503,
            }));
        }

        Ok(self
            .posts
            .get(community)
            .map(|posts| posts.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default())
    }
}

fn context() -> AnalysisContext {
    AnalysisContext::builtin().unwrap()
}

#[tokio::test]
async fn test_single_positive_post() {
    let source =
        MockSource::default().with_posts("technology", &["This is AMAZING news!! http://x.co"]);
    let communities = vec!["technology".to_string()];

    let result = analyze_communities(&source, &context(), &communities, 1)
        .await
        .unwrap();

    assert_eq!(result.len(), 1);
    let record = &result.records()[0];
    assert_eq!(record.cleaned_text.as_str(), "amazing news");
    assert_eq!(record.sentiment, SentimentLabel::Positive);
    assert_eq!(source.calls(), vec![("technology".to_string(), 1)]);
}

#[tokio::test]
async fn test_empty_community_list() {
    let source = MockSource::default().with_posts("technology", &["Anything"]);

    let result = analyze_communities(&source, &context(), &[], 20)
        .await
        .unwrap();

    assert!(result.is_empty());
    assert!(source.calls().is_empty());
}

#[tokio::test]
async fn test_blank_input_yields_no_records() {
    let source = MockSource::default();
    let request = AnalysisRequest::parse(" , ", 20).unwrap();

    let result = run_analysis(&source, &context(), &request).await.unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_records_grouped_in_input_order() {
    let source = MockSource::default()
        .with_posts("rust", &["Rust one", "Rust two", "Rust three"])
        .with_posts("golang", &["Go one", "Go two", "Go three"]);
    let communities = parse_community_list("golang,rust");

    let result = analyze_communities(&source, &context(), &communities, 5)
        .await
        .unwrap();

    assert_eq!(result.len(), 6);
    let order: Vec<(&str, &str)> = result
        .iter()
        .map(|r| (r.subreddit.as_str(), r.title.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("golang", "Go one"),
            ("golang", "Go two"),
            ("golang", "Go three"),
            ("rust", "Rust one"),
            ("rust", "Rust two"),
            ("rust", "Rust three"),
        ]
    );
}

#[tokio::test]
async fn test_unknown_community_contributes_nothing() {
    let source = MockSource::default().with_posts("rust", &["Rust one"]);
    let communities = vec!["nosuchcommunity".to_string(), "rust".to_string()];

    let result = analyze_communities(&source, &context(), &communities, 5)
        .await
        .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result.records()[0].subreddit, "rust");
}

#[tokio::test]
async fn test_limit_caps_posts_per_community() {
    let source = MockSource::default().with_posts("rust", &["a post", "b post", "c post"]);
    let communities = vec!["rust".to_string()];

    let result = analyze_communities(&source, &context(), &communities, 2)
        .await
        .unwrap();

    assert_eq!(result.len(), 2);
}

#[tokio::test]
async fn test_fetch_error_aborts_run() {
    let source = MockSource::default()
        .with_posts("rust", &["Great release"])
        .with_posts("golang", &["Go one"])
        .failing_on("golang");
    let communities = vec!["rust".to_string(), "golang".to_string(), "python".to_string()];

    let err = analyze_communities(&source, &context(), &communities, 5)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CoreError::RedditApi(RedditApiError::ServerError { status_code: 503 })
    ));
    // Nothing after the failing community is requested.
    assert_eq!(source.calls().len(), 2);
}

#[tokio::test]
async fn test_sentiment_counts() {
    let source = MockSource::default().with_posts(
        "news",
        &["Terrible disaster strikes", "Wonderful win", "Quarterly report"],
    );
    let communities = vec!["news".to_string()];

    let result = analyze_communities(&source, &context(), &communities, 5)
        .await
        .unwrap();

    let counts = result.sentiment_counts();
    assert_eq!(counts.negative, 1);
    assert_eq!(counts.positive, 1);
    assert_eq!(counts.neutral, 1);
    assert_eq!(counts.total(), 3);
}
