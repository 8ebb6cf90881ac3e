use crate::context::AnalysisContext;
use sentiment_core::markup::anchor;
use sentiment_core::{
    check_post_limit, AnalysisResult, AnalyzedRecord, CoreError, RawPost,
};
use std::future::Future;
use tracing::{debug, info, warn};

pub const REDDIT_BASE_URL: &str = "https://www.reddit.com";
pub const DELETED_AUTHOR: &str = "[deleted]";

/// Anything that can list a community's posts in its own "hot" order.
pub trait PostSource {
    fn fetch_hot_posts(
        &self,
        community: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<RawPost>, CoreError>> + Send;
}

/// One user-triggered analysis: which communities, how many posts each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub communities: Vec<String>,
    pub limit: u32,
}

impl AnalysisRequest {
    /// Parses the comma-separated community text and checks the limit bounds.
    pub fn parse(input: &str, limit: u32) -> Result<Self, CoreError> {
        Ok(Self {
            communities: parse_community_list(input),
            limit: check_post_limit(limit)?,
        })
    }
}

/// Splits `"technology, r/AskReddit,,"` into `["technology", "AskReddit"]`.
pub fn parse_community_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .map(|name| {
            name.strip_prefix("/r/")
                .or_else(|| name.strip_prefix("r/"))
                .unwrap_or(name)
                .trim()
        })
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn canonical_url(permalink: &str) -> String {
    format!("{}{}", REDDIT_BASE_URL, permalink)
}

pub fn build_record(ctx: &AnalysisContext, community: &str, post: RawPost) -> AnalyzedRecord {
    let link = canonical_url(&post.permalink);
    let cleaned_text = ctx.normalize(post.title.as_deref());
    let scores = ctx.score(&cleaned_text);
    let title = post.title.unwrap_or_default();

    AnalyzedRecord {
        subreddit: community.to_string(),
        display_title: anchor(&link, &title),
        title,
        cleaned_text,
        sentiment: scores.label(),
        compound: scores.compound,
        author: post.author.unwrap_or_else(|| DELETED_AUTHOR.to_string()),
        upvotes: post.score,
        comments: post.num_comments,
        timestamp: post.created_utc,
        link,
    }
}

/// Fetches and analyzes every community in order. Records keep community
/// order, then fetch order; nothing is sorted or deduplicated. The first fetch
/// error aborts the run and discards what was collected so far.
pub async fn analyze_communities<S: PostSource>(
    source: &S,
    ctx: &AnalysisContext,
    communities: &[String],
    limit: u32,
) -> Result<AnalysisResult, CoreError> {
    if communities.is_empty() {
        warn!("No communities requested, nothing to analyze");
        return Ok(AnalysisResult::default());
    }

    let mut records = Vec::new();
    for community in communities {
        let community = community.trim();
        if community.is_empty() {
            continue;
        }

        let posts = source.fetch_hot_posts(community, limit).await?;
        info!("Analyzing {} posts from r/{}", posts.len(), community);

        for post in posts.into_iter().take(limit as usize) {
            let record = build_record(ctx, community, post);
            debug!(
                "r/{} {:?} -> {} ({})",
                community, record.cleaned_text.as_str(), record.sentiment, record.compound
            );
            records.push(record);
        }
    }

    info!("Analysis complete: {} records", records.len());
    Ok(AnalysisResult::new(records))
}

pub async fn run_analysis<S: PostSource>(
    source: &S,
    ctx: &AnalysisContext,
    request: &AnalysisRequest,
) -> Result<AnalysisResult, CoreError> {
    analyze_communities(source, ctx, &request.communities, request.limit).await
}
