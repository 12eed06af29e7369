//! Social feed normalization.
//!
//! Upstream returns `{discussions: [{post: {...}}], paging: {offSet, take}}`
//! where each post nests its owner, message, instrument tags, comment/share
//! summary and like aggregation. The view keeps one flat record per
//! discussion.

use serde::{Deserialize, Serialize};

use super::{lenient, lenient_seq, FlexibleId};

// ── Upstream shape ──

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub discussions: Option<Vec<Discussion>>,
    #[serde(default, deserialize_with = "lenient")]
    pub paging: Option<FeedPaging>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Discussion {
    #[serde(default, deserialize_with = "lenient")]
    pub post: Option<Post>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<FlexibleId>,
    #[serde(default, deserialize_with = "lenient")]
    pub created: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub owner: Option<PostOwner>,
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<PostMessage>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub tags: Option<Vec<PostTag>>,
    #[serde(default, deserialize_with = "lenient")]
    pub summary: Option<PostSummary>,
    #[serde(default, deserialize_with = "lenient")]
    pub emotions_data: Option<EmotionsData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostOwner {
    #[serde(default, deserialize_with = "lenient")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMessage {
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostTag {
    #[serde(default, deserialize_with = "lenient")]
    pub market: Option<TagMarket>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagMarket {
    #[serde(default, deserialize_with = "lenient")]
    pub symbol_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    #[serde(default, deserialize_with = "lenient")]
    pub comments_and_replies_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub shares_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmotionsData {
    #[serde(default, deserialize_with = "lenient")]
    pub like: Option<EmotionAggregate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmotionAggregate {
    #[serde(default, deserialize_with = "lenient")]
    pub paging: Option<EmotionPaging>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionPaging {
    #[serde(default, deserialize_with = "lenient")]
    pub total_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedPaging {
    #[serde(rename = "offSet", default, deserialize_with = "lenient")]
    pub off_set: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub take: Option<u64>,
}

// ── View ──

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedView {
    pub posts: Vec<PostView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paging: Option<PagingView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<FlexibleId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    pub author: AuthorView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub tags: Vec<TagView>,
    pub engagement: Engagement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Engagement {
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PagingView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take: Option<u64>,
}

// ── Transform ──

/// Flatten a feed page. One view per discussion, in input order.
pub fn normalize_feed(response: FeedResponse) -> FeedView {
    let posts = response
        .discussions
        .unwrap_or_default()
        .into_iter()
        .map(|discussion| normalize_post(discussion.post.unwrap_or_default()))
        .collect();

    let paging = response.paging.map(|p| PagingView {
        offset: p.off_set,
        take: p.take,
    });

    FeedView { posts, paging }
}

fn normalize_post(post: Post) -> PostView {
    let owner = post.owner.unwrap_or_default();
    let message = post.message.unwrap_or_default();
    let summary = post.summary.unwrap_or_default();

    PostView {
        id: post.id,
        created: post.created,
        author: AuthorView {
            full_name: full_name(owner.first_name.as_deref(), owner.last_name.as_deref()),
            username: owner.username,
        },
        text: message.text,
        language: message.language_code,
        // Entries without a market are dropped, not nulled.
        tags: post
            .tags
            .unwrap_or_default()
            .into_iter()
            .filter_map(|tag| tag.market)
            .map(|market| TagView {
                symbol: market.symbol_name,
                name: market.display_name,
            })
            .collect(),
        engagement: Engagement {
            likes: like_count(post.emotions_data.as_ref()),
            comments: summary.comments_and_replies_count.unwrap_or(0),
            shares: summary.shares_count.unwrap_or(0),
        },
    }
}

fn like_count(emotions: Option<&EmotionsData>) -> u64 {
    emotions
        .and_then(|e| e.like.as_ref())
        .and_then(|like| like.paging.as_ref())
        .and_then(|paging| paging.total_count)
        .unwrap_or(0)
}

fn full_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}
