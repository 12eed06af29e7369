//! Social feeds: instrument and user feeds, posts and comments.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{non_zero, path_segment, require_text, Query};
use crate::error::ClientResult;
use crate::gateway::{GatewayClient, ResponseBody};
use crate::normalize::feed::FeedResponse;
use crate::normalize::{lenient, lenient_seq, normalize_feed, FeedView};

/// Feed paging. Zero or absent values are left to the upstream default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedPage {
    pub take: Option<u32>,
    pub offset: Option<u32>,
}

impl FeedPage {
    fn to_path(self, path: &str) -> String {
        Query::new()
            .set_opt("take", non_zero(self.take))
            .set_opt("offset", non_zero(self.offset))
            .to_path(path)
    }
}

/// Outcome of a feed lookup by username.
#[derive(Debug, Clone, PartialEq)]
pub enum UserFeed {
    Found { account_id: i64, feed: FeedView },
    /// People search had no account with this username.
    NotFound { username: String },
}

#[derive(Debug, Default, Deserialize)]
struct PeopleResponse {
    #[serde(default, deserialize_with = "lenient_seq")]
    users: Option<Vec<PersonRecord>>,
}

#[derive(Debug, Default, Deserialize)]
struct PersonRecord {
    #[serde(alias = "userName", default, deserialize_with = "lenient")]
    username: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    gcid: Option<i64>,
    #[serde(rename = "realCID", default, deserialize_with = "lenient")]
    real_cid: Option<i64>,
}

pub async fn get_instrument_feed(
    client: &GatewayClient,
    instrument_id: i64,
    page: FeedPage,
) -> ClientResult<FeedView> {
    let path = page.to_path(&format!("/feeds/instrument/{instrument_id}"));
    let response: FeedResponse = client.get(&path).await?.decode("instrument feed")?;
    Ok(normalize_feed(response))
}

/// Feed for a user, resolving the username to an account id first.
///
/// The feed endpoint is only called once the username resolves.
pub async fn get_user_feed(
    client: &GatewayClient,
    username: &str,
    page: FeedPage,
) -> ClientResult<UserFeed> {
    let username = require_text(username, "username")?;
    let Some(account_id) = resolve_account_id(client, username).await? else {
        debug!(username, "No account found for username");
        return Ok(UserFeed::NotFound {
            username: username.to_string(),
        });
    };

    let path = page.to_path(&format!("/feeds/user/{account_id}"));
    let response: FeedResponse = client.get(&path).await?.decode("user feed")?;
    Ok(UserFeed::Found {
        account_id,
        feed: normalize_feed(response),
    })
}

/// Account id for `username` via people search: `gcid`, else `realCID`.
pub async fn resolve_account_id(client: &GatewayClient, username: &str) -> ClientResult<Option<i64>> {
    let path = Query::new()
        .set("usernames", username)
        .to_path("/user-info/people");
    let people: PeopleResponse = client.get(&path).await?.decode("people search")?;

    Ok(people
        .users
        .unwrap_or_default()
        .into_iter()
        .find(|person| {
            person
                .username
                .as_deref()
                .is_some_and(|name| name.eq_ignore_ascii_case(username))
        })
        .and_then(|person| person.gcid.or(person.real_cid)))
}

#[derive(Debug, Serialize)]
struct PostBody<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<PostTags>,
}

#[derive(Debug, Serialize)]
struct PostTags {
    tags: Vec<PostTag>,
}

#[derive(Debug, Serialize)]
struct PostTag {
    name: &'static str,
    id: String,
}

/// Publish a post, optionally tagged with one instrument.
///
/// The content is sent as given; surrounding whitespace is not stripped.
pub async fn create_post(
    client: &GatewayClient,
    content: &str,
    instrument_id: Option<i64>,
) -> ClientResult<ResponseBody> {
    require_text(content, "content")?;
    let body = PostBody {
        message: content,
        tags: instrument_id.map(|id| PostTags {
            tags: vec![PostTag {
                name: "instrument",
                id: id.to_string(),
            }],
        }),
    };
    client.post("/feeds/post", Some(&body)).await
}

#[derive(Debug, Serialize)]
struct CommentBody<'a> {
    content: &'a str,
}

pub async fn create_comment(
    client: &GatewayClient,
    post_id: &str,
    content: &str,
) -> ClientResult<ResponseBody> {
    let post_id = require_text(post_id, "post_id")?;
    require_text(content, "content")?;
    let body = CommentBody { content };
    let path = format!("/reactions/{}/comment", path_segment(post_id));
    client.post(&path, Some(&body)).await
}
