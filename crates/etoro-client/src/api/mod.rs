//! Typed operations over the gateway client.
//!
//! Each operation builds a path, query and body for one upstream endpoint,
//! performs the exchange through [`GatewayClient`](crate::GatewayClient) and,
//! where the payload has a stable view, runs the matching normalizer.
//! Endpoints without a view return the classified [`ResponseBody`] as-is.
//!
//! [`ResponseBody`]: crate::ResponseBody

pub mod feeds;
pub mod market_data;
pub mod trading;
pub mod users;
pub mod watchlists;

use url::form_urlencoded;

use crate::error::{ClientError, ClientResult};

pub use feeds::{FeedPage, UserFeed};
pub use market_data::{CandleDirection, CandlePeriod, InstrumentSearch};
pub use trading::OrderTerms;
pub use users::{Period, UserDiscovery};
pub use watchlists::ITEM_TYPE_INSTRUMENT;

/// Ordered query parameters, form-url-encoded on render.
#[derive(Debug, Default)]
pub(crate) struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub(crate) fn set(mut self, key: &'static str, value: impl ToString) -> Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    #[must_use]
    pub(crate) fn set_opt<V: ToString>(self, key: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    /// `path` with the query appended, or `path` alone when empty.
    pub(crate) fn to_path(&self, path: &str) -> String {
        if self.pairs.is_empty() {
            return path.to_string();
        }
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        format!("{path}?{}", serializer.finish())
    }
}

/// Comma-joined id list for `instrumentIds=` style parameters.
///
/// Rejects an empty list so the upstream never sees a dangling `=`.
pub(crate) fn join_ids(ids: &[i64], what: &str) -> ClientResult<String> {
    if ids.is_empty() {
        return Err(ClientError::invalid_input(format!(
            "{what} must contain at least one id"
        )));
    }
    Ok(ids
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(","))
}

/// Percent-encode a value for use as a single path segment.
pub(crate) fn path_segment(raw: &str) -> String {
    // form encoding writes spaces as '+' and escapes a literal '+' as %2B
    form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Trimmed `value`, or `InvalidInput` naming `what` when blank.
pub(crate) fn require_text<'a>(value: &'a str, what: &str) -> ClientResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ClientError::invalid_input(format!("{what} must not be empty")));
    }
    Ok(trimmed)
}

/// Zero means "not set" for paging parameters.
pub(crate) fn non_zero(value: Option<u32>) -> Option<u32> {
    value.filter(|v| *v > 0)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use httpmock::MockServer;

    use crate::config::{ClientConfig, Credentials, TradingMode};
    use crate::gateway::GatewayClient;
    use crate::request_id::SequentialRequestIds;

    pub(crate) fn client_for(server: &MockServer, mode: TradingMode) -> GatewayClient {
        let config = ClientConfig {
            base_url: server.base_url(),
            mode,
            credentials: Credentials::new(Some("api-key".into()), Some("user-key".into())),
            timeout_ms: 5_000,
        };
        GatewayClient::with_request_ids(config, Arc::new(SequentialRequestIds::new("test")))
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_renders_in_insertion_order() {
        let path = Query::new()
            .set("searchText", "Apple Inc")
            .set_opt("pageNumber", None::<u32>)
            .set("pageSize", 10)
            .to_path("/market-data/search");
        assert_eq!(path, "/market-data/search?searchText=Apple+Inc&pageSize=10");
    }

    #[test]
    fn test_empty_query_leaves_path_alone() {
        assert_eq!(Query::new().to_path("/feeds/instrument/1"), "/feeds/instrument/1");
    }

    #[test]
    fn test_join_ids() {
        assert_eq!(join_ids(&[1, 22, 333], "instrumentIds").unwrap(), "1,22,333");
        let err = join_ids(&[], "instrumentIds").unwrap_err();
        assert!(matches!(err, ClientError::InvalidInput(_)));
    }

    #[test]
    fn test_path_segment_escapes() {
        assert_eq!(path_segment("jdoe"), "jdoe");
        assert_eq!(path_segment("a b/c+d"), "a%20b%2Fc%2Bd");
    }

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("  jdoe ", "username").unwrap(), "jdoe");
        assert!(require_text("   ", "username").is_err());
    }
}
