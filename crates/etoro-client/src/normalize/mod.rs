//! Response normalization.
//!
//! Pure transforms from loosely shaped upstream payloads into small, stable
//! views. Each upstream shape has its own serde model in which every field is
//! optional and read through [`lenient`] or [`lenient_seq`], so a missing or
//! mistyped field degrades to an absent (or zero, where stated) output field
//! instead of failing the whole transform. Collections keep their input order.

pub mod feed;
pub mod portfolio;
pub mod search;
pub mod watchlist;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub use feed::{normalize_feed, FeedView, PostView};
pub use portfolio::{normalize_portfolio, PortfolioView, PositionView};
pub use search::{normalize_search, Enrichment, SearchView};
pub use watchlist::{normalize_watchlists, WatchlistView, WatchlistsView};

/// An identifier upstream sends as a number on some endpoints and a string on
/// others.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlexibleId {
    Number(i64),
    Text(String),
}

impl fmt::Display for FlexibleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for FlexibleId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

/// Deserialize an optional field, treating a value of the wrong type as absent.
///
/// Use with `#[serde(default, deserialize_with = "lenient")]`.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Deserialize an optional list element by element.
///
/// A non-array value is absent; an element of the wrong shape becomes
/// `T::default()` so positions and counts are kept.
pub(crate) fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let Value::Array(elements) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(
        elements
            .into_iter()
            .map(|element| serde_json::from_value(element).unwrap_or_default())
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flexible_id_accepts_number_and_string() {
        let n: FlexibleId = serde_json::from_value(json!(17)).unwrap();
        let s: FlexibleId = serde_json::from_value(json!("a1b2")).unwrap();
        assert_eq!(n, FlexibleId::Number(17));
        assert_eq!(s, FlexibleId::Text("a1b2".into()));
        assert_eq!(n.to_string(), "17");
        assert_eq!(serde_json::to_value(&s).unwrap(), json!("a1b2"));
    }

    #[derive(Debug, Default, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "lenient")]
        count: Option<u64>,
        #[serde(default, deserialize_with = "lenient_seq")]
        ids: Option<Vec<u64>>,
    }

    #[test]
    fn test_lenient_drops_mistyped_scalar() {
        let parsed: Sample = serde_json::from_value(json!({"count": "many"})).unwrap();
        assert_eq!(parsed.count, None);
        assert!(parsed.ids.is_none());

        let parsed: Sample = serde_json::from_value(json!({"count": 3})).unwrap();
        assert_eq!(parsed.count, Some(3));
    }

    #[test]
    fn test_lenient_seq_keeps_positions() {
        let parsed: Sample = serde_json::from_value(json!({"ids": {"not": "a list"}})).unwrap();
        assert!(parsed.ids.is_none());

        let parsed: Sample = serde_json::from_value(json!({"count": null, "ids": [1, "x", 3]})).unwrap();
        assert_eq!(parsed.count, None);
        assert_eq!(parsed.ids, Some(vec![1, 0, 3]));
    }
}
