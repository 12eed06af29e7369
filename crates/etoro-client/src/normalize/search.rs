//! Instrument search normalization with best-effort metadata enrichment.
//!
//! A search page lists instruments with the symbol and name the search index
//! knows about. The instrument metadata endpoint is authoritative, so when it
//! answers, its values replace the search values field by field. When it
//! fails or is never asked, the search values stand and the view says so.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{lenient, lenient_seq};

// ── Upstream shapes ──

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub page: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub page_size: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub total_items: Option<u64>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub items: Option<Vec<SearchItem>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
    #[serde(default, deserialize_with = "lenient")]
    pub instrument_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub internal_symbol_full: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub instrument_type_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub exchange_id: Option<i64>,
}

impl SearchResponse {
    /// Positive instrument ids on this page, in item order.
    pub fn instrument_ids(&self) -> Vec<i64> {
        self.items
            .iter()
            .flatten()
            .filter_map(|item| item.instrument_id)
            .filter(|id| *id > 0)
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentsResponse {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub instrument_display_datas: Option<Vec<InstrumentDisplayData>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InstrumentDisplayData {
    #[serde(rename = "instrumentID", default, deserialize_with = "lenient")]
    pub instrument_id: Option<i64>,
    #[serde(rename = "symbolFull", default, deserialize_with = "lenient")]
    pub symbol_full: Option<String>,
    #[serde(rename = "instrumentDisplayName", default, deserialize_with = "lenient")]
    pub instrument_display_name: Option<String>,
    #[serde(rename = "instrumentTypeID", default, deserialize_with = "lenient")]
    pub instrument_type_id: Option<i64>,
    #[serde(rename = "exchangeID", default, deserialize_with = "lenient")]
    pub exchange_id: Option<i64>,
}

// ── Enrichment outcome ──

/// What happened to the metadata lookup for a search page.
#[derive(Debug, Clone, PartialEq)]
pub enum Enrichment {
    /// Metadata fetched, keyed by instrument id.
    Enriched(HashMap<i64, InstrumentDisplayData>),
    /// The metadata call failed; search values are used as-is.
    Unavailable { reason: String },
    /// The page had no positive instrument ids, so nothing was fetched.
    NoInstrumentIds,
}

impl Enrichment {
    pub fn from_metadata(response: InstrumentsResponse) -> Self {
        let by_id = response
            .instrument_display_datas
            .unwrap_or_default()
            .into_iter()
            .filter_map(|data| data.instrument_id.map(|id| (id, data)))
            .collect();
        Self::Enriched(by_id)
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> EnrichmentStatus {
        match self {
            Self::Enriched(_) => EnrichmentStatus::Enriched,
            Self::Unavailable { .. } => EnrichmentStatus::Unavailable,
            Self::NoInstrumentIds => EnrichmentStatus::Skipped,
        }
    }

    fn lookup(&self, instrument_id: Option<i64>) -> Option<&InstrumentDisplayData> {
        match (self, instrument_id) {
            (Self::Enriched(by_id), Some(id)) => by_id.get(&id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrichmentStatus {
    Enriched,
    Unavailable,
    Skipped,
}

// ── View ──

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_items: Option<u64>,
    pub enrichment: EnrichmentStatus,
    pub items: Vec<SearchItemView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument_type_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_id: Option<i64>,
}

// ── Transform ──

/// Merge a search page with its enrichment outcome.
pub fn normalize_search(response: SearchResponse, enrichment: &Enrichment) -> SearchView {
    let items = response
        .items
        .unwrap_or_default()
        .into_iter()
        .map(|item| {
            let Some(meta) = enrichment.lookup(item.instrument_id) else {
                return SearchItemView {
                    instrument_id: item.instrument_id,
                    symbol: item.internal_symbol_full,
                    display_name: item.display_name,
                    instrument_type_id: item.instrument_type_id,
                    exchange_id: item.exchange_id,
                };
            };
            SearchItemView {
                instrument_id: item.instrument_id,
                symbol: meta.symbol_full.clone().or(item.internal_symbol_full),
                display_name: meta.instrument_display_name.clone().or(item.display_name),
                instrument_type_id: meta.instrument_type_id.or(item.instrument_type_id),
                exchange_id: meta.exchange_id.or(item.exchange_id),
            }
        })
        .collect();

    SearchView {
        page: response.page,
        page_size: response.page_size,
        total_items: response.total_items,
        enrichment: enrichment.status(),
        items,
    }
}
