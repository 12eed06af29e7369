//! Request correlation id generation.
//!
//! The gateway stamps every outbound request with a fresh `x-request-id`.
//! The generator is injected at construction so tests can pin ids.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Source of unique request correlation ids.
pub trait RequestIdGenerator: Debug + Send + Sync {
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs. The production default.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestIds;

impl RequestIdGenerator for UuidRequestIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `{prefix}-{n}` ids, counting from 1.
#[derive(Debug)]
pub struct SequentialRequestIds {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialRequestIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl RequestIdGenerator for SequentialRequestIds {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", self.prefix, n)
    }
}
