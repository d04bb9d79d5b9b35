//! Backing store contract
//!
//! The store owns record existence and ordering. Loaders only ever see an
//! ordered stream of candidates for a scope.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::{self, BoxStream, StreamExt};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::filters::Filters;

/// Entity addressable by a stable key
pub trait Node: Send + Sync {
    fn key(&self) -> &str;

    /// Timestamp used by date-range filters
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// Text matched by the `search` filter
    fn search_text(&self) -> Option<&str> {
        None
    }

    /// Where this node sits in the store order relative to `key`
    ///
    /// Lets a cursor keep working after its own record is gone. `None` means
    /// the order cannot be derived from keys alone.
    fn compare_key(&self, _key: &str) -> Option<Ordering> {
        None
    }
}

/// Opaque stock record: a key, an optional timestamp, an optional searchable
/// label and an arbitrary payload
///
/// Records are expected in key order (numeric when both keys are numbers),
/// which is what [`Node::compare_key`] reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub key: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub label: Option<String>,
    pub data: serde_json::Value,
}

impl Record {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            timestamp: None,
            label: None,
            data: serde_json::Value::Null,
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}

impl Node for Record {
    fn key(&self) -> &str {
        &self.key
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    fn search_text(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn compare_key(&self, key: &str) -> Option<Ordering> {
        match (self.key.parse::<u64>(), key.parse::<u64>()) {
            (Ok(own), Ok(other)) => Some(own.cmp(&other)),
            _ => Some(self.key.as_str().cmp(key)),
        }
    }
}

/// Parent entity a connection is scoped to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Global,
    Organization(String),
    Domain(String),
    User(String),
    Dkim(String),
    GuidanceTags(Vec<String>),
}

/// Store failure, raised either when the query is issued or while iterating
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct StoreError(pub String);

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Ordered candidates; an `Err` item is an iteration-time failure
pub type RecordStream<'a, N> = BoxStream<'a, Result<N, StoreError>>;

#[async_trait]
pub trait Store<N>: Send + Sync
where
    N: Node + 'static,
{
    /// Ordered candidates for a scope
    ///
    /// Implementations may pre-filter on `filters`; loaders re-apply their own
    /// node predicate on whatever is returned.
    async fn scan_ordered<'a>(
        &'a self,
        scope: &Scope,
        filters: &Filters,
    ) -> Result<RecordStream<'a, N>, StoreError>;

    /// Point lookup for the follow-up joins a resolver makes after a page
    async fn get_by_key(&self, key: &str) -> Result<Option<N>, StoreError>;
}

/// In-memory store, candidates kept in insertion order per scope
#[derive(Debug, Clone)]
pub struct MemoryStore<N> {
    scopes: HashMap<Scope, Vec<N>>,
}

impl<N> Default for MemoryStore<N> {
    fn default() -> Self {
        Self {
            scopes: HashMap::new(),
        }
    }
}

impl<N: Node + Clone> MemoryStore<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node to a scope
    pub fn insert(&mut self, scope: Scope, node: N) {
        self.scopes.entry(scope).or_default().push(node);
    }

    /// Append several nodes to a scope
    pub fn extend(&mut self, scope: Scope, nodes: impl IntoIterator<Item = N>) {
        self.scopes.entry(scope).or_default().extend(nodes);
    }
}

#[async_trait]
impl<N> Store<N> for MemoryStore<N>
where
    N: Node + Clone + 'static,
{
    async fn scan_ordered<'a>(
        &'a self,
        scope: &Scope,
        _filters: &Filters,
    ) -> Result<RecordStream<'a, N>, StoreError> {
        let nodes = self.scopes.get(scope).cloned().unwrap_or_default();
        Ok(stream::iter(nodes.into_iter().map(Ok)).boxed())
    }

    async fn get_by_key(&self, key: &str) -> Result<Option<N>, StoreError> {
        Ok(self
            .scopes
            .values()
            .flatten()
            .find(|node| node.key() == key)
            .cloned())
    }
}
