//! # tracker-connections
//!
//! Relay cursor connections for the Tracker GraphQL API.
//!
//! ## Features
//!
//! - **Cursor Codec** - opaque `base64("tag:key")` cursors
//! - **Argument Validation** - `first`/`last`/`after`/`before` with localized errors
//! - **Connection Builder** - windowing, `pageInfo` and `totalCount`
//! - **Connection Loaders** - one binding per entity and scope over any [`Store`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tracker_connections::{
//!     ConnectionKind, ConnectionLoader, LoadContext, MemoryStore, PaginationArg,
//!     RawPaginationArgs, Record, Scope, Settings,
//! };
//!
//! # async fn example() -> tracker_connections::Result<()> {
//! let store: Arc<MemoryStore<Record>> = Arc::new(MemoryStore::new());
//! let loader = ConnectionLoader::new(ConnectionKind::DomainsByOrgId, store);
//! let ctx = LoadContext::new("user-key", &Settings::default());
//!
//! let args = RawPaginationArgs {
//!     first: PaginationArg::Int(10),
//!     ..Default::default()
//! };
//! let connection = loader
//!     .load(&ctx, &Scope::Organization("org-key".into()), args)
//!     .await?;
//! # let _ = connection;
//! # Ok(())
//! # }
//! ```

pub mod arguments;
pub mod config;
pub mod cursor;
pub mod entities;
pub mod filters;
pub mod i18n;
pub mod loader;
pub mod logger;
pub mod pagination;
pub mod store;
pub mod types;

pub use arguments::{
    LimitArgument, LimitPolicy, PaginationArg, PaginationInput, RawPaginationArgs, Slice,
    ValidatedArgs, MAX_PAGE_SIZE,
};
pub use self::config::Settings;
pub use cursor::{CursorCodec, DecodedCursor, MalformedCursor};
pub use entities::{ConnectionKind, Entity};
pub use filters::{DateRange, Filters};
pub use i18n::{Catalog, Locale, Translator};
pub use loader::{ConnectionLoader, LoadContext, LoaderDefinition};
pub use logger::{AuditRecord, Logger, RecordingLogger, TracingLogger};
pub use pagination::{Connection, ConnectionBuilder, Edge, PageInfo, UnknownCursor};
pub use store::{MemoryStore, Node, Record, RecordStream, Scope, Store, StoreError};
pub use types::Date;

use async_graphql::ErrorExtensions;
use thiserror::Error;

/// Connection errors
///
/// `Display` is the localized, user-facing message. Underlying store errors
/// are never part of it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("{message}")]
    MissingLimit { message: String },

    #[error("{message}")]
    ConflictingLimits { message: String },

    #[error("{message}")]
    InvalidType {
        argument: LimitArgument,
        type_name: &'static str,
        message: String,
    },

    #[error("{message}")]
    BelowMinimum {
        argument: LimitArgument,
        message: String,
    },

    #[error("{message}")]
    AboveMaximum {
        argument: LimitArgument,
        requested: i64,
        message: String,
    },

    /// Cursor the connection cannot place; the message is the entity's
    /// generic failure text
    #[error("{message}")]
    InvalidCursor {
        argument: &'static str,
        message: String,
    },

    #[error("{message}")]
    LoadFailure { message: String },
}

impl ConnectionError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingLimit { .. } => "MISSING_LIMIT",
            Self::ConflictingLimits { .. } => "CONFLICTING_LIMITS",
            Self::InvalidType { .. } => "INVALID_TYPE",
            Self::BelowMinimum { .. } => "BELOW_MINIMUM",
            Self::AboveMaximum { .. } => "ABOVE_MAXIMUM",
            Self::InvalidCursor { .. } => "INVALID_CURSOR",
            Self::LoadFailure { .. } => "LOAD_FAILURE",
        }
    }

    /// Client-caused argument error, as opposed to a load failure
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::LoadFailure { .. })
    }
}

impl ErrorExtensions for ConnectionError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        async_graphql::Error::new(self.to_string())
            .extend_with(|_, e| e.set("code", code))
    }
}

/// Result type for connection operations
pub type Result<T> = std::result::Result<T, ConnectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_is_message() {
        let err = ConnectionError::LoadFailure {
            message: "Unable to load domain(s). Please try again.".to_string(),
        };
        assert_eq!(err.to_string(), "Unable to load domain(s). Please try again.");
        assert!(!err.is_validation());
    }

    #[test]
    fn test_graphql_error_carries_code() {
        let err = ConnectionError::ConflictingLimits {
            message: "nope".to_string(),
        };
        assert!(err.is_validation());

        let gql = err.extend();
        assert_eq!(gql.message, "nope");
        let code = gql.extensions.as_ref().and_then(|ext| ext.get("code")).cloned();
        assert_eq!(code, Some(async_graphql::Value::from("CONFLICTING_LIMITS")));
    }

    #[test]
    fn test_invalid_cursor_is_validation() {
        let err = ConnectionError::InvalidCursor {
            argument: "after",
            message: "Unable to load domain(s). Please try again.".to_string(),
        };
        assert!(err.is_validation());
        assert_eq!(err.code(), "INVALID_CURSOR");
        assert_eq!(err.to_string(), "Unable to load domain(s). Please try again.");
    }
}
