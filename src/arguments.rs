//! Pagination arguments and their validation
//!
//! Raw arguments arrive untyped from the GraphQL layer. They are parsed into
//! [`PaginationArg`] up front and then checked, in a fixed order, against the
//! loader's [`LimitPolicy`]. Every rejection writes one `warn` audit line.

use std::fmt;

use async_graphql::InputObject;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::cursor::CursorCodec;
use crate::entities::Entity;
use crate::filters::Filters;
use crate::i18n::keys;
use crate::loader::LoadContext;
use crate::ConnectionError;

/// Largest `first`/`last` accepted by any connection
pub const MAX_PAGE_SIZE: i64 = 100;

/// A single `first`/`last` argument as received
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaginationArg {
    #[default]
    Absent,
    Int(i64),
    /// Present but not an integer; carries the runtime type label
    Invalid(&'static str),
}

impl PaginationArg {
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// Runtime type label, as reported in `InvalidType` messages
    pub fn type_name(&self) -> &'static str {
        match *self {
            Self::Absent => "undefined",
            Self::Int(_) => "number",
            Self::Invalid(label) => label,
        }
    }

    /// Parse a JSON argument; `None` means the field was not supplied
    pub fn from_json(value: Option<&serde_json::Value>) -> Self {
        use serde_json::Value;

        match value {
            None => Self::Absent,
            Some(Value::Null) => Self::Invalid("null"),
            Some(Value::Bool(_)) => Self::Invalid("boolean"),
            Some(Value::Number(n)) => Self::from_number(n),
            Some(Value::String(_)) => Self::Invalid("string"),
            Some(Value::Array(_)) => Self::Invalid("array"),
            Some(Value::Object(_)) => Self::Invalid("object"),
        }
    }

    /// Parse a GraphQL argument; `None` means the field was not supplied
    pub fn from_graphql(value: Option<&async_graphql::Value>) -> Self {
        use async_graphql::Value;

        match value {
            None => Self::Absent,
            Some(Value::Null) => Self::Invalid("null"),
            Some(Value::Boolean(_)) => Self::Invalid("boolean"),
            Some(Value::Number(n)) => Self::from_number(n),
            Some(Value::String(_)) => Self::Invalid("string"),
            Some(Value::Enum(_)) => Self::Invalid("enum"),
            Some(Value::Binary(_)) => Self::Invalid("binary"),
            Some(Value::List(_)) => Self::Invalid("array"),
            Some(Value::Object(_)) => Self::Invalid("object"),
        }
    }

    fn from_number(n: &Number) -> Self {
        if let Some(i) = n.as_i64() {
            return Self::Int(i);
        }
        if n.as_u64().is_some() {
            return Self::Int(i64::MAX);
        }
        match n.as_f64() {
            // `as` saturates, so huge integral floats still land above the maximum
            Some(f) if f.is_finite() && f.fract() == 0.0 => Self::Int(f as i64),
            _ => Self::Invalid("float"),
        }
    }
}

impl From<Option<i32>> for PaginationArg {
    fn from(value: Option<i32>) -> Self {
        value.map_or(Self::Absent, |n| Self::Int(n.into()))
    }
}

/// Which of the two limit arguments an error is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitArgument {
    First,
    Last,
}

impl LimitArgument {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Last => "last",
        }
    }
}

impl fmt::Display for LimitArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a connection insists on `first` or `last`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitPolicy {
    /// One of `first`/`last` must be supplied
    #[default]
    Required,
    /// Neither may be supplied, in which case the whole window is returned
    Optional,
}

/// Arguments as received from the resolver
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPaginationArgs {
    pub first: PaginationArg,
    pub last: PaginationArg,
    pub after: Option<String>,
    pub before: Option<String>,
    pub filters: Filters,
}

impl RawPaginationArgs {
    /// Read `first`, `last`, `after`, `before` and `search` from a JSON object
    ///
    /// Date filters are typed and must be supplied through [`Self::with_filters`].
    pub fn from_json(args: &serde_json::Value) -> Self {
        let cursor = |name: &str| match args.get(name) {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };

        let mut filters = Filters::default();
        if let Some(search) = args.get("search").and_then(|s| s.as_str()) {
            filters = filters.with_search(search);
        }

        Self {
            first: PaginationArg::from_json(args.get("first")),
            last: PaginationArg::from_json(args.get("last")),
            after: cursor("after"),
            before: cursor("before"),
            filters,
        }
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }
}

/// Pagination input for GraphQL queries
///
/// Follows the Relay Cursor Connections Specification:
/// https://relay.dev/graphql/connections.htm
#[derive(InputObject, Debug, Clone, Default)]
pub struct PaginationInput {
    /// Number of items to return (forward pagination)
    pub first: Option<i32>,

    /// Cursor to start after (forward pagination)
    pub after: Option<String>,

    /// Number of items to return (backward pagination)
    pub last: Option<i32>,

    /// Cursor to end before (backward pagination)
    pub before: Option<String>,
}

impl From<PaginationInput> for RawPaginationArgs {
    fn from(input: PaginationInput) -> Self {
        Self {
            first: input.first.into(),
            last: input.last.into(),
            after: input.after,
            before: input.before,
            filters: Filters::default(),
        }
    }
}

/// How the cursor window is cut down to a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    First(usize),
    Last(usize),
    All,
}

impl Slice {
    pub fn direction(&self) -> &'static str {
        match self {
            Self::First(_) => "first",
            Self::Last(_) => "last",
            Self::All => "none",
        }
    }

    pub fn limit(&self) -> Option<usize> {
        match *self {
            Self::First(n) | Self::Last(n) => Some(n),
            Self::All => None,
        }
    }
}

/// Normalized arguments handed to the connection builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedArgs {
    pub slice: Slice,
    pub after_key: Option<String>,
    pub before_key: Option<String>,
    pub filters: Filters,
}

impl ValidatedArgs {
    pub fn new(slice: Slice) -> Self {
        Self {
            slice,
            after_key: None,
            before_key: None,
            filters: Filters::default(),
        }
    }

    pub fn after(mut self, key: impl Into<String>) -> Self {
        self.after_key = Some(key.into());
        self
    }

    pub fn before(mut self, key: impl Into<String>) -> Self {
        self.before_key = Some(key.into());
        self
    }
}

/// Validates raw arguments for one connection operation
pub struct ArgumentValidator<'a> {
    pub entity: Entity,
    pub operation: &'static str,
    pub policy: LimitPolicy,
    pub ctx: &'a LoadContext,
}

impl ArgumentValidator<'_> {
    pub fn validate(&self, args: RawPaginationArgs) -> crate::Result<ValidatedArgs> {
        let slice = self.slice(args.first, args.last)?;
        let after_key = self.cursor_key("after", args.after.as_deref())?;
        let before_key = self.cursor_key("before", args.before.as_deref())?;

        Ok(ValidatedArgs {
            slice,
            after_key,
            before_key,
            filters: args.filters,
        })
    }

    fn slice(&self, first: PaginationArg, last: PaginationArg) -> crate::Result<Slice> {
        match (first, last) {
            (PaginationArg::Absent, PaginationArg::Absent) => match self.policy {
                LimitPolicy::Required => {
                    self.warn(format!(
                        "User: {} did not have either `first` or `last` arguments set for: {}.",
                        self.ctx.actor(),
                        self.operation
                    ));
                    Err(ConnectionError::MissingLimit {
                        message: self.ctx.translate(
                            keys::MISSING_LIMIT,
                            &[("connection", self.entity.connection_name())],
                        ),
                    })
                }
                LimitPolicy::Optional => Ok(Slice::All),
            },
            (first, PaginationArg::Absent) => {
                self.limit(LimitArgument::First, first).map(Slice::First)
            }
            (PaginationArg::Absent, last) => {
                self.limit(LimitArgument::Last, last).map(Slice::Last)
            }
            _ => {
                self.warn(format!(
                    "User: {} attempted to have `first` and `last` arguments set for: {}.",
                    self.ctx.actor(),
                    self.operation
                ));
                Err(ConnectionError::ConflictingLimits {
                    message: self.ctx.translate(
                        keys::CONFLICTING_LIMITS,
                        &[("connection", self.entity.connection_name())],
                    ),
                })
            }
        }
    }

    fn limit(&self, argument: LimitArgument, value: PaginationArg) -> crate::Result<usize> {
        let amount = match value {
            PaginationArg::Int(n) => n,
            other => {
                let type_name = other.type_name();
                self.warn(format!(
                    "User: {} attempted to have `{}` set as a {} for: {}.",
                    self.ctx.actor(),
                    argument,
                    type_name,
                    self.operation
                ));
                return Err(ConnectionError::InvalidType {
                    argument,
                    type_name,
                    message: self.ctx.translate(
                        keys::INVALID_TYPE,
                        &[("argument", argument.as_str()), ("type", type_name)],
                    ),
                });
            }
        };

        if amount < 0 {
            self.warn(format!(
                "User: {} attempted to have `{}` set below zero for: {}.",
                self.ctx.actor(),
                argument,
                self.operation
            ));
            return Err(ConnectionError::BelowMinimum {
                argument,
                message: self.ctx.translate(
                    keys::BELOW_MINIMUM,
                    &[
                        ("argument", argument.as_str()),
                        ("connection", self.entity.connection_name()),
                    ],
                ),
            });
        }

        if amount > MAX_PAGE_SIZE {
            let requested = amount.to_string();
            let limit = MAX_PAGE_SIZE.to_string();
            self.warn(format!(
                "User: {} attempted to have `{}` set to {} for: {}.",
                self.ctx.actor(),
                argument,
                amount,
                self.operation
            ));
            return Err(ConnectionError::AboveMaximum {
                argument,
                requested: amount,
                message: self.ctx.translate(
                    keys::ABOVE_MAXIMUM,
                    &[
                        ("amount", requested.as_str()),
                        ("connection", self.entity.connection_name()),
                        ("argument", argument.as_str()),
                        ("limit", limit.as_str()),
                    ],
                ),
            });
        }

        // 0..=MAX_PAGE_SIZE
        Ok(amount as usize)
    }

    /// An empty cursor is what `pageInfo` reports for an empty page, so it is
    /// read as "no boundary".
    fn cursor_key(
        &self,
        argument: &'static str,
        cursor: Option<&str>,
    ) -> crate::Result<Option<String>> {
        let Some(cursor) = cursor.filter(|c| !c.is_empty()) else {
            return Ok(None);
        };

        CursorCodec::decode_key(self.entity.tag(), cursor)
            .map(Some)
            .map_err(|err| {
                self.warn(format!(
                    "User: {} provided an invalid `{}` cursor for: {}, error: {}",
                    self.ctx.actor(),
                    argument,
                    self.operation,
                    err
                ));
                self.ctx.invalid_cursor(self.entity, argument)
            })
    }

    fn warn(&self, message: String) {
        self.ctx.warn(self.operation, message);
    }
}
