//! Connection loaders
//!
//! A loader validates the arguments, pulls the ordered candidates for a
//! scope out of the [`Store`], applies its node filter and hands the rest to
//! the [`ConnectionBuilder`]. Store failures are logged with full detail and
//! replaced by the entity's generic message.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;

use crate::arguments::{ArgumentValidator, LimitPolicy, RawPaginationArgs};
use crate::config::Settings;
use crate::entities::{ConnectionKind, Entity};
use crate::filters::{self, Filters};
use crate::i18n::{Catalog, Translator};
use crate::logger::{AuditRecord, Logger, TracingLogger};
use crate::pagination::{Connection, ConnectionBuilder};
use crate::store::{Node, Scope, Store, StoreError};
use crate::ConnectionError;

/// Request-scoped collaborators of a load
#[derive(Clone)]
pub struct LoadContext {
    actor: String,
    translator: Arc<dyn Translator>,
    logger: Arc<dyn Logger>,
    store_timeout: Option<Duration>,
}

impl LoadContext {
    /// Context for `actor` with the catalog of the configured locale and
    /// `tracing` logging
    pub fn new(actor: impl Into<String>, settings: &Settings) -> Self {
        Self {
            actor: actor.into(),
            translator: Arc::new(Catalog::new(settings.locale)),
            logger: Arc::new(TracingLogger),
            store_timeout: settings.store_timeout,
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn store_timeout(&self) -> Option<Duration> {
        self.store_timeout
    }

    pub fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.translator.translate(key, params)
    }

    /// Generic, localized failure for an entity
    pub fn load_failure(&self, entity: Entity) -> ConnectionError {
        ConnectionError::LoadFailure {
            message: self.translate(entity.load_failure_key(), &[]),
        }
    }

    /// Rejected `after`/`before` cursor, reported with the generic message
    pub fn invalid_cursor(&self, entity: Entity, argument: &'static str) -> ConnectionError {
        ConnectionError::InvalidCursor {
            argument,
            message: self.translate(entity.load_failure_key(), &[]),
        }
    }

    pub(crate) fn warn(&self, operation: &'static str, message: String) {
        self.logger.warn(&self.record(operation, message));
    }

    pub(crate) fn error(&self, operation: &'static str, message: String) {
        self.logger.error(&self.record(operation, message));
    }

    fn record(&self, operation: &'static str, message: String) -> AuditRecord {
        AuditRecord {
            actor: self.actor.clone(),
            operation,
            message,
        }
    }
}

impl fmt::Debug for LoadContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadContext")
            .field("actor", &self.actor)
            .field("store_timeout", &self.store_timeout)
            .finish_non_exhaustive()
    }
}

/// Node predicate applied after the scan
pub type NodeFilter<N> = fn(&N, &Filters) -> bool;

/// Everything that distinguishes one loader from another
pub struct LoaderDefinition<N> {
    pub operation: &'static str,
    pub entity: Entity,
    pub policy: LimitPolicy,
    pub total_count: bool,
    pub filter: Option<NodeFilter<N>>,
}

impl<N: Node> From<ConnectionKind> for LoaderDefinition<N> {
    fn from(kind: ConnectionKind) -> Self {
        Self {
            operation: kind.operation(),
            entity: kind.entity(),
            policy: kind.policy(),
            total_count: kind.reports_total_count(),
            filter: if kind.is_date_filtered() {
                Some(filters::within_date_range::<N> as NodeFilter<N>)
            } else if kind.is_searchable() {
                Some(filters::within_search::<N> as NodeFilter<N>)
            } else {
                None
            },
        }
    }
}

enum FetchError {
    Query(StoreError),
    Stream(StoreError),
}

/// Loader for one entity/scope pair over a [`Store`]
pub struct ConnectionLoader<N, S: ?Sized> {
    definition: LoaderDefinition<N>,
    store: Arc<S>,
}

impl<N, S> ConnectionLoader<N, S>
where
    N: Node + 'static,
    S: Store<N> + ?Sized,
{
    pub fn new(kind: ConnectionKind, store: Arc<S>) -> Self {
        Self::with_definition(kind.into(), store)
    }

    pub fn with_definition(definition: LoaderDefinition<N>, store: Arc<S>) -> Self {
        Self { definition, store }
    }

    pub fn definition(&self) -> &LoaderDefinition<N> {
        &self.definition
    }

    /// Resolve one page of the connection for `scope`
    ///
    /// # Errors
    ///
    /// Validation errors carry a precise localized message. Any store failure,
    /// timeout included, becomes the entity's generic `LoadFailure`. A cursor
    /// that cannot be placed is an `InvalidCursor` with that same message.
    pub async fn load(
        &self,
        ctx: &LoadContext,
        scope: &Scope,
        args: RawPaginationArgs,
    ) -> crate::Result<Connection<N>> {
        let definition = &self.definition;
        let args = ArgumentValidator {
            entity: definition.entity,
            operation: definition.operation,
            policy: definition.policy,
            ctx,
        }
        .validate(args)?;

        let mut candidates = self.candidates(ctx, scope, &args.filters).await?;
        if let Some(filter) = definition.filter {
            candidates.retain(|node| filter(node, &args.filters));
        }

        ConnectionBuilder::new(definition.entity.tag())
            .with_total_count(definition.total_count)
            .build(candidates, &args)
            .map_err(|err| {
                ctx.warn(
                    definition.operation,
                    format!(
                        "User: {} provided an invalid `{}` cursor for: {}, error: {}",
                        ctx.actor(),
                        err.argument,
                        definition.operation,
                        err
                    ),
                );
                ctx.invalid_cursor(definition.entity, err.argument)
            })
    }

    async fn candidates(
        &self,
        ctx: &LoadContext,
        scope: &Scope,
        filters: &Filters,
    ) -> crate::Result<Vec<N>> {
        let fetched = match ctx.store_timeout() {
            Some(limit) => tokio::time::timeout(limit, self.fetch(scope, filters))
                .await
                .unwrap_or_else(|_| {
                    Err(FetchError::Query(StoreError::new(format!(
                        "store did not answer within {limit:?}"
                    ))))
                }),
            None => self.fetch(scope, filters).await,
        };

        let entity = self.definition.entity;
        let operation = self.definition.operation;
        fetched.map_err(|err| {
            let message = match err {
                FetchError::Query(err) => format!(
                    "Database error occurred while user: {} was trying to query {} in {}, \
                     error: {}",
                    ctx.actor(),
                    entity.plural(),
                    operation,
                    err
                ),
                FetchError::Stream(err) => format!(
                    "Cursor error occurred while user: {} was trying to gather {} in {}, error: {}",
                    ctx.actor(),
                    entity.plural(),
                    operation,
                    err
                ),
            };
            ctx.error(operation, message);
            ctx.load_failure(entity)
        })
    }

    async fn fetch(&self, scope: &Scope, filters: &Filters) -> Result<Vec<N>, FetchError> {
        let mut stream = self
            .store
            .scan_ordered(scope, filters)
            .await
            .map_err(FetchError::Query)?;

        let mut candidates = Vec::new();
        while let Some(item) = stream.next().await {
            candidates.push(item.map_err(FetchError::Stream)?);
        }
        Ok(candidates)
    }
}
