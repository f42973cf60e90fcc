// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event Store
//!
//! Persists aggregates' uncommitted events and rebuilds aggregates from their
//! stored streams.
//!
//! # Architecture
//!
//! ```text
//! Aggregate.apply() → uncommitted events → EventStore.append()
//!                                              ↓ EventTranslator
//!                                         EventEnvelope batch
//!                                              ↓ EventStorage.insert_batch()
//!                                     append-only indexed table
//! ```
//!
//! # Storage Requirements
//!
//! [`EventStorage`] is the contract any backend must honour:
//!
//! 1. **Append-Only**: envelopes are never updated or deleted
//! 2. **Atomic Batches**: a batch is stored entirely or not at all
//! 3. **Uniqueness**: `(event_stream_id, revision)` is unique; a violation
//!    surfaces as `ConcurrentModification`
//! 4. **Ordered Reads**: queries return envelopes by revision ascending
//!
//! # Optimistic Concurrency
//!
//! Two writers holding the same aggregate at revision `N` both apply an event at
//! `N + 1`. The storage uniqueness constraint lets exactly one append win; the
//! other receives `ConcurrentModification`, reloads and decides whether to
//! retry. The store never retries on its own.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::aggregate::Aggregate;
use crate::config::StoreConfig;
use crate::envelope::EventEnvelope;
use crate::errors::StoreResult;
use crate::events::DomainEvent;
use crate::translation::EventTranslator;
use crate::users::UserDirectory;

pub mod memory;

pub use memory::InMemoryEventStorage;

/// Filter over stored envelopes
#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopeQuery {
    /// Streams to include
    pub stream_ids: Vec<Uuid>,

    /// Only envelopes whose business time is at or before this instant
    pub as_of: DateTime<Utc>,
}

impl EnvelopeQuery {
    pub fn stream(stream_id: Uuid, as_of: DateTime<Utc>) -> Self {
        Self {
            stream_ids: vec![stream_id],
            as_of,
        }
    }

    pub fn streams(stream_ids: &[Uuid], as_of: DateTime<Utc>) -> Self {
        Self {
            stream_ids: stream_ids.to_vec(),
            as_of,
        }
    }

    pub fn matches(&self, envelope: &EventEnvelope) -> bool {
        envelope.time <= self.as_of && self.stream_ids.contains(&envelope.event_stream_id)
    }
}

/// Append-only, indexed envelope table
#[async_trait]
pub trait EventStorage: Send + Sync {
    /// Store a batch of envelopes atomically
    ///
    /// Assigns `recorded_at` to every envelope and returns the stored rows.
    ///
    /// # Errors
    ///
    /// - `ConcurrentModification` if any `(stream, revision)` pair already
    ///   exists or repeats within the batch; nothing is stored
    /// - `InvalidEnvelope` if an envelope violates a column constraint
    async fn insert_batch(&self, envelopes: Vec<EventEnvelope>) -> StoreResult<Vec<EventEnvelope>>;

    /// Envelopes matching the query, ordered by revision ascending
    async fn query(&self, query: &EnvelopeQuery) -> StoreResult<Vec<EventEnvelope>>;

    /// Number of envelopes stored for a stream, regardless of time
    async fn count(&self, stream_id: Uuid) -> StoreResult<usize>;
}

/// Append and query aggregates through an [`EventStorage`] backend
#[derive(Clone)]
pub struct EventStore {
    storage: Arc<dyn EventStorage>,
    translator: EventTranslator,
}

impl EventStore {
    pub fn new(storage: Arc<dyn EventStorage>, users: Arc<dyn UserDirectory>) -> Self {
        Self {
            storage,
            translator: EventTranslator::new(users),
        }
    }

    /// Store backed by a fresh in-memory table
    pub fn in_memory(config: StoreConfig, users: Arc<dyn UserDirectory>) -> Self {
        Self::new(Arc::new(InMemoryEventStorage::new(config)), users)
    }

    pub fn translator(&self) -> &EventTranslator {
        &self.translator
    }

    /// Persist an aggregate's uncommitted events as one atomic batch
    ///
    /// Uncommitted events are cleared only when the whole batch is stored.
    /// Returns the number of events appended.
    ///
    /// # Errors
    ///
    /// - `ConcurrentModification` if another writer got there first
    /// - `Translation` if an event cannot be translated (for example an
    ///   unknown user)
    pub async fn append<A: Aggregate>(&self, aggregate: &mut A) -> StoreResult<usize> {
        let pending = aggregate.uncommitted_events();
        if pending.is_empty() {
            return Ok(0);
        }

        debug!(
            aggregate = A::AGGREGATE_TYPE,
            stream_id = %aggregate.id(),
            event_count = pending.len(),
            "Persisting events"
        );

        let envelopes = self.translator.to_envelopes(pending).await?;
        let stored = match self.storage.insert_batch(envelopes).await {
            Ok(stored) => stored,
            Err(err) => {
                if err.is_concurrency_conflict() {
                    warn!(
                        aggregate = A::AGGREGATE_TYPE,
                        stream_id = %aggregate.id(),
                        revision = aggregate.revision(),
                        "Append lost optimistic concurrency race"
                    );
                }
                return Err(err);
            }
        };

        aggregate.root_mut().clear_uncommitted();

        info!(
            aggregate = A::AGGREGATE_TYPE,
            stream_id = %aggregate.id(),
            revision = aggregate.revision(),
            event_count = stored.len(),
            "Appended events to event store"
        );

        Ok(stored.len())
    }

    /// Domain events for a stream with business time at or before `as_of`
    ///
    /// `as_of` defaults to the current instant. An empty result means the
    /// stream was not found.
    pub async fn load(
        &self,
        stream_id: Uuid,
        as_of: Option<DateTime<Utc>>,
    ) -> StoreResult<Vec<DomainEvent>> {
        let query = EnvelopeQuery::stream(stream_id, as_of.unwrap_or_else(Utc::now));
        self.translate_all(self.storage.query(&query).await?)
    }

    /// Rebuild one aggregate; `None` if the stream has no events
    pub async fn load_aggregate<A: Aggregate>(
        &self,
        stream_id: Uuid,
        as_of: Option<DateTime<Utc>>,
    ) -> StoreResult<Option<A>> {
        let events = self.load(stream_id, as_of).await?;
        if events.is_empty() {
            return Ok(None);
        }
        Ok(Some(A::from_history(stream_id, events)?))
    }

    /// Rebuild many aggregates with a single storage query
    ///
    /// Returns one aggregate per requested stream that has at least one event,
    /// in the order the ids were requested. Repeated ids are returned once.
    pub async fn load_batch<A: Aggregate>(
        &self,
        stream_ids: &[Uuid],
        as_of: Option<DateTime<Utc>>,
    ) -> StoreResult<Vec<A>> {
        if stream_ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = EnvelopeQuery::streams(stream_ids, as_of.unwrap_or_else(Utc::now));
        let events = self.translate_all(self.storage.query(&query).await?)?;

        let mut groups: HashMap<Uuid, Vec<DomainEvent>> = HashMap::new();
        for event in events {
            if let Some(stream_id) = event.event_stream_id() {
                groups.entry(stream_id).or_default().push(event);
            }
        }

        let mut aggregates = Vec::with_capacity(groups.len());
        for stream_id in stream_ids {
            if let Some(events) = groups.remove(stream_id) {
                aggregates.push(A::from_history(*stream_id, events)?);
            }
        }
        Ok(aggregates)
    }

    /// True if any event exists for the stream
    pub async fn exists(&self, stream_id: Uuid) -> StoreResult<bool> {
        Ok(self.storage.count(stream_id).await? > 0)
    }

    fn translate_all(&self, envelopes: Vec<EventEnvelope>) -> StoreResult<Vec<DomainEvent>> {
        envelopes
            .into_iter()
            .map(|envelope| Ok(self.translator.from_envelope(envelope)?))
            .collect()
    }
}
