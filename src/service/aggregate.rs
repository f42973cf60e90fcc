// Copyright (c) 2025 - Cowboy AI, Inc.
//! Generic aggregate service

use std::fmt;
use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{ServiceError, ServiceResult};
use crate::aggregate::Aggregate;
use crate::envelope::UserId;
use crate::errors::EventResult;
use crate::event_store::EventStore;
use crate::events::{DomainEvent, EventPayload, Revision};

/// Deferred event construction, completed once the revision is known
pub type EventBuilder = Box<dyn FnOnce(Revision) -> EventResult<DomainEvent> + Send>;

/// Builder for a payload on behalf of a user
pub fn build<P: EventPayload>(payload: P, user_id: UserId) -> EventBuilder {
    Box::new(move |revision| payload.into_event(user_id, revision))
}

/// Load, apply and append for one aggregate type
pub struct AggregateService<A> {
    store: EventStore,
    _aggregate: PhantomData<fn() -> A>,
}

impl<A> Clone for AggregateService<A> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _aggregate: PhantomData,
        }
    }
}

impl<A> fmt::Debug for AggregateService<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregateService")
            .field("aggregate", &std::any::type_name::<A>())
            .finish()
    }
}

impl<A: Aggregate + Clone> AggregateService<A> {
    pub fn new(store: EventStore) -> Self {
        Self {
            store,
            _aggregate: PhantomData,
        }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// Current state of one aggregate; `None` if it has no events
    pub async fn get_current(&self, id: Uuid) -> ServiceResult<Option<A>> {
        Ok(self.store.load_aggregate(id, None).await?)
    }

    /// Current state of one aggregate, failing with `NotFound` if absent
    pub async fn require_current(&self, id: Uuid) -> ServiceResult<A> {
        self.get_current(id).await?.ok_or(ServiceError::NotFound(id))
    }

    /// State of one aggregate as of a past instant
    pub async fn get_as_of(&self, id: Uuid, as_of: DateTime<Utc>) -> ServiceResult<Option<A>> {
        Ok(self.store.load_aggregate(id, Some(as_of)).await?)
    }

    /// Current state of many aggregates, in requested order, skipping unknown ids
    pub async fn get_multiple_current(&self, ids: &[Uuid]) -> ServiceResult<Vec<A>> {
        Ok(self.store.load_batch(ids, None).await?)
    }

    pub async fn exists(&self, id: Uuid) -> ServiceResult<bool> {
        Ok(self.store.exists(id).await?)
    }

    /// Apply one event at the next revision and append it
    pub async fn record(&self, aggregate: &mut A, builder: EventBuilder) -> ServiceResult<()> {
        self.record_all(aggregate, vec![builder]).await
    }

    /// Apply events at consecutive revisions and append them as one batch
    ///
    /// Events are staged on a copy first; the caller's aggregate only changes
    /// once every event applies cleanly.
    pub async fn record_all(
        &self,
        aggregate: &mut A,
        builders: Vec<EventBuilder>,
    ) -> ServiceResult<()> {
        let mut staged = aggregate.clone();
        for builder in builders {
            let event = builder(staged.next_revision())?;
            staged.apply(event)?;
        }
        *aggregate = staged;

        self.store.append(aggregate).await?;
        Ok(())
    }
}
