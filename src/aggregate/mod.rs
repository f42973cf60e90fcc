// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event-Sourced Aggregates
//!
//! An aggregate's current state is the fold of its ordered event history:
//!
//! ```text
//! State = fold(Events, AggregateRoot::new(id), apply)
//! ```
//!
//! # The Fold Engine
//!
//! [`Aggregate::apply`] is the only way to mutate an aggregate. For an incoming
//! event at revision `R` against an aggregate at revision `S`:
//!
//! | Condition  | Outcome                    |
//! |------------|----------------------------|
//! | `R <= S`   | `StaleRevision`            |
//! | `R != S+1` | `RevisionGap`              |
//! | otherwise  | `S := R`, event dispatched |
//!
//! The same rule governs live commands and replay. During replay the gap check
//! doubles as an integrity check that the supplied history is complete and
//! ordered.
//!
//! # First Observation
//!
//! An event without a stream id has never been applied before. `apply` binds
//! the aggregate's id onto it, marks it first-observed and queues it in
//! `uncommitted_events` for the event store. Replayed events already carry a
//! stream id and skip this step.
//!
//! # Handler Tables
//!
//! Each aggregate implements [`Aggregate::when`] as an explicit match with one
//! arm per handled variant. Anything else must fail with
//! `UnhandledEventType`; there is no silent default. A failed dispatch leaves
//! the aggregate untouched.
//!
//! # Example
//!
//! ```rust
//! use cim_restaurant::aggregate::{Aggregate, Restaurant};
//! use cim_restaurant::events::{EventPayload, RestaurantOpened};
//!
//! let mut restaurant = Restaurant::new();
//! let event = RestaurantOpened::new("Bob's Cafe", 2019, "123 Test Street")
//!     .into_event(100, restaurant.next_revision())
//!     .unwrap();
//!
//! restaurant.apply(event).unwrap();
//!
//! assert_eq!(restaurant.revision(), 1);
//! assert_eq!(restaurant.uncommitted_events().len(), 1);
//! ```

use tracing::debug;
use uuid::Uuid;

use crate::errors::{AggregateError, AggregateResult};
use crate::events::{DomainEvent, Revision};

pub mod menu_item;
pub mod restaurant;

pub use menu_item::MenuItem;
pub use restaurant::Restaurant;

/// Bookkeeping shared by every aggregate: identity, revision, pending events
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRoot {
    id: Uuid,
    revision: Revision,
    uncommitted_events: Vec<DomainEvent>,
}

impl AggregateRoot {
    /// Root at revision 0 with the given identity
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            revision: 0,
            uncommitted_events: Vec::new(),
        }
    }

    /// Root at revision 0 with a freshly generated identity
    pub fn generate() -> Self {
        Self::new(Uuid::now_v7())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn uncommitted_events(&self) -> &[DomainEvent] {
        &self.uncommitted_events
    }

    pub(crate) fn clear_uncommitted(&mut self) {
        self.uncommitted_events.clear();
    }
}

impl Default for AggregateRoot {
    fn default() -> Self {
        Self::generate()
    }
}

/// An entity whose state is derived by folding its event stream
pub trait Aggregate: Sized + Send + Sync {
    /// Human-readable aggregate name used in errors and logs
    const AGGREGATE_TYPE: &'static str;

    /// Build an empty aggregate around existing bookkeeping
    fn from_root(root: AggregateRoot) -> Self;

    fn root(&self) -> &AggregateRoot;

    fn root_mut(&mut self) -> &mut AggregateRoot;

    /// Handler table: mutate state for one event
    ///
    /// Must return `UnhandledEventType` without touching state for any
    /// variant the aggregate does not handle. Any other error must also leave
    /// state untouched.
    fn when(&mut self, event: &DomainEvent) -> AggregateResult<()>;

    /// Empty aggregate at revision 0 for a known stream
    fn with_id(id: Uuid) -> Self {
        Self::from_root(AggregateRoot::new(id))
    }

    fn id(&self) -> Uuid {
        self.root().id()
    }

    fn revision(&self) -> Revision {
        self.root().revision()
    }

    /// Revision the next applied event must carry
    fn next_revision(&self) -> Revision {
        self.revision() + 1
    }

    /// Events applied in memory but not yet appended to the store
    fn uncommitted_events(&self) -> &[DomainEvent] {
        self.root().uncommitted_events()
    }

    /// Apply one event; the sole mutation entrypoint
    ///
    /// The handler runs before the revision advances and before the event is
    /// queued, so a handler error leaves the aggregate unchanged.
    ///
    /// # Errors
    ///
    /// - `StaleRevision` if the event is at or behind the current revision
    /// - `RevisionGap` if the event skips the next expected revision
    /// - `UnhandledEventType` if this aggregate has no handler for the event
    /// - any error the handler itself returns, such as `PriceOverflow`
    fn apply(&mut self, mut event: DomainEvent) -> AggregateResult<()> {
        let current = self.revision();
        let attempted = event.revision();

        if attempted <= current {
            return Err(AggregateError::StaleRevision { current, attempted });
        }
        if attempted != current + 1 {
            return Err(AggregateError::RevisionGap { current, attempted });
        }

        let first_observation = event.event_stream_id().is_none();
        if first_observation {
            let metadata = event.metadata_mut();
            metadata.bind_stream(self.id());
            metadata.mark_first_observation();
        }

        self.when(&event)?;

        debug!(
            aggregate = Self::AGGREGATE_TYPE,
            stream_id = %self.id(),
            revision = attempted,
            event_type = event.event_type(),
            first_observation,
            "Applied event"
        );

        let root = self.root_mut();
        root.revision = attempted;
        if first_observation {
            root.uncommitted_events.push(event);
        }

        Ok(())
    }

    /// Rebuild an aggregate by replaying its stored history
    fn from_history<I>(id: Uuid, events: I) -> AggregateResult<Self>
    where
        I: IntoIterator<Item = DomainEvent>,
    {
        let mut aggregate = Self::with_id(id);
        for event in events {
            aggregate.apply(event)?;
        }
        Ok(aggregate)
    }
}
