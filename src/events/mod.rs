// Copyright (c) 2025 - Cowboy AI, Inc.
//! Restaurant Domain Events
//!
//! This module defines the domain event contract and every event variant the
//! restaurant bounded context can record. Events are immutable facts; the only
//! thing that ever changes on an event after construction is its stream binding,
//! which happens exactly once when an aggregate first observes it.
//!
//! # Event Shape
//!
//! Every variant is an [`Event<P>`]: shared [`EventMetadata`] plus a typed
//! payload `P`. The payload is the only part written into the envelope's `data`
//! column, so its serde mapping *is* the storage format.
//!
//! ```text
//! Event<RestaurantOpened>
//!   metadata: { event_stream_id, user_id, revision, timestamp, first_observation }
//!   payload:  { name, year, location }            → envelope.data
//! ```
//!
//! # First Observation
//!
//! A freshly constructed event has no stream id. When an aggregate applies it,
//! the aggregate binds its own id onto the event and marks it as first observed;
//! that is how the aggregate knows the event is uncommitted. Events hydrated
//! from storage already carry their stream id and are treated as replay.
//!
//! # Module Organization
//!
//! - [`restaurant`] - Restaurant aggregate events
//! - [`menu_item`] - MenuItem aggregate events

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::envelope::UserId;
use crate::errors::{ConstructionError, EventResult};

pub mod menu_item;
pub mod restaurant;

pub use menu_item::{MenuCategory, MenuItemCreated, PriceChanged};
pub use restaurant::{EmployeeFired, EmployeeHired, MenuItemAdded, MenuItemRemoved, RestaurantOpened};

/// Per-stream sequence number, also the optimistic-concurrency token
pub type Revision = i64;

/// Metadata shared by every domain event
#[derive(Debug, Clone, PartialEq)]
pub struct EventMetadata {
    event_stream_id: Option<Uuid>,
    user_id: UserId,
    revision: Revision,
    timestamp: DateTime<Utc>,
    first_observation: bool,
}

impl EventMetadata {
    /// Validate and build event metadata
    ///
    /// The timestamp is taken at the moment of construction.
    ///
    /// # Errors
    ///
    /// - `MissingUser` if `user_id` is `None`
    /// - `NegativeRevision` if `revision < 0`
    pub fn new(user_id: Option<UserId>, revision: Revision) -> EventResult<Self> {
        let user_id = user_id.ok_or(ConstructionError::MissingUser)?;
        if revision < 0 {
            return Err(ConstructionError::NegativeRevision(revision));
        }

        Ok(Self {
            event_stream_id: None,
            user_id,
            revision,
            timestamp: Utc::now(),
            first_observation: false,
        })
    }

    pub fn event_stream_id(&self) -> Option<Uuid> {
        self.event_stream_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// True only on the in-memory instance that an aggregate first applied
    pub fn is_first_observation(&self) -> bool {
        self.first_observation
    }

    pub(crate) fn set_timestamp(&mut self, timestamp: DateTime<Utc>) {
        self.timestamp = timestamp;
    }

    /// Idempotent stream binding
    pub(crate) fn bind_stream(&mut self, stream_id: Uuid) {
        self.event_stream_id = Some(stream_id);
    }

    pub(crate) fn mark_first_observation(&mut self) {
        self.first_observation = true;
    }
}

/// Capability shared by every event payload type
///
/// Each payload declares its stable type tag and how it is wrapped into the
/// closed [`DomainEvent`] set. `encode` and `decode` are inverse hooks run by
/// the translator around persistence; they default to no-ops because the serde
/// mapping of the payload already handles typed fields such as identifiers.
pub trait EventPayload:
    Serialize + DeserializeOwned + Clone + Debug + PartialEq + Send + Sync + 'static
{
    /// Stable type tag stored in the envelope
    const EVENT_TYPE: &'static str;

    /// Wrap a typed event into the closed event set
    fn wrap(event: Event<Self>) -> DomainEvent;

    /// Runs once, immediately before the payload is extracted for persistence
    fn encode(&mut self) {}

    /// Runs once, immediately after the payload is hydrated from storage
    fn decode(&mut self) {}

    /// Build a new, unbound domain event carrying this payload
    fn into_event(self, user_id: UserId, revision: Revision) -> EventResult<DomainEvent> {
        Ok(Self::wrap(Event::new(self, user_id, revision)?))
    }
}

/// A typed domain event: shared metadata plus a variant payload
#[derive(Debug, Clone, PartialEq)]
pub struct Event<P> {
    pub metadata: EventMetadata,
    pub payload: P,
}

impl<P: EventPayload> Event<P> {
    /// Create an unbound event timestamped now
    pub fn new(payload: P, user_id: UserId, revision: Revision) -> EventResult<Self> {
        Ok(Self {
            metadata: EventMetadata::new(Some(user_id), revision)?,
            payload,
        })
    }

    /// Override the business timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.metadata.set_timestamp(timestamp);
        self
    }

    /// Wrap into the closed event set
    pub fn into_domain(self) -> DomainEvent {
        P::wrap(self)
    }
}

/// Closed set of restaurant domain events
#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    RestaurantOpened(Event<RestaurantOpened>),
    EmployeeHired(Event<EmployeeHired>),
    EmployeeFired(Event<EmployeeFired>),
    MenuItemAdded(Event<MenuItemAdded>),
    MenuItemRemoved(Event<MenuItemRemoved>),
    MenuItemCreated(Event<MenuItemCreated>),
    PriceChanged(Event<PriceChanged>),
}

impl DomainEvent {
    pub fn metadata(&self) -> &EventMetadata {
        use DomainEvent::*;

        match self {
            RestaurantOpened(e) => &e.metadata,
            EmployeeHired(e) => &e.metadata,
            EmployeeFired(e) => &e.metadata,
            MenuItemAdded(e) => &e.metadata,
            MenuItemRemoved(e) => &e.metadata,
            MenuItemCreated(e) => &e.metadata,
            PriceChanged(e) => &e.metadata,
        }
    }

    pub(crate) fn metadata_mut(&mut self) -> &mut EventMetadata {
        use DomainEvent::*;

        match self {
            RestaurantOpened(e) => &mut e.metadata,
            EmployeeHired(e) => &mut e.metadata,
            EmployeeFired(e) => &mut e.metadata,
            MenuItemAdded(e) => &mut e.metadata,
            MenuItemRemoved(e) => &mut e.metadata,
            MenuItemCreated(e) => &mut e.metadata,
            PriceChanged(e) => &mut e.metadata,
        }
    }

    /// Stable type tag of the variant
    pub fn event_type(&self) -> &'static str {
        use DomainEvent::*;

        match self {
            RestaurantOpened(_) => restaurant::RestaurantOpened::EVENT_TYPE,
            EmployeeHired(_) => restaurant::EmployeeHired::EVENT_TYPE,
            EmployeeFired(_) => restaurant::EmployeeFired::EVENT_TYPE,
            MenuItemAdded(_) => restaurant::MenuItemAdded::EVENT_TYPE,
            MenuItemRemoved(_) => restaurant::MenuItemRemoved::EVENT_TYPE,
            MenuItemCreated(_) => menu_item::MenuItemCreated::EVENT_TYPE,
            PriceChanged(_) => menu_item::PriceChanged::EVENT_TYPE,
        }
    }

    pub fn event_stream_id(&self) -> Option<Uuid> {
        self.metadata().event_stream_id()
    }

    pub fn revision(&self) -> Revision {
        self.metadata().revision()
    }

    pub fn user_id(&self) -> UserId {
        self.metadata().user_id()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.metadata().timestamp()
    }

    pub fn is_first_observation(&self) -> bool {
        self.metadata().is_first_observation()
    }

    /// Override the business timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.metadata_mut().set_timestamp(timestamp);
        self
    }
}
