// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for event sourcing operations
//!
//! Each layer of the engine owns one error enum:
//!
//! - [`ConstructionError`] - invalid metadata when building a domain event
//! - [`AggregateError`] - revision and dispatch failures inside `apply()`
//! - [`TranslationError`] - event ↔ envelope mapping failures
//! - [`DirectoryError`] - user directory failures
//! - [`StoreError`] - persistence and query failures
//!
//! Only [`StoreError::ConcurrentModification`] is expected in normal operation;
//! the caller reloads the aggregate and retries. Everything else is a caller bug
//! or a configuration error and is surfaced as-is.

use thiserror::Error;
use uuid::Uuid;

use crate::envelope::UserId;
use crate::events::Revision;

/// Invalid metadata supplied when constructing a domain event
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// Every event must be attributed to a user
    #[error("User id may not be empty")]
    MissingUser,

    /// Revisions start at zero
    #[error("Revision must be zero or greater, got {0}")]
    NegativeRevision(Revision),
}

/// Result type for event construction
pub type EventResult<T> = Result<T, ConstructionError>;

/// Errors raised by the aggregate fold engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// Event revision is at or behind the aggregate's current revision
    #[error("Current aggregate revision is {current}; attempted to apply an event with revision {attempted}")]
    StaleRevision {
        current: Revision,
        attempted: Revision,
    },

    /// Event revision skips past the next expected revision
    #[error("Attempted to apply an event with revision {attempted} to an aggregate at revision {current}; events are missing")]
    RevisionGap {
        current: Revision,
        attempted: Revision,
    },

    /// The aggregate has no handler wired for this event type
    #[error("{aggregate} has no handler for event type '{event_type}'")]
    UnhandledEventType {
        aggregate: &'static str,
        event_type: &'static str,
    },

    /// Applying a price delta would overflow the running price
    #[error("Price change of {delta} cents overflows the current price of {current} cents")]
    PriceOverflow { current: i64, delta: i64 },
}

/// Result type for aggregate operations
pub type AggregateResult<T> = Result<T, AggregateError>;

/// Errors raised by the user directory
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// Email addresses are unique across the directory
    #[error("A user with email '{0}' already exists")]
    DuplicateEmail(String),

    /// User id is already taken
    #[error("A user with id {0} already exists")]
    DuplicateId(UserId),
}

/// Errors raised while translating between domain events and envelopes
#[derive(Debug, Error)]
pub enum TranslationError {
    /// No variant is registered for the envelope's type tag
    #[error("Unknown event type '{0}'")]
    UnknownEventType(String),

    /// The event's user id does not resolve to a user record
    #[error("Unknown user {0}")]
    UnknownUser(UserId),

    /// Only events bound to a stream can be persisted
    #[error("Event '{event_type}' at revision {revision} is not bound to an event stream")]
    UnboundEvent {
        event_type: &'static str,
        revision: Revision,
    },

    /// Payload could not be converted to or from its stored form
    #[error("Payload error for event type '{event_type}': {source}")]
    Payload {
        event_type: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Stored metadata failed event construction rules
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    /// User lookup failed
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Result type for translation operations
pub type TranslationResult<T> = Result<T, TranslationError>;

/// Errors raised by the event store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another writer already stored an event at this (stream, revision) pair
    #[error("Concurrent modification of stream {stream_id}: revision {revision} already exists")]
    ConcurrentModification { stream_id: Uuid, revision: Revision },

    /// Envelope violates a storage constraint
    #[error("Invalid envelope: {0}")]
    InvalidEnvelope(String),

    /// Translation failed on the way in or out of storage
    #[error(transparent)]
    Translation(#[from] TranslationError),

    /// Replayed history failed the fold engine's checks
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

impl StoreError {
    /// True when the caller should reload and retry
    pub fn is_concurrency_conflict(&self) -> bool {
        matches!(self, StoreError::ConcurrentModification { .. })
    }
}

/// Result type for event store operations
pub type StoreResult<T> = Result<T, StoreError>;
