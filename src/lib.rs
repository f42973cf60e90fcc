//! Event-sourced aggregates for the restaurant domain
//!
//! This crate provides a small event-sourcing engine: a revision-checked fold
//! engine for aggregates, translation between domain events and storage
//! envelopes, and an append/query event store with optimistic concurrency.

pub mod aggregate;
pub mod config;
pub mod envelope;
pub mod errors;
pub mod event_store;
pub mod events;
pub mod service;
pub mod translation;
pub mod users;

// Re-export commonly used types
pub use aggregate::{Aggregate, AggregateRoot, MenuItem, Restaurant};
pub use config::{init_tracing, LoggingConfig, StoreConfig};
pub use envelope::{EventEnvelope, User, UserId};
pub use errors::{AggregateError, ConstructionError, StoreError, TranslationError};
pub use event_store::{EventStorage, EventStore, InMemoryEventStorage};
pub use events::{DomainEvent, EventPayload, Revision};
pub use service::{AggregateService, MenuItemService, RestaurantService, ServiceError};
pub use translation::EventTranslator;
pub use users::{InMemoryUserDirectory, UserDirectory};
