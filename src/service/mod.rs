// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Layer for Event-Sourced Aggregates
//!
//! Services orchestrate the load → apply → append cycle on top of the
//! [`EventStore`](crate::event_store::EventStore).
//!
//! # Architecture
//!
//! ```text
//! Caller
//!     ↓
//! Domain Service (RestaurantService, MenuItemService)
//!     ↓
//! AggregateService<A>: build event at next revision → Aggregate::apply
//!     ↓
//! EventStore::append (one atomic batch)
//! ```
//!
//! # Transaction Semantics
//!
//! Each mutating call is one transaction:
//! 1. Build events at consecutive revisions after the aggregate's current one
//! 2. Apply them in memory
//! 3. Append the uncommitted events as a single batch
//!
//! If step 2 fails the caller's aggregate is left as it was. If step 3 fails
//! the events stay uncommitted on the aggregate and the error is returned; a
//! `ConcurrentModification` means the caller should reload and decide whether
//! to retry.
//!
//! # Example
//!
//! ```rust,ignore
//! use cim_restaurant::service::RestaurantService;
//!
//! let service = RestaurantService::new(event_store);
//! let mut bobs = service
//!     .open_restaurant(&user, "Bob's Coffee Shop", "123 Test Street", None)
//!     .await?;
//! service.hire_employees(&user, &mut bobs, &["Sam", "Mark"]).await?;
//! ```

use uuid::Uuid;

use crate::errors::{AggregateError, ConstructionError, StoreError};

pub mod aggregate;
pub mod menu_item;
pub mod restaurant;

pub use aggregate::{build, AggregateService, EventBuilder};
pub use menu_item::MenuItemService;
pub use restaurant::RestaurantService;

/// Service layer result type
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service layer errors
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Event store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Event construction failed
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    /// Applying a built event failed
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    /// Firing someone who does not work at the restaurant
    #[error("Employee {employee} doesn't work at {restaurant}")]
    EmployeeNotFound { employee: String, restaurant: String },

    /// The requested price is too far from the current one to express as a delta
    #[error("Cannot move price from {current} to {target} cents")]
    PriceOverflow { current: i64, target: i64 },

    /// Aggregate not found
    #[error("Aggregate not found: {0}")]
    NotFound(Uuid),
}

impl ServiceError {
    /// True when the caller should reload and retry
    pub fn is_concurrency_conflict(&self) -> bool {
        matches!(self, ServiceError::Store(err) if err.is_concurrency_conflict())
    }
}
