// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-restaurant
//!
//! Provides deterministic test data: fixed users, stream ids and timestamps.
//! Stores are always built empty with the two test users registered.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use cim_restaurant::config::StoreConfig;
use cim_restaurant::envelope::User;
use cim_restaurant::event_store::{EventStore, InMemoryEventStorage};
use cim_restaurant::events::{DomainEvent, EventPayload, Revision, RestaurantOpened};
use cim_restaurant::users::InMemoryUserDirectory;

// Fixed test UUIDs
pub const RESTAURANT_ID_1: &str = "01934f4a-1000-7000-8000-000000001000";
pub const RESTAURANT_ID_2: &str = "01934f4a-1001-7000-8000-000000001001";
pub const MENU_ITEM_ID_1: &str = "01934f4a-2000-7000-8000-000000002000";

// Fixed test timestamp (2026-01-19T12:00:00Z)
pub const FIXED_TIMESTAMP: &str = "2026-01-19T12:00:00Z";

pub const TEST_ADDRESS: &str = "123 Test Street, Fake City, MA 02144";

/// Parse a fixed UUID from a constant string
pub fn parse_uuid(s: &str) -> Uuid {
    Uuid::parse_str(s).expect("Invalid UUID in test fixture")
}

/// Parse the fixed timestamp
pub fn fixed_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(FIXED_TIMESTAMP)
        .expect("Invalid timestamp in test fixture")
        .with_timezone(&Utc)
}

/// Fixed timestamp shifted by whole days
pub fn days_from_fixed(days: i64) -> DateTime<Utc> {
    fixed_timestamp() + Duration::days(days)
}

pub fn test_user() -> User {
    User::new(100, "Test", "Testington", "test@test.com")
}

pub fn alice() -> User {
    User::new(25, "Alice", "Tester", "alice@test.com")
}

/// Directory holding both test users
pub async fn test_directory() -> Arc<InMemoryUserDirectory> {
    let directory = InMemoryUserDirectory::new();
    directory
        .insert(test_user())
        .await
        .expect("Failed to register test user");
    directory
        .insert(alice())
        .await
        .expect("Failed to register alice");
    Arc::new(directory)
}

/// Empty store plus a handle on its storage
pub async fn test_store_with_storage() -> (EventStore, Arc<InMemoryEventStorage>) {
    let storage = Arc::new(InMemoryEventStorage::new(StoreConfig::default()));
    let store = EventStore::new(storage.clone(), test_directory().await);
    (store, storage)
}

/// Empty store with the test users registered
pub async fn test_store() -> EventStore {
    test_store_with_storage().await.0
}

/// `RestaurantOpened` by the test user
pub fn opened(name: &str, revision: Revision) -> DomainEvent {
    RestaurantOpened::new(name, 2019, TEST_ADDRESS)
        .into_event(test_user().id, revision)
        .expect("Invalid RestaurantOpened fixture")
}

/// `RestaurantOpened` with an explicit business timestamp
pub fn opened_at(name: &str, revision: Revision, at: DateTime<Utc>) -> DomainEvent {
    opened(name, revision).with_timestamp(at)
}
