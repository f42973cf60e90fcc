// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Fold Engine
//!
//! These tests check properties that must hold for every valid event
//! sequence: revision bookkeeping, replay equivalence and the price fold.

use std::sync::Arc;

use cim_restaurant::aggregate::{Aggregate, MenuItem};
use cim_restaurant::config::StoreConfig;
use cim_restaurant::envelope::User;
use cim_restaurant::errors::AggregateError;
use cim_restaurant::event_store::EventStore;
use cim_restaurant::events::{DomainEvent, EventPayload, MenuCategory, MenuItemCreated, PriceChanged};
use cim_restaurant::users::InMemoryUserDirectory;
use proptest::prelude::*;

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Generate price deltas, small enough that sums never overflow
fn price_deltas() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-10_000i64..10_000, 0..40)
}

fn category() -> impl Strategy<Value = MenuCategory> {
    prop_oneof![
        Just(MenuCategory::Appetizer),
        Just(MenuCategory::Drink),
        Just(MenuCategory::Entree),
        Just(MenuCategory::Dessert),
    ]
}

/// Created at revision 1 followed by one PriceChanged per delta
fn menu_item_events(category: MenuCategory, deltas: &[i64]) -> Vec<DomainEvent> {
    let mut events = vec![MenuItemCreated::new("Coffee - L", category)
        .into_event(100, 1)
        .unwrap()];
    for (offset, delta) in deltas.iter().enumerate() {
        events.push(
            PriceChanged::new(*delta)
                .into_event(100, offset as i64 + 2)
                .unwrap(),
        );
    }
    events
}

fn live_item(events: Vec<DomainEvent>) -> MenuItem {
    let mut item = MenuItem::new();
    for event in events {
        item.apply(event).unwrap();
    }
    item
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Price is the sum of all deltas
    #[test]
    fn prop_price_is_sum_of_deltas(category in category(), deltas in price_deltas()) {
        let item = live_item(menu_item_events(category, &deltas));

        prop_assert_eq!(item.price_in_cents, deltas.iter().sum::<i64>());
        prop_assert_eq!(item.category, Some(category));
    }

    /// Property: Revision equals the number of applied events
    #[test]
    fn prop_revision_counts_events(deltas in price_deltas()) {
        let events = menu_item_events(MenuCategory::Drink, &deltas);
        let expected = events.len();
        let item = live_item(events);

        prop_assert_eq!(item.revision(), expected as i64);
        prop_assert_eq!(item.uncommitted_events().len(), expected);
    }

    /// Property: Replaying bound history reproduces live state
    #[test]
    fn prop_replay_matches_live(category in category(), deltas in price_deltas()) {
        let live = live_item(menu_item_events(category, &deltas));
        let history = live.uncommitted_events().to_vec();

        let replayed = MenuItem::from_history(live.id(), history).unwrap();

        prop_assert_eq!(replayed.price_in_cents, live.price_in_cents);
        prop_assert_eq!(replayed.category, live.category);
        prop_assert_eq!(replayed.revision(), live.revision());
        prop_assert!(replayed.uncommitted_events().is_empty());
    }

    /// Property: Only the next revision is accepted
    #[test]
    fn prop_only_next_revision_accepted(applied in 1usize..10, attempted in 0i64..20) {
        let deltas = vec![1; applied - 1];
        let mut item = live_item(menu_item_events(MenuCategory::Dessert, &deltas));
        let current = item.revision();
        let before = item.clone();

        let result = item.apply(PriceChanged::new(5).into_event(100, attempted).unwrap());

        if attempted == current + 1 {
            prop_assert!(result.is_ok());
            prop_assert_eq!(item.revision(), attempted);
        } else if attempted <= current {
            prop_assert_eq!(result, Err(AggregateError::StaleRevision { current, attempted }));
            prop_assert_eq!(item, before);
        } else {
            prop_assert_eq!(result, Err(AggregateError::RevisionGap { current, attempted }));
            prop_assert_eq!(item, before);
        }
    }

    /// Property: A stored item reloads with identical state
    #[test]
    fn prop_store_round_trip(category in category(), deltas in price_deltas()) {
        let mut item = live_item(menu_item_events(category, &deltas));

        let restored: MenuItem = tokio_test::block_on(async {
            let users = InMemoryUserDirectory::new();
            users
                .insert(User::new(100, "Test", "Testington", "test@test.com"))
                .await
                .unwrap();
            let store = EventStore::in_memory(StoreConfig::default(), Arc::new(users));
            store.append(&mut item).await.unwrap();
            store.load_aggregate(item.id(), None).await.unwrap().unwrap()
        });

        prop_assert_eq!(restored.price_in_cents, item.price_in_cents);
        prop_assert_eq!(restored.category, item.category);
        prop_assert_eq!(restored.revision(), item.revision());
    }
}
