// Copyright (c) 2025 - Cowboy AI, Inc.
//! MenuItem Aggregate
//!
//! Price is never stored directly; it is the running sum of `PriceChanged`
//! deltas starting from zero.

use super::{Aggregate, AggregateRoot};
use crate::errors::{AggregateError, AggregateResult};
use crate::events::{DomainEvent, MenuCategory};

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    root: AggregateRoot,
    pub name: String,
    pub category: Option<MenuCategory>,
    pub price_in_cents: i64,
}

impl MenuItem {
    /// Uncreated menu item with a new identity
    pub fn new() -> Self {
        Self::from_root(AggregateRoot::generate())
    }
}

impl Default for MenuItem {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregate for MenuItem {
    const AGGREGATE_TYPE: &'static str = "MenuItem";

    fn from_root(root: AggregateRoot) -> Self {
        Self {
            root,
            name: String::new(),
            category: None,
            price_in_cents: 0,
        }
    }

    fn root(&self) -> &AggregateRoot {
        &self.root
    }

    fn root_mut(&mut self) -> &mut AggregateRoot {
        &mut self.root
    }

    fn when(&mut self, event: &DomainEvent) -> AggregateResult<()> {
        match event {
            DomainEvent::MenuItemCreated(e) => {
                self.name = e.payload.name.clone();
                self.category = Some(e.payload.category);
            }
            DomainEvent::PriceChanged(e) => {
                let delta = e.payload.delta;
                self.price_in_cents = self.price_in_cents.checked_add(delta).ok_or(
                    AggregateError::PriceOverflow {
                        current: self.price_in_cents,
                        delta,
                    },
                )?;
            }
            other => {
                return Err(AggregateError::UnhandledEventType {
                    aggregate: Self::AGGREGATE_TYPE,
                    event_type: other.event_type(),
                })
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EmployeeHired, EventPayload, MenuItemCreated, PriceChanged};

    #[test]
    fn test_price_is_sum_of_deltas() {
        let mut item = MenuItem::new();
        item.apply(
            MenuItemCreated::new("Coffee - L", MenuCategory::Drink)
                .into_event(100, 1)
                .unwrap(),
        )
        .unwrap();
        for (revision, delta) in [(2, 250), (3, 49), (4, -100)] {
            item.apply(PriceChanged::new(delta).into_event(100, revision).unwrap())
                .unwrap();
        }

        assert_eq!(item.name, "Coffee - L");
        assert_eq!(item.category, Some(MenuCategory::Drink));
        assert_eq!(item.price_in_cents, 199);
        assert_eq!(item.revision(), 4);
    }

    #[test]
    fn test_price_overflow_is_rejected() {
        let mut item = MenuItem::new();
        item.apply(
            MenuItemCreated::new("Coffee - L", MenuCategory::Drink)
                .into_event(100, 1)
                .unwrap(),
        )
        .unwrap();
        item.apply(PriceChanged::new(i64::MAX).into_event(100, 2).unwrap())
            .unwrap();

        let err = item
            .apply(PriceChanged::new(1).into_event(100, 3).unwrap())
            .unwrap_err();

        assert_eq!(
            err,
            AggregateError::PriceOverflow {
                current: i64::MAX,
                delta: 1,
            }
        );
        assert_eq!(item.revision(), 2);
        assert_eq!(item.price_in_cents, i64::MAX);
        assert_eq!(item.uncommitted_events().len(), 2);
    }

    #[test]
    fn test_restaurant_events_are_unhandled() {
        let mut item = MenuItem::new();
        let err = item
            .apply(EmployeeHired::new("Sam").into_event(100, 1).unwrap())
            .unwrap_err();

        assert_eq!(
            err,
            AggregateError::UnhandledEventType {
                aggregate: "MenuItem",
                event_type: "restaurant.employee.hired",
            }
        );
    }
}
