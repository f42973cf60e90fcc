// Copyright (c) 2025 - Cowboy AI, Inc.
//! Restaurant Domain Events
//!
//! Payloads for every state change of the Restaurant aggregate. Field names are
//! the stored payload keys; renaming one is a schema change.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DomainEvent, Event, EventPayload};

/// Restaurant was opened (or its opening details corrected)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantOpened {
    pub name: String,
    pub year: i32,
    pub location: String,
}

impl RestaurantOpened {
    pub fn new(name: impl Into<String>, year: i32, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            year,
            location: location.into(),
        }
    }
}

impl EventPayload for RestaurantOpened {
    const EVENT_TYPE: &'static str = "restaurant.opened";

    fn wrap(event: Event<Self>) -> DomainEvent {
        DomainEvent::RestaurantOpened(event)
    }
}

/// Employee joined the restaurant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeHired {
    pub employee_name: String,
}

impl EmployeeHired {
    pub fn new(employee_name: impl Into<String>) -> Self {
        Self {
            employee_name: employee_name.into(),
        }
    }
}

impl EventPayload for EmployeeHired {
    const EVENT_TYPE: &'static str = "restaurant.employee.hired";

    fn wrap(event: Event<Self>) -> DomainEvent {
        DomainEvent::EmployeeHired(event)
    }
}

/// Employee left the restaurant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFired {
    pub employee_name: String,
}

impl EmployeeFired {
    pub fn new(employee_name: impl Into<String>) -> Self {
        Self {
            employee_name: employee_name.into(),
        }
    }
}

impl EventPayload for EmployeeFired {
    const EVENT_TYPE: &'static str = "restaurant.employee.fired";

    fn wrap(event: Event<Self>) -> DomainEvent {
        DomainEvent::EmployeeFired(event)
    }
}

/// Menu item was put on the restaurant's menu
///
/// The item id is stored as its hyphenated string form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemAdded {
    pub menu_item_id: Uuid,
}

impl MenuItemAdded {
    pub fn new(menu_item_id: Uuid) -> Self {
        Self { menu_item_id }
    }
}

impl EventPayload for MenuItemAdded {
    const EVENT_TYPE: &'static str = "restaurant.menuitem.added";

    fn wrap(event: Event<Self>) -> DomainEvent {
        DomainEvent::MenuItemAdded(event)
    }
}

/// Menu item was taken off the restaurant's menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemRemoved {
    pub menu_item_id: Uuid,
}

impl MenuItemRemoved {
    pub fn new(menu_item_id: Uuid) -> Self {
        Self { menu_item_id }
    }
}

impl EventPayload for MenuItemRemoved {
    const EVENT_TYPE: &'static str = "restaurant.menuitem.removed";

    fn wrap(event: Event<Self>) -> DomainEvent {
        DomainEvent::MenuItemRemoved(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_menu_item_id_is_stored_as_string() {
        let id = Uuid::parse_str("01934f4a-2000-7000-8000-000000002000").unwrap();
        let value = serde_json::to_value(MenuItemAdded::new(id)).unwrap();

        assert_eq!(
            value,
            json!({ "menu_item_id": "01934f4a-2000-7000-8000-000000002000" })
        );
    }

    #[test]
    fn test_restaurant_opened_payload_keys() {
        let value = serde_json::to_value(RestaurantOpened::new("Bob's Cafe", 2019, "123 Test Street"))
            .unwrap();

        assert_eq!(value["name"], json!("Bob's Cafe"));
        assert_eq!(value["year"], json!(2019));
        assert_eq!(value["location"], json!("123 Test Street"));
    }
}
