// Copyright (c) 2025 - Cowboy AI, Inc.
//! MenuItem Domain Events

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DomainEvent, Event, EventPayload};

/// Menu section a dish is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuCategory {
    Appetizer,
    Drink,
    /// Stored as `"entre"`
    #[serde(rename = "entre")]
    Entree,
    Dessert,
}

impl MenuCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuCategory::Appetizer => "appetizer",
            MenuCategory::Drink => "drink",
            MenuCategory::Entree => "entre",
            MenuCategory::Dessert => "dessert",
        }
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Menu item was created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemCreated {
    pub name: String,
    pub category: MenuCategory,
}

impl MenuItemCreated {
    pub fn new(name: impl Into<String>, category: MenuCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

impl EventPayload for MenuItemCreated {
    const EVENT_TYPE: &'static str = "menuitem.created";

    fn wrap(event: Event<Self>) -> DomainEvent {
        DomainEvent::MenuItemCreated(event)
    }
}

/// Price moved by `delta` cents (negative for a discount)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceChanged {
    pub delta: i64,
}

impl PriceChanged {
    pub fn new(delta: i64) -> Self {
        Self { delta }
    }
}

impl EventPayload for PriceChanged {
    const EVENT_TYPE: &'static str = "menuitem.price.changed";

    fn wrap(event: Event<Self>) -> DomainEvent {
        DomainEvent::PriceChanged(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_stored_strings() {
        assert_eq!(serde_json::to_value(MenuCategory::Entree).unwrap(), json!("entre"));
        assert_eq!(serde_json::to_value(MenuCategory::Drink).unwrap(), json!("drink"));

        let parsed: MenuCategory = serde_json::from_value(json!("appetizer")).unwrap();
        assert_eq!(parsed, MenuCategory::Appetizer);
        assert_eq!(MenuCategory::Dessert.to_string(), "dessert");
    }
}
