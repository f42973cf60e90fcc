// Copyright (c) 2025 - Cowboy AI, Inc.
//! Restaurant Aggregate
//!
//! Tracks a restaurant's opening details, staff and menu. `RestaurantOpened`
//! may be applied more than once; later events correct earlier ones.

use uuid::Uuid;

use super::{Aggregate, AggregateRoot, MenuItem};
use crate::errors::{AggregateError, AggregateResult};
use crate::events::DomainEvent;

#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    root: AggregateRoot,
    pub name: String,
    pub year_opened: Option<i32>,
    pub address: String,
    /// Current staff, in hiring order
    pub employees: Vec<String>,
    /// Items on the menu, in the order they were added
    pub menu_item_ids: Vec<Uuid>,
    /// Associated menu items; not event-derived, see `RestaurantService::load_associated`
    pub menu_items: Vec<MenuItem>,
}

impl Restaurant {
    /// Unopened restaurant with a new identity
    pub fn new() -> Self {
        Self::from_root(AggregateRoot::generate())
    }

    pub fn employs(&self, employee_name: &str) -> bool {
        self.employees.iter().any(|e| e == employee_name)
    }
}

impl Default for Restaurant {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregate for Restaurant {
    const AGGREGATE_TYPE: &'static str = "Restaurant";

    fn from_root(root: AggregateRoot) -> Self {
        Self {
            root,
            name: String::new(),
            year_opened: None,
            address: String::new(),
            employees: Vec::new(),
            menu_item_ids: Vec::new(),
            menu_items: Vec::new(),
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
            DomainEvent::RestaurantOpened(e) => {
                self.name = e.payload.name.clone();
                self.year_opened = Some(e.payload.year);
                self.address = e.payload.location.clone();
            }
            DomainEvent::EmployeeHired(e) => {
                if !self.employs(&e.payload.employee_name) {
                    self.employees.push(e.payload.employee_name.clone());
                }
            }
            DomainEvent::EmployeeFired(e) => {
                self.employees.retain(|name| name != &e.payload.employee_name);
            }
            DomainEvent::MenuItemAdded(e) => {
                if !self.menu_item_ids.contains(&e.payload.menu_item_id) {
                    self.menu_item_ids.push(e.payload.menu_item_id);
                }
            }
            DomainEvent::MenuItemRemoved(e) => {
                self.menu_item_ids.retain(|id| id != &e.payload.menu_item_id);
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
