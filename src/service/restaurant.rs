// Copyright (c) 2025 - Cowboy AI, Inc.
//! Restaurant service
//!
//! Commands expect the restaurant passed in to be at its current state; a stale
//! copy loses the append race with `ConcurrentModification`.

use chrono::{Datelike, Utc};
use uuid::Uuid;

use super::aggregate::{build, AggregateService, EventBuilder};
use super::menu_item::MenuItemService;
use super::{ServiceError, ServiceResult};
use crate::aggregate::{Aggregate, MenuItem, Restaurant};
use crate::envelope::User;
use crate::event_store::EventStore;
use crate::events::{EmployeeFired, EmployeeHired, MenuItemAdded, MenuItemRemoved, RestaurantOpened};

#[derive(Debug, Clone)]
pub struct RestaurantService {
    restaurants: AggregateService<Restaurant>,
    menu_items: MenuItemService,
}

impl RestaurantService {
    pub fn new(store: EventStore) -> Self {
        Self {
            menu_items: MenuItemService::new(store.clone()),
            restaurants: AggregateService::new(store),
        }
    }

    pub async fn get_current(&self, id: Uuid) -> ServiceResult<Option<Restaurant>> {
        self.restaurants.get_current(id).await
    }

    pub async fn get_multiple_current(&self, ids: &[Uuid]) -> ServiceResult<Vec<Restaurant>> {
        self.restaurants.get_multiple_current(ids).await
    }

    pub async fn exists(&self, id: Uuid) -> ServiceResult<bool> {
        self.restaurants.exists(id).await
    }

    /// Fill `menu_items` from the restaurant's current menu item ids
    pub async fn load_associated(&self, restaurant: &mut Restaurant) -> ServiceResult<()> {
        restaurant.menu_items = self
            .menu_items
            .get_multiple_current(&restaurant.menu_item_ids)
            .await?;
        Ok(())
    }

    /// Open a new restaurant; `year` defaults to the current year
    pub async fn open_restaurant(
        &self,
        user: &User,
        name: &str,
        location: &str,
        year: Option<i32>,
    ) -> ServiceResult<Restaurant> {
        let year = year.unwrap_or_else(|| Utc::now().year());
        let mut restaurant = Restaurant::new();
        self.restaurants
            .record(
                &mut restaurant,
                build(RestaurantOpened::new(name, year, location), user.id),
            )
            .await?;
        Ok(restaurant)
    }

    /// Hire several employees in one batch
    pub async fn hire_employees(
        &self,
        user: &User,
        restaurant: &mut Restaurant,
        employees: &[&str],
    ) -> ServiceResult<()> {
        let builders: Vec<EventBuilder> = employees
            .iter()
            .map(|name| build(EmployeeHired::new(*name), user.id))
            .collect();
        self.restaurants.record_all(restaurant, builders).await
    }

    /// Fire an employee who currently works at the restaurant
    ///
    /// # Errors
    ///
    /// `EmployeeNotFound` if nobody by that name works there; nothing is recorded.
    pub async fn fire_employee(
        &self,
        user: &User,
        restaurant: &mut Restaurant,
        employee: &str,
    ) -> ServiceResult<()> {
        if !restaurant.employs(employee) {
            return Err(ServiceError::EmployeeNotFound {
                employee: employee.to_string(),
                restaurant: restaurant.name.clone(),
            });
        }

        self.restaurants
            .record(restaurant, build(EmployeeFired::new(employee), user.id))
            .await
    }

    /// Put menu items on the menu in one batch
    pub async fn add_items_to_menu(
        &self,
        user: &User,
        restaurant: &mut Restaurant,
        items: &[MenuItem],
    ) -> ServiceResult<()> {
        let builders: Vec<EventBuilder> = items
            .iter()
            .map(|item| build(MenuItemAdded::new(item.id()), user.id))
            .collect();
        self.restaurants.record_all(restaurant, builders).await?;

        for item in items {
            if !restaurant.menu_items.iter().any(|known| known.id() == item.id()) {
                restaurant.menu_items.push(item.clone());
            }
        }
        Ok(())
    }

    /// Take menu items off the menu in one batch
    pub async fn remove_items_from_menu(
        &self,
        user: &User,
        restaurant: &mut Restaurant,
        items: &[MenuItem],
    ) -> ServiceResult<()> {
        let builders: Vec<EventBuilder> = items
            .iter()
            .map(|item| build(MenuItemRemoved::new(item.id()), user.id))
            .collect();
        self.restaurants.record_all(restaurant, builders).await?;

        restaurant
            .menu_items
            .retain(|known| !items.iter().any(|item| item.id() == known.id()));
        Ok(())
    }
}
