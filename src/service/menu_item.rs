// Copyright (c) 2025 - Cowboy AI, Inc.
//! MenuItem service

use tracing::debug;
use uuid::Uuid;

use super::aggregate::{build, AggregateService};
use super::{ServiceError, ServiceResult};
use crate::aggregate::{Aggregate, MenuItem};
use crate::envelope::User;
use crate::event_store::EventStore;
use crate::events::{MenuCategory, MenuItemCreated, PriceChanged};

#[derive(Debug, Clone)]
pub struct MenuItemService {
    items: AggregateService<MenuItem>,
}

impl MenuItemService {
    pub fn new(store: EventStore) -> Self {
        Self {
            items: AggregateService::new(store),
        }
    }

    pub async fn get_current(&self, id: Uuid) -> ServiceResult<Option<MenuItem>> {
        self.items.get_current(id).await
    }

    pub async fn get_multiple_current(&self, ids: &[Uuid]) -> ServiceResult<Vec<MenuItem>> {
        self.items.get_multiple_current(ids).await
    }

    pub async fn exists(&self, id: Uuid) -> ServiceResult<bool> {
        self.items.exists(id).await
    }

    /// Create a menu item with its starting price in one batch
    pub async fn create_menu_item(
        &self,
        user: &User,
        name: &str,
        category: MenuCategory,
        price_in_cents: i64,
    ) -> ServiceResult<MenuItem> {
        let mut item = MenuItem::new();
        self.items
            .record_all(
                &mut item,
                vec![
                    build(MenuItemCreated::new(name, category), user.id),
                    build(PriceChanged::new(price_in_cents), user.id),
                ],
            )
            .await?;

        debug!(menu_item_id = %item.id(), name, "Created menu item");
        Ok(item)
    }

    /// Record the difference between the new and current price
    pub async fn set_price(
        &self,
        user: &User,
        item: &mut MenuItem,
        new_price_in_cents: i64,
    ) -> ServiceResult<()> {
        let delta = new_price_in_cents
            .checked_sub(item.price_in_cents)
            .ok_or(ServiceError::PriceOverflow {
                current: item.price_in_cents,
                target: new_price_in_cents,
            })?;
        self.items
            .record(item, build(PriceChanged::new(delta), user.id))
            .await
    }
}
