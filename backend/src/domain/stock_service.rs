//! Stock levels and the adjustments other records trigger.
//!
//! In the hosted deployment these adjustments run as store-side triggers;
//! here they are explicit methods the donation, purchase and usage services
//! call after a successful write. Stock never goes negative: decrements
//! floor at zero.

use anyhow::{anyhow, Result};
use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::events::{ChangeOp, Collection, EventBus};
use crate::storage::StockStorage;
use shared::{StockListResponse, UpdateStockRequest};

#[derive(Clone)]
pub struct StockService {
    stock_storage: Arc<dyn StockStorage>,
    event_bus: EventBus,
}

impl StockService {
    pub fn new(stock_storage: Arc<dyn StockStorage>, event_bus: EventBus) -> Self {
        Self {
            stock_storage,
            event_bus,
        }
    }

    /// List an account's stock entries.
    pub async fn list_stock(&self, user_id: &str) -> Result<StockListResponse> {
        let entries = self.stock_storage.list_stock_entries(user_id)?;
        Ok(StockListResponse {
            entries: entries.iter().map(|entry| entry.to_dto()).collect(),
        })
    }

    /// Set a stock entry to an absolute quantity (admin inline edit).
    pub async fn set_stock(
        &self,
        user_id: &str,
        stock_entry_id: &str,
        request: UpdateStockRequest,
    ) -> Result<shared::StockEntry> {
        info!(
            "Setting stock entry {} to {} for user {}",
            stock_entry_id, request.current_quantity, user_id
        );

        let mut entry = self
            .stock_storage
            .get_stock_entry(stock_entry_id)?
            .filter(|e| e.user_id == user_id)
            .ok_or_else(|| anyhow!("Stock entry not found: {}", stock_entry_id))?;

        entry.current_quantity = request.current_quantity;
        entry.last_updated_at = Utc::now();
        self.stock_storage.update_stock_entry(&entry)?;
        self.event_bus.publish(Collection::Stock, ChangeOp::Updated);

        Ok(entry.to_dto())
    }

    /// Add to a group's stock (approved donation, purchase).
    pub fn increase_for_group(&self, age_group_id: &str, quantity: u32) -> Result<()> {
        let mut entry = self
            .stock_storage
            .get_stock_for_group(age_group_id)?
            .ok_or_else(|| anyhow!("No stock entry for age group: {}", age_group_id))?;

        entry.current_quantity += quantity;
        entry.last_updated_at = Utc::now();
        self.stock_storage.update_stock_entry(&entry)?;
        self.event_bus.publish(Collection::Stock, ChangeOp::Updated);
        info!(
            "Stock for group {} increased by {} to {}",
            age_group_id, quantity, entry.current_quantity
        );
        Ok(())
    }

    /// Subtract from a group's stock (usage), flooring at zero.
    pub fn decrease_for_group(&self, age_group_id: &str, quantity: u32) -> Result<()> {
        let mut entry = self
            .stock_storage
            .get_stock_for_group(age_group_id)?
            .ok_or_else(|| anyhow!("No stock entry for age group: {}", age_group_id))?;

        entry.current_quantity = entry.current_quantity.saturating_sub(quantity);
        entry.last_updated_at = Utc::now();
        self.stock_storage.update_stock_entry(&entry)?;
        self.event_bus.publish(Collection::Stock, ChangeOp::Updated);
        info!(
            "Stock for group {} decreased by {} to {}",
            age_group_id, quantity, entry.current_quantity
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{stock_entry, test_store, TEST_USER};
    use crate::storage::{MemoryStore, StockStorage as _};

    fn service(store: &MemoryStore) -> StockService {
        StockService::new(Arc::new(store.clone()), EventBus::new())
    }

    fn seed_stock(store: &MemoryStore, group_id: &str, quantity: u32) -> String {
        let entry = stock_entry(group_id, quantity);
        store.store_stock_entry(&entry).unwrap();
        entry.id
    }

    #[tokio::test]
    async fn test_set_stock_overwrites_quantity() {
        let store = test_store();
        let entry_id = seed_stock(&store, "g", 10);

        let updated = service(&store)
            .set_stock(
                TEST_USER,
                &entry_id,
                UpdateStockRequest {
                    current_quantity: 42,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.current_quantity, 42);
    }

    #[tokio::test]
    async fn test_set_stock_rejects_foreign_entry() {
        let store = test_store();
        let entry_id = seed_stock(&store, "g", 10);

        let result = service(&store)
            .set_stock(
                "intruder",
                &entry_id,
                UpdateStockRequest {
                    current_quantity: 0,
                },
            )
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_increase_adds_quantity() {
        let store = test_store();
        seed_stock(&store, "g", 10);

        service(&store).increase_for_group("g", 15).unwrap();
        let entry = store.get_stock_for_group("g").unwrap().unwrap();
        assert_eq!(entry.current_quantity, 25);
    }

    #[test]
    fn test_decrease_floors_at_zero() {
        let store = test_store();
        seed_stock(&store, "g", 10);

        service(&store).decrease_for_group("g", 25).unwrap();
        let entry = store.get_stock_for_group("g").unwrap().unwrap();
        assert_eq!(entry.current_quantity, 0);
    }

    #[test]
    fn test_increase_unknown_group_fails() {
        let store = test_store();
        assert!(service(&store).increase_for_group("ghost", 5).is_err());
    }
}
