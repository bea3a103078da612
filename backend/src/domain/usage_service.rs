//! Usage recording.
//!
//! Writing a usage record decrements the group's stock (floored at zero).
//! Records themselves are immutable history.

use anyhow::{anyhow, Result};
use chrono::Utc;
use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::{UsageRecord, ValidationError};
use crate::domain::stock_service::StockService;
use crate::events::{ChangeOp, Collection, EventBus};
use crate::storage::{AgeGroupStorage, UsageStorage};
use shared::{CreateUsageRequest, UsageListResponse, UsageResponse};

#[derive(Clone)]
pub struct UsageService {
    usage_storage: Arc<dyn UsageStorage>,
    age_group_storage: Arc<dyn AgeGroupStorage>,
    stock_service: StockService,
    event_bus: EventBus,
}

impl UsageService {
    pub fn new(
        usage_storage: Arc<dyn UsageStorage>,
        age_group_storage: Arc<dyn AgeGroupStorage>,
        stock_service: StockService,
        event_bus: EventBus,
    ) -> Self {
        Self {
            usage_storage,
            age_group_storage,
            stock_service,
            event_bus,
        }
    }

    /// Record diaper usage and decrement the group's stock.
    pub async fn record_usage(
        &self,
        user_id: &str,
        request: CreateUsageRequest,
    ) -> Result<UsageResponse> {
        info!("Recording usage for user {}: {:?}", user_id, request);

        if request.quantity == 0 {
            return Err(ValidationError::NonPositiveQuantity.into());
        }

        let group = self
            .age_group_storage
            .get_age_group(&request.age_group_id)?
            .filter(|g| g.user_id == user_id)
            .ok_or_else(|| anyhow!("Age group not found: {}", request.age_group_id))?;

        let usage = UsageRecord {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            age_group_id: group.id.clone(),
            quantity: request.quantity,
            usage_date: request.usage_date.unwrap_or_else(|| Utc::now().date_naive()),
            notes: request.notes,
            created_at: Utc::now(),
        };
        self.usage_storage.store_usage(&usage)?;
        self.stock_service
            .decrease_for_group(&group.id, usage.quantity)?;
        self.event_bus.publish(Collection::Usage, ChangeOp::Created);

        Ok(UsageResponse {
            usage: usage.to_dto(),
            success_message: "Usage recorded successfully".to_string(),
        })
    }

    /// List an account's usage records, most recent first.
    pub async fn list_usage(&self, user_id: &str) -> Result<UsageListResponse> {
        let records = self.usage_storage.list_usage(user_id)?;
        Ok(UsageListResponse {
            entries: records.iter().map(|record| record.to_dto()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{age_group, stock_entry, test_store, TEST_USER};
    use crate::storage::{AgeGroupStorage as _, MemoryStore, StockStorage};

    fn service(store: &MemoryStore) -> UsageService {
        let stock_service = StockService::new(Arc::new(store.clone()), EventBus::new());
        UsageService::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            stock_service,
            EventBus::new(),
        )
    }

    fn seed_group(store: &MemoryStore, id: &str, stock: u32) {
        store.store_age_group(&age_group(id, "P", 100, 0.5)).unwrap();
        store.store_stock_entry(&stock_entry(id, stock)).unwrap();
    }

    fn request(group_id: &str, quantity: u32) -> CreateUsageRequest {
        CreateUsageRequest {
            age_group_id: group_id.to_string(),
            quantity,
            usage_date: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_usage_decrements_stock() {
        let store = test_store();
        seed_group(&store, "g", 50);

        service(&store)
            .record_usage(TEST_USER, request("g", 8))
            .await
            .unwrap();

        let stock = store.get_stock_for_group("g").unwrap().unwrap();
        assert_eq!(stock.current_quantity, 42);
    }

    #[tokio::test]
    async fn test_usage_beyond_stock_floors_at_zero() {
        let store = test_store();
        seed_group(&store, "g", 5);

        service(&store)
            .record_usage(TEST_USER, request("g", 20))
            .await
            .unwrap();

        let stock = store.get_stock_for_group("g").unwrap().unwrap();
        assert_eq!(stock.current_quantity, 0);
    }

    #[tokio::test]
    async fn test_zero_quantity_is_rejected() {
        let store = test_store();
        seed_group(&store, "g", 5);

        let result = service(&store).record_usage(TEST_USER, request("g", 0)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_usage_requires_owning_the_group() {
        let store = test_store();
        seed_group(&store, "g", 5);

        let result = service(&store)
            .record_usage("someone-else", request("g", 1))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_list_returns_recorded_usage() {
        let store = test_store();
        seed_group(&store, "g", 50);
        let service = service(&store);

        service.record_usage(TEST_USER, request("g", 3)).await.unwrap();
        let list = service.list_usage(TEST_USER).await.unwrap();
        assert_eq!(list.entries.len(), 1);
        assert_eq!(list.entries[0].quantity, 3);
    }
}
