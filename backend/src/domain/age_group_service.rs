//! Age group management.
//!
//! Creating a group also creates its stock entry at zero, so every group
//! always has exactly one; the two writes go through the same store handle.

use anyhow::{anyhow, Result};
use chrono::Utc;
use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::{AgeGroup, StockEntry, ValidationError};
use crate::events::{ChangeOp, Collection, EventBus};
use crate::storage::{AgeGroupStorage, StockStorage};
use shared::{
    AgeGroupListResponse, AgeGroupResponse, CreateAgeGroupRequest, UpdateAgeGroupRequest,
};

#[derive(Clone)]
pub struct AgeGroupService {
    age_group_storage: Arc<dyn AgeGroupStorage>,
    stock_storage: Arc<dyn StockStorage>,
    event_bus: EventBus,
}

impl AgeGroupService {
    pub fn new(
        age_group_storage: Arc<dyn AgeGroupStorage>,
        stock_storage: Arc<dyn StockStorage>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            age_group_storage,
            stock_storage,
            event_bus,
        }
    }

    /// Create a new age group together with its zeroed stock entry.
    pub async fn create_age_group(
        &self,
        user_id: &str,
        request: CreateAgeGroupRequest,
    ) -> Result<AgeGroupResponse> {
        info!("Creating age group for user {}: {:?}", user_id, request);

        if request.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }

        let now = Utc::now();
        let group = AgeGroup {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: request.name.trim().to_string(),
            age_range: request.age_range.trim().to_string(),
            estimated_quantity: request.estimated_quantity,
            price_per_unit: request.price_per_unit.unwrap_or(0.0),
            color_theme: request.color_theme,
            icon_name: request.icon_name,
            created_at: now,
            updated_at: now,
        };
        self.age_group_storage.store_age_group(&group)?;

        let stock = StockEntry {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            age_group_id: group.id.clone(),
            current_quantity: 0,
            notes: None,
            last_updated_at: now,
        };
        self.stock_storage.store_stock_entry(&stock)?;

        self.event_bus.publish(Collection::AgeGroups, ChangeOp::Created);
        info!("Created age group {} with stock entry {}", group.id, stock.id);

        Ok(AgeGroupResponse {
            age_group: group.to_dto(),
            success_message: "Age group created successfully".to_string(),
        })
    }

    /// Update an existing age group's fields.
    pub async fn update_age_group(
        &self,
        user_id: &str,
        group_id: &str,
        request: UpdateAgeGroupRequest,
    ) -> Result<AgeGroupResponse> {
        info!("Updating age group {} for user {}", group_id, user_id);

        let mut group = self
            .age_group_storage
            .get_age_group(group_id)?
            .filter(|g| g.user_id == user_id)
            .ok_or_else(|| anyhow!("Age group not found: {}", group_id))?;

        if let Some(name) = request.name {
            if name.trim().is_empty() {
                return Err(ValidationError::EmptyName.into());
            }
            group.name = name.trim().to_string();
        }
        if let Some(age_range) = request.age_range {
            group.age_range = age_range.trim().to_string();
        }
        if let Some(estimated_quantity) = request.estimated_quantity {
            group.estimated_quantity = estimated_quantity;
        }
        if let Some(price_per_unit) = request.price_per_unit {
            group.price_per_unit = price_per_unit;
        }
        if request.color_theme.is_some() {
            group.color_theme = request.color_theme;
        }
        if request.icon_name.is_some() {
            group.icon_name = request.icon_name;
        }
        group.updated_at = Utc::now();

        self.age_group_storage.update_age_group(&group)?;
        self.event_bus.publish(Collection::AgeGroups, ChangeOp::Updated);

        Ok(AgeGroupResponse {
            age_group: group.to_dto(),
            success_message: "Age group updated successfully".to_string(),
        })
    }

    /// List an account's age groups, each joined with its stock quantity.
    pub async fn list_age_groups(&self, user_id: &str) -> Result<AgeGroupListResponse> {
        let groups = self.age_group_storage.list_age_groups(user_id)?;
        let mut with_stock = Vec::with_capacity(groups.len());
        for group in &groups {
            let current = self
                .stock_storage
                .get_stock_for_group(&group.id)?
                .map(|entry| entry.current_quantity)
                .unwrap_or(0);
            with_stock.push(group.to_dto_with_stock(current));
        }
        Ok(AgeGroupListResponse {
            age_groups: with_stock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{test_store, TEST_USER};

    fn service(store: &crate::storage::MemoryStore) -> AgeGroupService {
        AgeGroupService::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            EventBus::new(),
        )
    }

    fn create_request(name: &str) -> CreateAgeGroupRequest {
        CreateAgeGroupRequest {
            name: name.to_string(),
            age_range: "0-2 meses".to_string(),
            estimated_quantity: 100,
            price_per_unit: Some(0.5),
            color_theme: None,
            icon_name: None,
        }
    }

    #[tokio::test]
    async fn test_create_age_group_creates_zeroed_stock() {
        let store = test_store();
        let service = service(&store);

        let response = service
            .create_age_group(TEST_USER, create_request("RN"))
            .await
            .unwrap();

        let stock = crate::storage::StockStorage::get_stock_for_group(&store, &response.age_group.id)
            .unwrap()
            .expect("stock entry should exist");
        assert_eq!(stock.current_quantity, 0);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let store = test_store();
        let result = service(&store)
            .create_age_group(TEST_USER, create_request("   "))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_missing_price_defaults_to_zero() {
        let store = test_store();
        let mut request = create_request("P");
        request.price_per_unit = None;

        let response = service(&store)
            .create_age_group(TEST_USER, request)
            .await
            .unwrap();
        assert_eq!(response.age_group.price_per_unit, 0.0);
    }

    #[tokio::test]
    async fn test_update_applies_partial_fields() {
        let store = test_store();
        let service = service(&store);
        let created = service
            .create_age_group(TEST_USER, create_request("P"))
            .await
            .unwrap();

        let updated = service
            .update_age_group(
                TEST_USER,
                &created.age_group.id,
                UpdateAgeGroupRequest {
                    name: None,
                    age_range: None,
                    estimated_quantity: Some(200),
                    price_per_unit: None,
                    color_theme: None,
                    icon_name: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.age_group.name, "P");
        assert_eq!(updated.age_group.estimated_quantity, 200);
    }

    #[tokio::test]
    async fn test_update_rejects_foreign_group() {
        let store = test_store();
        let service = service(&store);
        let created = service
            .create_age_group("someone-else", create_request("P"))
            .await
            .unwrap();

        let result = service
            .update_age_group(
                TEST_USER,
                &created.age_group.id,
                UpdateAgeGroupRequest {
                    name: Some("Hijacked".to_string()),
                    age_range: None,
                    estimated_quantity: None,
                    price_per_unit: None,
                    color_theme: None,
                    icon_name: None,
                },
            )
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_list_joins_stock_quantities() {
        let store = test_store();
        let service = service(&store);
        service
            .create_age_group(TEST_USER, create_request("M"))
            .await
            .unwrap();

        let list = service.list_age_groups(TEST_USER).await.unwrap();
        assert_eq!(list.age_groups.len(), 1);
        assert_eq!(list.age_groups[0].current_quantity, 0);
    }
}
