//! Purchase recording.
//!
//! A purchase adds straight to the group's stock; there is no moderation
//! step since only the family registers purchases.

use anyhow::{anyhow, Result};
use chrono::Utc;
use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::{PurchaseRecord, ValidationError};
use crate::domain::stock_service::StockService;
use crate::events::{ChangeOp, Collection, EventBus};
use crate::storage::{AgeGroupStorage, PurchaseStorage};
use shared::{CreatePurchaseRequest, PurchaseResponse};

#[derive(Clone)]
pub struct PurchaseService {
    purchase_storage: Arc<dyn PurchaseStorage>,
    age_group_storage: Arc<dyn AgeGroupStorage>,
    stock_service: StockService,
    event_bus: EventBus,
}

impl PurchaseService {
    pub fn new(
        purchase_storage: Arc<dyn PurchaseStorage>,
        age_group_storage: Arc<dyn AgeGroupStorage>,
        stock_service: StockService,
        event_bus: EventBus,
    ) -> Self {
        Self {
            purchase_storage,
            age_group_storage,
            stock_service,
            event_bus,
        }
    }

    /// Record a purchase and add its quantity to stock.
    pub async fn record_purchase(
        &self,
        user_id: &str,
        request: CreatePurchaseRequest,
    ) -> Result<PurchaseResponse> {
        info!("Recording purchase for user {}: {:?}", user_id, request);

        if request.quantity == 0 {
            return Err(ValidationError::NonPositiveQuantity.into());
        }

        let group = self
            .age_group_storage
            .get_age_group(&request.age_group_id)?
            .filter(|g| g.user_id == user_id)
            .ok_or_else(|| anyhow!("Age group not found: {}", request.age_group_id))?;

        // Fill in whichever of unit price / total cost is derivable.
        let unit_price = request.unit_price.or_else(|| {
            request
                .total_cost
                .map(|total| total / request.quantity as f64)
        });
        let total_cost = request
            .total_cost
            .or_else(|| unit_price.map(|price| price * request.quantity as f64));

        let purchase = PurchaseRecord {
            id: Uuid::new_v4().to_string(),
            age_group_id: group.id.clone(),
            quantity: request.quantity,
            unit_price,
            total_cost,
            store_name: request.store_name,
            notes: request.notes,
            purchase_date: request
                .purchase_date
                .unwrap_or_else(|| Utc::now().date_naive()),
            created_by: Some(user_id.to_string()),
            created_at: Utc::now(),
        };
        self.purchase_storage.store_purchase(&purchase)?;
        self.stock_service
            .increase_for_group(&group.id, purchase.quantity)?;
        self.event_bus.publish(Collection::Purchases, ChangeOp::Created);

        Ok(PurchaseResponse {
            purchase: purchase.to_dto(),
            success_message: "Purchase recorded successfully".to_string(),
        })
    }
}
