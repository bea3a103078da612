//! Stock reminders.
//!
//! The low-stock sweep walks an account's groups and creates one unread
//! `low_stock` reminder per group under the configured ratio; groups that
//! already have an unread one are skipped so the bell does not pile up.

use anyhow::{anyhow, Result};
use chrono::Utc;
use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::InventoryConfig;
use crate::domain::models::ReminderRecord;
use crate::events::{ChangeOp, Collection, EventBus};
use crate::storage::{AgeGroupStorage, ReminderStorage, StockStorage};
use shared::{CreateReminderRequest, Reminder, ReminderListResponse, ReminderType};

#[derive(Clone)]
pub struct ReminderService {
    reminder_storage: Arc<dyn ReminderStorage>,
    age_group_storage: Arc<dyn AgeGroupStorage>,
    stock_storage: Arc<dyn StockStorage>,
    config: InventoryConfig,
    event_bus: EventBus,
}

impl ReminderService {
    pub fn new(
        reminder_storage: Arc<dyn ReminderStorage>,
        age_group_storage: Arc<dyn AgeGroupStorage>,
        stock_storage: Arc<dyn StockStorage>,
        config: InventoryConfig,
        event_bus: EventBus,
    ) -> Self {
        Self {
            reminder_storage,
            age_group_storage,
            stock_storage,
            config,
            event_bus,
        }
    }

    /// List an account's reminders with the unread count.
    pub async fn list_reminders(&self, user_id: &str) -> Result<ReminderListResponse> {
        let records = self.reminder_storage.list_reminders(user_id)?;
        let unread_count = records.iter().filter(|r| !r.is_read).count();

        let mut reminders = Vec::with_capacity(records.len());
        for record in records {
            reminders.push(self.to_dto(record)?);
        }
        Ok(ReminderListResponse {
            reminders,
            unread_count,
        })
    }

    /// Create a manual reminder.
    pub async fn create_reminder(
        &self,
        user_id: &str,
        request: CreateReminderRequest,
    ) -> Result<Reminder> {
        info!("Creating reminder for user {}: {:?}", user_id, request);

        if request.title.trim().is_empty() {
            return Err(anyhow!("Reminder title cannot be empty"));
        }
        if let Some(group_id) = request.age_group_id.as_deref() {
            self.age_group_storage
                .get_age_group(group_id)?
                .filter(|g| g.user_id == user_id)
                .ok_or_else(|| anyhow!("Age group not found: {}", group_id))?;
        }

        let record = ReminderRecord {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            age_group_id: request.age_group_id,
            reminder_type: request.reminder_type,
            title: request.title.trim().to_string(),
            message: request.message,
            threshold_quantity: request.threshold_quantity,
            is_read: false,
            triggered_at: None,
            created_at: Utc::now(),
        };
        self.reminder_storage.store_reminder(&record)?;
        self.event_bus.publish(Collection::Reminders, ChangeOp::Created);

        self.to_dto(record)
    }

    /// Mark a reminder as read.
    pub async fn mark_read(&self, user_id: &str, reminder_id: &str) -> Result<Reminder> {
        let mut record = self
            .reminder_storage
            .get_reminder(reminder_id)?
            .filter(|r| r.user_id == user_id)
            .ok_or_else(|| anyhow!("Reminder not found: {}", reminder_id))?;

        record.is_read = true;
        self.reminder_storage.update_reminder(&record)?;
        self.event_bus.publish(Collection::Reminders, ChangeOp::Updated);

        self.to_dto(record)
    }

    /// Sweep an account's groups and raise a low-stock reminder for each one
    /// under the ratio that has no unread low-stock reminder yet. Returns
    /// the number of reminders created.
    pub async fn check_stock_reminders(&self, user_id: &str) -> Result<u32> {
        info!("Running low-stock reminder sweep for user {}", user_id);

        let groups = self.age_group_storage.list_age_groups(user_id)?;
        let now = Utc::now();
        let mut created = 0;

        for group in groups {
            if group.estimated_quantity == 0 {
                continue;
            }
            let current = self
                .stock_storage
                .get_stock_for_group(&group.id)?
                .map(|entry| entry.current_quantity)
                .unwrap_or(0);
            let ratio = current as f64 / group.estimated_quantity as f64;
            if ratio >= self.config.low_stock_ratio {
                continue;
            }
            if self.reminder_storage.has_unread_reminder(
                user_id,
                &group.id,
                ReminderType::LowStock,
            )? {
                continue;
            }

            let record = ReminderRecord {
                id: Uuid::new_v4().to_string(),
                user_id: user_id.to_string(),
                age_group_id: Some(group.id.clone()),
                reminder_type: ReminderType::LowStock,
                title: format!("Estoque baixo: {}", group.name),
                message: format!(
                    "O estoque de {} está em {} de {} fraldas",
                    group.name, current, group.estimated_quantity
                ),
                threshold_quantity: Some(
                    (group.estimated_quantity as f64 * self.config.low_stock_ratio).round() as u32,
                ),
                is_read: false,
                triggered_at: Some(now),
                created_at: now,
            };
            self.reminder_storage.store_reminder(&record)?;
            created += 1;
        }

        if created > 0 {
            self.event_bus.publish(Collection::Reminders, ChangeOp::Created);
        }
        info!("Low-stock sweep created {} reminder(s)", created);
        Ok(created)
    }

    fn to_dto(&self, record: ReminderRecord) -> Result<Reminder> {
        let (name, current) = match record.age_group_id.as_deref() {
            Some(group_id) => {
                let name = self
                    .age_group_storage
                    .get_age_group(group_id)?
                    .map(|g| g.name);
                let current = self
                    .stock_storage
                    .get_stock_for_group(group_id)?
                    .map(|entry| entry.current_quantity)
                    .unwrap_or(0);
                (name, current)
            }
            None => (None, 0),
        };
        Ok(record.to_dto(name, current))
    }
}
