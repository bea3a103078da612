//! Stock reminder rows.

use chrono::{DateTime, Utc};
use shared::ReminderType;

/// A reminder shown in the admin bell menu.
///
/// Low-stock reminders are created by the periodic sweep; the others are
/// created manually.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderRecord {
    pub id: String,
    pub user_id: String,
    pub age_group_id: Option<String>,
    pub reminder_type: ReminderType,
    pub title: String,
    pub message: String,
    pub threshold_quantity: Option<u32>,
    pub is_read: bool,
    pub triggered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ReminderRecord {
    pub fn to_dto(&self, age_group_name: Option<String>, current_stock: u32) -> shared::Reminder {
        shared::Reminder {
            id: self.id.clone(),
            reminder_type: self.reminder_type,
            title: self.title.clone(),
            message: self.message.clone(),
            age_group_name,
            current_stock,
            threshold_quantity: self.threshold_quantity,
            is_read: self.is_read,
            triggered_at: self.triggered_at,
            created_at: self.created_at,
        }
    }
}
