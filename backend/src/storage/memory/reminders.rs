//! Reminder table.

use anyhow::{anyhow, Result};
use shared::ReminderType;

use super::MemoryStore;
use crate::domain::models::ReminderRecord;
use crate::storage::traits::ReminderStorage;

impl ReminderStorage for MemoryStore {
    fn store_reminder(&self, reminder: &ReminderRecord) -> Result<()> {
        let mut tables = self.write()?;
        tables.reminders.push(reminder.clone());
        Ok(())
    }

    fn get_reminder(&self, id: &str) -> Result<Option<ReminderRecord>> {
        let tables = self.read()?;
        Ok(tables.reminders.iter().find(|r| r.id == id).cloned())
    }

    fn list_reminders(&self, user_id: &str) -> Result<Vec<ReminderRecord>> {
        let tables = self.read()?;
        let mut reminders: Vec<ReminderRecord> = tables
            .reminders
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        reminders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reminders)
    }

    fn has_unread_reminder(
        &self,
        user_id: &str,
        age_group_id: &str,
        reminder_type: ReminderType,
    ) -> Result<bool> {
        let tables = self.read()?;
        Ok(tables.reminders.iter().any(|r| {
            r.user_id == user_id
                && !r.is_read
                && r.reminder_type == reminder_type
                && r.age_group_id.as_deref() == Some(age_group_id)
        }))
    }

    fn update_reminder(&self, reminder: &ReminderRecord) -> Result<()> {
        let mut tables = self.write()?;
        let slot = tables
            .reminders
            .iter_mut()
            .find(|r| r.id == reminder.id)
            .ok_or_else(|| anyhow!("Reminder not found: {}", reminder.id))?;
        *slot = reminder.clone();
        Ok(())
    }
}
