//! # Storage Traits
//!
//! The boundary between the domain layer and whatever holds the rows. In
//! production that is the hosted data store; in tests and the dev server it
//! is the in-memory implementation in [`crate::storage::memory`].
//!
//! All operations are synchronous: row sets are small and the store sits
//! behind `Arc<dyn …>` handles inside async services.

use anyhow::Result;
use shared::DonationStatus;

use crate::domain::models::{
    AgeGroup, BabyProfile, DonationRecord, PageSettingsRecord, PurchaseRecord, ReminderRecord,
    StockEntry, UsageRecord, UserProfile,
};

/// Age group catalog operations.
pub trait AgeGroupStorage: Send + Sync {
    /// Store a new age group
    fn store_age_group(&self, group: &AgeGroup) -> Result<()>;

    /// Retrieve a specific age group by ID
    fn get_age_group(&self, id: &str) -> Result<Option<AgeGroup>>;

    /// List an account's age groups ordered by name
    fn list_age_groups(&self, user_id: &str) -> Result<Vec<AgeGroup>>;

    /// Update an existing age group
    fn update_age_group(&self, group: &AgeGroup) -> Result<()>;
}

/// Stock entry operations. One entry per age group.
pub trait StockStorage: Send + Sync {
    /// Store a new stock entry
    fn store_stock_entry(&self, entry: &StockEntry) -> Result<()>;

    /// Retrieve the stock entry for an age group
    fn get_stock_for_group(&self, age_group_id: &str) -> Result<Option<StockEntry>>;

    /// Retrieve a stock entry by its own ID
    fn get_stock_entry(&self, id: &str) -> Result<Option<StockEntry>>;

    /// List an account's stock entries
    fn list_stock_entries(&self, user_id: &str) -> Result<Vec<StockEntry>>;

    /// Update an existing stock entry
    fn update_stock_entry(&self, entry: &StockEntry) -> Result<()>;
}

/// Donation record operations.
pub trait DonationStorage: Send + Sync {
    /// Store a new donation
    fn store_donation(&self, donation: &DonationRecord) -> Result<()>;

    /// Retrieve a specific donation by ID
    fn get_donation(&self, id: &str) -> Result<Option<DonationRecord>>;

    /// List donations for a set of age groups, most recent first
    fn list_donations_for_groups(&self, age_group_ids: &[String]) -> Result<Vec<DonationRecord>>;

    /// List donations for a set of age groups filtered by status, most recent first
    fn list_donations_by_status(
        &self,
        age_group_ids: &[String],
        status: DonationStatus,
    ) -> Result<Vec<DonationRecord>>;

    /// Update a donation's moderation status. The rest of the record is immutable.
    fn update_donation_status(&self, id: &str, status: DonationStatus) -> Result<()>;
}

/// Usage record operations. Records are immutable once stored.
pub trait UsageStorage: Send + Sync {
    /// Store a new usage record
    fn store_usage(&self, usage: &UsageRecord) -> Result<()>;

    /// List an account's usage records, most recent first
    fn list_usage(&self, user_id: &str) -> Result<Vec<UsageRecord>>;
}

/// Purchase record operations.
pub trait PurchaseStorage: Send + Sync {
    /// Store a new purchase
    fn store_purchase(&self, purchase: &PurchaseRecord) -> Result<()>;

    /// List purchases for a set of age groups, most recent first
    fn list_purchases_for_groups(&self, age_group_ids: &[String]) -> Result<Vec<PurchaseRecord>>;
}

/// Baby profile operations.
pub trait ProfileStorage: Send + Sync {
    /// Store or replace an account's profile
    fn upsert_profile(&self, profile: &BabyProfile) -> Result<()>;

    /// Retrieve the profile owned by an account
    fn get_profile_for_user(&self, user_id: &str) -> Result<Option<BabyProfile>>;

    /// Retrieve the profile that owns a URL slug
    fn get_profile_by_slug(&self, slug: &str) -> Result<Option<BabyProfile>>;
}

/// Public-page settings operations.
pub trait PageSettingsStorage: Send + Sync {
    /// Retrieve an account's page settings row, if one exists
    fn get_settings(&self, user_id: &str) -> Result<Option<PageSettingsRecord>>;

    /// Store or replace an account's page settings
    fn upsert_settings(&self, settings: &PageSettingsRecord) -> Result<()>;
}

/// Reminder operations.
pub trait ReminderStorage: Send + Sync {
    /// Store a new reminder
    fn store_reminder(&self, reminder: &ReminderRecord) -> Result<()>;

    /// Retrieve a specific reminder by ID
    fn get_reminder(&self, id: &str) -> Result<Option<ReminderRecord>>;

    /// List an account's reminders, most recent first
    fn list_reminders(&self, user_id: &str) -> Result<Vec<ReminderRecord>>;

    /// Check whether a group already has an unread reminder of the given type
    fn has_unread_reminder(
        &self,
        user_id: &str,
        age_group_id: &str,
        reminder_type: shared::ReminderType,
    ) -> Result<bool>;

    /// Update an existing reminder (read flag)
    fn update_reminder(&self, reminder: &ReminderRecord) -> Result<()>;
}

/// Account profile operations for the admin console.
pub trait UserStorage: Send + Sync {
    /// Store a new user profile
    fn store_user(&self, user: &UserProfile) -> Result<()>;

    /// Retrieve a specific user by ID
    fn get_user(&self, id: &str) -> Result<Option<UserProfile>>;

    /// Retrieve a user by email
    fn get_user_by_email(&self, email: &str) -> Result<Option<UserProfile>>;

    /// List all users ordered by creation time
    fn list_users(&self) -> Result<Vec<UserProfile>>;

    /// Update an existing user
    fn update_user(&self, user: &UserProfile) -> Result<()>;

    /// Delete a user profile. Returns true when the row existed.
    fn delete_user(&self, id: &str) -> Result<bool>;
}
