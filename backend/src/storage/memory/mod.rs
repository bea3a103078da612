//! In-memory storage implementation.
//!
//! Stands in for the hosted data store at the trait boundary: the dev server
//! and the test suite run against it. Tables live behind a single `RwLock`
//! so cross-table operations (group + stock creation) see a consistent view.

mod catalog;
mod profiles;
mod records;
mod reminders;
mod users;

use anyhow::{anyhow, Result};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::models::{
    AgeGroup, BabyProfile, DonationRecord, PageSettingsRecord, PurchaseRecord, ReminderRecord,
    StockEntry, UsageRecord, UserProfile,
};

/// All tables of the store.
#[derive(Default)]
pub(crate) struct Tables {
    pub age_groups: Vec<AgeGroup>,
    pub stock_entries: Vec<StockEntry>,
    pub donations: Vec<DonationRecord>,
    pub usage_records: Vec<UsageRecord>,
    pub purchases: Vec<PurchaseRecord>,
    pub profiles: Vec<BabyProfile>,
    pub page_settings: Vec<PageSettingsRecord>,
    pub reminders: Vec<ReminderRecord>,
    pub users: Vec<UserProfile>,
}

/// Shared in-memory store implementing every storage trait.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.inner.read().map_err(|_| anyhow!("store lock poisoned"))
    }

    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.inner
            .write()
            .map_err(|_| anyhow!("store lock poisoned"))
    }
}
