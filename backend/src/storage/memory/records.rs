//! Donation, usage and purchase tables.

use anyhow::{anyhow, Result};
use shared::DonationStatus;

use super::MemoryStore;
use crate::domain::models::{DonationRecord, PurchaseRecord, UsageRecord};
use crate::storage::traits::{DonationStorage, PurchaseStorage, UsageStorage};

impl DonationStorage for MemoryStore {
    fn store_donation(&self, donation: &DonationRecord) -> Result<()> {
        let mut tables = self.write()?;
        tables.donations.push(donation.clone());
        Ok(())
    }

    fn get_donation(&self, id: &str) -> Result<Option<DonationRecord>> {
        let tables = self.read()?;
        Ok(tables.donations.iter().find(|d| d.id == id).cloned())
    }

    fn list_donations_for_groups(&self, age_group_ids: &[String]) -> Result<Vec<DonationRecord>> {
        let tables = self.read()?;
        let mut donations: Vec<DonationRecord> = tables
            .donations
            .iter()
            .filter(|d| age_group_ids.contains(&d.age_group_id))
            .cloned()
            .collect();
        donations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(donations)
    }

    fn list_donations_by_status(
        &self,
        age_group_ids: &[String],
        status: DonationStatus,
    ) -> Result<Vec<DonationRecord>> {
        let tables = self.read()?;
        let mut donations: Vec<DonationRecord> = tables
            .donations
            .iter()
            .filter(|d| d.status == status && age_group_ids.contains(&d.age_group_id))
            .cloned()
            .collect();
        donations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(donations)
    }

    fn update_donation_status(&self, id: &str, status: DonationStatus) -> Result<()> {
        let mut tables = self.write()?;
        let donation = tables
            .donations
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| anyhow!("Donation not found: {}", id))?;
        donation.status = status;
        Ok(())
    }
}

impl UsageStorage for MemoryStore {
    fn store_usage(&self, usage: &UsageRecord) -> Result<()> {
        let mut tables = self.write()?;
        tables.usage_records.push(usage.clone());
        Ok(())
    }

    fn list_usage(&self, user_id: &str) -> Result<Vec<UsageRecord>> {
        let tables = self.read()?;
        let mut records: Vec<UsageRecord> = tables
            .usage_records
            .iter()
            .filter(|u| u.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}

impl PurchaseStorage for MemoryStore {
    fn store_purchase(&self, purchase: &PurchaseRecord) -> Result<()> {
        let mut tables = self.write()?;
        tables.purchases.push(purchase.clone());
        Ok(())
    }

    fn list_purchases_for_groups(&self, age_group_ids: &[String]) -> Result<Vec<PurchaseRecord>> {
        let tables = self.read()?;
        let mut purchases: Vec<PurchaseRecord> = tables
            .purchases
            .iter()
            .filter(|p| age_group_ids.contains(&p.age_group_id))
            .cloned()
            .collect();
        purchases.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(purchases)
    }
}
