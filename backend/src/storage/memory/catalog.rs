//! Age group and stock tables.

use anyhow::{anyhow, Result};

use super::MemoryStore;
use crate::domain::models::{AgeGroup, StockEntry};
use crate::storage::traits::{AgeGroupStorage, StockStorage};

impl AgeGroupStorage for MemoryStore {
    fn store_age_group(&self, group: &AgeGroup) -> Result<()> {
        let mut tables = self.write()?;
        if tables.age_groups.iter().any(|g| g.id == group.id) {
            return Err(anyhow!("Age group already exists: {}", group.id));
        }
        tables.age_groups.push(group.clone());
        Ok(())
    }

    fn get_age_group(&self, id: &str) -> Result<Option<AgeGroup>> {
        let tables = self.read()?;
        Ok(tables.age_groups.iter().find(|g| g.id == id).cloned())
    }

    fn list_age_groups(&self, user_id: &str) -> Result<Vec<AgeGroup>> {
        let tables = self.read()?;
        let mut groups: Vec<AgeGroup> = tables
            .age_groups
            .iter()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(groups)
    }

    fn update_age_group(&self, group: &AgeGroup) -> Result<()> {
        let mut tables = self.write()?;
        let slot = tables
            .age_groups
            .iter_mut()
            .find(|g| g.id == group.id)
            .ok_or_else(|| anyhow!("Age group not found: {}", group.id))?;
        *slot = group.clone();
        Ok(())
    }
}

impl StockStorage for MemoryStore {
    fn store_stock_entry(&self, entry: &StockEntry) -> Result<()> {
        let mut tables = self.write()?;
        if tables
            .stock_entries
            .iter()
            .any(|e| e.age_group_id == entry.age_group_id)
        {
            return Err(anyhow!(
                "Stock entry already exists for age group: {}",
                entry.age_group_id
            ));
        }
        tables.stock_entries.push(entry.clone());
        Ok(())
    }

    fn get_stock_for_group(&self, age_group_id: &str) -> Result<Option<StockEntry>> {
        let tables = self.read()?;
        Ok(tables
            .stock_entries
            .iter()
            .find(|e| e.age_group_id == age_group_id)
            .cloned())
    }

    fn get_stock_entry(&self, id: &str) -> Result<Option<StockEntry>> {
        let tables = self.read()?;
        Ok(tables.stock_entries.iter().find(|e| e.id == id).cloned())
    }

    fn list_stock_entries(&self, user_id: &str) -> Result<Vec<StockEntry>> {
        let tables = self.read()?;
        Ok(tables
            .stock_entries
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect())
    }

    fn update_stock_entry(&self, entry: &StockEntry) -> Result<()> {
        let mut tables = self.write()?;
        let slot = tables
            .stock_entries
            .iter_mut()
            .find(|e| e.id == entry.id)
            .ok_or_else(|| anyhow!("Stock entry not found: {}", entry.id))?;
        *slot = entry.clone();
        Ok(())
    }
}
