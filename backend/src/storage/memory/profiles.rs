//! Baby profile and page settings tables.

use anyhow::Result;

use super::MemoryStore;
use crate::domain::models::{BabyProfile, PageSettingsRecord};
use crate::storage::traits::{PageSettingsStorage, ProfileStorage};

impl ProfileStorage for MemoryStore {
    fn upsert_profile(&self, profile: &BabyProfile) -> Result<()> {
        let mut tables = self.write()?;
        match tables
            .profiles
            .iter_mut()
            .find(|p| p.user_id == profile.user_id)
        {
            Some(slot) => *slot = profile.clone(),
            None => tables.profiles.push(profile.clone()),
        }
        Ok(())
    }

    fn get_profile_for_user(&self, user_id: &str) -> Result<Option<BabyProfile>> {
        let tables = self.read()?;
        Ok(tables
            .profiles
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    fn get_profile_by_slug(&self, slug: &str) -> Result<Option<BabyProfile>> {
        let tables = self.read()?;
        Ok(tables
            .profiles
            .iter()
            .find(|p| p.url_slug.as_deref() == Some(slug))
            .cloned())
    }
}

impl PageSettingsStorage for MemoryStore {
    fn get_settings(&self, user_id: &str) -> Result<Option<PageSettingsRecord>> {
        let tables = self.read()?;
        Ok(tables
            .page_settings
            .iter()
            .find(|s| s.user_id == user_id)
            .cloned())
    }

    fn upsert_settings(&self, settings: &PageSettingsRecord) -> Result<()> {
        let mut tables = self.write()?;
        match tables
            .page_settings
            .iter_mut()
            .find(|s| s.user_id == settings.user_id)
        {
            Some(slot) => *slot = settings.clone(),
            None => tables.page_settings.push(settings.clone()),
        }
        Ok(())
    }
}
