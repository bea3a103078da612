//! Public-page text settings.
//!
//! Reads resolve against the fixed default texts, so the public page always
//! has something to show even before the family customizes anything.

use anyhow::Result;
use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::PageSettingsRecord;
use crate::events::{ChangeOp, Collection, EventBus};
use crate::storage::PageSettingsStorage;
use shared::{PageSettings, PageSettingsResponse, UpdatePageSettingsRequest};

#[derive(Clone)]
pub struct PageSettingsService {
    page_settings_storage: Arc<dyn PageSettingsStorage>,
    event_bus: EventBus,
}

impl PageSettingsService {
    pub fn new(page_settings_storage: Arc<dyn PageSettingsStorage>, event_bus: EventBus) -> Self {
        Self {
            page_settings_storage,
            event_bus,
        }
    }

    /// Get an account's page settings, defaults filled in.
    pub async fn get_settings(&self, user_id: &str) -> Result<PageSettings> {
        Ok(self
            .page_settings_storage
            .get_settings(user_id)?
            .map(|record| record.to_dto())
            .unwrap_or_default())
    }

    /// Update page texts. Fields left out keep their stored value.
    pub async fn update_settings(
        &self,
        user_id: &str,
        request: UpdatePageSettingsRequest,
    ) -> Result<PageSettingsResponse> {
        info!("Updating page settings for user {}", user_id);

        let existing = self.page_settings_storage.get_settings(user_id)?;
        let record = PageSettingsRecord {
            id: existing
                .as_ref()
                .map(|r| r.id.clone())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: user_id.to_string(),
            title: request.title.or(existing.as_ref().and_then(|r| r.title.clone())),
            subtitle: request
                .subtitle
                .or(existing.as_ref().and_then(|r| r.subtitle.clone())),
            welcome_message: request
                .welcome_message
                .or(existing.and_then(|r| r.welcome_message)),
        };
        self.page_settings_storage.upsert_settings(&record)?;
        self.event_bus
            .publish(Collection::PageSettings, ChangeOp::Updated);

        Ok(PageSettingsResponse {
            settings: record.to_dto(),
            success_message: "Page settings saved".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{test_store, TEST_USER};
    use crate::storage::MemoryStore;

    fn service(store: &MemoryStore) -> PageSettingsService {
        PageSettingsService::new(Arc::new(store.clone()), EventBus::new())
    }

    #[tokio::test]
    async fn test_get_without_row_returns_defaults() {
        let store = test_store();
        let settings = service(&store).get_settings(TEST_USER).await.unwrap();
        assert_eq!(settings.title, "Lap Lap Diaper");
    }

    #[tokio::test]
    async fn test_update_overrides_only_given_fields() {
        let store = test_store();
        let service = service(&store);

        service
            .update_settings(
                TEST_USER,
                UpdatePageSettingsRequest {
                    title: Some("Chá de fraldas da Maria".to_string()),
                    subtitle: None,
                    welcome_message: None,
                },
            )
            .await
            .unwrap();

        let settings = service.get_settings(TEST_USER).await.unwrap();
        assert_eq!(settings.title, "Chá de fraldas da Maria");
        // Untouched fields keep their defaults.
        assert_eq!(settings.welcome_message, PageSettings::default().welcome_message);
    }

    #[tokio::test]
    async fn test_second_update_preserves_first() {
        let store = test_store();
        let service = service(&store);

        service
            .update_settings(
                TEST_USER,
                UpdatePageSettingsRequest {
                    title: Some("Primeiro título".to_string()),
                    subtitle: None,
                    welcome_message: None,
                },
            )
            .await
            .unwrap();
        service
            .update_settings(
                TEST_USER,
                UpdatePageSettingsRequest {
                    title: None,
                    subtitle: Some("Novo subtítulo".to_string()),
                    welcome_message: None,
                },
            )
            .await
            .unwrap();

        let settings = service.get_settings(TEST_USER).await.unwrap();
        assert_eq!(settings.title, "Primeiro título");
        assert_eq!(settings.subtitle, "Novo subtítulo");
    }
}
