//! Slug availability checks and suggestions.
//!
//! Availability is a read-only question against the profile table. A failed
//! lookup never breaks the caller's form: the check degrades to "not
//! available" with an error note instead of propagating the fault.

use log::{info, warn};
use std::sync::Arc;

use crate::domain::slug::generate_slug;
use crate::storage::ProfileStorage;
use shared::{SlugCheckResponse, SlugSuggestionResponse};

/// Upper bound on numbered suffixes tried when hunting for a free slug.
const MAX_SUGGESTION_ATTEMPTS: u32 = 100;

#[derive(Clone)]
pub struct SlugService {
    profile_storage: Arc<dyn ProfileStorage>,
}

impl SlugService {
    pub fn new(profile_storage: Arc<dyn ProfileStorage>) -> Self {
        Self { profile_storage }
    }

    /// Check whether `candidate` can be used as a profile slug.
    ///
    /// A slug is available when no profile owns it, or when the owning
    /// profile's slug equals the caller's `current_slug` (renaming back to
    /// your own slug is always fine).
    pub async fn check_availability(
        &self,
        candidate: &str,
        current_slug: Option<&str>,
    ) -> SlugCheckResponse {
        // An empty candidate is never claimable.
        if candidate.is_empty() {
            return SlugCheckResponse {
                slug: String::new(),
                is_available: false,
                error: None,
            };
        }
        if Some(candidate) == current_slug {
            return SlugCheckResponse {
                slug: candidate.to_string(),
                is_available: true,
                error: None,
            };
        }

        match self.profile_storage.get_profile_by_slug(candidate) {
            Ok(None) => SlugCheckResponse {
                slug: candidate.to_string(),
                is_available: true,
                error: None,
            },
            Ok(Some(_)) => SlugCheckResponse {
                slug: candidate.to_string(),
                is_available: false,
                error: None,
            },
            Err(e) => {
                // Unknown availability reads as unavailable; the form keeps
                // working and the user can retry.
                warn!("Slug availability lookup failed for '{}': {}", candidate, e);
                SlugCheckResponse {
                    slug: candidate.to_string(),
                    is_available: false,
                    error: Some("Could not verify slug availability".to_string()),
                }
            }
        }
    }

    /// Find a free slug starting from `base`, appending `-1`, `-2`, … up to
    /// the attempt cap. Past the cap the last tried candidate is returned
    /// as-is.
    pub async fn find_available_slug(&self, base: &str, current_slug: Option<&str>) -> String {
        let mut candidate = base.to_string();
        let mut counter = 0u32;

        while !self
            .check_availability(&candidate, current_slug)
            .await
            .is_available
        {
            counter += 1;
            if counter > MAX_SUGGESTION_ATTEMPTS {
                warn!("Gave up finding a free slug after {} attempts (base '{}')", counter, base);
                break;
            }
            candidate = format!("{}-{}", base, counter);
        }

        candidate
    }

    /// Suggest a slug for a display name: sanitize, then hunt for a free
    /// variant.
    pub async fn suggest_for_name(
        &self,
        name: &str,
        current_slug: Option<&str>,
    ) -> SlugSuggestionResponse {
        let base = generate_slug(name);
        let suggestion = self.find_available_slug(&base, current_slug).await;
        info!("Slug suggestion for '{}': {}", name, suggestion);
        SlugSuggestionResponse {
            base_slug: base,
            suggestion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{profile_with_slug, test_store};
    use crate::storage::MemoryStore;

    fn service(store: &MemoryStore) -> SlugService {
        SlugService::new(Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn test_free_slug_is_available() {
        let store = test_store();
        let result = service(&store).check_availability("maria", None).await;
        assert!(result.is_available);
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_empty_slug_is_unavailable() {
        let store = test_store();
        let result = service(&store).check_availability("", None).await;
        assert!(!result.is_available);
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_taken_slug_is_unavailable() {
        let store = test_store();
        profile_with_slug(&store, "user-a", "maria");

        let result = service(&store).check_availability("maria", None).await;
        assert!(!result.is_available);
    }

    #[tokio::test]
    async fn test_own_slug_stays_available() {
        let store = test_store();
        profile_with_slug(&store, "user-a", "maria");

        let result = service(&store)
            .check_availability("maria", Some("maria"))
            .await;
        assert!(result.is_available);
    }

    #[tokio::test]
    async fn test_suggestion_skips_taken_base() {
        let store = test_store();
        profile_with_slug(&store, "user-a", "maria");

        let suggestion = service(&store).find_available_slug("maria", None).await;
        assert_eq!(suggestion, "maria-1");
    }

    #[tokio::test]
    async fn test_suggestion_walks_past_multiple_collisions() {
        let store = test_store();
        profile_with_slug(&store, "user-a", "maria");
        profile_with_slug(&store, "user-b", "maria-1");
        profile_with_slug(&store, "user-c", "maria-2");

        let suggestion = service(&store).find_available_slug("maria", None).await;
        assert_eq!(suggestion, "maria-3");
    }

    #[tokio::test]
    async fn test_suggest_for_name_sanitizes_first() {
        let store = test_store();
        let result = service(&store).suggest_for_name("Maria Clara!", None).await;
        assert_eq!(result.base_slug, "maria-clara");
        assert_eq!(result.suggestion, "maria-clara");
    }
}
