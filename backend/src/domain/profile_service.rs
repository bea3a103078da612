//! Baby profile management and the public profile payload.
//!
//! Saving a profile re-validates the slug against every other profile; the
//! public payload joins profile, page texts, per-group progress and the
//! donor leaderboard into one response keyed by slug.

use anyhow::{anyhow, Result};
use chrono::Utc;
use log::info;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::inventory_service::progress_percentage;
use crate::domain::models::{BabyProfile, ValidationError};
use crate::domain::slug::generate_slug;
use crate::domain::slug_service::SlugService;
use crate::events::{ChangeOp, Collection, EventBus};
use crate::storage::{
    AgeGroupStorage, DonationStorage, PageSettingsStorage, ProfileStorage, StockStorage,
};
use shared::{
    BabyProfileResponse, DiaperGroupProgress, DonationStatus, PublicProfileResponse, RecentDonor,
    SaveBabyProfileRequest, TopDonor,
};

/// Donor rows shown on the public page.
const DONOR_LIST_LIMIT: usize = 5;

#[derive(Clone)]
pub struct ProfileService {
    profile_storage: Arc<dyn ProfileStorage>,
    age_group_storage: Arc<dyn AgeGroupStorage>,
    stock_storage: Arc<dyn StockStorage>,
    donation_storage: Arc<dyn DonationStorage>,
    page_settings_storage: Arc<dyn PageSettingsStorage>,
    slug_service: SlugService,
    event_bus: EventBus,
    public_base_url: String,
}

impl ProfileService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        profile_storage: Arc<dyn ProfileStorage>,
        age_group_storage: Arc<dyn AgeGroupStorage>,
        stock_storage: Arc<dyn StockStorage>,
        donation_storage: Arc<dyn DonationStorage>,
        page_settings_storage: Arc<dyn PageSettingsStorage>,
        slug_service: SlugService,
        event_bus: EventBus,
        public_base_url: String,
    ) -> Self {
        Self {
            profile_storage,
            age_group_storage,
            stock_storage,
            donation_storage,
            page_settings_storage,
            slug_service,
            event_bus,
            public_base_url,
        }
    }

    /// Load an account's profile, if one has been configured.
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<BabyProfileResponse>> {
        let profile = self.profile_storage.get_profile_for_user(user_id)?;
        Ok(profile.map(|p| BabyProfileResponse {
            full_url: p.url_slug.as_deref().map(|slug| self.share_url(slug)),
            profile: p.to_dto(),
            success_message: String::new(),
        }))
    }

    /// Create or replace an account's profile.
    ///
    /// A requested slug is sanitized and checked for availability against
    /// every other profile; a taken slug rejects the whole save.
    pub async fn save_profile(
        &self,
        user_id: &str,
        request: SaveBabyProfileRequest,
    ) -> Result<BabyProfileResponse> {
        info!("Saving baby profile for user {}", user_id);

        if request.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }

        let existing = self.profile_storage.get_profile_for_user(user_id)?;
        let current_slug = existing.as_ref().and_then(|p| p.url_slug.clone());

        let url_slug = match request.url_slug.as_deref() {
            Some(raw) if !raw.trim().is_empty() => {
                let slug = generate_slug(raw);
                let check = self
                    .slug_service
                    .check_availability(&slug, current_slug.as_deref())
                    .await;
                if !check.is_available {
                    return Err(anyhow!("URL slug is already taken: {}", slug));
                }
                Some(slug)
            }
            _ => None,
        };

        let now = Utc::now();
        let profile = BabyProfile {
            id: existing
                .as_ref()
                .map(|p| p.id.clone())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: user_id.to_string(),
            name: request.name.trim().to_string(),
            birth_date: request.birth_date,
            is_born: request.is_born,
            gender: request.gender,
            birth_place: request.birth_place,
            parent1_name: request.parent1_name,
            parent2_name: request.parent2_name,
            url_slug: url_slug.clone(),
            created_at: existing.map(|p| p.created_at).unwrap_or(now),
            updated_at: now,
        };
        self.profile_storage.upsert_profile(&profile)?;
        self.event_bus.publish(Collection::Profiles, ChangeOp::Updated);

        Ok(BabyProfileResponse {
            full_url: url_slug.as_deref().map(|slug| self.share_url(slug)),
            profile: profile.to_dto(),
            success_message: "Profile saved successfully".to_string(),
        })
    }

    /// Everything the public page needs, or `None` for an unknown slug.
    pub async fn public_profile(&self, slug: &str) -> Result<Option<PublicProfileResponse>> {
        let profile = match self.profile_storage.get_profile_by_slug(slug)? {
            Some(p) => p,
            None => return Ok(None),
        };

        let groups = self.age_group_storage.list_age_groups(&profile.user_id)?;
        let stock = self.stock_storage.list_stock_entries(&profile.user_id)?;
        let stock_by_group: HashMap<&str, u32> = stock
            .iter()
            .map(|entry| (entry.age_group_id.as_str(), entry.current_quantity))
            .collect();

        let diaper_groups = groups
            .iter()
            .map(|group| {
                let current = stock_by_group.get(group.id.as_str()).copied().unwrap_or(0);
                DiaperGroupProgress {
                    name: group.name.clone(),
                    age_range: group.age_range.clone(),
                    current_quantity: current,
                    estimated_quantity: group.estimated_quantity,
                    color_theme: group.color_theme.clone(),
                    icon_name: group.icon_name.clone(),
                    progress_percentage: progress_percentage(current, group.estimated_quantity),
                }
            })
            .collect();

        let group_ids: Vec<String> = groups.iter().map(|g| g.id.clone()).collect();
        let approved = self
            .donation_storage
            .list_donations_by_status(&group_ids, DonationStatus::Approved)?;

        let group_names: HashMap<&str, &str> = groups
            .iter()
            .map(|g| (g.id.as_str(), g.name.as_str()))
            .collect();
        let recent_donors = approved
            .iter()
            .filter_map(|donation| {
                donation.donor_name.as_ref().map(|name| RecentDonor {
                    donor_name: name.clone(),
                    donation_date: donation.donation_date,
                    quantity: donation.quantity,
                    age_group_name: group_names
                        .get(donation.age_group_id.as_str())
                        .map(|n| n.to_string())
                        .unwrap_or_default(),
                })
            })
            .take(DONOR_LIST_LIMIT)
            .collect();

        let mut totals: HashMap<&str, (u32, u32)> = HashMap::new();
        for donation in &approved {
            if let Some(name) = donation.donor_name.as_deref() {
                let entry = totals.entry(name).or_insert((0, 0));
                entry.0 += donation.quantity;
                entry.1 += 1;
            }
        }
        let mut top_donors: Vec<TopDonor> = totals
            .into_iter()
            .map(|(name, (total, count))| TopDonor {
                donor_name: name.to_string(),
                total_donated: total,
                donation_count: count,
            })
            .collect();
        top_donors.sort_by(|a, b| b.total_donated.cmp(&a.total_donated));
        top_donors.truncate(DONOR_LIST_LIMIT);

        let settings = self
            .page_settings_storage
            .get_settings(&profile.user_id)?
            .map(|record| record.to_dto())
            .unwrap_or_default();

        Ok(Some(PublicProfileResponse {
            url_slug: slug.to_string(),
            name: profile.name,
            birth_date: profile.birth_date,
            is_born: profile.is_born,
            gender: profile.gender,
            birth_place: profile.birth_place,
            parent1_name: profile.parent1_name,
            parent2_name: profile.parent2_name,
            title: settings.title,
            subtitle: settings.subtitle,
            welcome_message: settings.welcome_message,
            diaper_groups,
            recent_donors,
            top_donors,
        }))
    }

    fn share_url(&self, slug: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), slug)
    }
}
