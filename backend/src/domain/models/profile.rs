//! Baby profile and public-page settings rows.

use chrono::{DateTime, NaiveDate, Utc};

/// The baby behind an account's public page.
///
/// `url_slug` is unique across all profiles when set; the slug service owns
/// that check.
#[derive(Debug, Clone, PartialEq)]
pub struct BabyProfile {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub is_born: bool,
    pub gender: Option<String>,
    pub birth_place: Option<String>,
    pub parent1_name: Option<String>,
    pub parent2_name: Option<String>,
    pub url_slug: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BabyProfile {
    pub fn to_dto(&self) -> shared::BabyProfile {
        shared::BabyProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            birth_date: self.birth_date,
            is_born: self.is_born,
            gender: self.gender.clone(),
            birth_place: self.birth_place.clone(),
            parent1_name: self.parent1_name.clone(),
            parent2_name: self.parent2_name.clone(),
            url_slug: self.url_slug.clone(),
        }
    }
}

/// Stored public-page texts. Every field is optional; display falls back to
/// the fixed defaults in `shared::PageSettings::default()`.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSettingsRecord {
    pub id: String,
    pub user_id: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub welcome_message: Option<String>,
}

impl PageSettingsRecord {
    /// Resolve stored values against the fixed defaults.
    pub fn to_dto(&self) -> shared::PageSettings {
        let defaults = shared::PageSettings::default();
        shared::PageSettings {
            title: self.title.clone().unwrap_or(defaults.title),
            subtitle: self.subtitle.clone().unwrap_or(defaults.subtitle),
            welcome_message: self
                .welcome_message
                .clone()
                .unwrap_or(defaults.welcome_message),
        }
    }
}
