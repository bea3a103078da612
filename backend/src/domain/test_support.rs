//! Shared fixtures for service tests.

use chrono::{NaiveDate, TimeZone, Utc};
use shared::DonationStatus;

use crate::domain::models::{AgeGroup, BabyProfile, DonationRecord, StockEntry, UsageRecord};
use crate::storage::{MemoryStore, ProfileStorage};

pub const TEST_USER: &str = "test-user";

pub fn test_store() -> MemoryStore {
    MemoryStore::new()
}

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 20, 12, 0, 0).unwrap()
}

pub fn age_group(id: &str, name: &str, estimated_quantity: u32, price_per_unit: f64) -> AgeGroup {
    AgeGroup {
        id: id.to_string(),
        user_id: TEST_USER.to_string(),
        name: name.to_string(),
        age_range: format!("{} range", name),
        estimated_quantity,
        price_per_unit,
        color_theme: None,
        icon_name: None,
        created_at: fixed_now(),
        updated_at: fixed_now(),
    }
}

pub fn stock_entry(age_group_id: &str, current_quantity: u32) -> StockEntry {
    StockEntry {
        id: format!("stock-{}", age_group_id),
        user_id: TEST_USER.to_string(),
        age_group_id: age_group_id.to_string(),
        current_quantity,
        notes: None,
        last_updated_at: fixed_now(),
    }
}

pub fn donation(age_group_id: &str, quantity: u32, donation_date: NaiveDate) -> DonationRecord {
    DonationRecord {
        id: format!("donation-{}-{}", age_group_id, donation_date),
        age_group_id: age_group_id.to_string(),
        quantity,
        donor_name: Some("Doadora Anônima".to_string()),
        donor_contact: None,
        donor_email: None,
        notes: None,
        donation_date,
        status: DonationStatus::Approved,
        created_by: None,
        created_at: fixed_now(),
    }
}

pub fn usage_record(age_group_id: &str, quantity: u32, usage_date: NaiveDate) -> UsageRecord {
    UsageRecord {
        id: format!("usage-{}-{}", age_group_id, usage_date),
        user_id: TEST_USER.to_string(),
        age_group_id: age_group_id.to_string(),
        quantity,
        usage_date,
        notes: None,
        created_at: fixed_now(),
    }
}

pub fn profile_with_slug(store: &MemoryStore, user_id: &str, slug: &str) -> BabyProfile {
    let profile = BabyProfile {
        id: format!("profile-{}", user_id),
        user_id: user_id.to_string(),
        name: slug.to_string(),
        birth_date: None,
        is_born: false,
        gender: None,
        birth_place: None,
        parent1_name: None,
        parent2_name: None,
        url_slug: Some(slug.to_string()),
        created_at: fixed_now(),
        updated_at: fixed_now(),
    };
    store
        .upsert_profile(&profile)
        .expect("test profile should store");
    profile
}
