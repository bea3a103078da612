//! Event records: donations, usage, purchases.
//!
//! Donations and usage records are immutable once written, except for a
//! donation's moderation status. Stock adjustments happen as a side effect
//! of writing them, never by editing the records afterwards.

use chrono::{DateTime, NaiveDate, Utc};
use shared::DonationStatus;
use thiserror::Error;

/// Validation failures on incoming records.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Quantity must be greater than zero")]
    NonPositiveQuantity,
    #[error("Name cannot be empty")]
    EmptyName,
}

/// A donated batch of diapers.
///
/// `created_by` is `None` for donations registered through the public page.
#[derive(Debug, Clone, PartialEq)]
pub struct DonationRecord {
    pub id: String,
    pub age_group_id: String,
    pub quantity: u32,
    pub donor_name: Option<String>,
    pub donor_contact: Option<String>,
    pub donor_email: Option<String>,
    pub notes: Option<String>,
    pub donation_date: NaiveDate,
    pub status: DonationStatus,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DonationRecord {
    pub fn to_dto(&self, age_group_name: String) -> shared::Donation {
        shared::Donation {
            id: self.id.clone(),
            age_group_id: self.age_group_id.clone(),
            age_group_name,
            quantity: self.quantity,
            donor_name: self.donor_name.clone(),
            donor_contact: self.donor_contact.clone(),
            donor_email: self.donor_email.clone(),
            notes: self.notes.clone(),
            donation_date: self.donation_date,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// A consumption record.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageRecord {
    pub id: String,
    pub user_id: String,
    pub age_group_id: String,
    pub quantity: u32,
    pub usage_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UsageRecord {
    pub fn to_dto(&self) -> shared::UsageEntry {
        shared::UsageEntry {
            id: self.id.clone(),
            age_group_id: self.age_group_id.clone(),
            quantity: self.quantity,
            usage_date: self.usage_date,
            notes: self.notes.clone(),
            created_at: self.created_at,
        }
    }
}

/// A store purchase of diapers.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseRecord {
    pub id: String,
    pub age_group_id: String,
    pub quantity: u32,
    pub unit_price: Option<f64>,
    pub total_cost: Option<f64>,
    pub store_name: Option<String>,
    pub notes: Option<String>,
    pub purchase_date: NaiveDate,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PurchaseRecord {
    pub fn to_dto(&self) -> shared::Purchase {
        shared::Purchase {
            id: self.id.clone(),
            age_group_id: self.age_group_id.clone(),
            quantity: self.quantity,
            unit_price: self.unit_price,
            total_cost: self.total_cost,
            store_name: self.store_name.clone(),
            notes: self.notes.clone(),
            purchase_date: self.purchase_date,
            created_at: self.created_at,
        }
    }
}
