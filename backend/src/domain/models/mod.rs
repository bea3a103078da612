//! Domain models backing the storage layer.
//!
//! These are the rows as the store holds them (owner and timestamp fields
//! included); the DTOs in `shared` are their wire-facing projections.

pub mod catalog;
pub mod profile;
pub mod records;
pub mod reminder;
pub mod user;

pub use catalog::{AgeGroup, StockEntry};
pub use profile::{BabyProfile, PageSettingsRecord};
pub use records::{DonationRecord, PurchaseRecord, UsageRecord, ValidationError};
pub use reminder::ReminderRecord;
pub use user::UserProfile;
