//! Domain layer: business logic and rules for the diaper tracker.
//!
//! Services own validation and orchestration; the math behind the dashboard
//! and report pages lives in pure functions next to its service. Storage is
//! reached only through the traits in [`crate::storage`].

pub mod models;
pub mod slug;

pub mod admin_service;
pub mod age_group_service;
pub mod donation_service;
pub mod inventory_service;
pub mod page_settings_service;
pub mod profile_service;
pub mod purchase_service;
pub mod reminder_service;
pub mod reporting_service;
pub mod slug_service;
pub mod stock_service;
pub mod usage_service;

#[cfg(test)]
pub mod test_support;

pub use admin_service::AdminService;
pub use age_group_service::AgeGroupService;
pub use donation_service::DonationService;
pub use inventory_service::InventoryService;
pub use page_settings_service::PageSettingsService;
pub use profile_service::ProfileService;
pub use purchase_service::PurchaseService;
pub use reminder_service::ReminderService;
pub use reporting_service::ReportingService;
pub use slug_service::SlugService;
pub use stock_service::StockService;
pub use usage_service::UsageService;
