//! # Diaper Tracker Backend
//!
//! Backend for the diaper registry: age group catalog, stock with its
//! donation/purchase/usage triggers, public baby profile pages, dashboards
//! and reports, reminders and the admin console.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! REST layer (axum handlers)
//!     |
//! Domain layer (services, pure aggregation)
//!     |
//! Storage layer (trait boundary to the data store)
//! ```

pub mod config;
pub mod domain;
pub mod events;
pub mod rest;
pub mod storage;

use axum::http::{HeaderValue, Method};
use axum::Router;
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::domain::{
    AdminService, AgeGroupService, DonationService, InventoryService, PageSettingsService,
    ProfileService, PurchaseService, ReminderService, ReportingService, SlugService, StockService,
    UsageService,
};
use crate::events::EventBus;
use crate::storage::MemoryStore;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub age_group_service: AgeGroupService,
    pub stock_service: StockService,
    pub donation_service: DonationService,
    pub usage_service: UsageService,
    pub purchase_service: PurchaseService,
    pub inventory_service: InventoryService,
    pub reporting_service: ReportingService,
    pub slug_service: SlugService,
    pub profile_service: ProfileService,
    pub page_settings_service: PageSettingsService,
    pub reminder_service: ReminderService,
    pub admin_service: AdminService,
    pub event_bus: EventBus,
}

/// Initialize the backend with all required services over a fresh store.
pub fn initialize_backend(config: &AppConfig) -> AppState {
    info!("Setting up storage");
    initialize_backend_with_store(MemoryStore::new(), config.clone())
}

/// Wire every service over the given store. Tests use this to pre-seed rows.
pub fn initialize_backend_with_store(store: MemoryStore, config: AppConfig) -> AppState {
    info!("Setting up domain services");

    let event_bus = EventBus::new();

    let age_groups: Arc<dyn storage::AgeGroupStorage> = Arc::new(store.clone());
    let stock: Arc<dyn storage::StockStorage> = Arc::new(store.clone());
    let donations: Arc<dyn storage::DonationStorage> = Arc::new(store.clone());
    let usage: Arc<dyn storage::UsageStorage> = Arc::new(store.clone());
    let purchases: Arc<dyn storage::PurchaseStorage> = Arc::new(store.clone());
    let profiles: Arc<dyn storage::ProfileStorage> = Arc::new(store.clone());
    let page_settings: Arc<dyn storage::PageSettingsStorage> = Arc::new(store.clone());
    let reminders: Arc<dyn storage::ReminderStorage> = Arc::new(store.clone());
    let users: Arc<dyn storage::UserStorage> = Arc::new(store);

    let stock_service = StockService::new(stock.clone(), event_bus.clone());
    let slug_service = SlugService::new(profiles.clone());

    let age_group_service =
        AgeGroupService::new(age_groups.clone(), stock.clone(), event_bus.clone());
    let donation_service = DonationService::new(
        donations.clone(),
        age_groups.clone(),
        stock_service.clone(),
        event_bus.clone(),
    );
    let usage_service = UsageService::new(
        usage.clone(),
        age_groups.clone(),
        stock_service.clone(),
        event_bus.clone(),
    );
    let purchase_service = PurchaseService::new(
        purchases,
        age_groups.clone(),
        stock_service.clone(),
        event_bus.clone(),
    );
    let inventory_service = InventoryService::new(
        age_groups.clone(),
        stock.clone(),
        usage.clone(),
        config.inventory.clone(),
    );
    let reporting_service = ReportingService::new(
        age_groups.clone(),
        stock.clone(),
        donations.clone(),
        usage.clone(),
    );
    let profile_service = ProfileService::new(
        profiles,
        age_groups.clone(),
        stock.clone(),
        donations.clone(),
        page_settings.clone(),
        slug_service.clone(),
        event_bus.clone(),
        config.public_base_url.clone(),
    );
    let page_settings_service = PageSettingsService::new(page_settings, event_bus.clone());
    let reminder_service = ReminderService::new(
        reminders,
        age_groups.clone(),
        stock,
        config.inventory,
        event_bus.clone(),
    );
    let admin_service = AdminService::new(users, age_groups, donations, usage, event_bus.clone());

    AppState {
        age_group_service,
        stock_service,
        donation_service,
        usage_service,
        purchase_service,
        inventory_service,
        reporting_service,
        slug_service,
        profile_service,
        page_settings_service,
        reminder_service,
        admin_service,
        event_bus,
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Router {
    // CORS setup to allow the frontend to make requests
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .unwrap_or_else(|_| HeaderValue::from_static("http://localhost:8080"));
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .nest("/age-groups", rest::age_group_apis::router())
        .nest("/stock", rest::stock_apis::router())
        .nest("/donations", rest::donation_apis::router())
        .nest("/usage", rest::usage_apis::router())
        .nest("/purchases", rest::purchase_apis::router())
        .nest("/dashboard", rest::dashboard_apis::router())
        .nest("/reports", rest::report_apis::router())
        .nest("/slug", rest::slug_apis::router())
        .nest("/profile", rest::profile_apis::router())
        .nest("/page-settings", rest::page_settings_apis::router())
        .nest("/reminders", rest::reminder_apis::router())
        .nest("/admin", rest::admin_apis::router())
        .nest("/public/profiles", rest::profile_apis::public_router())
        .nest("/public/donations", rest::donation_apis::public_router());

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
