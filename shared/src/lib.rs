use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A diaper size category with a yearly target and unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeGroup {
    pub id: String,
    pub name: String,
    /// Display string, e.g. "0-2 meses"
    pub age_range: String,
    /// Yearly target quantity for this group
    pub estimated_quantity: u32,
    /// Estimated price per diaper; 0.0 when never configured
    pub price_per_unit: f64,
    pub color_theme: Option<String>,
    pub icon_name: Option<String>,
}

/// An age group joined with its current stock quantity, as consumed by
/// dashboards and forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeGroupWithStock {
    pub id: String,
    pub name: String,
    pub age_range: String,
    pub estimated_quantity: u32,
    pub price_per_unit: f64,
    pub color_theme: Option<String>,
    pub icon_name: Option<String>,
    pub current_quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAgeGroupRequest {
    pub name: String,
    pub age_range: String,
    pub estimated_quantity: u32,
    pub price_per_unit: Option<f64>,
    pub color_theme: Option<String>,
    pub icon_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateAgeGroupRequest {
    pub name: Option<String>,
    pub age_range: Option<String>,
    pub estimated_quantity: Option<u32>,
    pub price_per_unit: Option<f64>,
    pub color_theme: Option<String>,
    pub icon_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeGroupResponse {
    pub age_group: AgeGroup,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeGroupListResponse {
    pub age_groups: Vec<AgeGroupWithStock>,
}

/// Current on-hand quantity for one age group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockEntry {
    pub id: String,
    pub age_group_id: String,
    pub current_quantity: u32,
    pub notes: Option<String>,
    pub last_updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStockRequest {
    pub current_quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockListResponse {
    pub entries: Vec<StockEntry>,
}

/// Moderation state of a donation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    Pending,
    Approved,
    Rejected,
}

impl DonationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Pending => "pending",
            DonationStatus::Approved => "approved",
            DonationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Result<Self, StatusParseError> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(DonationStatus::Pending),
            "approved" => Ok(DonationStatus::Approved),
            "rejected" => Ok(DonationStatus::Rejected),
            _ => Err(StatusParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusParseError(pub String);

impl fmt::Display for StatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown status value: {}", self.0)
    }
}

impl std::error::Error for StatusParseError {}

/// A recorded donation, joined with its age group name for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub id: String,
    pub age_group_id: String,
    pub age_group_name: String,
    pub quantity: u32,
    pub donor_name: Option<String>,
    pub donor_contact: Option<String>,
    pub donor_email: Option<String>,
    pub notes: Option<String>,
    pub donation_date: NaiveDate,
    pub status: DonationStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDonationRequest {
    pub age_group_id: String,
    pub quantity: u32,
    pub donor_name: Option<String>,
    pub donor_contact: Option<String>,
    pub donor_email: Option<String>,
    pub notes: Option<String>,
    /// Defaults to today when not provided
    pub donation_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationResponse {
    pub donation: Donation,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationListResponse {
    pub donations: Vec<Donation>,
}

/// A diaper consumption record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageEntry {
    pub id: String,
    pub age_group_id: String,
    pub quantity: u32,
    pub usage_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUsageRequest {
    pub age_group_id: String,
    pub quantity: u32,
    pub usage_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageResponse {
    pub usage: UsageEntry,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageListResponse {
    pub entries: Vec<UsageEntry>,
}

/// A recorded diaper purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: String,
    pub age_group_id: String,
    pub quantity: u32,
    pub unit_price: Option<f64>,
    pub total_cost: Option<f64>,
    pub store_name: Option<String>,
    pub notes: Option<String>,
    pub purchase_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePurchaseRequest {
    pub age_group_id: String,
    pub quantity: u32,
    pub unit_price: Option<f64>,
    pub total_cost: Option<f64>,
    pub store_name: Option<String>,
    pub notes: Option<String>,
    pub purchase_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseResponse {
    pub purchase: Purchase,
    pub success_message: String,
}

/// The configurable baby profile behind a public page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BabyProfile {
    pub id: String,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub is_born: bool,
    pub gender: Option<String>,
    pub birth_place: Option<String>,
    pub parent1_name: Option<String>,
    pub parent2_name: Option<String>,
    pub url_slug: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveBabyProfileRequest {
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub is_born: bool,
    pub gender: Option<String>,
    pub birth_place: Option<String>,
    pub parent1_name: Option<String>,
    pub parent2_name: Option<String>,
    pub url_slug: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BabyProfileResponse {
    pub profile: BabyProfile,
    /// Shareable public URL, present once a slug is configured
    pub full_url: Option<String>,
    pub success_message: String,
}

/// Result of checking one slug candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlugCheckResponse {
    pub slug: String,
    pub is_available: bool,
    /// Set when the backing lookup failed and availability is unknown
    pub error: Option<String>,
}

/// A generated slug suggestion for a display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlugSuggestionResponse {
    pub base_slug: String,
    pub suggestion: String,
}

/// Per-group progress block on the public profile page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaperGroupProgress {
    pub name: String,
    pub age_range: String,
    pub current_quantity: u32,
    pub estimated_quantity: u32,
    pub color_theme: Option<String>,
    pub icon_name: Option<String>,
    pub progress_percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentDonor {
    pub donor_name: String,
    pub donation_date: NaiveDate,
    pub quantity: u32,
    pub age_group_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopDonor {
    pub donor_name: String,
    pub total_donated: u32,
    pub donation_count: u32,
}

/// Everything the public profile page needs, keyed by slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicProfileResponse {
    pub url_slug: String,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub is_born: bool,
    pub gender: Option<String>,
    pub birth_place: Option<String>,
    pub parent1_name: Option<String>,
    pub parent2_name: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub welcome_message: String,
    pub diaper_groups: Vec<DiaperGroupProgress>,
    pub recent_donors: Vec<RecentDonor>,
    pub top_donors: Vec<TopDonor>,
}

/// One line of the suggested shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub name: String,
    pub needed: u32,
    pub estimated_cost: f64,
}

/// A group whose stock fell under the low-stock ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowStockAlert {
    pub age_group_id: String,
    pub name: String,
    pub current_quantity: u32,
    pub estimated_quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAverageEntry {
    pub age_group_id: String,
    pub name: String,
    pub age_range: String,
    pub monthly_average: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeGroupUsage {
    pub age_group_id: String,
    pub name: String,
    pub total_used: u32,
    pub average_daily: u32,
}

/// Trailing-window consumption summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSummary {
    pub window_days: u32,
    pub total_usage: u32,
    pub by_age_group: Vec<AgeGroupUsage>,
}

/// The dashboard payload: stock totals plus derived lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySummaryResponse {
    pub total_stock: u32,
    pub total_target: u32,
    pub progress_percentage: u32,
    pub shopping_list: Vec<ShoppingListItem>,
    pub low_stock_alerts: Vec<LowStockAlert>,
    pub monthly_averages: Vec<MonthlyAverageEntry>,
    pub usage: UsageSummary,
}

/// One month bucket of donations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyDonationPoint {
    /// Short pt-BR month label plus 2-digit year, e.g. "ago/25"
    pub month: String,
    pub donations: u32,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyUsagePoint {
    pub month: String,
    pub usage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyValuePoint {
    pub month: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeGroupStat {
    pub name: String,
    pub current: u32,
    pub target: u32,
    pub donations: u32,
    pub usage: u32,
    pub percentage: u32,
    pub color_theme: Option<String>,
}

/// The full reporting payload for charts and summary cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResponse {
    /// Number of donation records
    pub total_donation_count: usize,
    /// Summed donated quantity across all records
    pub total_donations: u32,
    pub total_donation_value: f64,
    pub total_stock: u32,
    pub total_target: u32,
    pub total_used: u32,
    pub total_purchased: u32,
    pub progress_percentage: u32,
    pub monthly_donations: Vec<MonthlyDonationPoint>,
    pub monthly_usage: Vec<MonthlyUsagePoint>,
    pub age_group_stats: Vec<AgeGroupStat>,
    pub donations_by_month: Vec<MonthlyValuePoint>,
}

/// Public page texts, all optional in the store with fixed fallbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSettings {
    pub title: String,
    pub subtitle: String,
    pub welcome_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePageSettingsRequest {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub welcome_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSettingsResponse {
    pub settings: PageSettings,
    pub success_message: String,
}

/// Kind of stock reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderType {
    LowStock,
    Restock,
    DonationCheck,
}

impl ReminderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderType::LowStock => "low_stock",
            ReminderType::Restock => "restock",
            ReminderType::DonationCheck => "donation_check",
        }
    }

    pub fn parse(s: &str) -> Result<Self, StatusParseError> {
        match s {
            "low_stock" => Ok(ReminderType::LowStock),
            "restock" => Ok(ReminderType::Restock),
            "donation_check" => Ok(ReminderType::DonationCheck),
            _ => Err(StatusParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub reminder_type: ReminderType,
    pub title: String,
    pub message: String,
    pub age_group_name: Option<String>,
    pub current_stock: u32,
    pub threshold_quantity: Option<u32>,
    pub is_read: bool,
    pub triggered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderListResponse {
    pub reminders: Vec<Reminder>,
    pub unread_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReminderRequest {
    pub age_group_id: Option<String>,
    pub reminder_type: ReminderType,
    pub title: String,
    pub message: String,
    pub threshold_quantity: Option<u32>,
}

/// An account row as seen by the admin console. Authentication itself is
/// handled by the external identity provider; this is only the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserAccount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub display_name: Option<String>,
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateAdminStatusRequest {
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: UserAccount,
    pub success_message: String,
}

/// Per-user activity counters for the admin detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStatsResponse {
    pub user_id: String,
    pub age_group_count: usize,
    pub donation_count: usize,
    pub usage_count: usize,
    pub total_donated_quantity: u32,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            title: "Lap Lap Diaper".to_string(),
            subtitle:
                "Acompanhe o estoque e o consumo de fraldas do seu bebê de forma simples e organizada"
                    .to_string(),
            welcome_message: "Bem-vindo ao sistema de controle de fraldas".to_string(),
        }
    }
}
