//! Inventory aggregation for the dashboard.
//!
//! The math lives in pure functions over already-fetched rows; the service
//! fetches an account's rows and applies them. "Today" is always an explicit
//! parameter so the trailing usage window is deterministic under test.

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use log::info;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::InventoryConfig;
use crate::domain::models::{AgeGroup, StockEntry, UsageRecord};
use crate::storage::{AgeGroupStorage, StockStorage, UsageStorage};
use shared::{
    AgeGroupUsage, InventorySummaryResponse, LowStockAlert, MonthlyAverageEntry, ShoppingListItem,
    UsageSummary,
};

/// Percentage of target covered by current stock, rounded to the nearest
/// integer. A zero target is 0%, never a division error.
pub fn progress_percentage(current: u32, target: u32) -> u32 {
    if target == 0 {
        return 0;
    }
    (100.0 * current as f64 / target as f64).round() as u32
}

/// Groups still under target, with how many diapers are missing and what
/// they would cost at the group's estimated unit price.
pub fn shopping_list(groups: &[AgeGroup], stock_by_group: &HashMap<String, u32>) -> Vec<ShoppingListItem> {
    groups
        .iter()
        .filter_map(|group| {
            let current = stock_by_group.get(&group.id).copied().unwrap_or(0);
            if current >= group.estimated_quantity {
                return None;
            }
            let needed = group.estimated_quantity - current;
            Some(ShoppingListItem {
                name: group.name.clone(),
                needed,
                estimated_cost: needed as f64 * group.price_per_unit,
            })
        })
        .collect()
}

/// Groups whose stock-to-target ratio is strictly under `low_stock_ratio`.
/// A zero target never alerts.
pub fn low_stock_alerts(
    groups: &[AgeGroup],
    stock_by_group: &HashMap<String, u32>,
    low_stock_ratio: f64,
) -> Vec<LowStockAlert> {
    groups
        .iter()
        .filter_map(|group| {
            if group.estimated_quantity == 0 {
                return None;
            }
            let current = stock_by_group.get(&group.id).copied().unwrap_or(0);
            let ratio = current as f64 / group.estimated_quantity as f64;
            if ratio >= low_stock_ratio {
                return None;
            }
            Some(LowStockAlert {
                age_group_id: group.id.clone(),
                name: group.name.clone(),
                current_quantity: current,
                estimated_quantity: group.estimated_quantity,
            })
        })
        .collect()
}

/// Yearly target split into a monthly average per group.
pub fn monthly_averages(groups: &[AgeGroup], monthly_divisor: u32) -> Vec<MonthlyAverageEntry> {
    groups
        .iter()
        .map(|group| MonthlyAverageEntry {
            age_group_id: group.id.clone(),
            name: group.name.clone(),
            age_range: group.age_range.clone(),
            monthly_average: if monthly_divisor == 0 {
                0
            } else {
                (group.estimated_quantity as f64 / monthly_divisor as f64).round() as u32
            },
        })
        .collect()
}

/// Consumption totals over the trailing window ending at `today`
/// (inclusive on both ends).
pub fn summarize_usage(
    groups: &[AgeGroup],
    usage: &[UsageRecord],
    window_days: u32,
    today: NaiveDate,
) -> UsageSummary {
    let window_start = today - Duration::days(window_days as i64);
    let in_window: Vec<&UsageRecord> = usage
        .iter()
        .filter(|record| record.usage_date >= window_start && record.usage_date <= today)
        .collect();

    let total_usage: u32 = in_window.iter().map(|record| record.quantity).sum();

    let by_age_group = groups
        .iter()
        .map(|group| {
            let total_used: u32 = in_window
                .iter()
                .filter(|record| record.age_group_id == group.id)
                .map(|record| record.quantity)
                .sum();
            AgeGroupUsage {
                age_group_id: group.id.clone(),
                name: group.name.clone(),
                total_used,
                average_daily: if window_days == 0 {
                    0
                } else {
                    (total_used as f64 / window_days as f64).round() as u32
                },
            }
        })
        .collect();

    UsageSummary {
        window_days,
        total_usage,
        by_age_group,
    }
}

/// Assemble the full dashboard payload from fetched rows.
pub fn summarize_inventory(
    groups: &[AgeGroup],
    stock: &[StockEntry],
    usage: &[UsageRecord],
    config: &InventoryConfig,
    today: NaiveDate,
) -> InventorySummaryResponse {
    let stock_by_group: HashMap<String, u32> = stock
        .iter()
        .map(|entry| (entry.age_group_id.clone(), entry.current_quantity))
        .collect();

    let total_stock: u32 = stock.iter().map(|entry| entry.current_quantity).sum();
    let total_target: u32 = groups.iter().map(|group| group.estimated_quantity).sum();

    InventorySummaryResponse {
        total_stock,
        total_target,
        progress_percentage: progress_percentage(total_stock, total_target),
        shopping_list: shopping_list(groups, &stock_by_group),
        low_stock_alerts: low_stock_alerts(groups, &stock_by_group, config.low_stock_ratio),
        monthly_averages: monthly_averages(groups, config.monthly_divisor),
        usage: summarize_usage(groups, usage, config.usage_window_days, today),
    }
}

/// Service assembling the dashboard summary for one account.
#[derive(Clone)]
pub struct InventoryService {
    age_group_storage: Arc<dyn AgeGroupStorage>,
    stock_storage: Arc<dyn StockStorage>,
    usage_storage: Arc<dyn UsageStorage>,
    config: InventoryConfig,
}

impl InventoryService {
    pub fn new(
        age_group_storage: Arc<dyn AgeGroupStorage>,
        stock_storage: Arc<dyn StockStorage>,
        usage_storage: Arc<dyn UsageStorage>,
        config: InventoryConfig,
    ) -> Self {
        Self {
            age_group_storage,
            stock_storage,
            usage_storage,
            config,
        }
    }

    pub async fn dashboard(&self, user_id: &str, today: NaiveDate) -> Result<InventorySummaryResponse> {
        info!("Building inventory summary for user {}", user_id);

        let groups = self.age_group_storage.list_age_groups(user_id)?;
        let stock = self.stock_storage.list_stock_entries(user_id)?;
        let usage = self.usage_storage.list_usage(user_id)?;

        Ok(summarize_inventory(&groups, &stock, &usage, &self.config, today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{age_group, stock_entry, usage_record};

    fn config() -> InventoryConfig {
        InventoryConfig::default()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 20).unwrap()
    }

    #[test]
    fn test_progress_percentage_rounds() {
        assert_eq!(progress_percentage(80, 100), 80);
        assert_eq!(progress_percentage(1, 3), 33);
        assert_eq!(progress_percentage(2, 3), 67);
    }

    #[test]
    fn test_progress_percentage_zero_target_is_zero() {
        assert_eq!(progress_percentage(0, 0), 0);
        assert_eq!(progress_percentage(50, 0), 0);
    }

    #[test]
    fn test_shopping_list_skips_groups_at_or_above_target() {
        let groups = vec![
            age_group("g-under", "P", 100, 0.5),
            age_group("g-at", "M", 100, 0.5),
            age_group("g-over", "G", 100, 0.5),
        ];
        let stock = HashMap::from([
            ("g-under".to_string(), 60),
            ("g-at".to_string(), 100),
            ("g-over".to_string(), 120),
        ]);

        let list = shopping_list(&groups, &stock);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "P");
        assert_eq!(list[0].needed, 40);
        assert!((list[0].estimated_cost - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_low_stock_threshold_is_strict() {
        let groups = vec![
            age_group("g-29", "P", 100, 0.5),
            age_group("g-30", "M", 100, 0.5),
        ];
        let stock = HashMap::from([
            ("g-29".to_string(), 29),
            ("g-30".to_string(), 30),
        ]);

        let alerts = low_stock_alerts(&groups, &stock, 0.30);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].age_group_id, "g-29");
    }

    #[test]
    fn test_zero_target_never_alerts() {
        let groups = vec![age_group("g-zero", "RN", 0, 0.5)];
        let stock = HashMap::from([("g-zero".to_string(), 0)]);
        assert!(low_stock_alerts(&groups, &stock, 0.30).is_empty());
    }

    #[test]
    fn test_missing_stock_entry_counts_as_zero() {
        let groups = vec![age_group("g-nostock", "P", 100, 0.5)];
        let stock = HashMap::new();

        let alerts = low_stock_alerts(&groups, &stock, 0.30);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].current_quantity, 0);

        let list = shopping_list(&groups, &stock);
        assert_eq!(list[0].needed, 100);
    }

    #[test]
    fn test_monthly_average_rounds() {
        let groups = vec![age_group("g", "P", 100, 0.5)];
        let averages = monthly_averages(&groups, 12);
        // 100 / 12 = 8.33 -> 8
        assert_eq!(averages[0].monthly_average, 8);
    }

    #[test]
    fn test_usage_window_includes_recent_record() {
        let groups = vec![age_group("g", "P", 100, 0.5)];
        let usage = vec![
            usage_record("g", 5, today() - Duration::days(10)),
            usage_record("g", 7, today() - Duration::days(45)),
        ];

        let summary = summarize_usage(&groups, &usage, 30, today());
        assert_eq!(summary.total_usage, 5);
        assert_eq!(summary.by_age_group[0].total_used, 5);
    }

    #[test]
    fn test_average_daily_rounds_over_window() {
        let groups = vec![age_group("g", "P", 100, 0.5)];
        let usage = vec![usage_record("g", 45, today() - Duration::days(1))];

        let summary = summarize_usage(&groups, &usage, 30, today());
        // 45 / 30 = 1.5 -> 2
        assert_eq!(summary.by_age_group[0].average_daily, 2);
    }

    #[test]
    fn test_full_summary_scenario() {
        // One group: stock 80 of 100 at half a real per diaper.
        let groups = vec![age_group("g", "M", 100, 0.5)];
        let stock = vec![stock_entry("g", 80)];
        let usage = vec![];

        let summary = summarize_inventory(&groups, &stock, &usage, &config(), today());
        assert_eq!(summary.total_stock, 80);
        assert_eq!(summary.total_target, 100);
        assert_eq!(summary.progress_percentage, 80);
        assert_eq!(summary.shopping_list.len(), 1);
        assert_eq!(summary.shopping_list[0].needed, 20);
        assert!((summary.shopping_list[0].estimated_cost - 10.0).abs() < 1e-9);
        assert!(summary.low_stock_alerts.is_empty());
        assert_eq!(summary.monthly_averages[0].monthly_average, 8);
        assert_eq!(summary.usage.total_usage, 0);
    }

    #[test]
    fn test_empty_inputs_produce_zeroed_summary() {
        let summary = summarize_inventory(&[], &[], &[], &config(), today());
        assert_eq!(summary.total_stock, 0);
        assert_eq!(summary.total_target, 0);
        assert_eq!(summary.progress_percentage, 0);
        assert!(summary.shopping_list.is_empty());
        assert!(summary.low_stock_alerts.is_empty());
    }
}
