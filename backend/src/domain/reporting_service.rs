//! Reporting aggregation: monthly buckets and per-group statistics for the
//! charts page.
//!
//! A single synchronous pass over fetched rows. Empty inputs produce empty
//! series and zeroed counters, never an error.

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use log::info;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::inventory_service::progress_percentage;
use crate::domain::models::{AgeGroup, DonationRecord, StockEntry, UsageRecord};
use crate::storage::{AgeGroupStorage, DonationStorage, StockStorage, UsageStorage};
use shared::{
    AgeGroupStat, MonthlyDonationPoint, MonthlyUsagePoint, MonthlyValuePoint, ReportResponse,
};

/// Estimated price of one diaper used by the monthly value series.
///
/// The total donation value below uses each group's real `price_per_unit`;
/// this series deliberately does not. Known inconsistency, kept as shipped.
pub const AVERAGE_UNIT_PRICE: f64 = 0.85;

/// Number of month buckets returned by the time series.
const MAX_MONTH_BUCKETS: usize = 6;

const PT_BR_SHORT_MONTHS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Short pt-BR month label with a 2-digit year, e.g. `"ago/25"`.
pub fn month_label(date: NaiveDate) -> String {
    let month = PT_BR_SHORT_MONTHS[date.month0() as usize];
    format!("{}/{:02}", month, date.year() % 100)
}

/// Bucket donations by calendar month; chronological, most recent 6.
pub fn monthly_donation_buckets(donations: &[DonationRecord]) -> Vec<MonthlyDonationPoint> {
    let mut buckets: BTreeMap<(i32, u32), (u32, u32)> = BTreeMap::new();
    for donation in donations {
        let key = (donation.donation_date.year(), donation.donation_date.month());
        let bucket = buckets.entry(key).or_insert((0, 0));
        bucket.0 += 1;
        bucket.1 += donation.quantity;
    }

    let points: Vec<MonthlyDonationPoint> = buckets
        .into_iter()
        .map(|((year, month), (count, quantity))| MonthlyDonationPoint {
            month: label_for(year, month),
            donations: count,
            quantity,
        })
        .collect();

    last_buckets(points)
}

/// Bucket usage by calendar month; chronological, most recent 6.
pub fn monthly_usage_buckets(usage: &[UsageRecord]) -> Vec<MonthlyUsagePoint> {
    let mut buckets: BTreeMap<(i32, u32), u32> = BTreeMap::new();
    for record in usage {
        let key = (record.usage_date.year(), record.usage_date.month());
        *buckets.entry(key).or_insert(0) += record.quantity;
    }

    let points: Vec<MonthlyUsagePoint> = buckets
        .into_iter()
        .map(|((year, month), quantity)| MonthlyUsagePoint {
            month: label_for(year, month),
            usage: quantity,
        })
        .collect();

    last_buckets(points)
}

/// Monthly monetary series at the fixed estimated unit price.
pub fn monthly_value_series(donations: &[DonationRecord]) -> Vec<MonthlyValuePoint> {
    monthly_donation_buckets(donations)
        .into_iter()
        .map(|point| MonthlyValuePoint {
            month: point.month,
            value: point.quantity as f64 * AVERAGE_UNIT_PRICE,
        })
        .collect()
}

/// Total value of donations at each group's real unit price.
pub fn total_donation_value(donations: &[DonationRecord], groups: &[AgeGroup]) -> f64 {
    let price_by_group: HashMap<&str, f64> = groups
        .iter()
        .map(|group| (group.id.as_str(), group.price_per_unit))
        .collect();

    donations
        .iter()
        .map(|donation| {
            let price = price_by_group
                .get(donation.age_group_id.as_str())
                .copied()
                .unwrap_or(0.0);
            donation.quantity as f64 * price
        })
        .sum()
}

/// Per-group donated/used/stock/target statistics.
pub fn age_group_stats(
    groups: &[AgeGroup],
    stock: &[StockEntry],
    donations: &[DonationRecord],
    usage: &[UsageRecord],
) -> Vec<AgeGroupStat> {
    let stock_by_group: HashMap<&str, u32> = stock
        .iter()
        .map(|entry| (entry.age_group_id.as_str(), entry.current_quantity))
        .collect();

    groups
        .iter()
        .map(|group| {
            let current = stock_by_group.get(group.id.as_str()).copied().unwrap_or(0);
            let donated: u32 = donations
                .iter()
                .filter(|d| d.age_group_id == group.id)
                .map(|d| d.quantity)
                .sum();
            let used: u32 = usage
                .iter()
                .filter(|u| u.age_group_id == group.id)
                .map(|u| u.quantity)
                .sum();
            AgeGroupStat {
                name: group.name.clone(),
                current,
                target: group.estimated_quantity,
                donations: donated,
                usage: used,
                percentage: progress_percentage(current, group.estimated_quantity),
                color_theme: group.color_theme.clone(),
            }
        })
        .collect()
}

/// Assemble the full report payload from fetched rows.
pub fn build_report(
    groups: &[AgeGroup],
    stock: &[StockEntry],
    donations: &[DonationRecord],
    usage: &[UsageRecord],
) -> ReportResponse {
    let total_stock: u32 = stock.iter().map(|entry| entry.current_quantity).sum();
    let total_target: u32 = groups.iter().map(|group| group.estimated_quantity).sum();
    let total_used: u32 = usage.iter().map(|record| record.quantity).sum();
    let total_donations: u32 = donations.iter().map(|donation| donation.quantity).sum();

    ReportResponse {
        total_donation_count: donations.len(),
        total_donations,
        total_donation_value: total_donation_value(donations, groups),
        total_stock,
        total_target,
        total_used,
        total_purchased: total_target.saturating_sub(total_stock),
        progress_percentage: progress_percentage(total_stock, total_target),
        monthly_donations: monthly_donation_buckets(donations),
        monthly_usage: monthly_usage_buckets(usage),
        age_group_stats: age_group_stats(groups, stock, donations, usage),
        donations_by_month: monthly_value_series(donations),
    }
}

fn label_for(year: i32, month: u32) -> String {
    // Month came out of a NaiveDate, so the first of it always exists.
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(date) => month_label(date),
        None => format!("{}/{:02}", month, year % 100),
    }
}

fn last_buckets<T>(mut points: Vec<T>) -> Vec<T> {
    if points.len() > MAX_MONTH_BUCKETS {
        points.drain(..points.len() - MAX_MONTH_BUCKETS);
    }
    points
}

/// Service assembling the report for one account.
#[derive(Clone)]
pub struct ReportingService {
    age_group_storage: Arc<dyn AgeGroupStorage>,
    stock_storage: Arc<dyn StockStorage>,
    donation_storage: Arc<dyn DonationStorage>,
    usage_storage: Arc<dyn UsageStorage>,
}

impl ReportingService {
    pub fn new(
        age_group_storage: Arc<dyn AgeGroupStorage>,
        stock_storage: Arc<dyn StockStorage>,
        donation_storage: Arc<dyn DonationStorage>,
        usage_storage: Arc<dyn UsageStorage>,
    ) -> Self {
        Self {
            age_group_storage,
            stock_storage,
            donation_storage,
            usage_storage,
        }
    }

    pub async fn report(&self, user_id: &str) -> Result<ReportResponse> {
        info!("Building report for user {}", user_id);

        let groups = self.age_group_storage.list_age_groups(user_id)?;
        let group_ids: Vec<String> = groups.iter().map(|g| g.id.clone()).collect();
        let stock = self.stock_storage.list_stock_entries(user_id)?;
        let donations = self.donation_storage.list_donations_for_groups(&group_ids)?;
        let usage = self.usage_storage.list_usage(user_id)?;

        Ok(build_report(&groups, &stock, &donations, &usage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{age_group, donation, stock_entry, usage_record};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_label_is_pt_br_short() {
        assert_eq!(month_label(date(2025, 8, 15)), "ago/25");
        assert_eq!(month_label(date(2024, 2, 1)), "fev/24");
        assert_eq!(month_label(date(2025, 12, 31)), "dez/25");
    }

    #[test]
    fn test_same_month_donations_share_a_bucket() {
        let donations = vec![
            donation("g", 10, date(2025, 8, 3)),
            donation("g", 15, date(2025, 8, 27)),
        ];

        let buckets = monthly_donation_buckets(&donations);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].month, "ago/25");
        assert_eq!(buckets[0].donations, 2);
        assert_eq!(buckets[0].quantity, 25);
    }

    #[test]
    fn test_buckets_are_chronological_and_capped_at_six() {
        let donations: Vec<_> = (1..=8)
            .map(|month| donation("g", month, date(2025, month as u32, 1)))
            .collect();

        let buckets = monthly_donation_buckets(&donations);
        assert_eq!(buckets.len(), 6);
        assert_eq!(buckets.first().unwrap().month, "mar/25");
        assert_eq!(buckets.last().unwrap().month, "ago/25");
    }

    #[test]
    fn test_bucket_ordering_spans_year_boundary() {
        let donations = vec![
            donation("g", 5, date(2025, 1, 10)),
            donation("g", 3, date(2024, 12, 20)),
        ];

        let buckets = monthly_donation_buckets(&donations);
        assert_eq!(buckets[0].month, "dez/24");
        assert_eq!(buckets[1].month, "jan/25");
    }

    #[test]
    fn test_value_series_uses_fixed_unit_price() {
        let donations = vec![donation("g", 100, date(2025, 8, 1))];
        let series = monthly_value_series(&donations);
        assert_eq!(series.len(), 1);
        assert!((series[0].value - 85.0).abs() < 1e-9);
    }

    #[test]
    fn test_total_value_uses_real_group_prices() {
        let groups = vec![age_group("g", "P", 100, 0.5)];
        let donations = vec![donation("g", 100, date(2025, 8, 1))];
        assert!((total_donation_value(&donations, &groups) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_group_price_defaults_to_zero() {
        let donations = vec![donation("ghost", 40, date(2025, 8, 1))];
        assert_eq!(total_donation_value(&donations, &[]), 0.0);
    }

    #[test]
    fn test_age_group_stats_percentage_zero_target() {
        let groups = vec![age_group("g", "RN", 0, 0.5)];
        let stats = age_group_stats(&groups, &[], &[], &[]);
        assert_eq!(stats[0].percentage, 0);
    }

    #[test]
    fn test_empty_inputs_build_empty_report() {
        let report = build_report(&[], &[], &[], &[]);
        assert_eq!(report.total_donation_count, 0);
        assert_eq!(report.total_donations, 0);
        assert_eq!(report.total_donation_value, 0.0);
        assert_eq!(report.progress_percentage, 0);
        assert!(report.monthly_donations.is_empty());
        assert!(report.monthly_usage.is_empty());
        assert!(report.age_group_stats.is_empty());
        assert!(report.donations_by_month.is_empty());
    }

    #[test]
    fn test_full_report_counters() {
        let groups = vec![age_group("g", "M", 100, 0.5)];
        let stock = vec![stock_entry("g", 80)];
        let donations = vec![
            donation("g", 30, date(2025, 7, 1)),
            donation("g", 10, date(2025, 7, 20)),
        ];
        let usage = vec![usage_record("g", 12, date(2025, 7, 15))];

        let report = build_report(&groups, &stock, &donations, &usage);
        // The count headline counts records; the quantity headline sums them.
        assert_eq!(report.total_donation_count, 2);
        assert_eq!(report.total_donations, 40);
        assert_eq!(report.total_stock, 80);
        assert_eq!(report.total_target, 100);
        assert_eq!(report.total_used, 12);
        assert_eq!(report.total_purchased, 20);
        assert_eq!(report.progress_percentage, 80);
        assert_eq!(report.monthly_usage[0].usage, 12);
    }
}
