//! Diaper catalog rows: age groups and their stock entries.

use chrono::{DateTime, Utc};

/// A diaper size category owned by one account.
///
/// `estimated_quantity` is the yearly target the family is collecting
/// towards; `price_per_unit` is their estimate of what one diaper of this
/// size costs, used for shopping-list costing and report values.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeGroup {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub age_range: String,
    pub estimated_quantity: u32,
    pub price_per_unit: f64,
    pub color_theme: Option<String>,
    pub icon_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AgeGroup {
    pub fn to_dto(&self) -> shared::AgeGroup {
        shared::AgeGroup {
            id: self.id.clone(),
            name: self.name.clone(),
            age_range: self.age_range.clone(),
            estimated_quantity: self.estimated_quantity,
            price_per_unit: self.price_per_unit,
            color_theme: self.color_theme.clone(),
            icon_name: self.icon_name.clone(),
        }
    }

    pub fn to_dto_with_stock(&self, current_quantity: u32) -> shared::AgeGroupWithStock {
        shared::AgeGroupWithStock {
            id: self.id.clone(),
            name: self.name.clone(),
            age_range: self.age_range.clone(),
            estimated_quantity: self.estimated_quantity,
            price_per_unit: self.price_per_unit,
            color_theme: self.color_theme.clone(),
            icon_name: self.icon_name.clone(),
            current_quantity,
        }
    }
}

/// The on-hand quantity for one age group. Exactly one per group, created
/// alongside it with a zero quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct StockEntry {
    pub id: String,
    pub user_id: String,
    pub age_group_id: String,
    pub current_quantity: u32,
    pub notes: Option<String>,
    pub last_updated_at: DateTime<Utc>,
}

impl StockEntry {
    pub fn to_dto(&self) -> shared::StockEntry {
        shared::StockEntry {
            id: self.id.clone(),
            age_group_id: self.age_group_id.clone(),
            current_quantity: self.current_quantity,
            notes: self.notes.clone(),
            last_updated_at: self.last_updated_at,
        }
    }
}
