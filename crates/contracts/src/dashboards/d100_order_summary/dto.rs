use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{OrderKind, OrderRecord};
use crate::shared::lenient;

/// Monthly point pre-aggregated by the ERP per design category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    #[serde(rename = "monthNo", default, deserialize_with = "lenient::deserialize_month")]
    pub month_no: u32,
    #[serde(rename = "designcategory", default, deserialize_with = "lenient::deserialize_text_or_empty")]
    pub design_category: String,
    #[serde(rename = "totalValue", default, deserialize_with = "lenient::deserialize_number_or_zero")]
    pub total_value: f64,
    #[serde(default, deserialize_with = "lenient::deserialize_integer_or_zero")]
    pub currency_id: i64,
}

/// Which currency rows enter a monthly table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyScope {
    #[default]
    All,
    /// `currency_id == 1`
    Domestic,
    /// any other currency
    Export,
}

impl CurrencyScope {
    pub fn includes(&self, currency_id: i64) -> bool {
        match self {
            CurrencyScope::All => true,
            CurrencyScope::Domestic => currency_id == 1,
            CurrencyScope::Export => currency_id != 1,
        }
    }
}

/// Records of one lifecycle stage filtered by a category key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilteredOrdersResponse {
    /// `None` when the request mixed several stages
    pub kind: Option<OrderKind>,
    pub category: String,
    pub count: usize,
    /// Sum of each record's own stage value
    pub total: f64,
    /// `total` formatted for display (e.g. "₹12,34,567.00")
    pub total_display: String,
    pub records: Vec<OrderRecord>,
}

/// Body of `POST /api/d100/classify`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub category: String,
    /// Stage applied to every record; inferred per record when absent
    #[serde(default)]
    pub kind: Option<OrderKind>,
    #[serde(default)]
    pub records: Vec<serde_json::Value>,
}

/// One row of the category summary table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummaryRow {
    /// Category key, `None` for the grand total row
    pub category: Option<String>,
    /// 0 = grand total, 1 = category
    pub level: u32,
    pub tentative_count: usize,
    pub tentative_total: f64,
    pub quoted_count: usize,
    /// QuotedValue of quoted records only
    pub quoted_only_total: f64,
    /// The "Quoted Orders" column: quoted + tentative + confirmed
    pub quoted_total: f64,
    pub confirmed_count: usize,
    pub confirmed_total: f64,
}

/// Response for the sales summary dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummaryResponse {
    /// Period in format "YYYY-MM-DD..YYYY-MM-DD"
    pub period: String,
    /// Grand total row first, then one row per category key
    pub rows: Vec<CategorySummaryRow>,
}

/// Row of the month-by-category table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRow {
    pub month_no: u32,
    /// English month name, e.g. "April"
    pub month_name: String,
    /// Values by design category
    pub values: HashMap<String, f64>,
    pub total: f64,
}

/// Month-by-category summary built from chart points
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthCategoryTable {
    pub scope: CurrencyScope,
    /// Design categories in first-appearance order
    pub categories: Vec<String>,
    /// Rows sorted by month number
    pub rows: Vec<MonthRow>,
    pub column_totals: HashMap<String, f64>,
    pub grand_total: f64,
}
