use chrono::Month;
use contracts::dashboards::d100_order_summary::{
    CategoryKey, CategorySummaryRow, ChartPoint, CurrencyScope, MonthCategoryTable, MonthRow,
    OrderFields, OrderKind, OrderRecord,
};
use std::collections::HashMap;

use super::classifier::classify;

/// Amount field summed for a lifecycle stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueField {
    /// `TotalValue` (open and confirmed orders)
    Total,
    /// `TentativeValue`
    Tentative,
    /// `QuotedValue`
    Quoted,
}

impl ValueField {
    pub fn for_kind(kind: OrderKind) -> Self {
        match kind {
            OrderKind::Open | OrderKind::Confirmed => ValueField::Total,
            OrderKind::Tentative => ValueField::Tentative,
            OrderKind::Quoted => ValueField::Quoted,
        }
    }

    /// Field value, 0 when missing or not finite
    pub fn read(&self, fields: &OrderFields) -> f64 {
        let value = match self {
            ValueField::Total => fields.total_value,
            ValueField::Tentative => fields.tentative_value,
            ValueField::Quoted => fields.quoted_value,
        };
        value.filter(|v| v.is_finite()).unwrap_or(0.0)
    }
}

/// Sum of one amount field over the records
pub fn sum_values<'a, I>(records: I, field: ValueField) -> f64
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    records
        .into_iter()
        .map(|record| field.read(&record.fields))
        .sum()
}

/// Sum where every record contributes its own stage's amount
pub fn sum_by_kind<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    records
        .into_iter()
        .map(|record| ValueField::for_kind(record.kind).read(&record.fields))
        .sum()
}

/// The dashboard's "Quoted Orders" figure for a category.
///
/// Business rule: quoted, tentative and confirmed amounts are layered into
/// one column, so this is QuotedValue of quoted orders plus TentativeValue
/// of tentative orders plus TotalValue of confirmed orders.
pub fn quoted_total(
    quoted: &[OrderRecord],
    tentative: &[OrderRecord],
    confirmed: &[OrderRecord],
    key: &CategoryKey,
) -> f64 {
    sum_values(classify(quoted, key), ValueField::Quoted)
        + sum_values(classify(tentative, key), ValueField::Tentative)
        + sum_values(classify(confirmed, key), ValueField::Total)
}

/// Summary table: grand total row, then one row per dashboard category.
///
/// A record may fall into more than one category (a layout enquiry with an
/// analysis flag counts in both), so the grand total sums every fetched
/// record once instead of adding the category rows.
pub fn category_summary(
    tentative: &[OrderRecord],
    quoted: &[OrderRecord],
    confirmed: &[OrderRecord],
) -> Vec<CategorySummaryRow> {
    let mut rows = Vec::new();

    let tentative_total = sum_values(tentative, ValueField::Tentative);
    let quoted_only_total = sum_values(quoted, ValueField::Quoted);
    let confirmed_total = sum_values(confirmed, ValueField::Total);
    rows.push(CategorySummaryRow {
        category: None,
        level: 0,
        tentative_count: tentative.len(),
        tentative_total,
        quoted_count: quoted.len(),
        quoted_only_total,
        quoted_total: quoted_only_total + tentative_total + confirmed_total,
        confirmed_count: confirmed.len(),
        confirmed_total,
    });

    for key in CategoryKey::all() {
        let tentative_hits = classify(tentative, &key);
        let quoted_hits = classify(quoted, &key);
        let confirmed_hits = classify(confirmed, &key);

        let tentative_total = sum_values(tentative_hits.iter().copied(), ValueField::Tentative);
        let quoted_only_total = sum_values(quoted_hits.iter().copied(), ValueField::Quoted);
        let confirmed_total = sum_values(confirmed_hits.iter().copied(), ValueField::Total);

        rows.push(CategorySummaryRow {
            category: Some(key.raw().to_string()),
            level: 1,
            tentative_count: tentative_hits.len(),
            tentative_total,
            quoted_count: quoted_hits.len(),
            quoted_only_total,
            quoted_total: quoted_only_total + tentative_total + confirmed_total,
            confirmed_count: confirmed_hits.len(),
            confirmed_total,
        });
    }

    rows
}

/// Month-by-category table from chart points
pub fn group_by_month_and_category(points: &[ChartPoint], scope: CurrencyScope) -> MonthCategoryTable {
    let mut categories: Vec<String> = Vec::new();
    let mut months: Vec<u32> = Vec::new();
    let mut cells: HashMap<(u32, String), f64> = HashMap::new();

    for point in points.iter().filter(|p| scope.includes(p.currency_id)) {
        let category = point.design_category.trim().to_string();
        if !categories.contains(&category) {
            categories.push(category.clone());
        }
        if !months.contains(&point.month_no) {
            months.push(point.month_no);
        }
        let value = if point.total_value.is_finite() {
            point.total_value
        } else {
            0.0
        };
        *cells.entry((point.month_no, category)).or_insert(0.0) += value;
    }

    months.sort_unstable();

    let mut column_totals: HashMap<String, f64> = HashMap::new();
    let mut rows = Vec::with_capacity(months.len());

    for month_no in months {
        let mut values = HashMap::new();
        let mut total = 0.0;
        for category in &categories {
            let value = *cells.get(&(month_no, category.clone())).unwrap_or(&0.0);
            values.insert(category.clone(), value);
            *column_totals.entry(category.clone()).or_insert(0.0) += value;
            total += value;
        }
        rows.push(MonthRow {
            month_no,
            month_name: month_name(month_no),
            values,
            total,
        });
    }

    let grand_total: f64 = rows.iter().map(|row| row.total).sum();

    MonthCategoryTable {
        scope,
        categories,
        rows,
        column_totals,
        grand_total,
    }
}

fn month_name(month_no: u32) -> String {
    u8::try_from(month_no)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name().to_string())
        .unwrap_or_else(|| format!("Month {}", month_no))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn record(kind: OrderKind, value: Value) -> OrderRecord {
        OrderRecord::ingest(kind, &value).unwrap()
    }

    fn point(month_no: u32, category: &str, total_value: f64, currency_id: i64) -> ChartPoint {
        ChartPoint {
            month_no,
            design_category: category.to_string(),
            total_value,
            currency_id,
        }
    }

    #[test]
    fn test_sum_empty_is_zero() {
        let empty: Vec<OrderRecord> = Vec::new();
        assert_eq!(sum_values(&empty, ValueField::Total), 0.0);
        assert_eq!(sum_by_kind(&empty), 0.0);
    }

    #[test]
    fn test_sum_ignores_missing_and_order() {
        let records = vec![
            record(OrderKind::Open, json!({"TotalValue": 100})),
            record(OrderKind::Open, json!({"TotalValue": "oops"})),
            record(OrderKind::Open, json!({})),
            record(OrderKind::Open, json!({"TotalValue": "250"})),
        ];
        let mut reversed = records.clone();
        reversed.reverse();

        assert_eq!(sum_values(&records, ValueField::Total), 350.0);
        assert_eq!(sum_values(&reversed, ValueField::Total), 350.0);
    }

    #[test]
    fn test_sum_by_kind_uses_stage_field() {
        let records = vec![
            record(OrderKind::Tentative, json!({"TentativeValue": 10, "QuotedValue": 99})),
            record(OrderKind::Quoted, json!({"TentativeValue": 99, "QuotedValue": 20})),
            record(OrderKind::Confirmed, json!({"TotalValue": 30})),
        ];
        assert_eq!(sum_by_kind(&records), 60.0);
    }

    #[test]
    fn test_quoted_total_layers_three_stages() {
        let key = CategoryKey::parse("Analysis");
        let quoted = vec![
            record(OrderKind::Quoted, json!({"si": "YES", "QuotedValue": 100})),
            record(OrderKind::Quoted, json!({"hardware": "YES", "QuotedValue": 1000})),
        ];
        let tentative = vec![record(
            OrderKind::Tentative,
            json!({"layout": "Thermal analysis", "TentativeValue": 40}),
        )];
        let confirmed = vec![
            record(OrderKind::Confirmed, json!({"TotalValue": 7, "designcategory": "Analysis"})),
            record(OrderKind::Confirmed, json!({"TotalValue": 500, "designcategory": "Layout"})),
        ];

        let expected = sum_values(classify(&quoted, &key), ValueField::Quoted)
            + sum_values(classify(&tentative, &key), ValueField::Tentative)
            + sum_values(classify(&confirmed, &key), ValueField::Total);

        assert_eq!(quoted_total(&quoted, &tentative, &confirmed, &key), 147.0);
        assert_eq!(quoted_total(&quoted, &tentative, &confirmed, &key), expected);
        assert_eq!(quoted_total(&[], &[], &[], &key), 0.0);
    }

    #[test]
    fn test_category_summary_rows() {
        let tentative = vec![record(
            OrderKind::Tentative,
            json!({
                "type": "Export", "design": "YES", "currency_id": 2,
                "enquirytype": "OFFSHORE", "layout": "pcb layout", "TentativeValue": 1000
            }),
        )];
        let quoted = vec![record(
            OrderKind::Quoted,
            json!({"enquirytype": "ONSITE", "QuotedValue": 300}),
        )];
        let confirmed = vec![record(
            OrderKind::Confirmed,
            json!({"TotalValue": 500, "designcategory": "VA", "type": "Domestic"}),
        )];

        let rows = category_summary(&tentative, &quoted, &confirmed);
        assert_eq!(rows.len(), 7);

        let total = &rows[0];
        assert_eq!(total.category, None);
        assert_eq!(total.level, 0);
        assert_eq!(total.quoted_total, 1800.0);

        let by_key = |k: &str| rows.iter().find(|r| r.category.as_deref() == Some(k)).unwrap();

        let export_layout = by_key("Export Layout");
        assert_eq!(export_layout.tentative_count, 1);
        assert_eq!(export_layout.tentative_total, 1000.0);
        assert_eq!(export_layout.quoted_total, 1000.0);

        let onsite = by_key("ONSITE");
        assert_eq!(onsite.quoted_count, 1);
        assert_eq!(onsite.quoted_only_total, 300.0);

        let va = by_key("VA");
        assert_eq!(va.confirmed_total, 500.0);
        assert_eq!(va.quoted_total, 500.0);

        assert_eq!(by_key("Domestic Layout").quoted_total, 0.0);
    }

    #[test]
    fn test_group_by_month_and_category() {
        let points = vec![
            point(5, "Layout", 100.0, 1),
            point(4, "Analysis", 50.0, 2),
            point(4, "Layout", 25.0, 1),
            point(5, "Layout", 10.0, 2),
            point(4, " Analysis ", 5.0, 1),
        ];

        let table = group_by_month_and_category(&points, CurrencyScope::All);
        assert_eq!(table.categories, vec!["Layout".to_string(), "Analysis".to_string()]);
        assert_eq!(table.rows.len(), 2);

        assert_eq!(table.rows[0].month_no, 4);
        assert_eq!(table.rows[0].month_name, "April");
        assert_eq!(table.rows[0].values["Layout"], 25.0);
        assert_eq!(table.rows[0].values["Analysis"], 55.0);
        assert_eq!(table.rows[0].total, 80.0);

        assert_eq!(table.rows[1].values["Analysis"], 0.0);
        assert_eq!(table.rows[1].total, 110.0);

        assert_eq!(table.column_totals["Layout"], 135.0);
        assert_eq!(table.grand_total, 190.0);
    }

    #[test]
    fn test_group_by_month_currency_scope() {
        let points = vec![point(1, "Layout", 100.0, 1), point(1, "Layout", 40.0, 2)];

        let domestic = group_by_month_and_category(&points, CurrencyScope::Domestic);
        assert_eq!(domestic.grand_total, 100.0);

        let export = group_by_month_and_category(&points, CurrencyScope::Export);
        assert_eq!(export.grand_total, 40.0);
        assert_eq!(export.scope, CurrencyScope::Export);
    }

    #[test]
    fn test_group_by_month_empty() {
        let table = group_by_month_and_category(&[], CurrencyScope::All);
        assert!(table.rows.is_empty());
        assert!(table.categories.is_empty());
        assert_eq!(table.grand_total, 0.0);
    }

    #[test]
    fn test_month_name_out_of_range() {
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "Month 0");
        assert_eq!(month_name(13), "Month 13");
    }
}
