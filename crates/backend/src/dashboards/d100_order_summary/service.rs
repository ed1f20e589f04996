use anyhow::Result;
use contracts::dashboards::d100_order_summary::{
    CategoryKey, ClassifyRequest, CurrencyScope, FilteredOrdersResponse, MonthCategoryTable,
    OrderKind, OrderRecord, OrderSummaryResponse,
};

use super::aggregator::{category_summary, group_by_month_and_category, sum_by_kind};
use super::classifier::classify_owned;
use crate::shared::format::format_amount;
use crate::shared::upstream::{OrderQuery, OrderSource};

/// Orders of one stage that fall into a category
pub async fn get_filtered_orders(
    source: &dyn OrderSource,
    kind: OrderKind,
    key: &CategoryKey,
    query: &OrderQuery,
) -> Result<FilteredOrdersResponse> {
    let records = source.fetch_orders(kind, query).await?;
    let response = build_filtered_response(Some(kind), key, &records);

    tracing::info!(
        "{} / {}: {} of {} records, {}",
        kind.code(),
        key,
        response.count,
        records.len(),
        response.total_display
    );
    Ok(response)
}

/// Sales summary: tentative, quoted and confirmed orders are fetched in
/// parallel, then classified per category
pub async fn get_order_summary(
    source: &dyn OrderSource,
    query: &OrderQuery,
) -> Result<OrderSummaryResponse> {
    let (tentative, quoted, confirmed) = tokio::try_join!(
        source.fetch_orders(OrderKind::Tentative, query),
        source.fetch_orders(OrderKind::Quoted, query),
        source.fetch_orders(OrderKind::Confirmed, query),
    )?;

    tracing::info!(
        "Order summary {}: {} tentative, {} quoted, {} confirmed",
        query.period(),
        tentative.len(),
        quoted.len(),
        confirmed.len()
    );

    Ok(OrderSummaryResponse {
        period: query.period(),
        rows: category_summary(&tentative, &quoted, &confirmed),
    })
}

/// Month-by-category table for the chart section
pub async fn get_monthly_table(
    source: &dyn OrderSource,
    query: &OrderQuery,
    scope: CurrencyScope,
) -> Result<MonthCategoryTable> {
    let points = source.fetch_monthly_chart(query).await?;
    Ok(group_by_month_and_category(&points, scope))
}

/// Classify records supplied by the caller; no upstream call
pub fn classify_payload(request: &ClassifyRequest) -> FilteredOrdersResponse {
    let key = CategoryKey::parse(&request.category);

    let records: Vec<OrderRecord> = request
        .records
        .iter()
        .filter_map(|value| match request.kind {
            Some(kind) => OrderRecord::ingest(kind, value),
            None => OrderRecord::ingest_detected(value),
        })
        .collect();

    if records.len() < request.records.len() {
        tracing::warn!(
            "classify: {} of {} rows could not be read as orders",
            request.records.len() - records.len(),
            request.records.len()
        );
    }

    build_filtered_response(request.kind, &key, &records)
}

fn build_filtered_response(
    kind: Option<OrderKind>,
    key: &CategoryKey,
    records: &[OrderRecord],
) -> FilteredOrdersResponse {
    let matched = classify_owned(records, key);
    let total = sum_by_kind(&matched);

    FilteredOrdersResponse {
        kind,
        category: key.raw().to_string(),
        count: matched.len(),
        total,
        total_display: format_amount(total, display_currency(key)),
        records: matched,
    }
}

/// Export keys are reported in USD, everything else in INR
fn display_currency(key: &CategoryKey) -> i64 {
    if key.type_filter() == Some("Export") {
        2
    } else {
        1
    }
}
