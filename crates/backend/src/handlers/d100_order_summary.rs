use axum::{extract::Query, http::StatusCode, Json};
use chrono::{Datelike, NaiveDate, Utc};
use contracts::dashboards::d100_order_summary::{
    CategoryKey, ClassifyRequest, CurrencyScope, FilteredOrdersResponse, MonthCategoryTable,
    OrderKind, OrderSummaryResponse, CATEGORY_KEYS,
};
use contracts::system::session::SessionContext;
use serde::Deserialize;

use crate::dashboards::d100_order_summary::service;
use crate::shared::upstream::{self, OrderQuery, UpstreamError};

/// Period and session shared by the dashboard endpoints
#[derive(Debug, Deserialize)]
pub struct PeriodParams {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub designation_id: String,
}

#[derive(Debug, Deserialize)]
pub struct OrdersParams {
    pub kind: String,
    pub category: String,
    #[serde(flatten)]
    pub period: PeriodParams,
}

#[derive(Debug, Deserialize)]
pub struct MonthlyParams {
    #[serde(default)]
    pub currency: CurrencyScope,
    #[serde(flatten)]
    pub period: PeriodParams,
}

impl PeriodParams {
    /// Defaults to the current month up to today
    fn to_query(&self) -> Result<OrderQuery, StatusCode> {
        let today = Utc::now().date_naive();
        let date_to = self.date_to.unwrap_or(today);
        let date_from = match self.date_from {
            Some(date) => date,
            None => date_to.with_day(1).unwrap_or(date_to),
        };

        if date_from > date_to {
            tracing::warn!("Rejected period {} > {}", date_from, date_to);
            return Err(StatusCode::BAD_REQUEST);
        }

        Ok(OrderQuery::new(
            date_from,
            date_to,
            SessionContext::new(self.user_id.clone(), self.designation_id.clone()),
        ))
    }
}

fn error_status(e: &anyhow::Error) -> StatusCode {
    if e.downcast_ref::<UpstreamError>().is_some() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// GET /api/d100/categories
pub async fn list_categories() -> Json<Vec<String>> {
    Json(CATEGORY_KEYS.iter().map(|k| k.to_string()).collect())
}

/// GET /api/d100/orders
pub async fn list_orders(
    Query(params): Query<OrdersParams>,
) -> Result<Json<FilteredOrdersResponse>, StatusCode> {
    let kind = OrderKind::from_code(&params.kind).ok_or_else(|| {
        tracing::warn!("Unknown order kind: {}", params.kind);
        StatusCode::BAD_REQUEST
    })?;
    let key = CategoryKey::parse(&params.category);
    if !key.is_known() {
        tracing::warn!("Unknown category key: {}", params.category);
        return Err(StatusCode::BAD_REQUEST);
    }
    let query = params.period.to_query()?;
    let source = upstream::get_source().map_err(|e| {
        tracing::error!("{}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    match service::get_filtered_orders(source.as_ref(), kind, &key, &query).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Failed to load {} orders: {}", kind.code(), e);
            Err(error_status(&e))
        }
    }
}

/// GET /api/d100/summary
pub async fn get_summary(
    Query(params): Query<PeriodParams>,
) -> Result<Json<OrderSummaryResponse>, StatusCode> {
    let query = params.to_query()?;
    let source = upstream::get_source().map_err(|e| {
        tracing::error!("{}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    match service::get_order_summary(source.as_ref(), &query).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Failed to build order summary: {}", e);
            Err(error_status(&e))
        }
    }
}

/// GET /api/d100/monthly
pub async fn get_monthly(
    Query(params): Query<MonthlyParams>,
) -> Result<Json<MonthCategoryTable>, StatusCode> {
    let query = params.period.to_query()?;
    let source = upstream::get_source().map_err(|e| {
        tracing::error!("{}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    match service::get_monthly_table(source.as_ref(), &query, params.currency).await {
        Ok(table) => Ok(Json(table)),
        Err(e) => {
            tracing::error!("Failed to build monthly table: {}", e);
            Err(error_status(&e))
        }
    }
}

/// POST /api/d100/classify
pub async fn classify(Json(request): Json<ClassifyRequest>) -> Json<FilteredOrdersResponse> {
    Json(service::classify_payload(&request))
}
