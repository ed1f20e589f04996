pub mod http_client;

use async_trait::async_trait;
use chrono::NaiveDate;
use contracts::dashboards::d100_order_summary::{ChartPoint, OrderKind, OrderRecord};
use contracts::system::session::SessionContext;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use thiserror::Error;

use crate::shared::config::UpstreamConfig;

pub use http_client::HttpOrderSource;

static ORDER_SOURCE: OnceCell<Arc<dyn OrderSource>> = OnceCell::new();

/// ERP API call errors
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode upstream payload: {0}")]
    Decode(String),

    #[error("Order source is not configured")]
    NotConfigured,
}

/// Parameters shared by every order fetch
#[derive(Debug, Clone)]
pub struct OrderQuery {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub session: SessionContext,
}

impl OrderQuery {
    pub fn new(date_from: NaiveDate, date_to: NaiveDate, session: SessionContext) -> Self {
        Self {
            date_from,
            date_to,
            session,
        }
    }

    /// Period in format "YYYY-MM-DD..YYYY-MM-DD"
    pub fn period(&self) -> String {
        format!(
            "{}..{}",
            self.date_from.format("%Y-%m-%d"),
            self.date_to.format("%Y-%m-%d")
        )
    }

    /// Query string sent to the ERP
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("fromDate", self.date_from.format("%Y-%m-%d").to_string()),
            ("toDate", self.date_to.format("%Y-%m-%d").to_string()),
        ];
        pairs.extend(self.session.query_pairs());
        pairs
    }
}

/// Source of raw order arrays
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// Orders of one lifecycle stage, tagged with that stage
    async fn fetch_orders(
        &self,
        kind: OrderKind,
        query: &OrderQuery,
    ) -> Result<Vec<OrderRecord>, UpstreamError>;

    /// Month-by-category points for the chart and summary table
    async fn fetch_monthly_chart(&self, query: &OrderQuery)
        -> Result<Vec<ChartPoint>, UpstreamError>;
}

/// Build the HTTP source from config and register it globally
pub fn initialize(config: &UpstreamConfig) -> anyhow::Result<()> {
    let source = HttpOrderSource::new(config)?;
    tracing::info!("Order source configured for {}", config.base_url);
    ORDER_SOURCE
        .set(Arc::new(source))
        .map_err(|_| anyhow::anyhow!("order source already initialized"))?;
    Ok(())
}

pub fn get_source() -> Result<Arc<dyn OrderSource>, UpstreamError> {
    ORDER_SOURCE.get().cloned().ok_or(UpstreamError::NotConfigured)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_carry_session() {
        let query = OrderQuery::new(
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            SessionContext::new("42", "7"),
        );

        assert_eq!(query.period(), "2024-04-01..2024-06-30");
        assert_eq!(
            query.query_pairs(),
            vec![
                ("fromDate", "2024-04-01".to_string()),
                ("toDate", "2024-06-30".to_string()),
                ("userId", "42".to_string()),
                ("designationId", "7".to_string()),
            ]
        );
    }
}
