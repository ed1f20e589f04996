use async_trait::async_trait;
use contracts::dashboards::d100_order_summary::{ChartPoint, OrderKind, OrderRecord};
use serde_json::Value;

use super::{OrderQuery, OrderSource, UpstreamError};
use crate::shared::config::UpstreamConfig;

/// HTTP client for the sales dashboard ERP API
pub struct HttpOrderSource {
    client: reqwest::Client,
    base_url: String,
    open_orders_path: String,
    tentative_orders_path: String,
    quoted_orders_path: String,
    confirmed_orders_path: String,
    monthly_chart_path: String,
}

impl HttpOrderSource {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            open_orders_path: config.open_orders_path.clone(),
            tentative_orders_path: config.tentative_orders_path.clone(),
            quoted_orders_path: config.quoted_orders_path.clone(),
            confirmed_orders_path: config.confirmed_orders_path.clone(),
            monthly_chart_path: config.monthly_chart_path.clone(),
        })
    }

    fn path_for(&self, kind: OrderKind) -> &str {
        match kind {
            OrderKind::Open => &self.open_orders_path,
            OrderKind::Tentative => &self.tentative_orders_path,
            OrderKind::Quoted => &self.quoted_orders_path,
            OrderKind::Confirmed => &self.confirmed_orders_path,
        }
    }

    /// GET a JSON array; anything but an array is a decode error
    async fn fetch_array(&self, path: &str, query: &OrderQuery) -> Result<Vec<Value>, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {} ({})", url, query.period());

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(&query.query_pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Upstream request {} failed with {}: {}", url, status, body);
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        parse_array(&body)
    }
}

/// Top-level JSON array from a response body
pub(crate) fn parse_array(body: &str) -> Result<Vec<Value>, UpstreamError> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(other) => {
            let preview: String = other.to_string().chars().take(200).collect();
            Err(UpstreamError::Decode(format!("expected a JSON array, got: {}", preview)))
        }
        Err(e) => Err(UpstreamError::Decode(e.to_string())),
    }
}

/// Tag array elements with their stage, skipping anything that is not an object
pub(crate) fn ingest_orders(kind: OrderKind, items: &[Value]) -> Vec<OrderRecord> {
    let mut skipped = 0usize;
    let records: Vec<OrderRecord> = items
        .iter()
        .filter_map(|item| {
            let record = OrderRecord::ingest(kind, item);
            if record.is_none() {
                skipped += 1;
            }
            record
        })
        .collect();

    if skipped > 0 {
        tracing::warn!("Skipped {} non-object {} order rows", skipped, kind.code());
    }
    records
}

/// Chart points; elements that do not deserialize are skipped
pub(crate) fn ingest_chart_points(items: Vec<Value>) -> Vec<ChartPoint> {
    let total = items.len();
    let points: Vec<ChartPoint> = items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    if points.len() < total {
        tracing::warn!("Skipped {} malformed chart points", total - points.len());
    }
    points
}

#[async_trait]
impl OrderSource for HttpOrderSource {
    async fn fetch_orders(
        &self,
        kind: OrderKind,
        query: &OrderQuery,
    ) -> Result<Vec<OrderRecord>, UpstreamError> {
        let items = self.fetch_array(self.path_for(kind), query).await?;
        let records = ingest_orders(kind, &items);
        tracing::debug!("Fetched {} {} orders", records.len(), kind.code());
        Ok(records)
    }

    async fn fetch_monthly_chart(
        &self,
        query: &OrderQuery,
    ) -> Result<Vec<ChartPoint>, UpstreamError> {
        let items = self.fetch_array(&self.monthly_chart_path, query).await?;
        let points = ingest_chart_points(items);
        tracing::debug!("Fetched {} chart points", points.len());
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_array_accepts_arrays_only() {
        assert_eq!(parse_array("[]").unwrap().len(), 0);
        assert_eq!(parse_array(r#"[{"a":1},2]"#).unwrap().len(), 2);
        assert!(matches!(parse_array(r#"{"data":[]}"#), Err(UpstreamError::Decode(_))));
        assert!(matches!(parse_array("not json"), Err(UpstreamError::Decode(_))));
    }

    #[test]
    fn test_ingest_orders_skips_non_objects() {
        let items = vec![json!({"TotalValue": 10}), json!(5), json!(null), json!({"playout": 1})];
        let records = ingest_orders(OrderKind::Open, &items);

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.kind == OrderKind::Open));
    }

    #[test]
    fn test_ingest_chart_points() {
        let items = vec![
            json!({"monthNo": 4, "designcategory": "Layout", "totalValue": 100, "currency_id": 1}),
            json!("garbage"),
        ];
        let points = ingest_chart_points(items);

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].month_no, 4);
    }
}
