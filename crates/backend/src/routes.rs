use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, system};

/// Application route table
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // D100 ORDER SUMMARY DASHBOARD
        // ========================================
        .route(
            "/api/d100/categories",
            get(handlers::d100_order_summary::list_categories),
        )
        .route(
            "/api/d100/orders",
            get(handlers::d100_order_summary::list_orders),
        )
        .route(
            "/api/d100/summary",
            get(handlers::d100_order_summary::get_summary),
        )
        .route(
            "/api/d100/monthly",
            get(handlers::d100_order_summary::get_monthly),
        )
        .route(
            "/api/d100/classify",
            post(handlers::d100_order_summary::classify),
        )
        // ========================================
        // SYSTEM
        // ========================================
        .route(
            "/api/system/menu/tree",
            post(system::handlers::menu::build_tree),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = configure_routes().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = configure_routes().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_menu_tree_endpoint() {
        let rows = json!([
            {"mainmenu": "Sales", "submenu": "Enquiry", "pagename": "Enquiry List", "route": "/sales/enquiry", "pageid": "7"},
            {"mainmenu": "Sales", "submenu": "Enquiry", "pagename": "New Enquiry", "route": "/sales/enquiry/new"},
            {"mainmenu": "Reports", "submenu": "Reports", "pagename": "Billing Report", "route": "/reports/billing"}
        ]);

        let (status, tree) = post_json("/api/system/menu/tree", rows).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(tree.as_array().unwrap().len(), 2);
        assert_eq!(tree[0]["title"], json!("Sales"));
        assert_eq!(tree[0]["subNav"][0]["title"], json!("Enquiry"));
        assert_eq!(tree[0]["subNav"][0]["subNav"][0]["pageId"], json!(7));
        assert_eq!(tree[1]["title"], json!("Reports"));
    }

    #[tokio::test]
    async fn test_classify_endpoint() {
        let body = json!({
            "category": "Export Layout",
            "records": [
                {"TotalValue": 500, "designcategory": "Layout", "type": "Export", "client": "ACME"},
                {"TotalValue": 300, "designcategory": "Layout", "type": "Domestic"},
                {"type": "", "playout": 500, "panalysis": 0}
            ]
        });

        let (status, response) = post_json("/api/d100/classify", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(response["count"], json!(1));
        assert_eq!(response["total_display"], json!("$500.00"));
        assert_eq!(response["records"][0]["kind"], json!("confirmed"));
        assert_eq!(response["records"][0]["client"], json!("ACME"));
    }

    #[tokio::test]
    async fn test_classify_rejects_malformed_body() {
        let (status, _) = post_json("/api/d100/classify", json!({"records": []})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
