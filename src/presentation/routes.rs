// Router assembly
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{dashboard_page, figure_json, health_check};
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/figure.json", get(figure_json))
        .route("/healthz", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_composer::DashboardComposer;
    use crate::application::dashboard_service::DashboardService;
    use crate::domain::sales::SalesSeries;
    use crate::infrastructure::page::PageShell;
    use crate::infrastructure::static_sales::StaticSalesRepository;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app(series: SalesSeries) -> Router {
        let repository = Arc::new(StaticSalesRepository::new(series));
        let state = Arc::new(AppState {
            dashboard_service: DashboardService::new(repository, DashboardComposer::default()),
            page: PageShell {
                title: "Actual VS Target".to_string(),
                background: "#1e1e1e".to_string(),
                plotly_js: "https://cdn.plot.ly/plotly-2.35.2.min.js".to_string(),
            },
        });
        router(state)
    }

    fn four_months() -> SalesSeries {
        SalesSeries::new(
            ["September", "October", "November", "December"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            vec![5000.0, 7000.0, 10000.0, 12000.0],
            vec![4800.0, 7500.0, 9500.0, 13000.0],
        )
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app(four_months()).oneshot(get("/healthz")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_figure_json() {
        let response = app(four_months()).oneshot(get("/figure.json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::CONTENT_ENCODING).is_none());

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let figure: Value = serde_json::from_slice(&body).unwrap();
        let data = figure["data"].as_array().unwrap();
        assert_eq!(data.len(), 6);
        assert_eq!(data.iter().filter(|t| t["type"] == "indicator").count(), 4);
        assert_eq!(data.iter().filter(|t| t["type"] == "bar").count(), 2);
        assert_eq!(data[0]["gauge"]["axis"]["range"][1], 14000.0);
        assert_eq!(figure["layout"]["height"], 800);
    }

    #[tokio::test]
    async fn test_figure_json_brotli() {
        let request = Request::builder()
            .uri("/figure.json")
            .header(header::ACCEPT_ENCODING, "gzip, br")
            .body(Body::empty())
            .unwrap();
        let response = app(four_months()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_ENCODING], "br");
    }

    #[tokio::test]
    async fn test_dashboard_page() {
        let response = app(four_months()).oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Actual VS Target"));
        assert!(html.contains(r#"id="sales-dashboard""#));
        assert!(html.contains("September"));
    }

    #[tokio::test]
    async fn test_invalid_series_is_server_error() {
        let broken = SalesSeries::new(vec!["Jan".to_string(), "Feb".to_string()], vec![100.0], vec![90.0, 95.0]);
        let response = app(broken.clone()).oneshot(get("/figure.json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let response = app(broken).oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
