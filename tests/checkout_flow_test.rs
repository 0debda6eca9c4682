use httpmock::prelude::*;
use rust_decimal::Decimal;
use tour_storefront::core::catalog::CatalogSource;
use tour_storefront::domain::model::CustomerFields;
use tour_storefront::{
    HttpOrderTransport, Intent, Outcome, Storefront, StorefrontConfig, StorefrontError,
    TerminalView,
};

const EXEC_PATH: &str = "/macros/s/test-deployment/exec";

fn config_for(endpoint: &str) -> StorefrontConfig {
    let toml_content = format!(
        r#"
[api]
endpoint = "{}"
catalog_timeout_ms = 2000

[checkout]
simulated_delay_ms = 5
"#,
        endpoint
    );
    StorefrontConfig::from_toml_str(&toml_content).unwrap()
}

fn customer() -> CustomerFields {
    CustomerFields {
        name: "Ana Torres".to_string(),
        email: "ana@example.com".to_string(),
        phone: "+51 999 111 222".to_string(),
        date: "2026-11-02".to_string(),
    }
}

fn mock_catalog(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path(EXEC_PATH).query_param("op", "services");
        then.status(200).json_body(serde_json::json!({
            "data": [
                {"title": "Tour A", "description": "Boat ride", "price": 50, "images": ["a.jpg"]},
                {"title": "Tour B", "description": "Desert", "price": 45, "images": []}
            ]
        }));
    })
}

#[tokio::test]
async fn test_end_to_end_order_clears_cart() {
    let server = MockServer::start();
    let catalog_mock = mock_catalog(&server);
    let order_mock = server.mock(|when, then| {
        when.method(POST)
            .path(EXEC_PATH)
            .header("content-type", "text/plain")
            .body_contains("\"op\":\"order\"")
            .body_contains("\"title\":\"Tour A\"")
            .body_contains("\"qty\":2")
            .body_contains("\"email\":\"ana@example.com\"");
        then.status(200).body("<html>ok</html>");
    });

    let config = config_for(&server.url(EXEC_PATH));
    let view = TerminalView::new(Vec::new(), "S/");
    let mut store = Storefront::start(&config, HttpOrderTransport::new(), view).await;

    catalog_mock.assert();
    assert_eq!(store.catalog().source, CatalogSource::Remote);

    store.dispatch(Intent::AddToCart(0)).await;
    store.dispatch(Intent::AddToCart(0)).await;
    let snapshot = store.snapshot();
    assert_eq!(snapshot.item_count, 2);
    assert_eq!(snapshot.total, Decimal::from(100));

    assert!(matches!(
        store.dispatch(Intent::StartCheckout).await,
        Outcome::Rendered
    ));

    let outcome = store.dispatch(Intent::SubmitOrder(customer())).await;
    let confirmation = match outcome {
        Outcome::Confirmed(confirmation) => confirmation,
        other => panic!("unexpected outcome: {:?}", other),
    };

    order_mock.assert();
    assert!(!confirmation.simulated);
    assert_eq!(confirmation.order.total, Decimal::from(100));
    assert!(store.snapshot().is_empty());
    assert!(store.pending_fields().is_none());
}

#[tokio::test]
async fn test_gateway_error_status_still_counts_as_dispatched() {
    let server = MockServer::start();
    mock_catalog(&server);
    let order_mock = server.mock(|when, then| {
        when.method(POST).path(EXEC_PATH);
        // 閘道回應不透明，只看傳輸是否成功
        then.status(500).body("Script error");
    });

    let config = config_for(&server.url(EXEC_PATH));
    let view = TerminalView::new(Vec::new(), "S/");
    let mut store = Storefront::start(&config, HttpOrderTransport::new(), view).await;

    store.dispatch(Intent::AddToCart(1)).await;
    let outcome = store.dispatch(Intent::SubmitOrder(customer())).await;

    order_mock.assert();
    assert!(matches!(outcome, Outcome::Confirmed(_)));
    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn test_empty_cart_submit_makes_no_request() {
    let server = MockServer::start();
    mock_catalog(&server);
    let order_mock = server.mock(|when, then| {
        when.method(POST).path(EXEC_PATH);
        then.status(200);
    });

    let config = config_for(&server.url(EXEC_PATH));
    let view = TerminalView::new(Vec::new(), "S/");
    let mut store = Storefront::start(&config, HttpOrderTransport::new(), view).await;

    let outcome = store.dispatch(Intent::SubmitOrder(customer())).await;

    assert!(matches!(outcome, Outcome::Rejected(StorefrontError::EmptyCart)));
    order_mock.assert_hits(0);
}

#[tokio::test]
async fn test_misconfigured_endpoint_makes_no_request() {
    let server = MockServer::start();
    let catalog_mock = server.mock(|when, then| {
        when.method(GET).path("/api/orders");
        then.status(200).json_body(serde_json::json!({
            "data": [{"title": "Tour A", "price": 50}]
        }));
    });
    let order_mock = server.mock(|when, then| {
        when.method(POST).path("/api/orders");
        then.status(200);
    });

    let config = config_for(&server.url("/api/orders"));
    let view = TerminalView::new(Vec::new(), "S/");
    let mut store = Storefront::start(&config, HttpOrderTransport::new(), view).await;
    catalog_mock.assert();

    store.dispatch(Intent::AddToCart(0)).await;
    let outcome = store.dispatch(Intent::SubmitOrder(customer())).await;

    assert!(matches!(
        outcome,
        Outcome::Rejected(StorefrontError::MisconfiguredEndpoint { .. })
    ));
    order_mock.assert_hits(0);
    assert_eq!(store.snapshot().item_count, 1);
}

#[tokio::test]
async fn test_transport_error_preserves_cart_and_fields() {
    // nothing listens on port 1: catalog falls back, order dispatch fails
    let config = config_for("http://127.0.0.1:1/macros/s/offline/exec");
    let view = TerminalView::new(Vec::new(), "S/");
    let mut store = Storefront::start(&config, HttpOrderTransport::new(), view).await;
    assert_eq!(store.catalog().source, CatalogSource::Fallback);

    store.dispatch(Intent::AddToCart(1)).await;
    store.dispatch(Intent::AddToCart(2)).await;
    let before = store.snapshot();

    let outcome = store.dispatch(Intent::SubmitOrder(customer())).await;

    match outcome {
        Outcome::Rejected(StorefrontError::SubmitTransport { reason }) => {
            assert!(!reason.is_empty())
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(store.snapshot(), before);
    assert_eq!(store.pending_fields(), Some(&customer()));
    assert!(!store.submit_lock().is_busy());

    let text = String::from_utf8_lossy(store.view().output()).to_string();
    assert!(text.contains("Error:"));
    assert!(text.contains("Previous details kept: Ana Torres"));
}

#[tokio::test]
async fn test_placeholder_endpoint_runs_offline() {
    let config = StorefrontConfig::from_toml_str("[checkout]\nsimulated_delay_ms = 5\n").unwrap();
    assert!(config.is_placeholder_endpoint());

    let view = TerminalView::new(Vec::new(), "S/");
    let mut store = Storefront::start(&config, HttpOrderTransport::new(), view).await;
    assert_eq!(store.catalog().source, CatalogSource::Fallback);

    store.dispatch(Intent::AddToCart(0)).await;
    let outcome = store.dispatch(Intent::SubmitOrder(customer())).await;

    match outcome {
        Outcome::Confirmed(confirmation) => assert!(confirmation.simulated),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert!(store.snapshot().is_empty());
}
