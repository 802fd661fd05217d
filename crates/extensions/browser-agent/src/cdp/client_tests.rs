use super::*;
use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

#[test]
fn test_dispatch_resolves_pending_request() {
    let pending: PendingMap = Mutex::new(HashMap::new());
    let (tx, mut rx) = oneshot::channel();
    pending.lock().insert(4, tx);

    let resp: CdpResponse =
        serde_json::from_value(json!({"id": 4, "result": {"value": 1}})).unwrap();
    CdpClient::dispatch(resp, &pending);

    let result = rx.try_recv().unwrap().unwrap();
    assert_eq!(result["value"], 1);
    assert!(pending.lock().is_empty());
}

#[test]
fn test_dispatch_maps_protocol_error() {
    let pending: PendingMap = Mutex::new(HashMap::new());
    let (tx, mut rx) = oneshot::channel();
    pending.lock().insert(9, tx);

    let resp: CdpResponse = serde_json::from_value(json!({
        "id": 9,
        "error": {"code": -32601, "message": "'Foo.bar' wasn't found"}
    }))
    .unwrap();
    CdpClient::dispatch(resp, &pending);

    match rx.try_recv().unwrap() {
        Err(CdpError::Protocol { code, .. }) => assert_eq!(code, -32601),
        other => panic!("Expected protocol error, got {other:?}"),
    }
}

#[test]
fn test_dispatch_ignores_events_and_unknown_ids() {
    let pending: PendingMap = Mutex::new(HashMap::new());
    let (tx, _rx) = oneshot::channel();
    pending.lock().insert(1, tx);

    let event: CdpResponse =
        serde_json::from_value(json!({"method": "Page.loadEventFired", "params": {}})).unwrap();
    CdpClient::dispatch(event, &pending);
    let stray: CdpResponse = serde_json::from_value(json!({"id": 2, "result": {}})).unwrap();
    CdpClient::dispatch(stray, &pending);

    assert_eq!(pending.lock().len(), 1);
}

#[tokio::test]
async fn test_connect_without_chrome() {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::method("GET"))
        .and(matchers::path("/json/version"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let result = CdpClient::connect(&mock_server.uri()).await;
    assert!(matches!(result, Err(CdpError::ChromeNotAvailable(_))));
}

#[tokio::test]
async fn test_connect_invalid_version_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::method("GET"))
        .and(matchers::path("/json/version"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let result = CdpClient::connect(&mock_server.uri()).await;
    assert!(matches!(result, Err(CdpError::ChromeNotAvailable(_))));
}
