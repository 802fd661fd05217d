//! CDP protocol types and message definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// CDP request message.
#[derive(Debug, Serialize)]
pub struct CdpRequest {
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// CDP response or event message.
#[derive(Debug, Deserialize)]
pub struct CdpResponse {
    pub id: Option<u64>,
    pub result: Option<Value>,
    pub error: Option<CdpErrorResponse>,
    pub method: Option<String>,
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// CDP error in response.
#[derive(Debug, Deserialize)]
pub struct CdpErrorResponse {
    pub code: i64,
    pub message: String,
}

/// Browser version info.
///
/// Note: Chrome returns PascalCase field names for this endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserVersion {
    #[serde(rename = "Browser")]
    pub browser: String,
    #[serde(rename = "Protocol-Version", default)]
    pub protocol_version: String,
    #[serde(rename = "webSocketDebuggerUrl")]
    pub web_socket_debugger_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let request = CdpRequest {
            id: 7,
            method: "Runtime.evaluate".to_string(),
            params: Some(json!({"expression": "1+1"})),
            session_id: Some("S1".to_string()),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["sessionId"], "S1");
        assert_eq!(json["params"]["expression"], "1+1");
    }

    #[test]
    fn test_request_without_session() {
        let request = CdpRequest {
            id: 1,
            method: "Target.createTarget".to_string(),
            params: None,
            session_id: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("sessionId").is_none());
        assert!(json.get("params").is_none());
    }

    #[test]
    fn test_response_error() {
        let resp: CdpResponse = serde_json::from_value(json!({
            "id": 3,
            "error": {"code": -32000, "message": "No node found"}
        }))
        .unwrap();
        assert_eq!(resp.id, Some(3));
        assert_eq!(resp.error.unwrap().code, -32000);
    }

    #[test]
    fn test_event_message() {
        let resp: CdpResponse = serde_json::from_value(json!({
            "method": "Page.loadEventFired",
            "params": {"timestamp": 1.0},
            "sessionId": "S1"
        }))
        .unwrap();
        assert!(resp.id.is_none());
        assert_eq!(resp.method.as_deref(), Some("Page.loadEventFired"));
    }

    #[test]
    fn test_browser_version() {
        let version: BrowserVersion = serde_json::from_value(json!({
            "Browser": "Chrome/126.0.0.0",
            "Protocol-Version": "1.3",
            "User-Agent": "Mozilla/5.0",
            "webSocketDebuggerUrl": "ws://localhost:9222/devtools/browser/abc"
        }))
        .unwrap();
        assert_eq!(version.browser, "Chrome/126.0.0.0");
        assert!(version.web_socket_debugger_url.starts_with("ws://"));
    }
}
