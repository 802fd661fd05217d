use super::*;
use std::sync::Mutex;

use async_trait::async_trait;
use cargotrack_protocols::{AgentError, Coordinates, GeocodeError, Geocoder, NOT_AVAILABLE};
use serde_json::{Value, json};
use tempfile::TempDir;

struct ScriptedAgent {
    result: Result<Value, String>,
    tasks: Mutex<Vec<String>>,
}

impl ScriptedAgent {
    fn returning(value: Value) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(value),
            tasks: Mutex::new(Vec::new()),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Err(message.to_string()),
            tasks: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl TrackingAgent for ScriptedAgent {
    async fn run(&self, task: &str) -> Result<Value, AgentError> {
        self.tasks.lock().unwrap().push(task.to_string());
        self.result.clone().map_err(AgentError::Browser)
    }
}

struct FixedGeocoder;

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<Coordinates>, GeocodeError> {
        Ok(match query {
            "Busan port" => Some(Coordinates::new(35.0, 129.0)),
            "Rotterdam port" => Some(Coordinates::new(52.0, 4.5)),
            _ => None,
        })
    }
}

fn tracker(dir: &TempDir, agent: Arc<ScriptedAgent>) -> Tracker {
    Tracker::new(
        agent,
        TaskComposer::new("http://www.seacargotracking.net/", "HMM"),
        HistoryStore::new(dir.path().join("tracking_history.json")),
    )
}

#[tokio::test]
async fn test_track_structured_result() {
    let dir = TempDir::new().unwrap();
    let agent = ScriptedAgent::returning(json!({
        "vessel": {"name": "HMM OSLO", "number": "045E"},
        "schedule": {"status": "In Transit"}
    }));
    let tracker = tracker(&dir, agent.clone());

    let record = tracker.track("SINI25432400").await.unwrap();
    assert_eq!(record.vessel.name, "HMM OSLO");
    assert_eq!(record.schedule.status, "In Transit");
    assert!(record.map_path.is_none());

    let tasks = agent.tasks.lock().unwrap();
    assert_eq!(tasks.len(), 1);
    assert!(tasks[0].contains("SINI25432400"));

    assert_eq!(tracker.history().load().len(), 1);
}

#[tokio::test]
async fn test_track_null_result_saves_defaults() {
    let dir = TempDir::new().unwrap();
    let tracker = tracker(&dir, ScriptedAgent::returning(Value::Null));

    let record = tracker.track("EMPTY1").await.unwrap();
    assert_eq!(record.vessel.name, NOT_AVAILABLE);
    assert_eq!(tracker.history().load()[0]["reference_id"], "EMPTY1");
}

#[tokio::test]
async fn test_agent_failure_propagates_and_saves_nothing() {
    let dir = TempDir::new().unwrap();
    let tracker = tracker(&dir, ScriptedAgent::failing("Chrome not found"));

    let err = tracker.track("FAIL1").await.unwrap_err();
    assert!(matches!(err, TrackerError::Agent(_)));
    assert!(err.to_string().contains("Chrome not found"));
    assert!(tracker.history().load().is_empty());
}

#[tokio::test]
async fn test_track_with_route_map() {
    let dir = TempDir::new().unwrap();
    let agent = ScriptedAgent::returning(json!({
        "ports": {"loading": "Busan", "discharge": "Rotterdam"}
    }));
    let tracker = tracker(&dir, agent)
        .with_route_mapper(RouteMapper::new(Arc::new(FixedGeocoder), dir.path()));

    let record = tracker.track("MAP1").await.unwrap();
    let map_path = record.map_path.clone().unwrap();
    assert!(std::path::Path::new(&map_path).exists());

    let stored = tracker.history().latest_for("MAP1").unwrap();
    assert_eq!(stored["map_path"], map_path.as_str());
}

#[tokio::test]
async fn test_ungeocodable_port_skips_map() {
    let dir = TempDir::new().unwrap();
    let agent = ScriptedAgent::returning(json!({
        "ports": {"loading": "Busan", "discharge": "Atlantis"}
    }));
    let tracker = tracker(&dir, agent)
        .with_route_mapper(RouteMapper::new(Arc::new(FixedGeocoder), dir.path().join("maps")));

    let record = tracker.track("MAP2").await.unwrap();
    assert!(record.map_path.is_none());
    assert!(!dir.path().join("maps").exists());
    assert!(tracker.history().latest_for("MAP2").unwrap().get("map_path").is_none());
}

#[tokio::test]
async fn test_unknown_port_never_geocodes() {
    let dir = TempDir::new().unwrap();
    let agent = ScriptedAgent::returning(json!({"ports": {"loading": "Busan"}}));
    let tracker = tracker(&dir, agent)
        .with_route_mapper(RouteMapper::new(Arc::new(FixedGeocoder), dir.path().join("maps")));

    let record = tracker.track("MAP3").await.unwrap();
    assert!(record.map_path.is_none());
    assert!(!dir.path().join("maps").exists());
}

#[tokio::test]
async fn test_same_reference_twice_appends_twice() {
    let dir = TempDir::new().unwrap();
    let tracker = tracker(&dir, ScriptedAgent::returning(json!("Status: Loaded")));

    tracker.track("DUP").await.unwrap();
    tracker.track("DUP").await.unwrap();

    assert_eq!(tracker.history().load().len(), 2);
}

#[tokio::test]
async fn test_cached_returns_latest_record() {
    let dir = TempDir::new().unwrap();
    let tracker = tracker(&dir, ScriptedAgent::returning(json!("Status: Loaded")));

    assert!(tracker.cached("C1").is_none());
    tracker.track("C1").await.unwrap();

    let cached = tracker.cached("C1").unwrap();
    assert_eq!(cached.schedule.status, "Loaded");
}

#[test]
fn test_cached_skips_unreadable_entry() {
    let dir = TempDir::new().unwrap();
    let tracker = tracker(&dir, ScriptedAgent::returning(Value::Null));
    std::fs::write(
        tracker.history().path(),
        r#"[{"reference_id": "C2", "vessel": "not an object"}]"#,
    )
    .unwrap();

    assert!(tracker.cached("C2").is_none());
}
