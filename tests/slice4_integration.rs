//! Integration tests for Slice 4
//!
//! Tests settings loading and JSON-lines display output

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use siglock::core::{GenerationOrchestrator, JsonSink, Settings, SystemClock};
use siglock::types::{ConfigError, Phase};
use std::path::PathBuf;
use std::time::Duration;

fn write_config(name: &str, body: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("siglock_test_configs");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

/// Settings from a file drive the orchestrator's pacing
#[test]
fn test_config_file_fast_cycle() {
    let path = write_config(
        "fast.json",
        r#"{"analyzing_min_ms": 20, "analyzing_max_ms": 20, "tick_ms": 2, "unit_suffix": "u"}"#,
    );
    let settings = Settings::from_file(&path).unwrap();
    assert_eq!(settings.tick_ms, 2);

    let mut orch = GenerationOrchestrator::new(
        JsonSink::new(Vec::new()),
        SystemClock,
        StdRng::seed_from_u64(4),
        &settings,
    );
    orch.request_generation();
    orch.advance(Duration::from_millis(20));
    assert_eq!(orch.phase(), Phase::Locked { remaining: 1800 });

    orch.advance(Duration::from_millis(1800 * 2));
    assert_eq!(orch.phase(), Phase::Idle);

    let out = String::from_utf8(orch.sink().get_ref().clone()).unwrap();
    let events: Vec<Value> = out.lines().map(|l| serde_json::from_str(l).unwrap()).collect();

    let entries: Vec<&Value> = events.iter().filter(|e| e["event"] == "entry").collect();
    assert_eq!(entries.len(), 4);
    for e in entries {
        assert!(e["value"].as_str().unwrap().ends_with('u'));
        assert!(e["time"].as_str().unwrap().ends_with('M'));
    }
    assert_eq!(events.last().unwrap()["event"], "request_enabled");
    assert_eq!(events.last().unwrap()["enabled"], true);
}

/// Broken JSON is a parse error
#[test]
fn test_config_parse_error() {
    let path = write_config("broken.json", "{ tick_ms: ");
    let err = Settings::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("broken.json"));
}

/// Parsed but invalid settings are rejected
#[test]
fn test_config_invalid_range() {
    let path = write_config("inverted.json", r#"{"analyzing_min_ms": 9000}"#);
    let err = Settings::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));
}
