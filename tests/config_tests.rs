// Configuration loading tests

use able_service::Config;
use std::fs;
use tempfile::TempDir;

#[test]
fn defaults_match_the_documented_values() {
    let cfg = Config::default();

    assert_eq!(cfg.service.name, "able-service");
    assert_eq!(cfg.service.http.bind, "127.0.0.1");
    assert_eq!(cfg.service.http.port, 8087);
    assert_eq!(cfg.capture.detect_interval_ms, 2000);
    assert!((cfg.capture.detect_probability - 0.7).abs() < f64::EPSILON);
    assert_eq!(cfg.capture.history_limit, 8);
    assert_eq!(cfg.playback.step_ms, 800);
    assert_eq!(cfg.assistant.reply_delay_ms, 1000);
}

#[test]
fn file_values_override_defaults_per_field() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("able.toml");
    fs::write(
        &path,
        r#"
[service]
name = "able-test"

[service.http]
port = 9099

[capture]
detect_interval_ms = 500
"#,
    )
    .unwrap();

    let base = dir.path().join("able");
    let cfg = Config::load(base.to_str().unwrap()).unwrap();

    assert_eq!(cfg.service.name, "able-test");
    assert_eq!(cfg.service.http.port, 9099);
    // Unset fields keep their defaults.
    assert_eq!(cfg.service.http.bind, "127.0.0.1");
    assert_eq!(cfg.capture.detect_interval_ms, 500);
    assert_eq!(cfg.capture.history_limit, 8);
    assert_eq!(cfg.playback.step_ms, 800);
}

#[test]
fn missing_file_is_an_error() {
    assert!(Config::load("/nonexistent/able").is_err());
}
