use std::fs;
use std::path::{Path, PathBuf};

use common::QuizConfig;
use tilt_d::load_config;

fn get_test_dir(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("tilt_test_config_{}", name));
    let _ = fs::remove_dir_all(&path);
    let _ = fs::create_dir_all(&path);
    path
}

fn cleanup_test_dir(path: &Path) {
    let _ = fs::remove_dir_all(path);
}

#[test]
fn missing_config_is_created_with_defaults() {
    let dir = get_test_dir("missing");
    let path = dir.join("config.json");

    let config = load_config(&path).expect("load should succeed");

    assert_eq!(config, QuizConfig::default());
    assert!(path.exists());
    let written: QuizConfig =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).expect("valid json");
    assert_eq!(written, config);
    cleanup_test_dir(&dir);
}

#[test]
fn partial_config_fills_defaults() {
    let dir = get_test_dir("partial");
    let path = dir.join("config.json");
    fs::write(&path, r#"{ "tilt_threshold_deg": 15.0, "question_limit": 5 }"#).unwrap();

    let config = load_config(&path).expect("load should succeed");

    assert_eq!(config.tilt_threshold_deg, 15.0);
    assert_eq!(config.question_limit, Some(5));
    assert_eq!(config.debounce_ms, 800);
    assert_eq!(config.landmark_port, 9400);
    assert_eq!(config.classifier().threshold_deg(), 15.0);
    assert_eq!(config.debouncer().window().as_millis(), 800);
    cleanup_test_dir(&dir);
}

#[test]
fn garbage_config_is_an_error() {
    let dir = get_test_dir("garbage");
    let path = dir.join("config.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(load_config(&path).is_err());
    cleanup_test_dir(&dir);
}
