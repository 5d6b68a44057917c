//! Unit tests for configuration structures and parsing.

#[cfg(test)]
mod config_tests {
    use crate::config::*;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    // ============= Defaults Tests =============

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();

        assert_eq!(config.queue.root, PathBuf::from("./queue"));
        assert_eq!(config.queue.poll_interval_secs, 2);
        assert!(config.queue.sort_pending);
        assert_eq!(config.venue.kind, VenueKind::Paper);
        assert!(config.ledger.enabled);
        assert_eq!(config.ledger.retention_secs, 86_400);
        assert_eq!(config.api.bind, None);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = AppConfig::from_yaml_str("").unwrap();
        assert_eq!(config.queue.poll_interval_secs, 2);
    }

    // ============= YAML Tests =============

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
queue:
  root: /var/lib/agent/queue
  poll_interval_secs: 5
  sort_pending: false
venue:
  kind: http
  http:
    base_url: http://10.0.0.5:9000
    api_key: secret
    timeout_secs: 30
ledger:
  enabled: false
  retention_secs: 60
api:
  bind: 0.0.0.0:3000
log_level: debug
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.queue.root, PathBuf::from("/var/lib/agent/queue"));
        assert_eq!(config.queue.poll_interval_secs, 5);
        assert!(!config.queue.sort_pending);
        assert_eq!(config.venue.kind, VenueKind::Http);
        assert_eq!(config.venue.http.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.venue.http.api_key.as_deref(), Some("secret"));
        assert_eq!(config.venue.http.timeout_secs, 30);
        assert!(!config.ledger.enabled);
        assert_eq!(config.ledger.retention_secs, 60);
        assert_eq!(config.api.bind.as_deref(), Some("0.0.0.0:3000"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = r#"
queue:
  root: ./q
venue:
  paper:
    reject_code: 10019
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.queue.root, PathBuf::from("./q"));
        assert_eq!(config.queue.poll_interval_secs, 2);
        assert_eq!(config.venue.kind, VenueKind::Paper);
        assert_eq!(config.venue.paper.reject_code, Some(10019));
        assert_eq!(config.venue.paper.reject_description, None);
        assert!(config.ledger.enabled);
    }

    #[test]
    fn test_example_config_parses() {
        let config = AppConfig::from_yaml_str(include_str!("../config.example.yaml")).unwrap();
        assert_eq!(config.venue.kind, VenueKind::Paper);
        assert_eq!(config.api.bind, None);
    }

    #[test]
    fn test_yaml_with_bom() {
        let yaml = "\u{feff}queue:\n  poll_interval_secs: 7\n";
        let config = AppConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.queue.poll_interval_secs, 7);
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(AppConfig::from_yaml_str("queue: [unclosed").is_err());
        assert!(AppConfig::from_yaml_str("venue:\n  kind: fix\n").is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::from_path(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(config.venue.kind, VenueKind::Paper);
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "queue:\n  poll_interval_secs: 9\n").unwrap();
        assert_eq!(AppConfig::from_path(&path).unwrap().queue.poll_interval_secs, 9);
    }

    // ============= Poll Interval Tests =============

    #[test]
    fn test_poll_interval_clamped_up() {
        let mut queue = QueueConfig::default();
        queue.poll_interval_secs = 0;
        assert_eq!(queue.poll_interval(), Duration::from_secs(1));

        queue.poll_interval_secs = 10;
        assert_eq!(queue.poll_interval(), Duration::from_secs(10));
    }

    // ============= Environment Override Tests =============

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env(env(&[
                ("QUEUE_ROOT", "/tmp/q"),
                ("POLL_INTERVAL_SECS", " 3 "),
                ("VENUE_KIND", "HTTP"),
                ("VENUE_BASE_URL", "http://bridge:8000"),
                ("VENUE_API_KEY", "k"),
                ("API_BIND", "127.0.0.1:3000"),
            ]))
            .unwrap();

        assert_eq!(config.queue.root, PathBuf::from("/tmp/q"));
        assert_eq!(config.queue.poll_interval_secs, 3);
        assert_eq!(config.venue.kind, VenueKind::Http);
        assert_eq!(config.venue.http.base_url, "http://bridge:8000");
        assert_eq!(config.venue.http.api_key.as_deref(), Some("k"));
        assert_eq!(config.api.bind.as_deref(), Some("127.0.0.1:3000"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut config = AppConfig::default();
        config.venue.http.api_key = Some("hunter2".to_string());

        let dump = format!("{:?}", config);
        assert!(!dump.contains("hunter2"));
        assert!(dump.contains("api_key: Some(\"***\")"));
        assert!(dump.contains("base_url"));
    }

    #[test]
    fn test_env_bad_values() {
        let mut config = AppConfig::default();
        assert!(config.apply_env(env(&[("POLL_INTERVAL_SECS", "soon")])).is_err());
        assert!(config.apply_env(env(&[("VENUE_KIND", "carrier-pigeon")])).is_err());
    }

    #[test]
    fn test_no_env_leaves_config_untouched() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[])).unwrap();
        assert_eq!(config.queue.root, PathBuf::from("./queue"));
    }
}
