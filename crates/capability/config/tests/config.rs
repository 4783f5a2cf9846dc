use topo_config::{AppConfig, ConfigError, DEFAULT_RELAXED_RELEVANCE_THRESHOLD};

// 环境变量为进程级共享状态，全部场景放在同一个测试里顺序执行。
#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::set_var("TOPO_SOURCE_ID", "villa.json");
        std::env::set_var("TOPO_EMIT_AREA_RECORDS", "true");
        std::env::set_var("TOPO_RELEVANCE_THRESHOLD", "0.5");
        std::env::set_var("TOPO_RETRIEVAL_LIMIT", "8");
    }

    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.source_id, "villa.json");
    assert!(config.emit_area_records);
    assert_eq!(config.relevance_threshold, 0.5);
    assert_eq!(
        config.relaxed_relevance_threshold,
        DEFAULT_RELAXED_RELEVANCE_THRESHOLD
    );
    assert_eq!(config.retrieval_limit, 8);

    unsafe {
        std::env::set_var("TOPO_RELEVANCE_THRESHOLD", "-0.1");
    }
    let err = AppConfig::from_env().expect_err("negative threshold");
    assert!(matches!(err, ConfigError::Invalid(key, _) if key == "TOPO_RELEVANCE_THRESHOLD"));

    unsafe {
        std::env::set_var("TOPO_RELEVANCE_THRESHOLD", "NaN");
    }
    assert!(AppConfig::from_env().is_err());

    unsafe {
        std::env::remove_var("TOPO_RELEVANCE_THRESHOLD");
        std::env::set_var("TOPO_RETRIEVAL_LIMIT", "many");
    }
    let err = AppConfig::from_env().expect_err("invalid limit");
    assert_eq!(err.to_string(), "invalid value for TOPO_RETRIEVAL_LIMIT: many");
}

#[test]
fn default_config_matches_documented_values() {
    let config = AppConfig::default();
    assert_eq!(config.source_id, "installation_config");
    assert_eq!(config.default_installation_name, "Unknown Installation");
    assert_eq!(config.relevance_threshold, 0.3);
    assert_eq!(config.relaxed_relevance_threshold, 0.2);
    assert!(!config.emit_area_records);
}
