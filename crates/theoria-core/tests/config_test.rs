use theoria_core::config::*;
use theoria_core::errors::TheoriaError;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = TheoriaConfig::from_toml("").unwrap();

    // Storage defaults
    assert_eq!(config.storage.db_path, "theoria.db");
    assert!(config.storage.native_hybrid);
    assert_eq!(config.storage.busy_timeout_ms, 5_000);

    // Embedding defaults
    assert_eq!(config.embedding.provider, "hashing");
    assert_eq!(config.embedding.dimensions, Some(256));

    // Retrieval defaults
    assert_eq!(config.retrieval.default_k, 10);
    assert_eq!(config.retrieval.snippet_max_length, 240);
    assert_eq!(config.retrieval.highlight_window, 160);
    assert_eq!(config.retrieval.max_highlights, 3);
    assert_eq!(config.retrieval.candidate_multiplier, 4);
    assert_eq!(config.retrieval.fallback_osis_bonus, 5.0);
    assert_eq!(config.retrieval.native_osis_bonus, 0.2);

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
    assert!(config.observability.json_logs);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[storage]
db_path = "/srv/theoria.db"
native_hybrid = false

[retrieval]
default_k = 25
vector_weight = 0.7
"#;
    let config = TheoriaConfig::from_toml(toml).unwrap();
    assert_eq!(config.storage.db_path, "/srv/theoria.db");
    assert!(!config.storage.native_hybrid);
    // Non-overridden fields keep defaults
    assert_eq!(config.storage.busy_timeout_ms, 5_000);
    assert_eq!(config.retrieval.default_k, 25);
    assert_eq!(config.retrieval.vector_weight, 0.7);
    assert_eq!(config.retrieval.lexical_weight, 0.35);
    assert_eq!(config.retrieval.request().k, 25);
}

#[test]
fn config_rejects_malformed_toml() {
    let err = TheoriaConfig::from_toml("[retrieval\ndefault_k = ").unwrap_err();
    assert!(matches!(err, TheoriaError::ConfigError(_)));
}

#[test]
fn config_rejects_zero_k() {
    let err = TheoriaConfig::from_toml("[retrieval]\ndefault_k = 0").unwrap_err();
    assert!(err.to_string().contains("retrieval.default_k"));
}

#[test]
fn config_rejects_negative_weight() {
    let err = TheoriaConfig::from_toml("[retrieval]\nlexical_weight = -1.0").unwrap_err();
    assert!(err.to_string().contains("retrieval.lexical_weight"));
}

#[test]
fn config_roundtrips_through_toml() {
    let config = TheoriaConfig::default();
    let rendered = toml::to_string(&config).unwrap();
    let parsed = TheoriaConfig::from_toml(&rendered).unwrap();
    assert_eq!(parsed.retrieval.default_k, config.retrieval.default_k);
    assert_eq!(parsed.storage.db_path, config.storage.db_path);
}
