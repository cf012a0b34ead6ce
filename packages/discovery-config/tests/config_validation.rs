use std::{
	env, fs,
	path::{Path, PathBuf},
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use discovery_config::{Config, Error};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with_ranked_search(enabled: bool, api_key: &str, timeout_ms: i64) -> String {
	let mut value: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let root = value.as_table_mut().expect("Template config must be a table.");
	let ranked_search = root
		.get_mut("providers")
		.and_then(Value::as_table_mut)
		.and_then(|providers| providers.get_mut("ranked_search"))
		.and_then(Value::as_table_mut)
		.expect("Template config must include [providers.ranked_search].");

	ranked_search.insert("enabled".to_string(), Value::Boolean(enabled));
	ranked_search.insert("api_key".to_string(), Value::String(api_key.to_string()));
	ranked_search.insert("timeout_ms".to_string(), Value::Integer(timeout_ms));

	toml::to_string(&value).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("discovery_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn base_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse test config.")
}

#[test]
fn loads_sample_config_and_normalizes_api_base() {
	let path = write_temp_config(SAMPLE_CONFIG_TEMPLATE_TOML.to_string());
	let result = discovery_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Expected sample config to load.");

	assert_eq!(cfg.providers.ranked_search.api_base, "https://project.supabase.co");
	assert_eq!(cfg.identity.provider_id_prefix, "prov_");
	assert!(cfg.storage.postgres.is_some());
}

#[test]
fn ranked_search_api_key_must_be_set_when_enabled() {
	let path = write_temp_config(sample_toml_with_ranked_search(true, "  ", 3_000));
	let result = discovery_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let err = result.expect_err("Expected api_key validation error.");

	assert!(
		err.to_string().contains("Provider ranked_search api_key must be non-empty."),
		"Unexpected error: {err}"
	);
}

#[test]
fn disabled_ranked_search_skips_provider_checks() {
	let path = write_temp_config(sample_toml_with_ranked_search(false, "", 0));
	let result = discovery_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	assert!(result.is_ok(), "Unexpected error: {:?}", result.err());
}

#[test]
fn ranked_search_timeout_must_be_positive() {
	let path = write_temp_config(sample_toml_with_ranked_search(true, "anon-key", 0));
	let result = discovery_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let err = result.expect_err("Expected timeout validation error.");

	assert!(
		err.to_string().contains("providers.ranked_search.timeout_ms must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn pool_size_must_be_positive() {
	let mut cfg = base_config();

	if let Some(postgres) = cfg.storage.postgres.as_mut() {
		postgres.pool_max_conns = 0;
	}

	let err = discovery_config::validate(&cfg).expect_err("Expected pool size validation error.");

	assert!(
		err.to_string().contains("storage.postgres.pool_max_conns must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn identity_prefix_defaults_when_section_missing() {
	let mut value: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");

	value.as_table_mut().expect("Template config must be a table.").remove("identity");

	let payload = toml::to_string(&value).expect("Failed to render config.");
	let cfg: Config = toml::from_str(&payload).expect("Failed to deserialize config.");

	assert_eq!(cfg.identity.provider_id_prefix, "prov_");
}

#[test]
fn missing_file_reports_read_error() {
	let path = env::temp_dir().join("discovery_config_missing_file.toml");
	let err = discovery_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }), "Unexpected error: {err}");
}

#[test]
fn bundled_example_config_is_valid() {
	let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config.example.toml");
	let cfg = discovery_config::load(&path).expect("Example config must load.");

	assert!(cfg.storage.postgres.is_some());
	assert_eq!(cfg.providers.ranked_search.default_headers.len(), 1);
}

#[test]
fn ranked_search_section_needs_no_backend_name() {
	let template: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let ranked_search = &template["providers"]["ranked_search"];

	assert!(ranked_search.get("provider_id").is_none());

	let mut legacy = template.clone();

	legacy["providers"]["ranked_search"]
		.as_table_mut()
		.expect("Template config must include [providers.ranked_search].")
		.insert("provider_id".to_string(), Value::String("supabase".to_string()));

	let path = write_temp_config(toml::to_string(&legacy).expect("Failed to render config."));
	let result = discovery_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	assert!(result.expect("Expected legacy config to load.").providers.ranked_search.enabled);
}
