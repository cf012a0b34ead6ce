use reqwest::header::AUTHORIZATION;
use serde_json::{Map, Value};

use discovery_config::RankedSearchConfig;
use discovery_domain::filters::SearchFilters;
use discovery_providers::ranked_search::{self, RankedSearchParams};

#[test]
fn builds_apikey_and_bearer_headers() {
	let headers =
		discovery_providers::auth_headers("secret", &Map::new()).expect("Failed to build headers.");
	let value = headers.get(AUTHORIZATION).expect("Missing authorization header.");

	assert_eq!(value, "Bearer secret");
	assert_eq!(headers.get("apikey").expect("Missing apikey header."), "secret");
}

#[test]
fn rejects_non_string_default_headers() {
	let mut defaults = Map::new();

	defaults.insert("x-client-info".to_string(), Value::Bool(true));

	let err = discovery_providers::auth_headers("secret", &defaults)
		.expect_err("Expected non-string header to be rejected.");

	assert!(err.to_string().contains("must be strings"), "Unexpected error: {err}");
}

#[tokio::test]
async fn unreachable_backend_surfaces_transport_error() {
	let cfg = RankedSearchConfig {
		enabled: true,
		api_base: "http://127.0.0.1:1".to_string(),
		api_key: "test-key".to_string(),
		path: "/rest/v1/rpc/search_providers".to_string(),
		timeout_ms: 500,
		default_headers: Map::new(),
	};
	let params = RankedSearchParams::from(&SearchFilters::default());
	let result = ranked_search::ranked_search(&cfg, &params).await;

	assert!(matches!(result, Err(discovery_providers::Error::Reqwest(_))));
}
