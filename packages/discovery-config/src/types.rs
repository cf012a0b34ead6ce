use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	#[serde(default)]
	pub identity: Identity,
	pub security: Security,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	/// JSON array of provider records loaded once at startup. Read-only for the process lifetime.
	pub seed_path: PathBuf,
	/// Optional. When absent, the overlay, endorsements, and audit events live in process memory.
	pub postgres: Option<Postgres>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Providers {
	pub ranked_search: RankedSearchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankedSearchConfig {
	#[serde(default = "default_enabled")]
	pub enabled: bool,
	pub api_base: String,
	pub api_key: String,
	#[serde(default = "default_ranked_search_path")]
	pub path: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Identity {
	/// Tokens starting with this prefix are treated as provider ids before slugs.
	pub provider_id_prefix: String,
}
impl Default for Identity {
	fn default() -> Self {
		Self { provider_id_prefix: "prov_".to_string() }
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Security {
	pub bind_localhost_only: bool,
}

fn default_enabled() -> bool {
	true
}

fn default_ranked_search_path() -> String {
	"/rest/v1/rpc/search_providers".to_string()
}
