mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, Identity, Postgres, Providers, RankedSearchConfig, Security, Service, Storage,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	for (label, value) in
		[("service.http_bind", &cfg.service.http_bind), ("service.admin_bind", &cfg.service.admin_bind)]
	{
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if cfg.storage.seed_path.as_os_str().is_empty() {
		return Err(Error::Validation {
			message: "storage.seed_path must be non-empty.".to_string(),
		});
	}

	if let Some(postgres) = cfg.storage.postgres.as_ref() {
		if postgres.dsn.trim().is_empty() {
			return Err(Error::Validation {
				message: "storage.postgres.dsn must be non-empty.".to_string(),
			});
		}
		if postgres.pool_max_conns == 0 {
			return Err(Error::Validation {
				message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
			});
		}
	}

	let ranked_search = &cfg.providers.ranked_search;

	if ranked_search.enabled {
		if ranked_search.api_base.trim().is_empty() {
			return Err(Error::Validation {
				message: "providers.ranked_search.api_base must be non-empty when enabled."
					.to_string(),
			});
		}
		if ranked_search.api_key.trim().is_empty() {
			return Err(Error::Validation {
				message: "Provider ranked_search api_key must be non-empty.".to_string(),
			});
		}
		if ranked_search.timeout_ms == 0 {
			return Err(Error::Validation {
				message: "providers.ranked_search.timeout_ms must be greater than zero."
					.to_string(),
			});
		}
		if !ranked_search.path.starts_with('/') {
			return Err(Error::Validation {
				message: "providers.ranked_search.path must start with '/'.".to_string(),
			});
		}
	}

	if cfg.identity.provider_id_prefix.trim().is_empty() {
		return Err(Error::Validation {
			message: "identity.provider_id_prefix must be non-empty.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let api_base = cfg.providers.ranked_search.api_base.trim().trim_end_matches('/');

	cfg.providers.ranked_search.api_base = api_base.to_string();

	if cfg.storage.postgres.as_ref().map(|pg| pg.dsn.trim().is_empty()).unwrap_or(false) {
		cfg.storage.postgres = None;
	}
}
