use std::sync::Arc;

use discovery_config::Config;
use discovery_service::{DiscoveryService, Stores};
use discovery_storage::{db::Db, seed};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<DiscoveryService>,
}
impl AppState {
	/// Loads the seed and wires the stores. Postgres backs the overlay, endorsements, and audit
	/// trail when configured; otherwise they live in process memory.
	pub async fn new(config: Config) -> color_eyre::Result<Self> {
		let seed = seed::load_seed(&config.storage.seed_path)?;

		tracing::info!(
			seed_path = %config.storage.seed_path.display(),
			records = seed.len(),
			"Seed dataset loaded."
		);

		let stores = match &config.storage.postgres {
			Some(postgres) => {
				let db = Db::connect(postgres).await?;

				db.ensure_schema().await?;

				Stores::postgres(db, seed)
			},
			None => {
				tracing::warn!("No Postgres configured; overlay and audit events are in memory.");

				Stores::in_memory(seed)
			},
		};

		Ok(Self::from_service(DiscoveryService::new(config, stores)))
	}

	pub fn from_service(service: DiscoveryService) -> Self {
		Self { service: Arc::new(service) }
	}
}
