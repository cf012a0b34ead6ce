pub mod memory;
pub mod moderate;
pub mod postgres;
pub mod resolve;
pub mod search;

mod error;

pub use error::{Error, Result};
pub use moderate::{ModerateRequest, ModerateResponse};
pub use resolve::Lookup;
pub use search::{
	FallbackSearch, LocalSearch, RemoteSearch, SearchHit, SearchPage, SearchStrategy,
};

use std::{future::Future, pin::Pin, sync::Arc};

use discovery_config::{Config, RankedSearchConfig};
use discovery_domain::{
	dataset, endorsement::EndorsementRecord, provider::ProviderRecord, slug,
};
use discovery_providers::ranked_search::{self, RankedSearchParams, RankedSearchReply};
use discovery_storage::models::AuditEvent;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The remote ranked-search procedure.
pub trait RankedSearchProvider
where
	Self: Send + Sync,
{
	fn ranked_search<'a>(
		&'a self,
		cfg: &'a RankedSearchConfig,
		params: &'a RankedSearchParams,
	) -> BoxFuture<'a, discovery_providers::Result<RankedSearchReply>>;
}

/// Read-only fixture set, constant for the process lifetime.
pub trait SeedDataset
where
	Self: Send + Sync,
{
	fn read<'a>(&'a self) -> BoxFuture<'a, Result<Vec<ProviderRecord>>>;
}

/// Mutable collection of created and edited provider records.
///
/// `write` replaces the whole collection; there is no row-level update.
pub trait OverlayStore
where
	Self: Send + Sync,
{
	fn read<'a>(&'a self) -> BoxFuture<'a, Result<Vec<ProviderRecord>>>;

	fn write<'a>(&'a self, records: Vec<ProviderRecord>) -> BoxFuture<'a, Result<()>>;
}

pub trait EndorsementStore
where
	Self: Send + Sync,
{
	fn read<'a>(&'a self) -> BoxFuture<'a, Result<Vec<EndorsementRecord>>>;
}

/// Fire-and-forget audit trail. Implementations must not block the caller or report failure.
pub trait AuditSink
where
	Self: Send + Sync,
{
	fn record(&self, event: AuditEvent);
}

#[derive(Clone)]
pub struct Stores {
	pub seed: Arc<dyn SeedDataset>,
	pub overlay: Arc<dyn OverlayStore>,
	pub endorsements: Arc<dyn EndorsementStore>,
	pub audit: Arc<dyn AuditSink>,
}
impl Stores {
	pub fn new(
		seed: Arc<dyn SeedDataset>,
		overlay: Arc<dyn OverlayStore>,
		endorsements: Arc<dyn EndorsementStore>,
		audit: Arc<dyn AuditSink>,
	) -> Self {
		Self { seed, overlay, endorsements, audit }
	}

	/// Seed and overlay merged into one record per id, overlay winning.
	pub async fn reconciled(&self) -> Result<Vec<ProviderRecord>> {
		let seed = self.seed.read().await?;
		let overlay = self.overlay.read().await?;

		Ok(dataset::reconcile(&seed, &overlay))
	}
}

struct DefaultRankedSearch;

pub struct DiscoveryService {
	pub cfg: Config,
	pub stores: Stores,
	pub search: Arc<dyn SearchStrategy>,
}

impl RankedSearchProvider for DefaultRankedSearch {
	fn ranked_search<'a>(
		&'a self,
		cfg: &'a RankedSearchConfig,
		params: &'a RankedSearchParams,
	) -> BoxFuture<'a, discovery_providers::Result<RankedSearchReply>> {
		Box::pin(ranked_search::ranked_search(cfg, params))
	}
}

impl DiscoveryService {
	pub fn new(cfg: Config, stores: Stores) -> Self {
		Self::with_remote(cfg, stores, Arc::new(DefaultRankedSearch))
	}

	/// Remote search first, local computation when it fails. Remote search can be switched off in
	/// config, in which case every search runs locally.
	pub fn with_remote(cfg: Config, stores: Stores, remote: Arc<dyn RankedSearchProvider>) -> Self {
		let local: Arc<dyn SearchStrategy> = Arc::new(LocalSearch::new(stores.clone()));
		let search: Arc<dyn SearchStrategy> = if cfg.providers.ranked_search.enabled {
			let remote = RemoteSearch::new(cfg.providers.ranked_search.clone(), remote);

			Arc::new(FallbackSearch::new(Arc::new(remote), local))
		} else {
			local
		};

		Self { cfg, stores, search }
	}

	pub fn generate_slug(
		&self,
		first_name: &str,
		last_name: &str,
		specialty: Option<&str>,
		city: Option<&str>,
	) -> String {
		slug::generate_slug(first_name, last_name, specialty, city)
	}
}
