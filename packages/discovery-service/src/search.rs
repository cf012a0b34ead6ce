pub mod filter;
pub mod ranking;

mod local;
mod remote;

pub use local::LocalSearch;
pub use remote::RemoteSearch;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{BoxFuture, DiscoveryService, Result};
use discovery_domain::{
	endorsement::EndorsementSummary, filters::SearchFilters, provider::ProviderRecord,
};
use discovery_providers::ranked_search::RankedSearchRow;
use discovery_storage::models::AuditEvent;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchHit {
	#[serde(flatten)]
	pub provider: ProviderRecord,
	#[serde(flatten)]
	pub endorsements: EndorsementSummary,
	/// Only present on remotely ranked results.
	pub relevance: Option<f64>,
}
impl From<RankedSearchRow> for SearchHit {
	fn from(row: RankedSearchRow) -> Self {
		let endorsements = row.endorsements();

		Self { provider: row.provider, endorsements, relevance: row.relevance }
	}
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchPage {
	pub providers: Vec<SearchHit>,
	pub total: u64,
}
impl SearchPage {
	pub fn empty() -> Self {
		Self::default()
	}
}

/// One way of answering a search.
pub trait SearchStrategy
where
	Self: Send + Sync,
{
	fn name(&self) -> &'static str;

	fn search<'a>(&'a self, filters: &'a SearchFilters) -> BoxFuture<'a, Result<SearchPage>>;
}

/// Tries `primary` and hands the same filters to `fallback` when it fails.
///
/// The caller cannot tell which branch produced the page.
pub struct FallbackSearch {
	primary: Arc<dyn SearchStrategy>,
	fallback: Arc<dyn SearchStrategy>,
}
impl FallbackSearch {
	pub fn new(primary: Arc<dyn SearchStrategy>, fallback: Arc<dyn SearchStrategy>) -> Self {
		Self { primary, fallback }
	}
}
impl SearchStrategy for FallbackSearch {
	fn name(&self) -> &'static str {
		"fallback"
	}

	fn search<'a>(&'a self, filters: &'a SearchFilters) -> BoxFuture<'a, Result<SearchPage>> {
		Box::pin(async move {
			match self.primary.search(filters).await {
				Ok(page) => Ok(page),
				Err(err) => {
					tracing::warn!(
						error = %err,
						primary = self.primary.name(),
						fallback = self.fallback.name(),
						"Search strategy failed; falling back."
					);

					self.fallback.search(filters).await
				},
			}
		})
	}
}

impl DiscoveryService {
	/// Returns a best-effort page. Remote unavailability is absorbed by the configured strategy;
	/// only local storage failures surface as errors.
	pub async fn search(&self, filters: SearchFilters) -> Result<SearchPage> {
		self.stores.audit.record(AuditEvent::new(
			"search",
			"provider",
			None,
			search_audit_payload(&filters),
		));

		self.search.search(&filters).await
	}
}

fn search_audit_payload(filters: &SearchFilters) -> serde_json::Value {
	serde_json::json!({
		"query": filters.query,
		"specialty": filters.specialty,
		"max_price": filters.max_price,
		"state": filters.state,
		"day": filters.day,
		"sort_by": filters.sort_by.as_str(),
		"platform_endorsed_only": filters.platform_endorsed_only,
		"limit": filters.limit,
		"offset": filters.offset,
	})
}
