use std::sync::Arc;

use crate::{
	BoxFuture, Error, RankedSearchProvider, Result,
	search::{SearchHit, SearchPage, SearchStrategy, ranking},
};
use discovery_config::RankedSearchConfig;
use discovery_domain::{filters::SearchFilters, provider};
use discovery_providers::ranked_search::{RankedSearchParams, RankedSearchReply};

/// Delegates filtering, ranking, and pagination to the remote ranked-search procedure.
///
/// The procedure takes no sort key or endorsement flag, so both are applied to the returned page.
pub struct RemoteSearch {
	cfg: RankedSearchConfig,
	provider: Arc<dyn RankedSearchProvider>,
}
impl RemoteSearch {
	pub fn new(cfg: RankedSearchConfig, provider: Arc<dyn RankedSearchProvider>) -> Self {
		Self { cfg, provider }
	}
}
impl SearchStrategy for RemoteSearch {
	fn name(&self) -> &'static str {
		"remote"
	}

	fn search<'a>(&'a self, filters: &'a SearchFilters) -> BoxFuture<'a, Result<SearchPage>> {
		Box::pin(async move {
			let params = RankedSearchParams::from(filters);
			let rows = match self.provider.ranked_search(&self.cfg, &params).await? {
				RankedSearchReply::Rows(rows) => rows,
				RankedSearchReply::Failed { code, message } => {
					let message = match code {
						Some(code) => format!("Ranked search failed ({code}): {message}"),
						None => format!("Ranked search failed: {message}"),
					};

					return Err(Error::Provider { message });
				},
			};
			let Some(first) = rows.first() else {
				return Ok(SearchPage::empty());
			};
			let full_count = first.full_count;
			let returned = rows.len();
			let mut providers: Vec<SearchHit> = rows
				.into_iter()
				.filter(|row| provider::is_search_eligible(&row.provider))
				.filter(|row| !filters.platform_endorsed_only || row.is_platform_endorsed)
				.map(SearchHit::from)
				.collect();
			let dropped = (returned - providers.len()) as u64;

			if dropped > 0 {
				tracing::debug!(dropped, "Dropped remote rows outside the requested filters.");
			}

			ranking::sort_hits(&mut providers, filters.sort_by);

			Ok(SearchPage { providers, total: full_count.saturating_sub(dropped) })
		})
	}
}
