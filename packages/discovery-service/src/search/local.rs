use crate::{
	BoxFuture, Result, Stores,
	search::{SearchPage, SearchStrategy, filter, ranking},
};
use discovery_domain::{endorsement, filters::SearchFilters};

/// Answers searches from the reconciled seed and overlay datasets.
///
/// Results are not paginated: `total` is the number of matching providers and every match is
/// returned.
pub struct LocalSearch {
	stores: Stores,
}
impl LocalSearch {
	pub fn new(stores: Stores) -> Self {
		Self { stores }
	}
}
impl SearchStrategy for LocalSearch {
	fn name(&self) -> &'static str {
		"local"
	}

	fn search<'a>(&'a self, filters: &'a SearchFilters) -> BoxFuture<'a, Result<SearchPage>> {
		Box::pin(async move {
			let records = self.stores.reconciled().await?;
			let endorsements = endorsement::summarize(&self.stores.endorsements.read().await?);
			let matched = filter::filter_providers(&records, &endorsements, filters);
			let mut hits = ranking::enrich(matched, &endorsements);

			ranking::sort_hits(&mut hits, filters.sort_by);

			let total = hits.len() as u64;

			tracing::debug!(
				candidates = records.len(),
				matched = total,
				sort_by = filters.sort_by.as_str(),
				"Local search completed."
			);

			Ok(SearchPage { providers: hits, total })
		})
	}
}
