use std::{cmp::Ordering, collections::HashMap};

use crate::search::SearchHit;
use discovery_domain::{
	endorsement::EndorsementSummary, filters::SortBy, provider::ProviderRecord,
};

/// Attaches endorsement fields to each record. Providers nobody endorsed get a zero summary.
pub fn enrich(
	records: Vec<ProviderRecord>,
	endorsements: &HashMap<String, EndorsementSummary>,
) -> Vec<SearchHit> {
	records
		.into_iter()
		.map(|provider| {
			let endorsements = endorsements.get(&provider.id).copied().unwrap_or_default();

			SearchHit { provider, endorsements, relevance: None }
		})
		.collect()
}

/// Orders hits in place. Every ordering is stable, so equal keys keep their input order and
/// `Relevance` leaves the input untouched.
pub fn sort_hits(hits: &mut [SearchHit], sort_by: SortBy) {
	match sort_by {
		SortBy::Relevance => {},
		SortBy::PriceLow => hits.sort_by(|a, b| by_rate(a, b)),
		SortBy::PriceHigh => hits.sort_by(|a, b| by_rate(b, a)),
		SortBy::Experience => hits.sort_by(|a, b| {
			b.provider.years_experience().cmp(&a.provider.years_experience())
		}),
		SortBy::Endorsements =>
			hits.sort_by(|a, b| b.endorsements.trust_score.cmp(&a.endorsements.trust_score)),
	}
}

fn by_rate(a: &SearchHit, b: &SearchHit) -> Ordering {
	a.provider.hourly_rate().total_cmp(&b.provider.hourly_rate())
}
