use std::collections::HashMap;

use discovery_domain::{
	endorsement::EndorsementSummary,
	filters::SearchFilters,
	provider::{self, ProviderRecord},
};

/// Narrows `records` to the providers matching `filters`.
///
/// The eligibility gate always runs. Every other predicate is a no-op when its filter is absent
/// or blank. Input order is preserved and input records are never modified.
pub fn filter_providers(
	records: &[ProviderRecord],
	endorsements: &HashMap<String, EndorsementSummary>,
	filters: &SearchFilters,
) -> Vec<ProviderRecord> {
	let query = normalized(filters.query.as_deref());
	let specialty = filters.specialty.as_deref().map(str::trim).filter(|value| !value.is_empty());
	let state = normalized(filters.state.as_deref());
	let day = normalized(filters.day.as_deref());

	records
		.iter()
		.filter(|record| provider::is_search_eligible(record))
		.filter(|record| query.as_deref().is_none_or(|query| matches_query(record, query)))
		.filter(|record| specialty.is_none_or(|specialty| record.specialties.contains(specialty)))
		.filter(|record| filters.max_price.is_none_or(|max| record.hourly_rate() <= max))
		.filter(|record| state.as_deref().is_none_or(|state| matches_state(record, state)))
		.filter(|record| day.as_deref().is_none_or(|day| matches_day(record, day)))
		.filter(|record| {
			!filters.platform_endorsed_only || is_platform_endorsed(record, endorsements)
		})
		.cloned()
		.collect()
}

fn normalized(value: Option<&str>) -> Option<String> {
	value.map(str::trim).filter(|value| !value.is_empty()).map(str::to_lowercase)
}

fn matches_query(record: &ProviderRecord, query: &str) -> bool {
	record.searchable_text().to_lowercase().contains(query)
}

fn matches_state(record: &ProviderRecord, state: &str) -> bool {
	record.address.state.as_deref().is_some_and(|value| value.to_lowercase().contains(state))
}

fn matches_day(record: &ProviderRecord, day: &str) -> bool {
	record.availability.iter().any(|value| value.trim().to_lowercase() == day)
}

fn is_platform_endorsed(
	record: &ProviderRecord,
	endorsements: &HashMap<String, EndorsementSummary>,
) -> bool {
	endorsements.get(&record.id).is_some_and(|summary| summary.platform_endorsed)
}
