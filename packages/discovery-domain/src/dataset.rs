use std::collections::HashMap;

use crate::provider::ProviderRecord;

/// Merges the seed set with the overlay into one record per id.
///
/// Iterates `seed ++ overlay` and keeps the last record seen for each id, so overlay records
/// replace seed records wholesale. Each id keeps the position of its first occurrence.
pub fn reconcile(seed: &[ProviderRecord], overlay: &[ProviderRecord]) -> Vec<ProviderRecord> {
	let mut positions: HashMap<&str, usize> = HashMap::with_capacity(seed.len() + overlay.len());
	let mut merged: Vec<ProviderRecord> = Vec::with_capacity(seed.len() + overlay.len());

	for record in seed.iter().chain(overlay) {
		match positions.get(record.id.as_str()) {
			Some(&index) => merged[index] = record.clone(),
			None => {
				positions.insert(record.id.as_str(), merged.len());
				merged.push(record.clone());
			},
		}
	}

	merged
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;
	use crate::provider::{Address, ModerationStatus, Pricing};

	fn record(id: &str, first_name: &str) -> ProviderRecord {
		ProviderRecord {
			id: id.to_string(),
			owner_account_id: format!("acct-{id}"),
			profile_slug: format!("{first_name}-{id}").to_lowercase(),
			first_name: first_name.to_string(),
			last_name: "Doe".to_string(),
			professional_title: None,
			bio: None,
			specialties: Default::default(),
			address: Address::default(),
			pricing: Pricing::default(),
			years_experience: None,
			availability: Default::default(),
			onboarding_complete: true,
			moderation_status: ModerationStatus::Approved,
			is_published: None,
			created_at: None,
			updated_at: None,
		}
	}

	#[test]
	fn overlay_replaces_seed_record_in_place() {
		let seed = vec![record("p1", "Ada"), record("p2", "Ben"), record("p3", "Cy")];
		let overlay = vec![record("p4", "Dee"), record("p2", "Bea")];
		let merged = reconcile(&seed, &overlay);
		let ids: Vec<&str> = merged.iter().map(|record| record.id.as_str()).collect();

		assert_eq!(ids, vec!["p1", "p2", "p3", "p4"]);
		assert_eq!(merged[1].first_name, "Bea");
	}

	#[test]
	fn duplicate_ids_collapse_to_the_last_occurrence() {
		let seed = vec![record("p1", "Ada"), record("p1", "Amy")];
		let overlay = vec![record("p1", "Ana"), record("p1", "Ava"), record("p5", "Eve")];
		let merged = reconcile(&seed, &overlay);
		let unique: HashSet<&str> = merged.iter().map(|record| record.id.as_str()).collect();

		assert_eq!(merged.len(), unique.len());
		assert_eq!(merged.len(), 2);
		assert_eq!(merged[0].first_name, "Ava");
	}

	#[test]
	fn empty_inputs_yield_empty_dataset() {
		assert!(reconcile(&[], &[]).is_empty());
		assert_eq!(reconcile(&[], &[record("p1", "Ada")]).len(), 1);
	}
}
