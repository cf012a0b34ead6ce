use crate::{DiscoveryService, Result};
use discovery_config::Identity;
use discovery_domain::{
	identity::{self, TokenShape},
	provider::ProviderRecord,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Lookup {
	BySlug,
	ById,
	ByOwnerAccount,
}
impl Lookup {
	/// Lookups to attempt for a token, in order.
	///
	/// Identifier-shaped tokens skip the leading slug lookup and retry it last, so a slug that
	/// happens to look like an id still resolves. Slug-shaped tokens never repeat it.
	pub fn plan(shape: TokenShape) -> &'static [Lookup] {
		match shape {
			TokenShape::Slug => &[Lookup::BySlug, Lookup::ById, Lookup::ByOwnerAccount],
			TokenShape::Identifier => &[Lookup::ById, Lookup::ByOwnerAccount, Lookup::BySlug],
		}
	}

	fn matches(self, record: &ProviderRecord, token: &str) -> bool {
		match self {
			Lookup::BySlug => record.profile_slug == token,
			Lookup::ById => record.id == token,
			Lookup::ByOwnerAccount => record.owner_account_id == token,
		}
	}
}

/// Finds the record a token refers to. The first lookup with a hit wins.
pub fn resolve_in<'a>(
	dataset: &'a [ProviderRecord],
	token: &str,
	cfg: &Identity,
) -> Option<&'a ProviderRecord> {
	let token = token.trim();

	if token.is_empty() {
		return None;
	}

	Lookup::plan(identity::classify_token(token, cfg))
		.iter()
		.find_map(|lookup| dataset.iter().find(|record| lookup.matches(record, token)))
}

impl DiscoveryService {
	/// Resolves a slug, provider id, or owner account id. Moderation state is not consulted.
	pub async fn resolve_provider(&self, token: &str) -> Result<Option<ProviderRecord>> {
		if token.trim().is_empty() {
			return Ok(None);
		}

		let dataset = self.stores.reconciled().await?;
		let found = resolve_in(&dataset, token, &self.cfg.identity).cloned();

		tracing::debug!(token, found = found.is_some(), "Provider resolution completed.");

		Ok(found)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use discovery_domain::provider::{Address, ModerationStatus, Pricing};

	fn record(id: &str, slug: &str, owner: &str) -> ProviderRecord {
		ProviderRecord {
			id: id.to_string(),
			owner_account_id: owner.to_string(),
			profile_slug: slug.to_string(),
			first_name: "Ada".to_string(),
			last_name: "Byron".to_string(),
			professional_title: None,
			bio: None,
			specialties: Default::default(),
			address: Address::default(),
			pricing: Pricing::default(),
			years_experience: None,
			availability: Default::default(),
			onboarding_complete: false,
			moderation_status: ModerationStatus::Pending,
			is_published: None,
			created_at: None,
			updated_at: None,
		}
	}

	#[test]
	fn slug_shaped_token_prefers_slug_over_id() {
		let dataset = vec![
			record("ada-byron", "ada-byron-x1", "acct_1"),
			record("prov_2", "ada-byron", "acct_2"),
		];
		let found = resolve_in(&dataset, "ada-byron", &Identity::default());

		assert_eq!(found.map(|record| record.id.as_str()), Some("prov_2"));
	}

	#[test]
	fn identifier_shaped_token_prefers_id_over_slug() {
		let dataset = vec![
			record("prov_1", "prov_2", "acct_1"),
			record("prov_2", "ada-byron", "acct_2"),
		];
		let found = resolve_in(&dataset, "prov_2", &Identity::default());

		assert_eq!(found.map(|record| record.id.as_str()), Some("prov_2"));
	}

	#[test]
	fn identifier_shaped_slug_still_resolves() {
		let dataset = vec![record("prov_1", "prov_legacy", "acct_1")];
		let found = resolve_in(&dataset, "prov_legacy", &Identity::default());

		assert_eq!(found.map(|record| record.id.as_str()), Some("prov_1"));
	}

	#[test]
	fn owner_account_and_miss() {
		let dataset = vec![record("prov_1", "ada-byron", "acct_9")];

		assert_eq!(
			resolve_in(&dataset, "acct_9", &Identity::default()).map(|record| record.id.as_str()),
			Some("prov_1")
		);
		assert!(resolve_in(&dataset, "nobody", &Identity::default()).is_none());
		assert!(resolve_in(&dataset, "  ", &Identity::default()).is_none());
	}
}
