use std::path::PathBuf;

use discovery_config::{
	Config, Identity, Providers, RankedSearchConfig, Security, Service, Storage,
};
use discovery_domain::{
	endorsement::{EndorsementKind, EndorsementRecord},
	provider::{Address, ModerationStatus, Pricing, ProviderRecord},
};

/// An approved, onboarded, published provider with no optional fields set.
pub fn provider(id: &str) -> ProviderRecord {
	ProviderRecord {
		id: id.to_string(),
		owner_account_id: format!("acct_{id}"),
		profile_slug: format!("slug-{id}"),
		first_name: "Jane".to_string(),
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
		is_published: Some(true),
		created_at: None,
		updated_at: None,
	}
}

pub fn provider_with(id: &str, build: impl FnOnce(&mut ProviderRecord)) -> ProviderRecord {
	let mut record = provider(id);

	build(&mut record);

	record
}

pub fn endorsement(provider_id: &str, kind: EndorsementKind) -> EndorsementRecord {
	EndorsementRecord {
		id: format!("end_{}", uuid::Uuid::new_v4().simple()),
		endorsed_provider_id: provider_id.to_string(),
		endorser_id: None,
		kind,
		created_at: None,
		deleted_at: None,
	}
}

/// In-memory config with remote search pointed at an unroutable address.
pub fn config() -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			admin_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		storage: Storage { seed_path: PathBuf::from("seed/providers.json"), postgres: None },
		providers: Providers {
			ranked_search: RankedSearchConfig {
				enabled: true,
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: "test-key".to_string(),
				path: "/rest/v1/rpc/search_providers".to_string(),
				timeout_ms: 500,
				default_headers: Default::default(),
			},
		},
		identity: Identity::default(),
		security: Security { bind_localhost_only: true },
	}
}
