use std::time::Duration;

use discovery_domain::{
	endorsement::EndorsementKind, filters::SearchFilters, provider::ModerationStatus,
};
use discovery_service::{DiscoveryService, Stores};
use discovery_storage::{audit, db::Db, endorsements, models::AuditEvent};
use discovery_testkit::{ScratchDatabase, fixtures};

#[tokio::test]
#[ignore = "Requires external Postgres. Set DISCOVERY_PG_DSN to run."]
async fn moderation_persists_across_service_instances() {
	let Some(scratch) =
		ScratchDatabase::from_env().await.expect("Failed to create scratch database.")
	else {
		eprintln!("Skipping moderation_persists_across_service_instances; set DISCOVERY_PG_DSN to run.");

		return;
	};
	let pg = scratch.postgres(2);
	let db = Db::connect(&pg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	let mut cfg = fixtures::config();

	cfg.providers.ranked_search.enabled = false;

	let seed = vec![
		fixtures::provider_with("prov_p1", |record| {
			record.pricing.hourly_rate = Some(150.0);
			record.address.state = Some("CA".to_string());
		}),
		fixtures::provider("prov_p2"),
	];

	endorsements::insert_endorsement(
		&db,
		&fixtures::endorsement("prov_p2", EndorsementKind::Platform),
	)
	.await
	.expect("Failed to insert endorsement.");

	let service = DiscoveryService::new(cfg.clone(), Stores::postgres(db, seed.clone()));
	let filters = SearchFilters { platform_endorsed_only: true, ..SearchFilters::default() };
	let page = service.search(filters).await.expect("Search failed.");

	assert_eq!(page.total, 1);
	assert_eq!(page.providers[0].provider.id, "prov_p2");
	assert_eq!(page.providers[0].endorsements.trust_score, 50);

	service.moderate("prov_p1", ModerationStatus::Rejected).await.expect("Moderate failed.");

	let reopened = Db::connect(&pg).await.expect("Failed to reconnect to Postgres.");
	let restarted = DiscoveryService::new(cfg, Stores::postgres(reopened, seed));
	let within = SearchFilters {
		max_price: Some(200.0),
		state: Some("ca".to_string()),
		..SearchFilters::default()
	};

	assert!(restarted.search(within).await.expect("Search failed.").providers.is_empty());

	let resolved = restarted
		.resolve_provider("slug-prov_p1")
		.await
		.expect("Resolve failed.")
		.expect("Provider must resolve.");

	assert_eq!(resolved.moderation_status, ModerationStatus::Rejected);

	let check = Db::connect(&pg).await.expect("Failed to reconnect to Postgres.");
	let mut moderated: Vec<AuditEvent> = Vec::new();

	for _ in 0..20 {
		moderated = audit::list_audit_events(&check, "moderate").await.expect("Audit read failed.");

		if !moderated.is_empty() {
			break;
		}

		tokio::time::sleep(Duration::from_millis(50)).await;
	}

	assert_eq!(moderated.len(), 1);
	assert_eq!(moderated[0].resource_id.as_deref(), Some("prov_p1"));

	scratch.discard().await.expect("Failed to drop scratch database.");
}
