use std::sync::Arc;

use tokio::runtime::Handle;

use crate::{
	AuditSink, BoxFuture, EndorsementStore, OverlayStore, Result, Stores, memory::StaticSeed,
};
use discovery_domain::{endorsement::EndorsementRecord, provider::ProviderRecord};
use discovery_storage::{audit, db::Db, endorsements, models::AuditEvent, overlay};

#[derive(Clone)]
pub struct PgStore {
	db: Arc<Db>,
}
impl PgStore {
	pub fn new(db: Db) -> Self {
		Self { db: Arc::new(db) }
	}
}
impl OverlayStore for PgStore {
	fn read<'a>(&'a self) -> BoxFuture<'a, Result<Vec<ProviderRecord>>> {
		Box::pin(async move { Ok(overlay::read_overlay(&self.db).await?) })
	}

	fn write<'a>(&'a self, records: Vec<ProviderRecord>) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move { Ok(overlay::write_overlay(&self.db, &records).await?) })
	}
}
impl EndorsementStore for PgStore {
	fn read<'a>(&'a self) -> BoxFuture<'a, Result<Vec<EndorsementRecord>>> {
		Box::pin(async move { Ok(endorsements::read_endorsements(&self.db).await?) })
	}
}
impl AuditSink for PgStore {
	fn record(&self, event: AuditEvent) {
		let Ok(handle) = Handle::try_current() else {
			tracing::warn!(event_type = %event.event_type, "No async runtime; audit event dropped.");

			return;
		};
		let db = self.db.clone();

		handle.spawn(async move {
			if let Err(err) = audit::insert_audit_event(&db, &event).await {
				tracing::warn!(
					error = %err,
					event_type = %event.event_type,
					"Failed to persist audit event."
				);
			}
		});
	}
}

impl Stores {
	pub fn postgres(db: Db, seed: Vec<ProviderRecord>) -> Self {
		let store = Arc::new(PgStore::new(db));

		Self::new(Arc::new(StaticSeed::new(seed)), store.clone(), store.clone(), store)
	}
}
