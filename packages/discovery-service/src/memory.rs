//! Process-local stores, used when no Postgres DSN is configured and as fakes in tests.

use std::sync::{Arc, Mutex};

use crate::{
	AuditSink, BoxFuture, EndorsementStore, OverlayStore, Result, SeedDataset, Stores,
};
use discovery_domain::{endorsement::EndorsementRecord, provider::ProviderRecord};
use discovery_storage::models::AuditEvent;

pub struct StaticSeed {
	records: Arc<Vec<ProviderRecord>>,
}
impl StaticSeed {
	pub fn new(records: Vec<ProviderRecord>) -> Self {
		Self { records: Arc::new(records) }
	}
}
impl SeedDataset for StaticSeed {
	fn read<'a>(&'a self) -> BoxFuture<'a, Result<Vec<ProviderRecord>>> {
		let records = self.records.as_ref().clone();

		Box::pin(async move { Ok(records) })
	}
}

#[derive(Default)]
pub struct InMemoryOverlay {
	records: Mutex<Vec<ProviderRecord>>,
}
impl InMemoryOverlay {
	pub fn new(records: Vec<ProviderRecord>) -> Self {
		Self { records: Mutex::new(records) }
	}

	pub fn snapshot(&self) -> Vec<ProviderRecord> {
		self.records.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}
}
impl OverlayStore for InMemoryOverlay {
	fn read<'a>(&'a self) -> BoxFuture<'a, Result<Vec<ProviderRecord>>> {
		let records = self.snapshot();

		Box::pin(async move { Ok(records) })
	}

	fn write<'a>(&'a self, records: Vec<ProviderRecord>) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			*self.records.lock().unwrap_or_else(|err| err.into_inner()) = records;

			Ok(())
		})
	}
}

#[derive(Default)]
pub struct InMemoryEndorsements {
	records: Mutex<Vec<EndorsementRecord>>,
}
impl InMemoryEndorsements {
	pub fn new(records: Vec<EndorsementRecord>) -> Self {
		Self { records: Mutex::new(records) }
	}

	pub fn push(&self, endorsement: EndorsementRecord) {
		self.records.lock().unwrap_or_else(|err| err.into_inner()).push(endorsement);
	}
}
impl EndorsementStore for InMemoryEndorsements {
	fn read<'a>(&'a self) -> BoxFuture<'a, Result<Vec<EndorsementRecord>>> {
		let records = self.records.lock().unwrap_or_else(|err| err.into_inner()).clone();

		Box::pin(async move { Ok(records) })
	}
}

/// Keeps audit events in memory and mirrors them to the debug log.
#[derive(Default)]
pub struct MemoryAuditSink {
	events: Mutex<Vec<AuditEvent>>,
}
impl MemoryAuditSink {
	pub fn events(&self) -> Vec<AuditEvent> {
		self.events.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}
}
impl AuditSink for MemoryAuditSink {
	fn record(&self, event: AuditEvent) {
		tracing::debug!(
			event_type = %event.event_type,
			resource_type = %event.resource_type,
			resource_id = ?event.resource_id,
			"Audit event recorded."
		);

		self.events.lock().unwrap_or_else(|err| err.into_inner()).push(event);
	}
}

impl Stores {
	pub fn in_memory(seed: Vec<ProviderRecord>) -> Self {
		Self::new(
			Arc::new(StaticSeed::new(seed)),
			Arc::new(InMemoryOverlay::default()),
			Arc::new(InMemoryEndorsements::default()),
			Arc::new(MemoryAuditSink::default()),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use discovery_testkit::fixtures;

	#[tokio::test]
	async fn overlay_write_lands_only_when_awaited() {
		let overlay = InMemoryOverlay::new(vec![fixtures::provider("prov_a")]);
		let replacement = vec![fixtures::provider("prov_b")];

		drop(overlay.write(replacement.clone()));

		assert_eq!(overlay.snapshot()[0].id, "prov_a");

		overlay.write(replacement).await.expect("Write failed.");

		assert_eq!(overlay.snapshot()[0].id, "prov_b");
	}
}
