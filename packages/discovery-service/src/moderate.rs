use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{DiscoveryService, Error, Result};
use discovery_domain::provider::{self, ModerationStatus, ProviderRecord};
use discovery_storage::models::AuditEvent;

#[derive(Clone, Debug, Deserialize)]
pub struct ModerateRequest {
	pub provider_id: String,
	pub status: ModerationStatus,
}

#[derive(Clone, Debug, Serialize)]
pub struct ModerateResponse {
	pub provider: ProviderRecord,
}

impl DiscoveryService {
	/// Sets a provider's moderation status and writes the overlay back.
	///
	/// A provider that only exists in the seed is copied into the overlay first.
	pub async fn moderate(
		&self,
		provider_id: &str,
		status: ModerationStatus,
	) -> Result<ProviderRecord> {
		let provider_id = provider_id.trim();

		if provider_id.is_empty() {
			return Err(Error::InvalidRequest {
				message: "provider_id must be non-empty.".to_string(),
			});
		}

		let mut overlay = self.stores.overlay.read().await?;
		let index = match overlay.iter().rposition(|record| record.id == provider_id) {
			Some(index) => index,
			None => {
				let seed = self.stores.seed.read().await?;
				let Some(record) = seed.into_iter().rev().find(|record| record.id == provider_id)
				else {
					return Err(Error::NotFound {
						message: format!("Provider {provider_id} does not exist."),
					});
				};

				overlay.push(record);

				overlay.len() - 1
			},
		};
		let previous = overlay[index].moderation_status;

		provider::apply_moderation(&mut overlay[index], status, OffsetDateTime::now_utc());

		let updated = overlay[index].clone();

		self.stores.overlay.write(overlay).await?;
		self.stores.audit.record(AuditEvent::new(
			"moderate",
			"provider",
			Some(updated.id.clone()),
			serde_json::json!({
				"from": previous.as_str(),
				"to": status.as_str(),
				"is_published": updated.is_published,
			}),
		));

		tracing::info!(
			provider_id = %updated.id,
			from = previous.as_str(),
			to = status.as_str(),
			"Provider moderated."
		);

		Ok(updated)
	}
}
