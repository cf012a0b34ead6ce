use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
pub struct OverlayRow {
	pub provider_id: String,
	pub position: i64,
	pub record: Value,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct EndorsementRow {
	pub endorsement_id: String,
	pub endorsed_provider_id: String,
	pub endorser_id: Option<String>,
	pub kind: String,
	pub created_at: OffsetDateTime,
	pub deleted_at: Option<OffsetDateTime>,
}

#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct AuditEvent {
	pub event_id: Uuid,
	pub event_type: String,
	pub resource_type: String,
	pub resource_id: Option<String>,
	pub payload: Value,
	pub created_at: OffsetDateTime,
}
impl AuditEvent {
	pub fn new(
		event_type: impl Into<String>,
		resource_type: impl Into<String>,
		resource_id: Option<String>,
		payload: Value,
	) -> Self {
		Self {
			event_id: Uuid::new_v4(),
			event_type: event_type.into(),
			resource_type: resource_type.into(),
			resource_id,
			payload,
			created_at: OffsetDateTime::now_utc(),
		}
	}
}
