use crate::{Result, db::Db, models::AuditEvent};

pub async fn insert_audit_event(db: &Db, event: &AuditEvent) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO audit_events (
	event_id,
	event_type,
	resource_type,
	resource_id,
	payload,
	created_at
)
VALUES ($1, $2, $3, $4, $5, $6)",
	)
	.bind(event.event_id)
	.bind(event.event_type.as_str())
	.bind(event.resource_type.as_str())
	.bind(event.resource_id.as_deref())
	.bind(&event.payload)
	.bind(event.created_at)
	.execute(&db.pool)
	.await?;

	Ok(())
}

pub async fn list_audit_events(db: &Db, event_type: &str) -> Result<Vec<AuditEvent>> {
	let events: Vec<AuditEvent> = sqlx::query_as(
		"\
SELECT event_id, event_type, resource_type, resource_id, payload, created_at
FROM audit_events
WHERE event_type = $1
ORDER BY created_at ASC",
	)
	.bind(event_type)
	.fetch_all(&db.pool)
	.await?;

	Ok(events)
}
