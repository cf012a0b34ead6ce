use time::OffsetDateTime;

use crate::{Result, db::Db, models::OverlayRow};
use discovery_domain::{dataset, provider::ProviderRecord};

/// Reads the whole overlay in insertion order.
pub async fn read_overlay(db: &Db) -> Result<Vec<ProviderRecord>> {
	let rows: Vec<OverlayRow> = sqlx::query_as(
		"\
SELECT provider_id, position, record, updated_at
FROM provider_overlay
ORDER BY position ASC, provider_id ASC",
	)
	.fetch_all(&db.pool)
	.await?;
	let mut records = Vec::with_capacity(rows.len());

	for row in rows {
		records.push(serde_json::from_value(row.record)?);
	}

	Ok(records)
}

/// Replaces the whole overlay collection in one transaction.
///
/// Repeated ids collapse the same way the dataset merge does: the first position and the last
/// record win.
pub async fn write_overlay(db: &Db, records: &[ProviderRecord]) -> Result<()> {
	let now = OffsetDateTime::now_utc();
	let mut tx = db.pool.begin().await?;

	sqlx::query("DELETE FROM provider_overlay").execute(&mut *tx).await?;

	for (position, record) in positioned(records) {
		let payload = serde_json::to_value(&record)?;

		sqlx::query(
			"\
INSERT INTO provider_overlay (provider_id, position, record, updated_at)
VALUES ($1, $2, $3, $4)",
		)
		.bind(record.id.as_str())
		.bind(position)
		.bind(payload)
		.bind(now)
		.execute(&mut *tx)
		.await?;
	}

	tx.commit().await?;

	Ok(())
}

fn positioned(records: &[ProviderRecord]) -> Vec<(i64, ProviderRecord)> {
	dataset::reconcile(&[], records)
		.into_iter()
		.enumerate()
		.map(|(position, record)| (position as i64, record))
		.collect()
}
