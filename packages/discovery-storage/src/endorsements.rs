use crate::{Error, Result, db::Db, models::EndorsementRow};
use discovery_domain::endorsement::{EndorsementKind, EndorsementRecord};

pub async fn read_endorsements(db: &Db) -> Result<Vec<EndorsementRecord>> {
	let rows: Vec<EndorsementRow> = sqlx::query_as(
		"\
SELECT endorsement_id, endorsed_provider_id, endorser_id, kind, created_at, deleted_at
FROM provider_endorsements
ORDER BY created_at ASC, endorsement_id ASC",
	)
	.fetch_all(&db.pool)
	.await?;

	rows.into_iter().map(endorsement_from_row).collect()
}

pub async fn insert_endorsement(db: &Db, endorsement: &EndorsementRecord) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO provider_endorsements (
	endorsement_id,
	endorsed_provider_id,
	endorser_id,
	kind,
	created_at,
	deleted_at
)
VALUES ($1, $2, $3, $4, COALESCE($5, now()), $6)",
	)
	.bind(endorsement.id.as_str())
	.bind(endorsement.endorsed_provider_id.as_str())
	.bind(endorsement.endorser_id.as_deref())
	.bind(endorsement.kind.as_str())
	.bind(endorsement.created_at)
	.bind(endorsement.deleted_at)
	.execute(&db.pool)
	.await?;

	Ok(())
}

fn endorsement_from_row(row: EndorsementRow) -> Result<EndorsementRecord> {
	let kind = EndorsementKind::parse(&row.kind).ok_or_else(|| {
		Error::InvalidArgument(format!("Unknown endorsement kind '{}'.", row.kind))
	})?;

	Ok(EndorsementRecord {
		id: row.endorsement_id,
		endorsed_provider_id: row.endorsed_provider_id,
		endorser_id: row.endorser_id,
		kind,
		created_at: Some(row.created_at),
		deleted_at: row.deleted_at,
	})
}
