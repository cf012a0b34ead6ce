pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("DISCOVERY_PG_DSN is not a valid Postgres DSN: {0}")]
	InvalidDsn(sqlx::Error),

	#[error("Scratch database {name} could not be {action}: {source}")]
	Scratch {
		name: String,
		action: &'static str,
		#[source]
		source: sqlx::Error,
	},
}
