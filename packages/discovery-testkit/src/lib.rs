pub mod fixtures;

mod error;

pub use error::{Error, Result};

use std::{env, str::FromStr, thread};

use sqlx::{
	ConnectOptions, Connection, Executor,
	postgres::{PgConnectOptions, PgConnection},
};
use uuid::Uuid;

use discovery_config::Postgres;

const DSN_ENV: &str = "DISCOVERY_PG_DSN";
const MAINTENANCE_DATABASE: &str = "postgres";

/// A database created for one test on the server named by `DISCOVERY_PG_DSN`.
///
/// The database is dropped by [`ScratchDatabase::discard`], or on drop when a test panics first.
pub struct ScratchDatabase {
	name: String,
	dsn: String,
	maintenance: PgConnectOptions,
	discarded: bool,
}
impl ScratchDatabase {
	/// Returns `Ok(None)` when `DISCOVERY_PG_DSN` is unset so callers can skip.
	pub async fn from_env() -> Result<Option<Self>> {
		match env::var(DSN_ENV) {
			Ok(base_dsn) => Self::create(&base_dsn).await.map(Some),
			Err(_) => Ok(None),
		}
	}

	pub async fn create(base_dsn: &str) -> Result<Self> {
		let base = PgConnectOptions::from_str(base_dsn).map_err(Error::InvalidDsn)?;
		let maintenance = base.clone().database(MAINTENANCE_DATABASE);
		let name = format!("discovery_test_{}", Uuid::new_v4().simple());
		let scratch_err = |action, source| Error::Scratch { name: name.clone(), action, source };
		let mut conn = PgConnection::connect_with(&maintenance)
			.await
			.map_err(|err| scratch_err("created", err))?;

		conn.execute(format!(r#"CREATE DATABASE "{name}""#).as_str())
			.await
			.map_err(|err| scratch_err("created", err))?;

		let dsn = base.database(&name).to_url_lossy().to_string();

		Ok(Self { name, dsn, maintenance, discarded: false })
	}

	/// Storage settings pointing at this database.
	pub fn postgres(&self, pool_max_conns: u32) -> Postgres {
		Postgres { dsn: self.dsn.clone(), pool_max_conns }
	}

	pub async fn discard(mut self) -> Result<()> {
		self.discarded = true;

		drop_database(&self.name, &self.maintenance).await
	}
}
impl Drop for ScratchDatabase {
	fn drop(&mut self) {
		if self.discarded {
			return;
		}

		let name = self.name.clone();
		let maintenance = self.maintenance.clone();
		// The test's runtime may be shutting down, so drop from a fresh one.
		let handle = thread::spawn(move || {
			let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

			runtime.block_on(drop_database(&name, &maintenance)).map_err(std::io::Error::other)
		});

		match handle.join() {
			Ok(Err(err)) => eprintln!("Leaked scratch database {}: {err}.", self.name),
			Err(_) => eprintln!("Leaked scratch database {}.", self.name),
			Ok(Ok(())) => {},
		}
	}
}

async fn drop_database(name: &str, maintenance: &PgConnectOptions) -> Result<()> {
	let scratch_err =
		|source| Error::Scratch { name: name.to_string(), action: "dropped", source };
	let mut conn = PgConnection::connect_with(maintenance).await.map_err(scratch_err)?;

	sqlx::query(
		"\
SELECT pg_terminate_backend(pid)
FROM pg_stat_activity
WHERE datname = $1 AND pid <> pg_backend_pid()",
	)
	.bind(name)
	.execute(&mut conn)
	.await
	.map_err(scratch_err)?;
	conn.execute(format!(r#"DROP DATABASE IF EXISTS "{name}""#).as_str())
		.await
		.map_err(scratch_err)?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn malformed_dsn_is_rejected_before_connecting() {
		let err = ScratchDatabase::create("not a dsn")
			.await
			.err()
			.expect("Expected a malformed DSN to be rejected.");

		assert!(matches!(err, Error::InvalidDsn(_)), "Unexpected error: {err}");
	}
}
