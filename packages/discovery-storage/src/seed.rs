use std::{fs, path::Path};

use crate::{Error, Result};
use discovery_domain::provider::ProviderRecord;

/// Loads the fixture provider set. The result is treated as immutable for the process lifetime.
pub fn load_seed(path: &Path) -> Result<Vec<ProviderRecord>> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadSeed { path: path.to_path_buf(), source: err })?;

	parse_seed(&raw)
}

pub fn parse_seed(raw: &str) -> Result<Vec<ProviderRecord>> {
	Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_seed_array() {
		let raw = r#"[
			{
				"id": "prov_0001",
				"owner_account_id": "acct_0001",
				"profile_slug": "jane-doe-bos-k3x9",
				"first_name": "Jane",
				"last_name": "Doe",
				"onboarding_complete": true,
				"moderation_status": "APPROVED",
				"created_at": "2024-03-01T12:00:00Z"
			}
		]"#;
		let records = parse_seed(raw).expect("Failed to parse seed.");

		assert_eq!(records.len(), 1);
		assert!(records[0].created_at.is_some());
	}

	#[test]
	fn rejects_non_array_seed() {
		assert!(matches!(parse_seed("{}"), Err(Error::SerdeJson(_))));
	}
}
