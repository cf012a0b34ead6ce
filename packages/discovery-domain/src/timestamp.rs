//! RFC 3339 encoding for the optional timestamps carried by provider and endorsement rows.
//!
//! Use with `#[serde(default, with = "crate::timestamp")]`. Missing and `null` both decode to
//! `None`.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _, ser::Error as _};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	value
		.map(|at| at.format(&Rfc3339))
		.transpose()
		.map_err(S::Error::custom)?
		.serialize(serializer)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
where
	D: Deserializer<'de>,
{
	Option::<String>::deserialize(deserializer)?
		.map(|raw| OffsetDateTime::parse(&raw, &Rfc3339).map_err(D::Error::custom))
		.transpose()
}
