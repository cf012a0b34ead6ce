// std
use std::time::Duration as StdDuration;

// crates.io
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};
use discovery_config::RankedSearchConfig;
use discovery_domain::{
	endorsement::EndorsementSummary,
	filters::SearchFilters,
	provider::ProviderRecord,
};

/// Arguments of the remote ranked-search procedure.
///
/// The procedure is matched by argument names, so this carries exactly its parameter list.
/// Sort order and the platform-endorsed-only flag are applied to the returned rows instead.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedSearchParams {
	pub search_query: Option<String>,
	pub specialty: Option<String>,
	pub state: Option<String>,
	pub max_price: Option<f64>,
	pub day: Option<String>,
	pub limit: u32,
	pub offset: u32,
}
impl From<&SearchFilters> for RankedSearchParams {
	fn from(filters: &SearchFilters) -> Self {
		Self {
			search_query: non_blank(filters.query.as_deref()),
			specialty: non_blank(filters.specialty.as_deref()),
			state: non_blank(filters.state.as_deref()),
			max_price: filters.max_price,
			day: non_blank(filters.day.as_deref()),
			limit: filters.limit,
			offset: filters.offset,
		}
	}
}

/// One row returned by the remote procedure: the provider columns plus ranking annotations.
///
/// `full_count` repeats the total match count on every row of a response.
#[derive(Clone, Debug, Deserialize)]
pub struct RankedSearchRow {
	#[serde(flatten)]
	pub provider: ProviderRecord,
	#[serde(default)]
	pub relevance: Option<f64>,
	pub full_count: u64,
	#[serde(default)]
	pub is_platform_endorsed: bool,
	#[serde(default)]
	pub peer_endorsement_count: u32,
}
impl RankedSearchRow {
	pub fn endorsements(&self) -> EndorsementSummary {
		EndorsementSummary::new(self.is_platform_endorsed, self.peer_endorsement_count)
	}
}

#[derive(Clone, Debug)]
pub enum RankedSearchReply {
	Rows(Vec<RankedSearchRow>),
	/// The procedure answered but reported an error in its payload.
	Failed { code: Option<String>, message: String },
}

pub async fn ranked_search(
	cfg: &RankedSearchConfig,
	params: &RankedSearchParams,
) -> Result<RankedSearchReply> {
	let client = Client::builder().timeout(StdDuration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(params)
		.send()
		.await?;
	let status = res.status();
	let json: Value = res.json().await?;

	if !status.is_success() {
		return match error_payload(&json) {
			Some(reply) => Ok(reply),
			None => Err(Error::InvalidResponse {
				message: format!("Ranked search returned HTTP {status} without an error body."),
			}),
		};
	}

	parse_ranked_search_response(json)
}

pub fn parse_ranked_search_response(json: Value) -> Result<RankedSearchReply> {
	if let Some(reply) = error_payload(&json) {
		return Ok(reply);
	}

	let rows = match json {
		Value::Array(rows) => rows,
		Value::Object(mut obj) => match obj.remove("data") {
			Some(Value::Array(rows)) => rows,
			Some(Value::Null) | None => Vec::new(),
			Some(_) =>
				return Err(Error::InvalidResponse {
					message: "Ranked search data field is not an array.".to_string(),
				}),
		},
		_ =>
			return Err(Error::InvalidResponse {
				message: "Ranked search response is not an array.".to_string(),
			}),
	};
	let mut parsed = Vec::with_capacity(rows.len());

	for (index, row) in rows.into_iter().enumerate() {
		let row: RankedSearchRow = serde_json::from_value(row).map_err(|err| {
			Error::InvalidResponse { message: format!("Ranked search row {index} is invalid: {err}") }
		})?;

		parsed.push(row);
	}

	Ok(RankedSearchReply::Rows(parsed))
}

fn error_payload(json: &Value) -> Option<RankedSearchReply> {
	let obj = json.as_object()?;
	let error = match obj.get("error") {
		Some(Value::Null) | None if obj.contains_key("message") && !obj.contains_key("data") => json,
		Some(Value::Null) | None => return None,
		Some(error) => error,
	};
	let message = match error {
		Value::String(message) => message.clone(),
		other => other
			.get("message")
			.and_then(Value::as_str)
			.unwrap_or("Ranked search reported an error.")
			.to_string(),
	};
	let code = error.get("code").and_then(Value::as_str).map(str::to_string);

	Some(RankedSearchReply::Failed { code, message })
}

fn non_blank(value: Option<&str>) -> Option<String> {
	value.map(str::trim).filter(|value| !value.is_empty()).map(str::to_string)
}
