use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: u32 = 20;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(from = "String", into = "&'static str")]
pub enum SortBy {
	#[default]
	Relevance,
	PriceLow,
	PriceHigh,
	Experience,
	Endorsements,
}
impl SortBy {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Relevance => "relevance",
			Self::PriceLow => "price_low",
			Self::PriceHigh => "price_high",
			Self::Experience => "experience",
			Self::Endorsements => "endorsements",
		}
	}
}
impl From<String> for SortBy {
	/// Unknown keys fall back to pass-through ordering.
	fn from(raw: String) -> Self {
		match raw.trim() {
			"price_low" => Self::PriceLow,
			"price_high" => Self::PriceHigh,
			"experience" => Self::Experience,
			"endorsements" => Self::Endorsements,
			_ => Self::Relevance,
		}
	}
}
impl From<SortBy> for &'static str {
	fn from(value: SortBy) -> Self {
		value.as_str()
	}
}

/// A client's search intent. Numeric bounds are not validated; out-of-range values simply
/// narrow or widen the result set.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct SearchFilters {
	pub query: Option<String>,
	pub specialty: Option<String>,
	pub max_price: Option<f64>,
	pub state: Option<String>,
	/// Weekday the client wants a session on.
	pub day: Option<String>,
	pub sort_by: SortBy,
	pub platform_endorsed_only: bool,
	pub limit: u32,
	pub offset: u32,
}
impl Default for SearchFilters {
	fn default() -> Self {
		Self {
			query: None,
			specialty: None,
			max_price: None,
			state: None,
			day: None,
			sort_by: SortBy::Relevance,
			platform_endorsed_only: false,
			limit: DEFAULT_LIMIT,
			offset: 0,
		}
	}
}
