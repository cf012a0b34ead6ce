use std::sync::LazyLock;

use regex::Regex;
use time::OffsetDateTime;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

const SUFFIX_LEN: usize = 4;
const CITY_FALLBACK_LEN: usize = 3;

/// Keys are slugified city names.
const CITY_ABBREVIATIONS: &[(&str, &str)] = &[
	("atlanta", "atl"),
	("austin", "aus"),
	("baltimore", "bal"),
	("boston", "bos"),
	("chicago", "chi"),
	("dallas", "dal"),
	("denver", "den"),
	("detroit", "det"),
	("houston", "hou"),
	("las-vegas", "lvs"),
	("los-angeles", "lax"),
	("miami", "mia"),
	("minneapolis", "msp"),
	("nashville", "nsh"),
	("new-orleans", "nol"),
	("new-york", "nyc"),
	("new-york-city", "nyc"),
	("philadelphia", "phl"),
	("phoenix", "phx"),
	("pittsburgh", "pit"),
	("portland", "pdx"),
	("saint-louis", "stl"),
	("san-antonio", "sat"),
	("san-diego", "sdg"),
	("san-francisco", "sfo"),
	("san-jose", "sjc"),
	("seattle", "sea"),
	("st-louis", "stl"),
	("washington", "wdc"),
	("washington-dc", "wdc"),
];

static NON_ALPHANUMERIC: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("Slug pattern must compile."));

/// Lowercases, strips diacritics, and collapses every non-alphanumeric run into one hyphen.
pub fn slugify(raw: &str) -> String {
	let folded: String =
		raw.nfkd().filter(|ch| !is_combining_mark(*ch)).collect::<String>().to_lowercase();

	NON_ALPHANUMERIC.replace_all(&folded, "-").trim_matches('-').to_string()
}

pub fn city_abbreviation(city: &str) -> Option<String> {
	let slug = slugify(city);

	if slug.is_empty() {
		return None;
	}

	let known = CITY_ABBREVIATIONS
		.iter()
		.find(|(name, _)| *name == slug)
		.map(|(_, abbreviation)| (*abbreviation).to_string());

	// A short prefix can stop at a word break ("el-paso"), which would leave a doubled hyphen.
	Some(known.unwrap_or_else(|| {
		slug.chars().take(CITY_FALLBACK_LEN).collect::<String>().trim_end_matches('-').to_string()
	}))
}

/// Builds a profile slug from the provider's name plus a locality or specialty hint.
///
/// Not unique on its own: the time suffix only lowers the collision rate. Uniqueness is
/// enforced by the store.
pub fn generate_slug(
	first_name: &str,
	last_name: &str,
	specialty: Option<&str>,
	city: Option<&str>,
) -> String {
	generate_slug_at(first_name, last_name, specialty, city, OffsetDateTime::now_utc())
}

pub fn generate_slug_at(
	first_name: &str,
	last_name: &str,
	specialty: Option<&str>,
	city: Option<&str>,
	now: OffsetDateTime,
) -> String {
	let mut parts: Vec<String> =
		[slugify(first_name), slugify(last_name)].into_iter().filter(|part| !part.is_empty()).collect();
	let hint = match city.filter(|city| !city.trim().is_empty()) {
		Some(city) => city_abbreviation(city),
		None => specialty.and_then(specialty_hint),
	};

	if let Some(hint) = hint {
		parts.push(hint);
	}

	parts.push(time_suffix(now));

	parts.join("-")
}

fn specialty_hint(specialty: &str) -> Option<String> {
	let first_word = specialty.split_whitespace().next()?;
	let slug = slugify(first_word);

	(!slug.is_empty()).then_some(slug)
}

fn time_suffix(now: OffsetDateTime) -> String {
	let millis = (now.unix_timestamp_nanos() / 1_000_000).unsigned_abs();
	let encoded = to_base36(millis);
	let start = encoded.len().saturating_sub(SUFFIX_LEN);

	encoded[start..].to_string()
}

fn to_base36(mut value: u128) -> String {
	const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

	if value == 0 {
		return "0".to_string();
	}

	let mut out = Vec::new();

	while value > 0 {
		out.push(DIGITS[(value % 36) as usize]);
		value /= 36;
	}

	out.reverse();

	String::from_utf8(out).unwrap_or_default()
}
