use std::sync::LazyLock;

use regex::Regex;

static UUID_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
		.expect("UUID pattern must compile.")
});

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenShape {
	/// Looks like a provider id or account id; try id lookups before the slug.
	Identifier,
	Slug,
}

pub fn classify_token(token: &str, cfg: &discovery_config::Identity) -> TokenShape {
	let token = token.trim();

	if UUID_SHAPE.is_match(token) || token.starts_with(cfg.provider_id_prefix.as_str()) {
		TokenShape::Identifier
	} else {
		TokenShape::Slug
	}
}
