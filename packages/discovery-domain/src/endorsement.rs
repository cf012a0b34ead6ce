use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

pub const PLATFORM_BOOST: u32 = 50;
pub const PEER_BOOST_PER: u32 = 5;
/// Peer signal saturates here so platform endorsement stays the dominant term.
pub const PEER_BOOST_CAP: u32 = 75;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EndorsementKind {
	Platform,
	Peer,
}
impl EndorsementKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Platform => "PLATFORM",
			Self::Peer => "PEER",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim().to_ascii_uppercase().as_str() {
			"PLATFORM" => Some(Self::Platform),
			"PEER" => Some(Self::Peer),
			_ => None,
		}
	}
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct EndorsementRecord {
	pub id: String,
	pub endorsed_provider_id: String,
	#[serde(default)]
	pub endorser_id: Option<String>,
	pub kind: EndorsementKind,
	#[serde(default, with = "crate::timestamp")]
	pub created_at: Option<OffsetDateTime>,
	#[serde(default, with = "crate::timestamp")]
	pub deleted_at: Option<OffsetDateTime>,
}
impl EndorsementRecord {
	pub fn is_live(&self) -> bool {
		self.deleted_at.is_none()
	}
}

/// Endorsement-derived fields attached to a search hit.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EndorsementSummary {
	pub platform_endorsed: bool,
	pub peer_endorsements: u32,
	pub trust_score: u32,
}
impl EndorsementSummary {
	pub fn new(platform_endorsed: bool, peer_endorsements: u32) -> Self {
		Self {
			platform_endorsed,
			peer_endorsements,
			trust_score: trust_score(platform_endorsed, peer_endorsements),
		}
	}
}

pub fn trust_score(platform_endorsed: bool, peer_endorsements: u32) -> u32 {
	let platform = if platform_endorsed { PLATFORM_BOOST } else { 0 };
	let peer = peer_endorsements.saturating_mul(PEER_BOOST_PER).min(PEER_BOOST_CAP);

	platform + peer
}

/// Folds live endorsements into one summary per endorsed provider id.
pub fn summarize(endorsements: &[EndorsementRecord]) -> HashMap<String, EndorsementSummary> {
	let mut counts: HashMap<String, (bool, u32)> = HashMap::new();

	for endorsement in endorsements.iter().filter(|endorsement| endorsement.is_live()) {
		let entry = counts.entry(endorsement.endorsed_provider_id.clone()).or_default();

		match endorsement.kind {
			EndorsementKind::Platform => entry.0 = true,
			EndorsementKind::Peer => entry.1 = entry.1.saturating_add(1),
		}
	}

	counts
		.into_iter()
		.map(|(provider_id, (platform, peers))| {
			(provider_id, EndorsementSummary::new(platform, peers))
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn endorsement(provider_id: &str, kind: EndorsementKind, deleted: bool) -> EndorsementRecord {
		EndorsementRecord {
			id: format!("{provider_id}-{}", kind.as_str()),
			endorsed_provider_id: provider_id.to_string(),
			endorser_id: None,
			kind,
			created_at: None,
			deleted_at: deleted.then(OffsetDateTime::now_utc),
		}
	}

	#[test]
	fn platform_endorsement_dominates_equal_peer_counts() {
		for peers in 0..30 {
			assert!(trust_score(true, peers) > trust_score(false, peers));
		}
	}

	#[test]
	fn peer_signal_is_monotonic_and_saturates() {
		let mut previous = 0;

		for peers in 0..40 {
			let score = trust_score(true, peers);

			assert!(score >= previous);

			previous = score;
		}

		assert_eq!(trust_score(true, 15), PLATFORM_BOOST + PEER_BOOST_CAP);
		assert_eq!(trust_score(true, u32::MAX), PLATFORM_BOOST + PEER_BOOST_CAP);
		assert_eq!(trust_score(false, 3), 15);
	}

	#[test]
	fn summarize_skips_soft_deleted_endorsements() {
		let summaries = summarize(&[
			endorsement("a", EndorsementKind::Platform, true),
			endorsement("a", EndorsementKind::Peer, false),
			endorsement("a", EndorsementKind::Peer, false),
			endorsement("b", EndorsementKind::Platform, false),
		]);

		assert_eq!(summaries["a"], EndorsementSummary::new(false, 2));
		assert_eq!(summaries["a"].trust_score, 10);
		assert_eq!(summaries["b"].trust_score, PLATFORM_BOOST);
	}
}
