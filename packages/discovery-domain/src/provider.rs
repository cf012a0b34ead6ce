use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModerationStatus {
	#[default]
	Pending,
	Approved,
	Rejected,
}
impl ModerationStatus {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Pending => "PENDING",
			Self::Approved => "APPROVED",
			Self::Rejected => "REJECTED",
		}
	}
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Address {
	#[serde(default)]
	pub city: Option<String>,
	#[serde(default)]
	pub state: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Pricing {
	#[serde(default)]
	pub hourly_rate: Option<f64>,
}

/// A provider's public and operational profile.
///
/// `id` is the stable identity. `profile_slug` is unique but may change over the record's
/// lifetime, and `owner_account_id` maps 1:1 to the underlying user account.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ProviderRecord {
	pub id: String,
	pub owner_account_id: String,
	pub profile_slug: String,
	pub first_name: String,
	pub last_name: String,
	#[serde(default)]
	pub professional_title: Option<String>,
	#[serde(default)]
	pub bio: Option<String>,
	#[serde(default)]
	pub specialties: BTreeSet<String>,
	#[serde(default)]
	pub address: Address,
	#[serde(default)]
	pub pricing: Pricing,
	#[serde(default)]
	pub years_experience: Option<u32>,
	/// Weekday names the provider takes sessions on, e.g. "monday".
	#[serde(default)]
	pub availability: BTreeSet<String>,
	#[serde(default)]
	pub onboarding_complete: bool,
	#[serde(default)]
	pub moderation_status: ModerationStatus,
	/// Absent means published; only an explicit `false` hides the record.
	#[serde(default)]
	pub is_published: Option<bool>,
	#[serde(default, with = "crate::timestamp")]
	pub created_at: Option<OffsetDateTime>,
	#[serde(default, with = "crate::timestamp")]
	pub updated_at: Option<OffsetDateTime>,
}
impl ProviderRecord {
	pub fn hourly_rate(&self) -> f64 {
		self.pricing.hourly_rate.unwrap_or(0.0)
	}

	pub fn years_experience(&self) -> u32 {
		self.years_experience.unwrap_or(0)
	}

	/// Text the free-form query is matched against.
	pub fn searchable_text(&self) -> String {
		[
			self.first_name.as_str(),
			self.last_name.as_str(),
			self.bio.as_deref().unwrap_or_default(),
			self.professional_title.as_deref().unwrap_or_default(),
		]
		.join(" ")
	}
}

/// Onboarding, moderation, and publish gates a record must pass to appear in search results.
///
/// Evaluated on every search; moderation and publish state change out of band.
pub fn is_search_eligible(record: &ProviderRecord) -> bool {
	record.onboarding_complete
		&& record.moderation_status == ModerationStatus::Approved
		&& record.is_published != Some(false)
}

/// Applies a moderation decision. Approval also publishes the record.
pub fn apply_moderation(record: &mut ProviderRecord, status: ModerationStatus, now: OffsetDateTime) {
	record.moderation_status = status;

	if status == ModerationStatus::Approved {
		record.is_published = Some(true);
	}

	record.updated_at = Some(now);
}
