//! Common types used throughout the access resolver.

use serde::{Deserialize, Serialize};

// SiteId //
//********//
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SiteId(pub u32);

impl std::fmt::Display for SiteId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for SiteId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_u32(self.0)
	}
}

impl<'de> Deserialize<'de> for SiteId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(SiteId(u32::deserialize(deserializer)?))
	}
}

// Site //
//******//
/// A site (tenant) that access levels are granted against
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
	pub id: SiteId,
	pub name: String,
	pub main_url: String,
}

// vim: ts=4
