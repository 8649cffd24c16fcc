//! Group based access resolution
//!
//! Maps an LDAP user's group memberships to its access, using the group lists
//! in [`LdapAccessSettings`]:
//!
//! 1. Membership in any super access group grants super user access and ends
//!    the resolution
//! 2. Membership in a site's view groups grants view access to the site
//! 3. Membership in a site's admin groups grants admin access to the site,
//!    replacing view access granted in step 2
//!
//! The result is never cached; it is recomputed on each call from the current
//! setting values.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

use crate::access_settings::LdapAccessSettings;
use crate::prelude::*;

/// Access level on a site. Ordered from lowest to highest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub enum AccessLevel {
	#[serde(rename = "view")]
	View,
	#[serde(rename = "admin")]
	Admin,
}

impl AccessLevel {
	pub fn as_str(&self) -> &'static str {
		match self {
			AccessLevel::View => "view",
			AccessLevel::Admin => "admin",
		}
	}
}

/// The user whose access is resolved, described by its group memberships.
///
/// `groups: None` means the entity carries no group information at all. It is
/// treated exactly like an empty membership list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Principal {
	groups: Option<Vec<String>>,
}

impl Principal {
	pub fn new(groups: impl IntoIterator<Item = impl Into<String>>) -> Self {
		Self { groups: Some(groups.into_iter().map(Into::into).collect()) }
	}

	/// A principal without any group information
	pub fn without_groups() -> Self {
		Self { groups: None }
	}

	/// Reads the `groups` attribute of an LDAP entity.
	///
	/// A missing or non-array attribute yields a principal without groups;
	/// non-string members are skipped.
	pub fn from_ldap_entry(entry: &serde_json::Value) -> Self {
		let groups = entry.get("groups").and_then(serde_json::Value::as_array).map(|groups| {
			groups.iter().filter_map(serde_json::Value::as_str).map(str::to_string).collect()
		});
		Self { groups }
	}

	pub fn groups(&self) -> Option<&[String]> {
		self.groups.as_deref()
	}

	/// Whether the principal is a member of at least one of `groups`
	pub fn member_of_any(&self, groups: &[String]) -> bool {
		self.groups().is_some_and(|own| own.iter().any(|g| groups.contains(g)))
	}
}

/// Resolved access of a principal
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessGrant {
	/// `{"superuser": true}`
	Superuser,
	/// Access level to site ids, e.g. `{"view": [1, 2], "admin": [3]}`.
	/// Never empty, and a site appears under one level only.
	Sites(BTreeMap<AccessLevel, Vec<SiteId>>),
	/// `{"superuser": false}` - no access at all
	NoAccess,
}

impl AccessGrant {
	pub fn is_superuser(&self) -> bool {
		matches!(self, AccessGrant::Superuser)
	}

	/// Site ids granted at exactly `level`
	pub fn sites(&self, level: AccessLevel) -> &[SiteId] {
		match self {
			AccessGrant::Sites(by_level) => by_level.get(&level).map(Vec::as_slice).unwrap_or_default(),
			_ => &[],
		}
	}

	/// Level granted on a site, if any (super users are not site specific)
	pub fn level_for(&self, site_id: SiteId) -> Option<AccessLevel> {
		match self {
			AccessGrant::Sites(by_level) => by_level
				.iter()
				.find(|(_, sites)| sites.contains(&site_id))
				.map(|(level, _)| *level),
			_ => None,
		}
	}
}

impl Serialize for AccessGrant {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self {
			AccessGrant::Superuser => {
				let mut map = serializer.serialize_map(Some(1))?;
				map.serialize_entry("superuser", &true)?;
				map.end()
			}
			AccessGrant::NoAccess => {
				let mut map = serializer.serialize_map(Some(1))?;
				map.serialize_entry("superuser", &false)?;
				map.end()
			}
			AccessGrant::Sites(by_level) => serializer.collect_map(by_level),
		}
	}
}

fn is_superuser(settings: &LdapAccessSettings, principal: &Principal) -> bool {
	principal.member_of_any(settings.super_access_groups())
}

/// Resolves the access of `principal`. Never fails: a principal without
/// groups simply has no access.
pub fn resolve(settings: &LdapAccessSettings, principal: &Principal) -> AccessGrant {
	if is_superuser(settings, principal) {
		debug!("User with groups {:?} found to be superuser", principal.groups());
		return AccessGrant::Superuser;
	}

	let sites = settings.sites();
	let mut site_access: Vec<Option<AccessLevel>> = vec![None; sites.len()];

	for (access, site) in site_access.iter_mut().zip(sites) {
		if principal.member_of_any(settings.site_view_groups(site.id)) {
			*access = Some(AccessLevel::View);
		}
	}

	// Second pass so admin always wins over view for the same site
	for (access, site) in site_access.iter_mut().zip(sites) {
		if principal.member_of_any(settings.site_admin_groups(site.id)) {
			*access = Some(AccessLevel::Admin);
		}
	}

	let mut by_level: BTreeMap<AccessLevel, Vec<SiteId>> = BTreeMap::new();
	for (access, site) in site_access.into_iter().zip(sites) {
		if let Some(level) = access {
			by_level.entry(level).or_default().push(site.id);
		}
	}

	if by_level.is_empty() {
		AccessGrant::NoAccess
	} else {
		AccessGrant::Sites(by_level)
	}
}


// vim: ts=4
