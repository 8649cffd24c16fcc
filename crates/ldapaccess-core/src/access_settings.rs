//! LDAP group access settings
//!
//! Registers the settings that configure group based access: a toggle, the
//! groups granting super user access, and for every site the groups granting
//! admin and view access.

use std::collections::HashSet;
use std::sync::Arc;

use ldapaccess_types::directory_adapter::DirectoryAdapter;
use ldapaccess_types::settings_adapter::SettingsAdapter;
use ldapaccess_types::site_adapter::SiteAdapter;

use crate::group_cache::GroupCatalog;
use crate::prelude::*;
use crate::settings::{
	rules, Setting, SettingDefinition, SettingType, SettingValue, SettingsRegistry,
};

pub const ACCESS_BY_LDAP_GROUPS: &str = "accessByLdapGroups";
pub const SUPER_ACCESS_GROUPS: &str = "superAccessGroups";

pub fn site_admin_groups_key(site_id: SiteId) -> String {
	format!("{}_adminGroups", site_id)
}

pub fn site_view_groups_key(site_id: SiteId) -> String {
	format!("{}_viewGroups", site_id)
}

/// Defaults shared by every group list setting
fn group_setting(
	name: String,
	title: String,
	description: String,
	groups: &[String],
) -> LaResult<SettingDefinition> {
	SettingDefinition::builder(name, SettingType::Array)
		.title(title)
		.description(description)
		.default(SettingValue::List(Vec::new()))
		.allowed_values(groups.iter().cloned())
		.transform(rules::group_list_transform)
		.validator(rules::allowed_values_validator)
		.build()
}

/// Register all access settings, sites in catalog order
pub async fn register_settings(
	registry: &mut SettingsRegistry,
	groups: &mut GroupCatalog,
	sites: &[Site],
) -> LaResult<()> {
	registry.register(
		SettingDefinition::builder(ACCESS_BY_LDAP_GROUPS, SettingType::Bool)
			.title("Access can be configured by LDAP user groups")
			.description("If enabled, the group access settings will be used for LDAP users")
			.default(SettingValue::Bool(false))
			.build()?,
	)?;

	let def = group_setting(
		SUPER_ACCESS_GROUPS.into(),
		"Super User Access by LDAP group".into(),
		"If the user is directly or recursively member of any of the groups, super user access \
		 will be granted"
			.into(),
		groups.groups().await,
	)?;
	registry.register(def)?;

	for site in sites {
		let def = group_setting(
			site_admin_groups_key(site.id),
			format!(
				"Admin access of LDAP groups to site: {} | {} | {}",
				site.id, site.name, site.main_url
			),
			format!(
				"If the user is directly or recursively member of any of the groups, admin access \
				 will be granted to site: {}",
				site.id
			),
			groups.groups().await,
		)?;
		registry.register(def)?;
	}

	for site in sites {
		let def = group_setting(
			site_view_groups_key(site.id),
			format!(
				"View access of LDAP groups to site: {} | {} | {}",
				site.id, site.name, site.main_url
			),
			format!(
				"If the user is directly or recursively member of any of the groups, view access \
				 will be granted to site: {}",
				site.id
			),
			groups.groups().await,
		)?;
		registry.register(def)?;
	}

	Ok(())
}

/// The access settings of one process: the settings registry plus the sites
/// it was built for
pub struct LdapAccessSettings {
	registry: SettingsRegistry,
	sites: Vec<Site>,
}

impl LdapAccessSettings {
	/// Builds the registry from the site catalog and the directory's groups,
	/// then loads stored values.
	///
	/// A directory that cannot list its groups does not fail initialization;
	/// see [`GroupCatalog`]. Sites are keyed by id: a repeated id is skipped,
	/// its first occurrence wins.
	pub async fn init(
		directory: Arc<dyn DirectoryAdapter>,
		site_adapter: &dyn SiteAdapter,
		settings_adapter: Arc<dyn SettingsAdapter>,
	) -> LaResult<Self> {
		let mut sites = site_adapter.list_all_sites().await?;
		let mut seen = HashSet::new();
		sites.retain(|site| {
			let first = seen.insert(site.id);
			if !first {
				warn!("Site {} listed more than once, ignoring '{}'", site.id, site.name);
			}
			first
		});
		let mut groups = GroupCatalog::new(directory);
		let mut registry = SettingsRegistry::new(settings_adapter);

		register_settings(&mut registry, &mut groups, &sites).await?;
		registry.load().await?;

		info!("Access settings initialized: {} settings for {} sites", registry.len(), sites.len());
		Ok(Self { registry, sites })
	}

	pub fn registry(&self) -> &SettingsRegistry {
		&self.registry
	}

	pub fn registry_mut(&mut self) -> &mut SettingsRegistry {
		&mut self.registry
	}

	/// Sites in catalog order
	pub fn sites(&self) -> &[Site] {
		&self.sites
	}

	pub fn get_setting(&self, name: &str) -> Option<&Setting> {
		self.registry.get(name)
	}

	fn list_value(&self, name: &str) -> &[String] {
		self.registry.get(name).map(|s| s.value().as_list()).unwrap_or_default()
	}

	/// Whether group based access is switched on
	pub fn access_by_ldap_groups(&self) -> bool {
		self.registry
			.get(ACCESS_BY_LDAP_GROUPS)
			.and_then(|s| s.value().as_bool())
			.unwrap_or(false)
	}

	pub fn super_access_groups(&self) -> &[String] {
		self.list_value(SUPER_ACCESS_GROUPS)
	}

	pub fn site_admin_groups(&self, site_id: SiteId) -> &[String] {
		self.list_value(&site_admin_groups_key(site_id))
	}

	pub fn site_view_groups(&self, site_id: SiteId) -> &[String] {
		self.list_value(&site_view_groups_key(site_id))
	}

	pub async fn save(&self) -> LaResult<()> {
		self.registry.save().await
	}
}

// vim: ts=4
