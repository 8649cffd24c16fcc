//! Test adapters and helpers
//!
//! In-memory implementations of the directory, site catalog and settings
//! store, so registry and access tests run without any external service.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use ldapaccess_core::LdapAccessSettings;
use ldapaccess_types::directory_adapter::DirectoryAdapter;
use ldapaccess_types::error::{Error, LaResult};
use ldapaccess_types::settings_adapter::SettingsAdapter;
use ldapaccess_types::site_adapter::SiteAdapter;
use ldapaccess_types::types::{Site, SiteId};

pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::DEBUG)
		.try_init();
}

/// Directory with a fixed group list, or unreachable when `groups` is None
#[derive(Debug)]
pub struct StaticDirectory {
	pub groups: Option<Vec<String>>,
}

impl StaticDirectory {
	pub fn new(groups: &[&str]) -> Self {
		Self { groups: Some(groups.iter().map(|g| g.to_string()).collect()) }
	}

	pub fn unreachable() -> Self {
		Self { groups: None }
	}
}

#[async_trait]
impl DirectoryAdapter for StaticDirectory {
	async fn list_all_group_names(&self) -> LaResult<Vec<String>> {
		self.groups
			.clone()
			.ok_or_else(|| Error::DirectoryUnavailable("ldap://test: connection refused".into()))
	}
}

#[derive(Debug)]
pub struct StaticSites(pub Vec<Site>);

impl StaticSites {
	pub fn with_ids(ids: &[u32]) -> Self {
		Self(
			ids.iter()
				.map(|&id| Site {
					id: SiteId(id),
					name: format!("Site {}", id),
					main_url: format!("https://site{}.example.com", id),
				})
				.collect(),
		)
	}
}

#[async_trait]
impl SiteAdapter for StaticSites {
	async fn list_all_sites(&self) -> LaResult<Vec<Site>> {
		Ok(self.0.clone())
	}
}

#[derive(Debug, Default)]
pub struct MemorySettingsAdapter {
	pub values: Mutex<HashMap<String, serde_json::Value>>,
	pub saves: Mutex<usize>,
	pub fail_save: bool,
}

impl MemorySettingsAdapter {
	pub fn with_values(values: serde_json::Value) -> Self {
		let values = match values {
			serde_json::Value::Object(map) => map.into_iter().collect(),
			_ => HashMap::new(),
		};
		Self { values: Mutex::new(values), ..Default::default() }
	}

	pub fn stored(&self, name: &str) -> Option<serde_json::Value> {
		self.values.lock().get(name).cloned()
	}

	pub fn save_count(&self) -> usize {
		*self.saves.lock()
	}
}

#[async_trait]
impl SettingsAdapter for MemorySettingsAdapter {
	async fn load(&self) -> LaResult<HashMap<String, serde_json::Value>> {
		Ok(self.values.lock().clone())
	}

	async fn save(&self, values: &HashMap<String, serde_json::Value>) -> LaResult<()> {
		if self.fail_save {
			return Err(Error::Io(std::io::Error::other("disk full")));
		}
		*self.values.lock() = values.clone();
		*self.saves.lock() += 1;
		Ok(())
	}
}

/// Builds access settings for `site_ids` with the directory knowing `groups`
pub async fn create_test_settings(
	groups: &[&str],
	site_ids: &[u32],
) -> (LdapAccessSettings, Arc<MemorySettingsAdapter>) {
	let store = Arc::new(MemorySettingsAdapter::default());
	let settings = LdapAccessSettings::init(
		Arc::new(StaticDirectory::new(groups)),
		&StaticSites::with_ids(site_ids),
		store.clone(),
	)
	.await
	.expect("Failed to initialize access settings");
	(settings, store)
}

pub fn strings(values: &[&str]) -> Vec<String> {
	values.iter().map(|v| v.to_string()).collect()
}

// vim: ts=4
