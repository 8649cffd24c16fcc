//! Configuration file handling
//!
//! The configuration names the settings file and describes the directory
//! groups and sites. It stands in for a live directory and site catalog:
//!
//! ```yaml
//! settings_path: ./data/settings.json
//! directory:
//!   groups: [admins, readers]
//! sites:
//!   - { id: 1, name: "Main", main_url: "https://example.com" }
//! ```

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use ldapaccess_types::directory_adapter::DirectoryAdapter;
use ldapaccess_types::prelude::*;
use ldapaccess_types::site_adapter::SiteAdapter;

pub const CONFIG_ENV: &str = "LDAPACCESS_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "./ldapaccess.yaml";

fn default_settings_path() -> PathBuf {
	PathBuf::from("./data/settings.json")
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	/// File the settings adapter persists values to
	#[serde(default = "default_settings_path")]
	pub settings_path: PathBuf,

	/// Directory groups. Without this section the directory is unavailable.
	#[serde(default)]
	pub directory: Option<DirectoryConfig>,

	/// Site catalog, in catalog order
	#[serde(default)]
	pub sites: Vec<Site>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
	pub groups: Vec<String>,
}

impl Config {
	pub fn from_yaml(yaml: &str) -> LaResult<Self> {
		Ok(serde_yaml::from_str(yaml)?)
	}

	pub async fn load(path: &Path) -> LaResult<Self> {
		let yaml = tokio::fs::read_to_string(path).await.map_err(|err| {
			Error::ConfigError(format!("cannot read {}: {}", path.display(), err))
		})?;
		let config = Self::from_yaml(&yaml)?;
		debug!("Loaded configuration from {}", path.display());
		Ok(config)
	}

	pub fn directory(&self) -> ConfigDirectory {
		ConfigDirectory { groups: self.directory.as_ref().map(|d| d.groups.clone()) }
	}

	pub fn site_catalog(&self) -> ConfigSites {
		ConfigSites { sites: self.sites.clone() }
	}
}

/// Directory whose groups come from the configuration file
#[derive(Debug)]
pub struct ConfigDirectory {
	groups: Option<Vec<String>>,
}

#[async_trait]
impl DirectoryAdapter for ConfigDirectory {
	async fn list_all_group_names(&self) -> LaResult<Vec<String>> {
		self.groups
			.clone()
			.ok_or_else(|| Error::DirectoryUnavailable("no directory configured".into()))
	}
}

#[derive(Debug)]
pub struct ConfigSites {
	sites: Vec<Site>,
}

#[async_trait]
impl SiteAdapter for ConfigSites {
	async fn list_all_sites(&self) -> LaResult<Vec<Site>> {
		Ok(self.sites.clone())
	}
}


// vim: ts=4
