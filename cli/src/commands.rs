//! Command implementations
//!
//! Commands write their report to the given writer so they can be driven
//! from tests; logging goes through tracing.

use std::io::Write;
use std::sync::Arc;

use ldapaccess_core::settings::{format_setting, modify_and_save, Mode};
use ldapaccess_core::{resolve, LdapAccessSettings, Principal};
use ldapaccess_settings_adapter_fs::SettingsAdapterFs;
use ldapaccess_types::prelude::*;

use crate::config::Config;
use crate::table;

/// Printed after any failed modification
pub const NOT_CHANGED: &str = "error occured, setting was not changed";

/// Builds the access settings from the configuration and loads stored values
pub async fn open_settings(config: &Config) -> LaResult<LdapAccessSettings> {
	let directory = Arc::new(config.directory());
	let settings_adapter = Arc::new(SettingsAdapterFs::new(config.settings_path.clone()).await?);
	LdapAccessSettings::init(directory, &config.site_catalog(), settings_adapter).await
}

pub fn settings_list<W: Write>(settings: &LdapAccessSettings, out: &mut W) -> LaResult<()> {
	let rows: Vec<Vec<String>> = settings
		.registry()
		.list()
		.map(|setting| {
			vec![
				setting.name().to_string(),
				setting.typ().as_str().to_string(),
				format_setting(setting),
			]
		})
		.collect();

	table::render(out, &["name", "type", "value"], &rows)?;
	Ok(())
}

/// Modifies one setting and persists all settings.
///
/// Nothing is written to `out` on failure and the setting keeps its value;
/// the caller reports the error.
pub async fn settings_modify<W: Write>(
	settings: &mut LdapAccessSettings,
	name: &str,
	mode: &str,
	values: &[String],
	out: &mut W,
) -> LaResult<()> {
	let setting = modify_and_save(settings.registry_mut(), name, mode, values).await?;

	writeln!(out, "Setting \"{}\" changed to: {}", name, format_setting(setting))?;
	Ok(())
}

pub fn modes<W: Write>(out: &mut W) -> LaResult<()> {
	let rows: Vec<Vec<String>> = Mode::ALL
		.iter()
		.map(|mode| vec![mode.as_str().to_string(), mode.description().to_string()])
		.collect();

	table::render(out, &["mode", "description"], &rows)?;
	Ok(())
}

/// Prints the access grant of `principal` as JSON
pub fn resolve_access<W: Write>(
	settings: &LdapAccessSettings,
	principal: &Principal,
	out: &mut W,
) -> LaResult<()> {
	if !settings.access_by_ldap_groups() {
		warn!("Group based access is disabled, the result is informational only");
	}

	let grant = resolve(settings, principal);
	serde_json::to_writer_pretty(&mut *out, &grant)?;
	writeln!(out)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	const CONFIG: &str = r#"
directory:
  groups: [admins, readers, staff]
sites:
  - { id: 1, name: "Main", main_url: "https://example.com" }
  - { id: 2, name: "Shop", main_url: "https://shop.example.com" }
"#;

	fn test_config(dir: &TempDir, yaml: &str) -> Config {
		let mut config = Config::from_yaml(yaml).unwrap();
		config.settings_path = dir.path().join("settings.json");
		config
	}

	fn output(buf: Vec<u8>) -> String {
		String::from_utf8(buf).unwrap()
	}

	fn strings(values: &[&str]) -> Vec<String> {
		values.iter().map(|v| (*v).to_string()).collect()
	}

	#[tokio::test]
	async fn test_settings_list_defaults() {
		let dir = TempDir::new().unwrap();
		let settings = open_settings(&test_config(&dir, CONFIG)).await.unwrap();

		let mut out = Vec::new();
		settings_list(&settings, &mut out).unwrap();
		let out = output(out);

		let names: Vec<&str> = out
			.lines()
			.skip(3)
			.filter(|line| line.starts_with('|'))
			.filter_map(|line| line.split('|').nth(1))
			.map(str::trim)
			.collect();
		assert_eq!(
			names,
			[
				"accessByLdapGroups",
				"superAccessGroups",
				"1_adminGroups",
				"2_adminGroups",
				"1_viewGroups",
				"2_viewGroups"
			]
		);
		assert!(out.contains("| accessByLdapGroups | bool  | false |"));
	}

	#[tokio::test]
	async fn test_modify_persists_across_runs() {
		let dir = TempDir::new().unwrap();
		let config = test_config(&dir, CONFIG);

		let mut settings = open_settings(&config).await.unwrap();
		let mut out = Vec::new();
		settings_modify(&mut settings, "1_viewGroups", "add", &strings(&["readers", "staff"]), &mut out)
			.await
			.unwrap();
		assert_eq!(output(out), "Setting \"1_viewGroups\" changed to: readers,staff\n");

		let settings = open_settings(&config).await.unwrap();
		assert_eq!(settings.site_view_groups(SiteId(1)), ["readers", "staff"]);
	}

	#[tokio::test]
	async fn test_modify_rejected_prints_nothing() {
		let dir = TempDir::new().unwrap();
		let mut settings = open_settings(&test_config(&dir, CONFIG)).await.unwrap();

		let mut out = Vec::new();
		let res =
			settings_modify(&mut settings, "superAccessGroups", "set", &strings(&["nobody"]), &mut out)
				.await;
		assert!(matches!(res, Err(Error::ValidationFailed(_))));
		assert!(out.is_empty());
		assert!(!dir.path().join("settings.json").exists());

		let res = settings_modify(&mut settings, "unknown", "set", &strings(&["1"]), &mut out).await;
		assert!(matches!(res, Err(Error::SettingNotFound(_))));
	}

	#[tokio::test]
	async fn test_modify_keeps_value_when_store_is_gone() {
		let dir = TempDir::new().unwrap();
		let mut config = test_config(&dir, CONFIG);
		config.settings_path = dir.path().join("sub").join("settings.json");
		let mut settings = open_settings(&config).await.unwrap();
		std::fs::remove_dir_all(dir.path().join("sub")).unwrap();

		let mut out = Vec::new();
		let res =
			settings_modify(&mut settings, "superAccessGroups", "set", &strings(&["admins"]), &mut out)
				.await;
		assert!(matches!(res, Err(Error::PersistenceError(_))));
		assert!(out.is_empty());
		assert!(settings.super_access_groups().is_empty());
	}

	#[tokio::test]
	async fn test_modify_without_directory_only_accepts_empty() {
		let dir = TempDir::new().unwrap();
		let config = test_config(&dir, "sites: [{ id: 1, name: Main, main_url: 'https://example.com' }]");
		let mut settings = open_settings(&config).await.unwrap();

		let mut out = Vec::new();
		let res =
			settings_modify(&mut settings, "1_adminGroups", "add", &strings(&["admins"]), &mut out).await;
		assert!(matches!(res, Err(Error::ValidationFailed(_))));

		settings_modify(&mut settings, "accessByLdapGroups", "set", &strings(&["true"]), &mut out)
			.await
			.unwrap();
		assert_eq!(output(out), "Setting \"accessByLdapGroups\" changed to: true\n");
	}

	#[test]
	fn test_modes() {
		let mut out = Vec::new();
		modes(&mut out).unwrap();
		let out = output(out);
		assert!(out.contains("| reset  | reset value to default"));
		assert!(out.contains("| set    | overwrite with given value"));
	}

	#[tokio::test]
	async fn test_resolve_access() {
		let dir = TempDir::new().unwrap();
		let mut settings = open_settings(&test_config(&dir, CONFIG)).await.unwrap();
		let mut sink = Vec::new();
		settings_modify(&mut settings, "1_viewGroups", "set", &strings(&["readers"]), &mut sink)
			.await
			.unwrap();
		settings_modify(&mut settings, "2_adminGroups", "set", &strings(&["admins"]), &mut sink)
			.await
			.unwrap();

		let mut out = Vec::new();
		resolve_access(&settings, &Principal::new(["readers", "admins"]), &mut out).unwrap();
		let grant: serde_json::Value = serde_json::from_slice(&out).unwrap();
		assert_eq!(grant, serde_json::json!({ "view": [1], "admin": [2] }));

		let mut out = Vec::new();
		resolve_access(&settings, &Principal::without_groups(), &mut out).unwrap();
		let grant: serde_json::Value = serde_json::from_slice(&out).unwrap();
		assert_eq!(grant, serde_json::json!({ "superuser": false }));
	}
}

// vim: ts=4
