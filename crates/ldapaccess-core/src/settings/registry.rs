//! Ordered settings registry backed by a settings adapter
//!
//! Values live in memory; nothing becomes durable until [`SettingsRegistry::save`].

use std::collections::HashMap;
use std::sync::Arc;

use ldapaccess_types::settings_adapter::SettingsAdapter;

use crate::prelude::*;

use super::types::{Setting, SettingDefinition};

pub struct SettingsRegistry {
	settings: Vec<Setting>,
	index: HashMap<String, usize>,
	adapter: Arc<dyn SettingsAdapter>,
}

impl SettingsRegistry {
	pub fn new(adapter: Arc<dyn SettingsAdapter>) -> Self {
		Self { settings: Vec::new(), index: HashMap::new(), adapter }
	}

	/// Register a new setting, holding its default value
	pub fn register(&mut self, def: SettingDefinition) -> LaResult<()> {
		if self.index.contains_key(&def.name) {
			return Err(Error::ConfigError(format!("Setting '{}' is already registered", def.name)));
		}

		debug!("Registering setting: {}", def.name);
		self.index.insert(def.name.clone(), self.settings.len());
		self.settings.push(Setting::new(def));
		Ok(())
	}

	pub fn get(&self, name: &str) -> Option<&Setting> {
		self.index.get(name).and_then(|&idx| self.settings.get(idx))
	}

	pub fn get_mut(&mut self, name: &str) -> Option<&mut Setting> {
		self.index.get(name).and_then(|&idx| self.settings.get_mut(idx))
	}

	/// List all settings in registration order
	pub fn list(&self) -> impl Iterator<Item = &Setting> {
		self.settings.iter()
	}

	pub fn len(&self) -> usize {
		self.settings.len()
	}

	pub fn is_empty(&self) -> bool {
		self.settings.is_empty()
	}

	/// Current values of all settings, keyed by name
	pub fn values(&self) -> HashMap<String, serde_json::Value> {
		self.settings.iter().map(|s| (s.name().to_string(), s.value().to_json())).collect()
	}

	/// Loads stored values through each setting's rules.
	///
	/// Stored values that no longer pass (e.g. a group removed from the
	/// directory) are skipped and the setting keeps its default. Returns the
	/// number of values applied.
	pub async fn load(&mut self) -> LaResult<usize> {
		let stored = self.adapter.load().await.map_err(into_persistence_error)?;

		let mut applied = 0;
		for (name, raw) in stored {
			let Some(setting) = self.get_mut(&name) else {
				debug!("Ignoring stored value of unknown setting: {}", name);
				continue;
			};
			match setting.set_raw(raw) {
				Ok(()) => applied += 1,
				Err(err) => warn!("Stored value of setting '{}' rejected: {}", name, err),
			}
		}

		info!("Loaded {} stored setting values", applied);
		Ok(applied)
	}

	/// Persists the current value of every setting
	pub async fn save(&self) -> LaResult<()> {
		self.adapter.save(&self.values()).await.map_err(into_persistence_error)?;
		info!("Saved {} settings", self.settings.len());
		Ok(())
	}
}

fn into_persistence_error(err: Error) -> Error {
	match err {
		Error::PersistenceError(_) => err,
		err => Error::PersistenceError(err.to_string()),
	}
}

// vim: ts=4
