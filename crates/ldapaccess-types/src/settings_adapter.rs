//! Adapter that persists setting values.
//!
//! Values are stored as JSON keyed by setting name. Interpreting them (type
//! checks, allowed values) is the job of the settings registry, not the store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;

use crate::prelude::*;

#[async_trait]
pub trait SettingsAdapter: Debug + Send + Sync {
	/// Reads every stored setting value
	async fn load(&self) -> LaResult<HashMap<String, serde_json::Value>>;

	/// Replaces the stored values with `values`.
	///
	/// Must either persist all values or none of them.
	async fn save(&self, values: &HashMap<String, serde_json::Value>) -> LaResult<()>;
}

// vim: ts=4
