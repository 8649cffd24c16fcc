//! Settings types and definitions
//!
//! A setting is a named, typed value with a default. Its definition carries
//! the rules applied to every incoming value: a transform that normalizes the
//! raw value to the setting's type and an optional validator.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::prelude::*;

use super::rules;

/// Normalizes an incoming raw value (`None` for an absent/null value) to the
/// setting's type
pub type SettingTransform = fn(&SettingDefinition, Option<SettingValue>) -> LaResult<SettingValue>;

/// Rejects a normalized value that violates the setting's constraints
pub type SettingValidator = fn(&SettingDefinition, &SettingValue) -> LaResult<()>;

/// Type tag of a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingType {
	#[serde(rename = "bool")]
	Bool,
	#[serde(rename = "int")]
	Int,
	#[serde(rename = "float")]
	Float,
	#[serde(rename = "string")]
	String,
	/// List of strings (group names)
	#[serde(rename = "array")]
	Array,
}

impl SettingType {
	pub fn as_str(&self) -> &'static str {
		match self {
			SettingType::Bool => "bool",
			SettingType::Int => "int",
			SettingType::Float => "float",
			SettingType::String => "string",
			SettingType::Array => "array",
		}
	}

	/// Value used as default when a definition does not declare one
	pub fn zero_value(&self) -> SettingValue {
		match self {
			SettingType::Bool => SettingValue::Bool(false),
			SettingType::Int => SettingValue::Int(0),
			SettingType::Float => SettingValue::Float(0.0),
			SettingType::String => SettingValue::String(String::new()),
			SettingType::Array => SettingValue::List(Vec::new()),
		}
	}
}

impl fmt::Display for SettingType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Setting value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)] // No type tag - type comes from the SettingDefinition
pub enum SettingValue {
	Bool(bool), // Must be before Int to avoid bool -> int coercion
	Int(i64),
	Float(f64),
	String(String),
	List(Vec<String>),
}

impl SettingValue {
	pub fn typ(&self) -> SettingType {
		match self {
			SettingValue::Bool(_) => SettingType::Bool,
			SettingValue::Int(_) => SettingType::Int,
			SettingValue::Float(_) => SettingType::Float,
			SettingValue::String(_) => SettingType::String,
			SettingValue::List(_) => SettingType::Array,
		}
	}

	/// Get the type name for error messages
	pub fn type_name(&self) -> &'static str {
		self.typ().as_str()
	}

	/// List members, or an empty slice for scalar values
	pub fn as_list(&self) -> &[String] {
		match self {
			SettingValue::List(list) => list,
			_ => &[],
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			SettingValue::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn to_json(&self) -> serde_json::Value {
		match self {
			SettingValue::Bool(b) => serde_json::Value::Bool(*b),
			SettingValue::Int(i) => serde_json::Value::from(*i),
			SettingValue::Float(f) => serde_json::Value::from(*f),
			SettingValue::String(s) => serde_json::Value::String(s.clone()),
			SettingValue::List(list) => serde_json::Value::from(list.clone()),
		}
	}
}

/// Setting definition - defines metadata and rules for each setting
#[derive(Clone)]
pub struct SettingDefinition {
	/// Unique setting name (e.g., "superAccessGroups", "3_viewGroups")
	pub name: String,

	/// Human-readable title
	pub title: String,

	pub description: Option<String>,

	pub typ: SettingType,

	/// Value restored by a reset
	pub default: SettingValue,

	/// Closed set of valid list members, if constrained
	pub allowed_values: Option<Vec<String>>,

	pub transform: SettingTransform,

	pub validator: Option<SettingValidator>,
}

impl fmt::Debug for SettingDefinition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SettingDefinition")
			.field("name", &self.name)
			.field("title", &self.title)
			.field("description", &self.description)
			.field("typ", &self.typ)
			.field("default", &self.default)
			.field("allowed_values", &self.allowed_values)
			.field("validator", &self.validator.is_some())
			.finish_non_exhaustive()
	}
}

impl SettingDefinition {
	/// Create a builder for constructing a SettingDefinition
	pub fn builder(name: impl Into<String>, typ: SettingType) -> SettingDefinitionBuilder {
		SettingDefinitionBuilder::new(name, typ)
	}

	/// Runs the transform and validator on a raw value without committing it
	pub fn check(&self, raw: Option<SettingValue>) -> LaResult<SettingValue> {
		let value = (self.transform)(self, raw)?;
		if value.typ() != self.typ {
			return Err(Error::ValidationFailed(format!(
				"Type mismatch for setting '{}': expected {}, got {}",
				self.name,
				self.typ,
				value.type_name()
			)));
		}
		if let Some(validator) = self.validator {
			validator(self, &value)?;
		}
		Ok(value)
	}
}

/// Builder for SettingDefinition with fluent API
pub struct SettingDefinitionBuilder {
	name: String,
	typ: SettingType,
	title: Option<String>,
	description: Option<String>,
	default: Option<SettingValue>,
	allowed_values: Option<Vec<String>>,
	transform: SettingTransform,
	validator: Option<SettingValidator>,
}

impl SettingDefinitionBuilder {
	pub fn new(name: impl Into<String>, typ: SettingType) -> Self {
		Self {
			name: name.into(),
			typ,
			title: None,
			description: None,
			default: None,
			allowed_values: None,
			transform: rules::coerce_to_type,
			validator: None,
		}
	}

	/// Set the title (required)
	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Set the default value (defaults to the type's zero value)
	pub fn default(mut self, value: SettingValue) -> Self {
		self.default = Some(value);
		self
	}

	pub fn allowed_values(mut self, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
		self.allowed_values = Some(values.into_iter().map(Into::into).collect());
		self
	}

	pub fn transform(mut self, transform: SettingTransform) -> Self {
		self.transform = transform;
		self
	}

	pub fn validator(mut self, validator: SettingValidator) -> Self {
		self.validator = Some(validator);
		self
	}

	/// Build the SettingDefinition
	pub fn build(self) -> LaResult<SettingDefinition> {
		let title = self
			.title
			.ok_or_else(|| Error::ConfigError(format!("Setting '{}' has no title", self.name)))?;

		let default = self.default.unwrap_or_else(|| self.typ.zero_value());
		if default.typ() != self.typ {
			return Err(Error::ConfigError(format!(
				"Default of setting '{}' is {}, expected {}",
				self.name,
				default.type_name(),
				self.typ
			)));
		}

		if self.allowed_values.is_some() && self.typ != SettingType::Array {
			tracing::warn!(
				"Setting '{}' has allowed values but is not an array - they are ignored by the default rules",
				self.name
			);
		}

		Ok(SettingDefinition {
			name: self.name,
			title,
			description: self.description,
			typ: self.typ,
			default,
			allowed_values: self.allowed_values,
			transform: self.transform,
			validator: self.validator,
		})
	}
}

/// Runtime setting instance: a definition plus its current value
#[derive(Debug, Clone)]
pub struct Setting {
	def: SettingDefinition,
	value: SettingValue,
}

impl Setting {
	/// Creates the setting holding its default value
	pub fn new(def: SettingDefinition) -> Self {
		let value = def.default.clone();
		Self { def, value }
	}

	pub fn name(&self) -> &str {
		&self.def.name
	}

	pub fn typ(&self) -> SettingType {
		self.def.typ
	}

	pub fn value(&self) -> &SettingValue {
		&self.value
	}

	pub fn default_value(&self) -> &SettingValue {
		&self.def.default
	}

	pub fn definition(&self) -> &SettingDefinition {
		&self.def
	}

	/// Replaces the value after running the definition's transform and
	/// validator. On error the current value is kept.
	pub fn set_value(&mut self, value: SettingValue) -> LaResult<()> {
		self.value = self.def.check(Some(value))?;
		Ok(())
	}

	/// Puts back a value the setting held before, skipping the rules
	pub(crate) fn restore(&mut self, value: SettingValue) {
		self.value = value;
	}

	/// Like [`Setting::set_value`], for a raw JSON value (e.g. from the store)
	pub fn set_raw(&mut self, raw: serde_json::Value) -> LaResult<()> {
		let value = serde_json::from_value::<Option<SettingValue>>(raw).map_err(|err| {
			Error::ValidationFailed(format!("Invalid value for setting '{}': {}", self.def.name, err))
		})?;
		self.value = self.def.check(value)?;
		Ok(())
	}
}


// vim: ts=4
