//! Transform and validate rules attached to setting definitions

use crate::prelude::*;

use super::types::{SettingDefinition, SettingType, SettingValue};

fn type_mismatch(def: &SettingDefinition, value: &SettingValue) -> Error {
	Error::ValidationFailed(format!(
		"Type mismatch for setting '{}': expected {}, got {}",
		def.name,
		def.typ,
		value.type_name()
	))
}

/// Default transform: accepts values of the setting's type, widens ints to
/// floats, and refuses absent values
pub fn coerce_to_type(def: &SettingDefinition, raw: Option<SettingValue>) -> LaResult<SettingValue> {
	let Some(value) = raw else {
		return Err(Error::ValidationFailed(format!("Setting '{}' requires a value", def.name)));
	};

	match (def.typ, value) {
		(SettingType::Float, SettingValue::Int(i)) => Ok(SettingValue::Float(i as f64)),
		(SettingType::Float, SettingValue::Float(f)) if !f.is_finite() => Err(Error::ValidationFailed(
			format!("Setting '{}' requires a finite number", def.name),
		)),
		(typ, value) if value.typ() == typ => Ok(value),
		(_, value) => Err(type_mismatch(def, &value)),
	}
}

/// Transform for group lists: an empty selection is an empty list, never
/// absent, and a single group name is a one element list
pub fn group_list_transform(
	def: &SettingDefinition,
	raw: Option<SettingValue>,
) -> LaResult<SettingValue> {
	match raw {
		None => Ok(SettingValue::List(Vec::new())),
		Some(SettingValue::List(list)) => Ok(SettingValue::List(list)),
		Some(SettingValue::String(name)) => Ok(SettingValue::List(vec![name])),
		Some(value) => Err(type_mismatch(def, &value)),
	}
}

/// Every list member must be one of the definition's allowed values.
/// An empty list is always valid.
pub fn allowed_values_validator(def: &SettingDefinition, value: &SettingValue) -> LaResult<()> {
	let allowed = def.allowed_values.as_deref().unwrap_or_default();

	for member in value.as_list() {
		if !allowed.contains(member) {
			return Err(Error::ValidationFailed(format!(
				"The value '{}' is not allowed for setting \"{}\"",
				member, def.title
			)));
		}
	}

	Ok(())
}


// vim: ts=4
