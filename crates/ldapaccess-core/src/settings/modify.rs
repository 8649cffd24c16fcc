//! Setting mutation engine
//!
//! Applies one of four modes to a setting's value:
//!
//! | mode   | bool        | int / float   | string              | array                 |
//! |--------|-------------|---------------|---------------------|-----------------------|
//! | add    | unsupported | += sum        | append all values   | append (keeps dups)   |
//! | set    | true/false/int | first value | concat all values   | replace with values   |
//! | remove | unsupported | -= sum        | strip substrings    | set difference        |
//! | reset  | default     | default       | default             | default               |
//!
//! [`apply`] computes the new value without touching the setting, so a failed
//! mutation never leaves a partial change behind.

use std::fmt;
use std::str::FromStr;

use crate::prelude::*;

use super::registry::SettingsRegistry;
use super::types::{Setting, SettingValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
	Add,
	Set,
	Remove,
	Reset,
}

impl Mode {
	pub const ALL: [Mode; 4] = [Mode::Add, Mode::Set, Mode::Remove, Mode::Reset];

	pub fn as_str(&self) -> &'static str {
		match self {
			Mode::Add => "add",
			Mode::Set => "set",
			Mode::Remove => "remove",
			Mode::Reset => "reset",
		}
	}

	pub fn description(&self) -> &'static str {
		match self {
			Mode::Add => "add to array; append to string; mathematical add for float or int",
			Mode::Set => "overwrite with given value",
			Mode::Remove => {
				"for array, remove given value; for string remove substring; mathematical sub for float or int"
			}
			Mode::Reset => "reset value to default",
		}
	}
}

impl fmt::Display for Mode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Mode {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Mode::ALL
			.into_iter()
			.find(|mode| mode.as_str() == s)
			.ok_or_else(|| Error::InvalidMode(s.to_string()))
	}
}

fn parse_int(raw: &str) -> LaResult<i64> {
	raw.trim()
		.parse::<i64>()
		.map_err(|_| Error::ValidationFailed(format!("'{}' is not a valid integer", raw)))
}

fn parse_float(raw: &str) -> LaResult<f64> {
	match raw.trim().parse::<f64>() {
		Ok(f) if f.is_finite() => Ok(f),
		_ => Err(Error::ValidationFailed(format!("'{}' is not a valid number", raw))),
	}
}

fn sum_ints(values: &[String]) -> LaResult<i64> {
	values.iter().try_fold(0i64, |acc, raw| {
		acc.checked_add(parse_int(raw)?)
			.ok_or_else(|| Error::ValidationFailed("integer overflow".into()))
	})
}

fn sum_floats(values: &[String]) -> LaResult<f64> {
	values.iter().try_fold(0.0, |acc, raw| Ok(acc + parse_float(raw)?))
}

/// Finite inputs can still sum to infinity
fn finite_float(value: f64) -> LaResult<SettingValue> {
	if value.is_finite() {
		Ok(SettingValue::Float(value))
	} else {
		Err(Error::ValidationFailed("float overflow".into()))
	}
}

fn unsupported(mode: Mode, setting: &Setting) -> Error {
	Error::UnsupportedOperation { mode: mode.as_str(), typ: setting.typ().as_str() }
}

fn add(setting: &Setting, values: &[String]) -> LaResult<SettingValue> {
	match setting.value() {
		SettingValue::Int(i) => i
			.checked_add(sum_ints(values)?)
			.map(SettingValue::Int)
			.ok_or_else(|| Error::ValidationFailed("integer overflow".into())),
		SettingValue::Float(f) => finite_float(f + sum_floats(values)?),
		SettingValue::String(s) => Ok(SettingValue::String(format!("{}{}", s, values.concat()))),
		SettingValue::List(list) => {
			Ok(SettingValue::List(list.iter().chain(values).cloned().collect()))
		}
		SettingValue::Bool(_) => Err(unsupported(Mode::Add, setting)),
	}
}

fn set(setting: &Setting, values: &[String]) -> LaResult<SettingValue> {
	let Some(first) = values.first() else {
		return Err(Error::MissingValue);
	};

	match setting.value() {
		SettingValue::Int(_) => Ok(SettingValue::Int(parse_int(first)?)),
		SettingValue::Float(_) => Ok(SettingValue::Float(parse_float(first)?)),
		SettingValue::String(_) => Ok(SettingValue::String(values.concat())),
		SettingValue::List(_) => Ok(SettingValue::List(values.to_vec())),
		SettingValue::Bool(_) => {
			if first.eq_ignore_ascii_case("true") {
				Ok(SettingValue::Bool(true))
			} else if first.eq_ignore_ascii_case("false") {
				Ok(SettingValue::Bool(false))
			} else {
				Ok(SettingValue::Bool(parse_int(first)? != 0))
			}
		}
	}
}

fn remove(setting: &Setting, values: &[String]) -> LaResult<SettingValue> {
	match setting.value() {
		SettingValue::Int(i) => i
			.checked_sub(sum_ints(values)?)
			.map(SettingValue::Int)
			.ok_or_else(|| Error::ValidationFailed("integer overflow".into())),
		SettingValue::Float(f) => finite_float(f - sum_floats(values)?),
		SettingValue::String(s) => Ok(SettingValue::String(
			values
				.iter()
				.filter(|needle| !needle.is_empty())
				.fold(s.clone(), |acc, needle| acc.replace(needle.as_str(), "")),
		)),
		SettingValue::List(list) => Ok(SettingValue::List(
			list.iter().filter(|member| !values.contains(member)).cloned().collect(),
		)),
		SettingValue::Bool(_) => Err(unsupported(Mode::Remove, setting)),
	}
}

/// Computes the value `mode` would give the setting. The setting itself is
/// not modified.
pub fn apply(mode: Mode, setting: &Setting, values: &[String]) -> LaResult<SettingValue> {
	match mode {
		Mode::Add => add(setting, values),
		Mode::Set => set(setting, values),
		Mode::Remove => remove(setting, values),
		Mode::Reset => Ok(setting.default_value().clone()),
	}
}

/// Looks up a setting, applies `mode` and commits the result through the
/// setting's rules.
///
/// The setting is checked before the mode. On any error the setting keeps
/// its value. Persisting is left to the caller (`SettingsRegistry::save`).
pub fn modify_setting<'a>(
	registry: &'a mut SettingsRegistry,
	name: &str,
	mode: &str,
	values: &[String],
) -> LaResult<&'a Setting> {
	let setting = registry.get_mut(name).ok_or_else(|| Error::SettingNotFound(name.to_string()))?;
	let mode = mode.parse::<Mode>()?;

	let value = apply(mode, setting, values)?;
	setting.set_value(value)?;

	info!("Setting '{}' modified ({}): {}", name, mode, super::format_setting(setting));
	Ok(setting)
}

/// [`modify_setting`] followed by [`SettingsRegistry::save`].
///
/// When saving fails the setting is rolled back to its previous value, so
/// the registry matches what is stored.
pub async fn modify_and_save<'a>(
	registry: &'a mut SettingsRegistry,
	name: &str,
	mode: &str,
	values: &[String],
) -> LaResult<&'a Setting> {
	let previous = registry
		.get(name)
		.map(|setting| setting.value().clone())
		.ok_or_else(|| Error::SettingNotFound(name.to_string()))?;
	modify_setting(registry, name, mode, values)?;

	if let Err(err) = registry.save().await {
		if let Some(setting) = registry.get_mut(name) {
			setting.restore(previous);
		}
		warn!("Setting '{}' rolled back, save failed: {}", name, err);
		return Err(err);
	}

	registry.get(name).ok_or_else(|| Error::SettingNotFound(name.to_string()))
}


// vim: ts=4
