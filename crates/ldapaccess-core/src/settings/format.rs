//! Display representation of setting values, used for listings and for
//! confirming a mutation

use std::fmt;

use super::types::{Setting, SettingValue};

pub fn format_value(value: &SettingValue) -> String {
	match value {
		SettingValue::Bool(b) => if *b { "true" } else { "false" }.to_string(),
		SettingValue::List(list) => list.join(","),
		SettingValue::String(s) => s.clone(),
		SettingValue::Int(_) | SettingValue::Float(_) => value.to_json().to_string(),
	}
}

pub fn format_setting(setting: &Setting) -> String {
	format_value(setting.value())
}

impl fmt::Display for SettingValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&format_value(self))
	}
}


// vim: ts=4
