//! Error type shared by the access core, its adapters and the CLI

use std::fmt;

pub type LaResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// No setting is registered under the given name
	SettingNotFound(String),
	/// Mutation mode is not one of add, set, remove, reset
	InvalidMode(String),
	/// The mode cannot be applied to the setting's type (e.g. add on a bool)
	UnsupportedOperation { mode: &'static str, typ: &'static str },
	/// `set` was invoked without any value
	MissingValue,
	/// Candidate value was rejected by the setting's rules
	ValidationFailed(String),
	/// The settings store could not persist or load values
	PersistenceError(String),
	/// The directory could not list its groups
	DirectoryUnavailable(String),
	ConfigError(String),
	Json(String),

	// externals
	Io(std::io::Error),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::SettingNotFound(name) => write!(f, "No setting with name: {}", name),
			Error::InvalidMode(mode) => write!(f, "No valid mode: {}", mode),
			Error::UnsupportedOperation { mode, typ } => {
				write!(f, "unable to {} for type: {}", mode, typ)
			}
			Error::MissingValue => write!(f, "unable to set if no value is given"),
			Error::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
			Error::PersistenceError(msg) => write!(f, "persistence error: {}", msg),
			Error::DirectoryUnavailable(msg) => write!(f, "directory unavailable: {}", msg),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::Json(msg) => write!(f, "json error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(err) => Some(err),
			_ => None,
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Json(err.to_string())
	}
}

#[cfg(feature = "config")]
impl From<serde_yaml::Error> for Error {
	fn from(err: serde_yaml::Error) -> Self {
		Self::ConfigError(err.to_string())
	}
}


// vim: ts=4
