//! Settings subsystem: typed values, registry, rules and mutation
//!
//! # Architecture
//!
//! - **Types** (`types.rs`): value/type enums, definitions and setting instances
//! - **Rules** (`rules.rs`): transform and validate functions attached to definitions
//! - **Registry** (`registry.rs`): ordered setting storage backed by a settings adapter
//! - **Modify** (`modify.rs`): the add/set/remove/reset mutation engine
//! - **Format** (`format.rs`): display representation of values

pub mod format;
pub mod modify;
pub mod registry;
pub mod rules;
pub mod types;

pub use format::{format_setting, format_value};
pub use modify::{apply, modify_and_save, modify_setting, Mode};
pub use registry::SettingsRegistry;
pub use types::{
	Setting, SettingDefinition, SettingDefinitionBuilder, SettingTransform, SettingType,
	SettingValidator, SettingValue,
};

// vim: ts=4
