//! Shared types, adapter traits, and core utilities for LDAP group based access.
//!
//! This crate contains the foundational types that are shared between the
//! access core, the CLI and all adapter implementations. The adapter traits
//! describe the external collaborators: the directory that knows group names,
//! the catalog of sites and the store that persists setting values.

pub mod directory_adapter;
pub mod error;
pub mod prelude;
pub mod settings_adapter;
pub mod site_adapter;
pub mod types;

// vim: ts=4
