//! Core of the LDAP group based access resolver.
//!
//! - **Settings** (`settings`): typed, constrained setting values, the
//!   registry holding them and the add/set/remove/reset mutation engine
//! - **Access settings** (`access_settings`): the concrete settings that map
//!   LDAP groups to superuser, admin and view access
//! - **Access** (`access`): resolves a principal's group memberships into an
//!   access grant

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod access;
pub mod access_settings;
pub mod group_cache;
pub mod prelude;
pub mod settings;

pub use access::{resolve, AccessGrant, AccessLevel, Principal};
pub use access_settings::LdapAccessSettings;

// vim: ts=4
