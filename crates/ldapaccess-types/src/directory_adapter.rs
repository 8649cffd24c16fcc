//! Adapter to the user directory (usually LDAP) that knows which groups exist.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

#[async_trait]
pub trait DirectoryAdapter: Debug + Send + Sync {
	/// Lists the names of every group known to the directory.
	///
	/// Implementations should return `Error::DirectoryUnavailable` when the
	/// directory cannot be reached.
	async fn list_all_group_names(&self) -> LaResult<Vec<String>>;
}

// vim: ts=4
