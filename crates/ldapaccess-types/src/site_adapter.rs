//! Adapter to the catalog of sites access can be granted on.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

#[async_trait]
pub trait SiteAdapter: Debug + Send + Sync {
	/// Lists all sites in catalog order
	async fn list_all_sites(&self) -> LaResult<Vec<Site>>;
}

// vim: ts=4
