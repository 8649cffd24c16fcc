//! Lazily fetched catalog of directory group names
//!
//! The directory is asked at most once per catalog. A failed fetch is cached
//! as an empty group list: settings built from it accept only empty
//! selections until the next process start, instead of failing to load.

use std::sync::Arc;

use ldapaccess_types::directory_adapter::DirectoryAdapter;

use crate::prelude::*;

enum GroupCacheState {
	Unfetched,
	Fetched(Vec<String>),
}

pub struct GroupCatalog {
	directory: Arc<dyn DirectoryAdapter>,
	state: GroupCacheState,
}

impl GroupCatalog {
	pub fn new(directory: Arc<dyn DirectoryAdapter>) -> Self {
		Self { directory, state: GroupCacheState::Unfetched }
	}

	pub fn is_fetched(&self) -> bool {
		matches!(self.state, GroupCacheState::Fetched(_))
	}

	/// Sorted, deduplicated group names known to the directory
	pub async fn groups(&mut self) -> &[String] {
		if let GroupCacheState::Unfetched = self.state {
			let groups = match self.directory.list_all_group_names().await {
				Ok(mut groups) => {
					groups.sort();
					groups.dedup();
					debug!("Fetched {} directory groups", groups.len());
					groups
				}
				Err(err) => {
					warn!("Could not list directory groups, no group will be selectable: {}", err);
					Vec::new()
				}
			};
			self.state = GroupCacheState::Fetched(groups);
		}

		match &self.state {
			GroupCacheState::Fetched(groups) => groups,
			GroupCacheState::Unfetched => &[],
		}
	}
}


// vim: ts=4
