//! Settings adapter storing all values in a single JSON file.
//!
//! Writes go to a temporary file in the same directory which is then renamed
//! over the settings file, so a failed save never leaves a truncated file.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{
	fs::{create_dir_all, read, rename, File},
	io::AsyncWriteExt,
};

use ldapaccess::{prelude::*, settings_adapter::SettingsAdapter};

fn persistence_error(path: &Path, err: impl std::fmt::Display) -> Error {
	Error::PersistenceError(format!("{}: {}", path.display(), err))
}

#[derive(Debug)]
pub struct SettingsAdapterFs {
	path: Box<Path>,
}

impl SettingsAdapterFs {
	/// Creates the adapter, creating the parent directory of `path` if needed
	pub async fn new(path: impl Into<PathBuf>) -> LaResult<Self> {
		let path: PathBuf = path.into();
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			create_dir_all(parent).await?;
		}
		Ok(Self { path: path.into_boxed_path() })
	}

	fn tmp_path(&self) -> PathBuf {
		let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
		name.push(".tmp");
		self.path.with_file_name(name)
	}
}

#[async_trait]
impl SettingsAdapter for SettingsAdapterFs {
	/// Reads the settings file. A missing file means nothing was saved yet.
	async fn load(&self) -> LaResult<HashMap<String, serde_json::Value>> {
		let data = match read(&self.path).await {
			Ok(data) => data,
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
				debug!("Settings file {} does not exist yet", self.path.display());
				return Ok(HashMap::new());
			}
			Err(err) => return Err(persistence_error(&self.path, err)),
		};

		serde_json::from_slice(&data).map_err(|err| persistence_error(&self.path, err))
	}

	async fn save(&self, values: &HashMap<String, serde_json::Value>) -> LaResult<()> {
		// Sorted keys keep the file diffable
		let sorted: BTreeMap<&String, &serde_json::Value> = values.iter().collect();
		let data =
			serde_json::to_vec_pretty(&sorted).map_err(|err| persistence_error(&self.path, err))?;

		let tmp_path = self.tmp_path();
		let write = async {
			let mut file = File::create(&tmp_path).await?;
			file.write_all(&data).await?;
			file.sync_all().await?;
			rename(&tmp_path, &self.path).await
		};
		write.await.map_err(|err| persistence_error(&self.path, err))?;

		info!("Settings written to {}", self.path.display());
		Ok(())
	}
}

// vim: ts=4
