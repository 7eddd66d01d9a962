use crate::domain::Filter;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// App metadata stored in meta.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Last selected filter, restored on the next launch
    #[serde(default)]
    pub filter: Filter,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            filter: Filter::All,
        }
    }
}

/// Load app metadata from the meta.json file
pub fn load_metadata<P: AsRef<Path>>(path: P) -> Result<AppMetadata> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(AppMetadata::default());
    }

    let content = std::fs::read_to_string(path)?;
    let metadata: AppMetadata = serde_json::from_str(&content)?;
    Ok(metadata)
}

/// Save app metadata to the meta.json file
pub fn save_metadata<P: AsRef<Path>>(path: P, metadata: &AppMetadata) -> Result<()> {
    let json = serde_json::to_string_pretty(metadata)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}
