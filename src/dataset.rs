// JSON dataset input for charting arbitrary data files
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::chart::Category;

/// A chart dataset as stored on disk.
///
/// ```json
/// {
///   "label": "Languages",
///   "value_prefix": "",
///   "categories": [
///     { "name": "Rust", "color": "cyan", "value": 44.0 }
///   ]
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value_prefix: String,
    pub categories: Vec<Category>,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid dataset {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load a dataset from a JSON file.
pub fn load_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    let bytes = fs::read(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
