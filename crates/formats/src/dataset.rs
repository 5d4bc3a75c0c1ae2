use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::feature_collection::{FeatureCollection, FeatureCollectionError};

#[derive(Debug)]
pub enum DatasetLoadError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: FeatureCollectionError,
    },
}

impl std::fmt::Display for DatasetLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetLoadError::Io { path, source } => {
                write!(f, "failed to read dataset {}: {source}", path.display())
            }
            DatasetLoadError::Parse { path, source } => {
                write!(f, "failed to parse dataset {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DatasetLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetLoadError::Io { source, .. } => Some(source),
            DatasetLoadError::Parse { source, .. } => Some(source),
        }
    }
}

/// Raw bytes plus parsed features, so callers can fingerprint the source.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub bytes: Vec<u8>,
    pub collection: FeatureCollection,
}

pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, DatasetLoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| DatasetLoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    let collection =
        FeatureCollection::from_geojson_str(&text).map_err(|e| DatasetLoadError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

    info!(
        path = %path.display(),
        features = collection.len(),
        polygonal = collection.polygonal_count(),
        "loaded feature collection"
    );

    Ok(Dataset { bytes, collection })
}

pub fn load_feature_collection(
    path: impl AsRef<Path>,
) -> Result<FeatureCollection, DatasetLoadError> {
    load_dataset(path).map(|d| d.collection)
}
