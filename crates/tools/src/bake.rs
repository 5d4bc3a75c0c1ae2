use std::fs;
use std::path::Path;

use engine::EngineConfig;
use formats::{FeatureSummary, load_dataset};
use layers::{BaseLayers, BuildReport, Rasterizer};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{ToolError, write_png};

pub const VISUAL_FILE_NAME: &str = "visual.png";
pub const IDENTITY_FILE_NAME: &str = "identity.png";
pub const INDEX_FILE_NAME: &str = "index.json";

/// Sidecar describing a baked identity raster: which code names which
/// country, and which source the rasters were built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BakeIndex {
    pub width: u32,
    pub height: u32,
    /// blake3 of the input GeoJSON bytes, hex encoded.
    pub source_hash: String,
    pub report: BuildReport,
    pub features: Vec<FeatureSummary>,
}

impl BakeIndex {
    pub fn from_layers(layers: &BaseLayers, source: &[u8]) -> Self {
        let features = layers
            .index
            .entries()
            .into_iter()
            .filter_map(|(code, idx)| {
                let feature = layers.feature(idx)?;
                Some(FeatureSummary::from_properties(code.get(), &feature.properties))
            })
            .collect();
        Self {
            width: layers.projector.width(),
            height: layers.projector.height(),
            source_hash: blake3::hash(source).to_hex().to_string(),
            report: layers.report,
            features,
        }
    }
}

/// Rasterizes `input` and writes both rasters plus the index into `out_dir`.
pub fn bake(input: &Path, out_dir: &Path, config: &EngineConfig) -> Result<BakeIndex, ToolError> {
    config.validate()?;
    let dataset = load_dataset(input)?;
    let raster = &config.raster;
    let layers = Rasterizer::new(raster.width, raster.height, raster.style).build(dataset.collection)?;
    let index = BakeIndex::from_layers(&layers, &dataset.bytes);

    fs::create_dir_all(out_dir).map_err(|e| ToolError::Io {
        path: out_dir.to_path_buf(),
        source: e,
    })?;
    write_png(&layers.visual, &out_dir.join(VISUAL_FILE_NAME))?;
    write_png(&layers.identity, &out_dir.join(IDENTITY_FILE_NAME))?;

    let index_path = out_dir.join(INDEX_FILE_NAME);
    let payload = serde_json::to_string_pretty(&index).map_err(ToolError::Json)?;
    fs::write(&index_path, payload).map_err(|e| ToolError::Io {
        path: index_path.clone(),
        source: e,
    })?;

    info!(
        out = %out_dir.display(),
        features = index.features.len(),
        source_hash = %index.source_hash,
        "baked layers"
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::{BakeIndex, IDENTITY_FILE_NAME, INDEX_FILE_NAME, VISUAL_FILE_NAME, bake};
    use crate::test_support::{sample_path, scratch_dir};
    use engine::EngineConfig;
    use pretty_assertions::assert_eq;

    fn small_config() -> EngineConfig {
        let mut cfg = EngineConfig::default();
        cfg.raster.width = 360;
        cfg.raster.height = 180;
        cfg
    }

    #[test]
    fn writes_rasters_and_index() {
        let out = scratch_dir("bake");
        let index = bake(&sample_path(), &out, &small_config()).expect("bake");

        for name in [VISUAL_FILE_NAME, IDENTITY_FILE_NAME, INDEX_FILE_NAME] {
            assert!(out.join(name).is_file(), "missing {name}");
        }
        let text = std::fs::read_to_string(out.join(INDEX_FILE_NAME)).expect("index");
        let back: BakeIndex = serde_json::from_str(&text).expect("json");
        assert_eq!(back, index);

        let names: Vec<(u32, &str)> = index
            .features
            .iter()
            .map(|f| (f.code, f.name.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![
                (1, "Squareland"),
                (2, "Dateline Isles"),
                (3, "Twin Islands"),
                (4, "Clockwise Republic")
            ]
        );
        assert_eq!(index.features[2].iso3.as_deref(), Some("TWN"));
        assert_eq!(index.source_hash.len(), 64);
    }

    #[test]
    fn identity_png_decodes_to_codes() {
        let out = scratch_dir("bake-identity");
        bake(&sample_path(), &out, &small_config()).expect("bake");
        let img = image::open(out.join(IDENTITY_FILE_NAME)).expect("open").to_rgba8();
        assert_eq!(img.dimensions(), (360, 180));
        // Squareland interior.
        assert_eq!(img.get_pixel(192, 72).0, [1, 0, 0, 255]);
        // Ocean.
        assert_eq!(img.get_pixel(0, 90).0, [0, 0, 0, 255]);
    }

    #[test]
    fn hash_tracks_source_bytes() {
        let a = scratch_dir("bake-a");
        let b = scratch_dir("bake-b");
        let first = bake(&sample_path(), &a, &small_config()).expect("bake");
        let second = bake(&sample_path(), &b, &small_config()).expect("bake");
        assert_eq!(first.source_hash, second.source_hash);
        let bytes = std::fs::read(sample_path()).expect("read");
        assert_eq!(first.source_hash, blake3::hash(&bytes).to_hex().to_string());
    }

    #[test]
    fn missing_input_is_reported() {
        let out = scratch_dir("bake-missing");
        let err = bake(&out.join("nope.geojson"), &out, &small_config()).unwrap_err();
        assert!(err.to_string().contains("nope.geojson"));
    }
}
