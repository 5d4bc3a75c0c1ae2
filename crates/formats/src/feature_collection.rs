use foundation::math::GeoPoint;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::properties;

/// Ordered vertices; closing duplicates are kept as they appear in the source.
pub type Ring = Vec<GeoPoint>;

/// Outer ring first, holes after it.
pub type PolygonRings = Vec<Ring>;

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Polygon(PolygonRings),
    MultiPolygon(Vec<PolygonRings>),
}

impl Geometry {
    /// Every polygon of the geometry, in source order.
    pub fn polygons(&self) -> &[PolygonRings] {
        match self {
            Geometry::Polygon(rings) => std::slice::from_ref(rings),
            Geometry::MultiPolygon(polys) => polys,
        }
    }
}

/// A political feature: polygonal geometry plus its property bag.
///
/// `geometry` is `None` when the source geometry was null, missing, malformed
/// or not polygonal; such features are kept so load order is preserved but
/// they are never rasterized.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    pub geometry: Option<Geometry>,
}

impl Feature {
    pub fn display_name(&self) -> &str {
        properties::display_name(&self.properties)
    }

    pub fn iso3(&self) -> Option<&str> {
        properties::iso3(&self.properties)
    }

    pub fn continent(&self) -> Option<&str> {
        properties::continent(&self.properties)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Debug)]
pub enum FeatureCollectionError {
    Json(serde_json::Error),
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for FeatureCollectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureCollectionError::Json(e) => write!(f, "JSON parse error: {e}"),
            FeatureCollectionError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            FeatureCollectionError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for FeatureCollectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeatureCollectionError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl FeatureCollection {
    pub fn from_geojson_str(payload: &str) -> Result<Self, FeatureCollectionError> {
        let value: Value = serde_json::from_str(payload).map_err(FeatureCollectionError::Json)?;
        Self::from_geojson_value(&value)
    }

    pub fn from_geojson_value(value: &Value) -> Result<Self, FeatureCollectionError> {
        let obj = value
            .as_object()
            .ok_or(FeatureCollectionError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(FeatureCollectionError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(FeatureCollectionError::NotAFeatureCollection);
        }

        let features_val = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(FeatureCollectionError::NotAFeatureCollection)?;

        let mut features = Vec::with_capacity(features_val.len());
        for (index, feat_val) in features_val.iter().enumerate() {
            let feat_obj =
                feat_val
                    .as_object()
                    .ok_or_else(|| FeatureCollectionError::InvalidFeature {
                        index,
                        reason: "feature must be an object".to_string(),
                    })?;

            let feat_type = feat_obj.get("type").and_then(|v| v.as_str()).ok_or_else(|| {
                FeatureCollectionError::InvalidFeature {
                    index,
                    reason: "feature missing type".to_string(),
                }
            })?;
            if feat_type != "Feature" {
                return Err(FeatureCollectionError::InvalidFeature {
                    index,
                    reason: format!("unexpected feature type: {feat_type}"),
                });
            }

            let id = match feat_obj.get("id") {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            };

            let properties = feat_obj
                .get("properties")
                .and_then(|v| v.as_object())
                .cloned()
                .unwrap_or_default();

            let geometry = match feat_obj.get("geometry") {
                None | Some(Value::Null) => {
                    debug!(index, "feature has no geometry");
                    None
                }
                Some(g) => match parse_geometry(g) {
                    Ok(geom) => geom,
                    Err(reason) => {
                        warn!(index, %reason, "ignoring malformed feature geometry");
                        None
                    }
                },
            };

            features.push(Feature {
                id,
                properties,
                geometry,
            });
        }

        Ok(Self { features })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Feature> {
        self.features.get(index)
    }

    /// Features that will be rasterized.
    pub fn polygonal_count(&self) -> usize {
        self.features.iter().filter(|f| f.geometry.is_some()).count()
    }
}

/// `Ok(None)` for well-formed but non-polygonal geometry types.
fn parse_geometry(value: &Value) -> Result<Option<Geometry>, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;

    match ty {
        "Polygon" | "MultiPolygon" => {}
        other => {
            debug!(geometry_type = other, "skipping non-polygonal geometry");
            return Ok(None);
        }
    }

    let coords = obj
        .get("coordinates")
        .ok_or("geometry missing coordinates".to_string())?;

    match ty {
        "Polygon" => Ok(Some(Geometry::Polygon(parse_polygon(coords)?))),
        _ => Ok(Some(Geometry::MultiPolygon(parse_multi_polygon(coords)?))),
    }
}

fn parse_point(coords: &Value) -> Result<GeoPoint, String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lon, lat]".to_string());
    }
    let lon = arr[0].as_f64().ok_or("lon must be a number".to_string())?;
    let lat = arr[1].as_f64().ok_or("lat must be a number".to_string())?;
    Ok(GeoPoint::new(lon, lat))
}

fn parse_ring(coords: &Value) -> Result<Ring, String> {
    let arr = coords
        .as_array()
        .ok_or("ring must be an array of positions".to_string())?;
    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        out.push(parse_point(item)?);
    }
    Ok(out)
}

fn parse_polygon(coords: &Value) -> Result<PolygonRings, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    if rings.is_empty() {
        return Err("Polygon has no rings".to_string());
    }
    let mut out = Vec::with_capacity(rings.len());
    for ring in rings {
        out.push(parse_ring(ring)?);
    }
    Ok(out)
}

fn parse_multi_polygon(coords: &Value) -> Result<Vec<PolygonRings>, String> {
    let polys = coords
        .as_array()
        .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
    let mut out = Vec::with_capacity(polys.len());
    for poly in polys {
        out.push(parse_polygon(poly)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{FeatureCollection, FeatureCollectionError, Geometry};
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = include_str!("../../tools/assets/sample_countries.geojson");

    #[test]
    fn parses_sample_dataset() {
        let fc = FeatureCollection::from_geojson_str(SAMPLE).expect("parse");
        assert_eq!(fc.len(), 6);
        assert_eq!(fc.polygonal_count(), 4);

        let names: Vec<&str> = fc.features.iter().map(|f| f.display_name()).collect();
        assert_eq!(
            names,
            vec![
                "Squareland",
                "Dateline Isles",
                "Twin Islands",
                "Ghost",
                "Pointland",
                "Clockwise Republic"
            ]
        );
    }

    #[test]
    fn keeps_holes_and_multipolygon_parts() {
        let fc = FeatureCollection::from_geojson_str(SAMPLE).expect("parse");
        let square = fc.features[0].geometry.as_ref().expect("geometry");
        assert!(matches!(square, Geometry::Polygon(rings) if rings.len() == 2));
        let twins = fc.features[2].geometry.as_ref().expect("geometry");
        assert_eq!(twins.polygons().len(), 2);
    }

    #[test]
    fn numeric_ids_are_stringified() {
        let fc = FeatureCollection::from_geojson_str(SAMPLE).expect("parse");
        assert_eq!(fc.features[0].id.as_deref(), Some("SQL"));
        assert_eq!(fc.features[1].id.as_deref(), Some("2"));
        assert_eq!(fc.features[2].id, None);
    }

    #[test]
    fn null_and_point_geometry_become_none() {
        let fc = FeatureCollection::from_geojson_str(SAMPLE).expect("parse");
        assert!(fc.features[3].geometry.is_none());
        assert!(fc.features[4].geometry.is_none());
    }

    #[test]
    fn malformed_geometry_does_not_abort_the_load() {
        let payload = r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": {}, "geometry": { "type": "Polygon", "coordinates": [[["x", 1]]] } },
                { "type": "Feature", "properties": {}, "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1]]] } }
            ]
        }"#;
        let fc = FeatureCollection::from_geojson_str(payload).expect("parse");
        assert_eq!(fc.len(), 2);
        assert!(fc.features[0].geometry.is_none());
        assert!(fc.features[1].geometry.is_some());
    }

    #[test]
    fn rejects_non_collections() {
        let err = FeatureCollection::from_geojson_str(r#"{"type": "Feature"}"#).unwrap_err();
        assert!(matches!(err, FeatureCollectionError::NotAFeatureCollection));
        let err = FeatureCollection::from_geojson_str("not json").unwrap_err();
        assert!(matches!(err, FeatureCollectionError::Json(_)));
    }

    #[test]
    fn rejects_non_feature_members() {
        let payload = r#"{"type": "FeatureCollection", "features": [{"type": "Polygon"}]}"#;
        let err = FeatureCollection::from_geojson_str(payload).unwrap_err();
        assert!(matches!(err, FeatureCollectionError::InvalidFeature { index: 0, .. }));
    }
}
