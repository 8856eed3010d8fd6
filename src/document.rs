//! The GeoJSON document model and its byte encoding.
//!
//! Every record carries its constant `type` tag as a single-variant enum,
//! so only the one supported shape is ever written or accepted back.

use geojson::{GeoJson, Value as GeoJsonValue};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::reader::CoordinatePoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionType {
    FeatureCollection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureType {
    Feature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
}

/// Root of the output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollectionDocument {
    #[serde(rename = "type")]
    pub kind: CollectionType,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: FeatureType,
    pub properties: FeatureProperties,
    pub geometry: PointGeometry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureProperties {
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub kind: GeometryType,
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

impl Feature {
    pub fn point(id: u64, coordinates: [f64; 2]) -> Self {
        Self {
            kind: FeatureType::Feature,
            properties: FeatureProperties { id },
            geometry: PointGeometry {
                kind: GeometryType::Point,
                coordinates,
            },
        }
    }

    pub fn id(&self) -> u64 {
        self.properties.id
    }

    pub fn coordinates(&self) -> [f64; 2] {
        self.geometry.coordinates
    }
}

impl FeatureCollectionDocument {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: CollectionType::FeatureCollection,
            features,
        }
    }
}

/// Output whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Compact,
    Pretty,
}

/// Encode the document as JSON bytes.
pub fn to_bytes(document: &FeatureCollectionDocument, style: Style) -> Result<Vec<u8>> {
    let bytes = match style {
        Style::Compact => serde_json::to_vec(document)?,
        Style::Pretty => serde_json::to_vec_pretty(document)?,
    };
    Ok(bytes)
}

/// Read a GeoJSON FeatureCollection of points back into coordinate rows.
///
/// Accepts any valid GeoJSON collection, not only our own output, but every
/// feature must have a Point geometry.
pub fn decode_points(bytes: &[u8]) -> Result<Vec<CoordinatePoint>> {
    let geojson = GeoJson::from_reader(bytes).map_err(|e| Error::decode(e.to_string()))?;
    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(Error::decode("root is not a FeatureCollection"));
    };

    collection
        .features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| {
            let geometry = feature
                .geometry
                .ok_or_else(|| Error::decode(format!("feature {} has no geometry", index + 1)))?;
            match geometry.value {
                GeoJsonValue::Point(position) if position.len() >= 2 => {
                    Ok(CoordinatePoint::new(position[1], position[0]))
                }
                GeoJsonValue::Point(_) => Err(Error::decode(format!(
                    "feature {} has fewer than 2 coordinates",
                    index + 1
                ))),
                other => Err(Error::decode(format!(
                    "feature {} is a {}, expected Point",
                    index + 1,
                    geometry_name(&other)
                ))),
            }
        })
        .collect()
}

fn geometry_name(value: &GeoJsonValue) -> &'static str {
    match value {
        GeoJsonValue::Point(_) => "Point",
        GeoJsonValue::MultiPoint(_) => "MultiPoint",
        GeoJsonValue::LineString(_) => "LineString",
        GeoJsonValue::MultiLineString(_) => "MultiLineString",
        GeoJsonValue::Polygon(_) => "Polygon",
        GeoJsonValue::MultiPolygon(_) => "MultiPolygon",
        GeoJsonValue::GeometryCollection(_) => "GeometryCollection",
    }
}
