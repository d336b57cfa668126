//! GeoJSON writer for joined datasets.
//!
//! Each feature becomes a GeoJSON `Feature` whose geometry is a
//! `MultiPolygon` with one polygon per ring: rings in a [`PolygonEntity`]
//! are separate parts of a region (islands, exclaves), not holes. The
//! attribute fields become `properties`, with the join key stored under
//! `key_property`.
//!
//! GeoJSON requires closed linear rings, so a ring whose last point differs
//! from its first gets the first point appended on output, and empty rings
//! are left out. The in-memory rings are left untouched.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::{json, Map, Value};

use super::key::JoinKey;
use super::model::{CombinedDataset, Feature, FieldValue, PolygonEntity, Ring};
use crate::error::ShapejoinError;

/// Writes a dataset to a GeoJSON file.
pub fn write_geojson(
    path: &Path,
    dataset: &CombinedDataset,
    key_property: &str,
) -> Result<(), ShapejoinError> {
    let file = File::create(path).map_err(ShapejoinError::Io)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, &to_geojson_value(dataset, key_property)).map_err(
        |source| ShapejoinError::GeoJsonWrite {
            path: path.to_path_buf(),
            source,
        },
    )?;
    writer.flush().map_err(ShapejoinError::Io)
}

/// Writes a dataset to a GeoJSON string.
pub fn to_geojson_string(
    dataset: &CombinedDataset,
    key_property: &str,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&to_geojson_value(dataset, key_property))
}

/// Builds the GeoJSON `FeatureCollection` for a dataset.
pub fn to_geojson_value(dataset: &CombinedDataset, key_property: &str) -> Value {
    let features: Vec<Value> = dataset
        .features
        .iter()
        .map(|feature| feature_value(feature, key_property))
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

fn feature_value(feature: &Feature, key_property: &str) -> Value {
    let mut properties = Map::new();
    properties.insert(key_property.to_string(), key_value(&feature.attributes.key));
    for (name, value) in &feature.attributes.fields {
        // The key property wins over a same-named field
        if name != key_property {
            properties.insert(name.clone(), field_value(value));
        }
    }

    json!({
        "type": "Feature",
        "properties": properties,
        "geometry": geometry_value(&feature.polygon),
    })
}

fn geometry_value(polygon: &PolygonEntity) -> Value {
    // An empty linear ring is not valid GeoJSON
    let coordinates: Vec<Value> = polygon
        .rings
        .iter()
        .filter(|ring| !ring.is_empty())
        .map(|ring| Value::Array(vec![ring_value(ring)]))
        .collect();

    json!({
        "type": "MultiPolygon",
        "coordinates": coordinates,
    })
}

fn ring_value(ring: &Ring) -> Value {
    let mut coords: Vec<Value> = ring.points().iter().map(|p| json!([p.x, p.y])).collect();
    if let (Some(first), Some(last)) = (ring.points().first(), ring.points().last()) {
        if first != last {
            coords.push(json!([first.x, first.y]));
        }
    }
    Value::Array(coords)
}

fn key_value(key: &JoinKey) -> Value {
    match key {
        JoinKey::Int(v) => json!(v),
        JoinKey::Text(s) => json!(s),
    }
}

fn field_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Int(v) => json!(v),
        // Non-finite floats have no JSON form and become null
        FieldValue::Float(v) => json!(v),
        FieldValue::Text(s) => json!(s),
        FieldValue::Null => Value::Null,
    }
}
