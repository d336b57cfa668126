//! Core data model for the join.
//!
//! Attribute rows and geometry records come in from the table and shapefile
//! readers; polygon entities and the combined dataset go out to whatever
//! renders the map. Everything here is a plain owned value built fresh for
//! each join.

use serde::{Deserialize, Serialize};

use super::key::JoinKey;
use super::point::Point;

/// A scalar attribute value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
    Null,
}

impl FieldValue {
    /// Infers a value from a raw table cell.
    ///
    /// Surrounding whitespace is trimmed. Empty cells become
    /// [`FieldValue::Null`]; integers are tried before floats so that `"10"`
    /// stays an integer. Only finite floats are numbers: `"NaN"` and `"inf"`
    /// stay text.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return FieldValue::Null;
        }
        if let Ok(v) = trimmed.parse::<i64>() {
            return FieldValue::Int(v);
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => FieldValue::Float(v),
            _ => FieldValue::Text(trimmed.to_string()),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

/// One row of the attribute table.
///
/// Keys are not guaranteed unique. Field order is the column order of the
/// source table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttributeRow {
    /// Value of the designated key column.
    pub key: JoinKey,

    /// Named scalar fields, in source column order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<(String, FieldValue)>,
}

impl AttributeRow {
    /// Creates a row with no fields.
    pub fn new(key: impl Into<JoinKey>) -> Self {
        Self {
            key: key.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field to the row.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Looks up a field by name. The first field with that name wins.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field_name, _)| field_name == name)
            .map(|(_, value)| value)
    }
}

/// One record from the geometry source.
///
/// `parts` holds the zero-based offsets into `points` where each part
/// begins; the last part runs to the end of `points`. An empty `parts` is
/// read as a single part starting at 0.
///
/// Offsets are trusted: out-of-range or unordered offsets are the reader's
/// problem, checked by
/// [`validate_geometry_records`](crate::validation::validate_geometry_records)
/// rather than by the decoder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeometryRecord {
    /// Join key of the region this record belongs to.
    pub key: JoinKey,

    /// The full point stream, all parts concatenated.
    pub points: Vec<Point>,

    /// Part-start offsets.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<usize>,
}

impl GeometryRecord {
    /// Creates a single-part record.
    pub fn new(key: impl Into<JoinKey>, points: Vec<Point>) -> Self {
        Self {
            key: key.into(),
            points,
            parts: Vec::new(),
        }
    }

    /// Sets the part-start offsets.
    pub fn with_parts(mut self, parts: Vec<usize>) -> Self {
        self.parts = parts;
        self
    }

    /// Number of parts in the record. Never zero.
    #[inline]
    pub fn num_parts(&self) -> usize {
        self.parts.len().max(1)
    }

    /// Number of points across all parts.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }
}

/// A closed boundary loop.
///
/// No closing point is appended; the ring holds exactly the points the
/// source supplied for its part.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring(pub Vec<Point>);

impl Ring {
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Point>> for Ring {
    fn from(points: Vec<Point>) -> Self {
        Ring(points)
    }
}

impl From<&[Point]> for Ring {
    fn from(points: &[Point]) -> Self {
        Ring(points.to_vec())
    }
}

/// One rendered region: one or more rings under a single key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolygonEntity {
    pub key: JoinKey,
    pub rings: Vec<Ring>,
}

impl PolygonEntity {
    /// Total number of points across all rings.
    pub fn num_points(&self) -> usize {
        self.rings.iter().map(Ring::len).sum()
    }
}

/// An attribute row paired with the polygon its key resolved to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub attributes: AttributeRow,
    pub polygon: PolygonEntity,
}

impl Feature {
    #[inline]
    pub fn key(&self) -> &JoinKey {
        &self.attributes.key
    }
}

/// The result of a join: matched rows in input order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinedDataset {
    pub features: Vec<Feature>,
}

impl CombinedDataset {
    #[inline]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Iterates over the keys of the features, in order.
    pub fn keys(&self) -> impl Iterator<Item = &JoinKey> {
        self.features.iter().map(Feature::key)
    }
}
