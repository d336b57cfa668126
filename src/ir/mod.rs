//! Data model and collaborator I/O for shapejoin.
//!
//! The model types are deliberately plain: attribute rows and geometry
//! records as the table and shapefile readers hand them over, polygon
//! entities and the combined dataset as the renderer consumes them.
//!
//! # Design Principles
//!
//! 1. **Typed Keys**: Join keys are an explicit integer-or-text choice, so a
//!    key-type mismatch shows up as a failed join instead of a silent
//!    coercion.
//!
//! 2. **Permissive Construction**: Geometry records may hold offsets the
//!    decoder cannot use; [`validation`](crate::validation) reports them
//!    rather than the constructors rejecting them.
//!
//! # Example
//!
//! ```
//! use shapejoin::ir::{AttributeRow, GeometryRecord, Point};
//!
//! let row = AttributeRow::new(19001i64).with_field("yield", 150.5);
//! let shape = GeometryRecord::new(
//!     19001i64,
//!     vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)],
//! );
//! assert_eq!(row.key, shape.key);
//! ```

pub mod io_attributes_csv;
pub mod io_geojson;
pub mod io_geometry_json;
mod key;
mod model;
mod point;

// Re-export core types for convenient access
pub use key::{JoinKey, KeyKind};
pub use model::{
    AttributeRow, CombinedDataset, Feature, FieldValue, GeometryRecord, PolygonEntity, Ring,
};
pub use point::Point;
