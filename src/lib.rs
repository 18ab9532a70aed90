//! Extraction of render-ready geometry and color arrays from schema-described
//! point cloud buffers.
//!
//! A point cloud here is a flat byte buffer of fixed-stride records whose
//! named fields (position axes, color channels, scalar attributes, labels)
//! live at byte offsets described by a list of [`PointField`]s. Geometry
//! handlers pull 3-component float positions out of such a buffer, color
//! handlers turn one of its fields into per-point colors using one of several
//! interchangeable strategies.
//!
//! Handlers borrow the cloud they are built against and resolve their
//! required fields once, at construction. A handler whose fields are missing
//! is *incapable*: it stays constructible and queryable but extracts nothing.

mod cloud;
pub use self::cloud::*;

mod value;

mod traverse;

mod geometry;
pub use self::geometry::*;

mod color;
pub use self::color::*;
