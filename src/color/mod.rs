//! Color handler family: interchangeable strategies that turn one field of a
//! point cloud (or no field at all) into per-point colors. All strategies
//! share the same gated record traversal.

mod basic;
pub use self::basic::*;

mod rgb;
pub use self::rgb::*;

mod scalar;
pub use self::scalar::*;

mod hsv;
pub use self::hsv::*;

mod label;
pub use self::label::*;

mod palette;
pub use self::palette::*;

use anyhow::Result;

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// An 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Output of one color extraction. Which variant a handler produces is fixed
/// by its strategy; the element count can be smaller than the record count
/// when records were filtered out.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorData {
    Rgb(Vec<Rgb>),
    Rgba(Vec<Rgba>),
    Scalar(Vec<f32>),
}

impl ColorData {
    pub fn len(&self) -> usize {
        match self {
            ColorData::Rgb(values) => values.len(),
            ColorData::Rgba(values) => values.len(),
            ColorData::Scalar(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Common interface of all color strategies.
///
/// `color()` returns `Ok(None)` iff the handler is incapable (its required
/// fields are missing from the schema it was built against); it never reads
/// buffer bytes in that case. Allocation failure is the only error.
pub trait ColorHandler {
    fn is_capable(&self) -> bool;

    fn color(&self) -> Result<Option<ColorData>>;
}
