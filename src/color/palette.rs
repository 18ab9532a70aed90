//! Fixed categorical palette for label coloring, plus the label colormap
//! builder used by the dynamic mapping mode.

use std::collections::{BTreeMap, BTreeSet};

use super::Rgb;

/// Ordered table of visually distinct colors for categorical rendering.
/// Indexing wraps around: consumers take `PALETTE[i % PALETTE.len()]`.
pub const PALETTE: &[Rgb] = &[
    Rgb::new(230, 25, 75),
    Rgb::new(60, 180, 75),
    Rgb::new(255, 225, 25),
    Rgb::new(0, 130, 200),
    Rgb::new(245, 130, 48),
    Rgb::new(145, 30, 180),
    Rgb::new(70, 240, 240),
    Rgb::new(240, 50, 230),
    Rgb::new(210, 245, 60),
    Rgb::new(250, 190, 212),
    Rgb::new(0, 128, 128),
    Rgb::new(220, 190, 255),
    Rgb::new(170, 110, 40),
    Rgb::new(255, 250, 200),
    Rgb::new(128, 0, 0),
    Rgb::new(170, 255, 195),
    Rgb::new(128, 128, 0),
    Rgb::new(255, 215, 180),
    Rgb::new(0, 0, 128),
    Rgb::new(128, 128, 128),
    Rgb::new(255, 255, 255),
    Rgb::new(0, 0, 0),
    Rgb::new(255, 80, 5),
    Rgb::new(94, 79, 162),
    Rgb::new(0, 90, 50),
    Rgb::new(255, 204, 153),
    Rgb::new(102, 51, 0),
    Rgb::new(255, 102, 178),
    Rgb::new(153, 204, 255),
    Rgb::new(51, 102, 0),
    Rgb::new(204, 0, 102),
    Rgb::new(0, 204, 153),
];

/// Static label color: a pure function of the label value alone
pub fn palette_color(label: u32) -> Rgb {
    PALETTE[label as usize % PALETTE.len()]
}

/// Assigns palette colors to the distinct labels in ascending numeric order.
///
/// The assignment depends only on the label set, not on how it was
/// collected: running the builder twice over the same set yields the same
/// mapping.
pub fn build_label_colormap(labels: &BTreeSet<u32>) -> BTreeMap<u32, Rgb> {
    labels
        .iter()
        .enumerate()
        .map(|(index, &label)| (label, PALETTE[index % PALETTE.len()]))
        .collect()
}
