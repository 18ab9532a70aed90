use anyhow::Result;
use log::warn;

use super::{ColorData, ColorHandler, Rgb, Rgba};
use crate::cloud::PointCloud;
use crate::traverse::{for_each_valid_record, try_alloc};

/// Reads packed color channels straight out of an `rgb` field (with `rgba`
/// as fallback).
///
/// The four bytes at the field offset are taken as channels in little-endian
/// packed order `[b, g, r, a]` — a bit reinterpretation, no numeric
/// conversion and no finiteness screening of the channel bytes.
pub struct RgbFieldHandler<'a> {
    cloud: &'a PointCloud,
    offset: Option<usize>,
}

impl<'a> RgbFieldHandler<'a> {
    pub fn new(cloud: &'a PointCloud) -> Self {
        let offset = packed_color_offset(cloud, &["rgb", "rgba"]);
        Self { cloud, offset }
    }
}

impl ColorHandler for RgbFieldHandler<'_> {
    fn is_capable(&self) -> bool {
        self.offset.is_some()
    }

    fn color(&self) -> Result<Option<ColorData>> {
        let offset = match self.offset {
            Some(offset) => offset,
            None => return Ok(None),
        };

        let mut colors = try_alloc(self.cloud.point_count())?;
        for_each_valid_record(self.cloud, |record| {
            colors.push(Rgb {
                r: record[offset + 2],
                g: record[offset + 1],
                b: record[offset],
            });
        });
        Ok(Some(ColorData::Rgb(colors)))
    }
}

/// Like [`RgbFieldHandler`], but requires an `rgba` field and keeps the
/// alpha channel.
pub struct RgbaFieldHandler<'a> {
    cloud: &'a PointCloud,
    offset: Option<usize>,
}

impl<'a> RgbaFieldHandler<'a> {
    pub fn new(cloud: &'a PointCloud) -> Self {
        let offset = packed_color_offset(cloud, &["rgba"]);
        Self { cloud, offset }
    }
}

impl ColorHandler for RgbaFieldHandler<'_> {
    fn is_capable(&self) -> bool {
        self.offset.is_some()
    }

    fn color(&self) -> Result<Option<ColorData>> {
        let offset = match self.offset {
            Some(offset) => offset,
            None => return Ok(None),
        };

        let mut colors = try_alloc(self.cloud.point_count())?;
        for_each_valid_record(self.cloud, |record| {
            colors.push(Rgba {
                r: record[offset + 2],
                g: record[offset + 1],
                b: record[offset],
                a: record[offset + 3],
            });
        });
        Ok(Some(ColorData::Rgba(colors)))
    }
}

/// Resolves the first matching packed color field. The declared field width
/// must be exactly the 4 bytes the channel extraction consumes.
fn packed_color_offset(cloud: &PointCloud, names: &[&str]) -> Option<usize> {
    let field = names.iter().find_map(|name| cloud.field(name))?;
    if field.datatype.size() != 4 {
        warn!(
            "Packed color field {:?} is {} bytes wide, expected 4",
            field.name,
            field.datatype.size()
        );
        return None;
    }
    Some(field.offset as usize)
}
