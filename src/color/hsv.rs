use anyhow::Result;
use log::warn;

use super::{ColorData, ColorHandler, Rgb};
use crate::cloud::{Datatype, PointCloud};
use crate::traverse::{for_each_valid_record, try_alloc};
use crate::value::{finite3, read_f32};

/// Converts per-point `h`/`s`/`v` fields into RGB colors.
///
/// All three fields must be present (checked in order; the first missing one
/// makes the handler incapable). Records with a non-finite h, s or v are
/// dropped.
pub struct HsvFieldHandler<'a> {
    cloud: &'a PointCloud,
    offsets: Option<[usize; 3]>,
}

impl<'a> HsvFieldHandler<'a> {
    pub fn new(cloud: &'a PointCloud) -> Self {
        let offsets = resolve_hsv(cloud);
        Self { cloud, offsets }
    }
}

impl ColorHandler for HsvFieldHandler<'_> {
    fn is_capable(&self) -> bool {
        self.offsets.is_some()
    }

    fn color(&self) -> Result<Option<ColorData>> {
        let [h_offset, s_offset, v_offset] = match self.offsets {
            Some(offsets) => offsets,
            None => return Ok(None),
        };

        let mut colors = try_alloc(self.cloud.point_count())?;
        for_each_valid_record(self.cloud, |record| {
            let h = read_f32(record, h_offset);
            let s = read_f32(record, s_offset);
            let v = read_f32(record, v_offset);
            if !finite3(h, s, v) {
                return;
            }
            colors.push(hsv_to_rgb(h, s, v));
        });
        Ok(Some(ColorData::Rgb(colors)))
    }
}

fn resolve_hsv(cloud: &PointCloud) -> Option<[usize; 3]> {
    let mut offsets = [0usize; 3];
    for (slot, name) in offsets.iter_mut().zip(["h", "s", "v"].iter()) {
        let field = cloud.field(name)?;
        if field.datatype != Datatype::F32 {
            warn!(
                "HSV field {:?} has datatype {:?}, expected F32",
                name, field.datatype
            );
            return None;
        }
        *slot = field.offset as usize;
    }
    Some(offsets)
}

/// Sector-table HSV to RGB conversion. Hue is in degrees, value carries the
/// output magnitude (0-255 expected). Channel narrowing truncates instead of
/// rounding, matching the output expectations of downstream renderers.
fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    if s == 0.0 {
        // Achromatic: every channel is the value channel.
        let gray = v as u8;
        return Rgb::new(gray, gray, gray);
    }

    let a = h / 60.0;
    let i = a.floor() as i32;
    let f = a - i as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    // Negative hues land in the default arm along with sector 5.
    let (r, g, b) = match i {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgb::new(r as u8, g as u8, b as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::PointField;

    #[test]
    fn test_zero_saturation_is_achromatic() {
        assert_eq!(hsv_to_rgb(0.0, 0.0, 200.0), Rgb::new(200, 200, 200));
        assert_eq!(hsv_to_rgb(123.0, 0.0, 55.9), Rgb::new(55, 55, 55));
    }

    #[test]
    fn test_sector_boundaries() {
        // Sector 0: pure red
        assert_eq!(hsv_to_rgb(0.0, 1.0, 255.0), Rgb::new(255, 0, 0));
        // Sector 1
        assert_eq!(hsv_to_rgb(90.0, 1.0, 255.0), Rgb::new(127, 255, 0));
        // Sector 2: pure green
        assert_eq!(hsv_to_rgb(120.0, 1.0, 255.0), Rgb::new(0, 255, 0));
        // Sector 4: pure blue
        assert_eq!(hsv_to_rgb(240.0, 1.0, 255.0), Rgb::new(0, 0, 255));
        // Sector 5 via the default arm
        assert_eq!(hsv_to_rgb(300.0, 1.0, 255.0), Rgb::new(255, 0, 255));
    }

    #[test]
    fn test_negative_hue_takes_default_sector() {
        // a = -0.5, floor = -1: (v, p, q) with f = 0.5
        assert_eq!(hsv_to_rgb(-30.0, 1.0, 200.0), Rgb::new(200, 0, 100));
    }

    fn f32_field(name: &str, offset: u32) -> PointField {
        PointField {
            name: name.into(),
            offset,
            datatype: Datatype::F32,
            count: 1,
        }
    }

    #[test]
    fn test_all_three_fields_are_required() -> Result<()> {
        let fields = vec![f32_field("h", 0), f32_field("s", 4)];
        let cloud = PointCloud::new(1, 1, 8, fields, vec![0; 8], true)?;
        let handler = HsvFieldHandler::new(&cloud);
        assert!(!handler.is_capable());
        assert!(handler.color()?.is_none());
        Ok(())
    }

    #[test]
    fn test_non_finite_hsv_records_are_dropped() -> Result<()> {
        let fields = vec![f32_field("h", 0), f32_field("s", 4), f32_field("v", 8)];
        let mut data = Vec::new();
        for &(h, s, v) in &[(0.0f32, 0.0f32, 100.0f32), (f32::NAN, 1.0, 50.0)] {
            data.extend_from_slice(&h.to_le_bytes());
            data.extend_from_slice(&s.to_le_bytes());
            data.extend_from_slice(&v.to_le_bytes());
        }
        let cloud = PointCloud::new(2, 1, 12, fields, data, true)?;
        let data = HsvFieldHandler::new(&cloud).color()?.unwrap();
        assert_eq!(data, ColorData::Rgb(vec![Rgb::new(100, 100, 100)]));
        Ok(())
    }

    #[test]
    fn test_fields_are_read_at_their_own_offsets() -> Result<()> {
        // h, s, v deliberately not adjacent and out of declaration order
        let fields = vec![f32_field("v", 0), f32_field("h", 8), f32_field("s", 4)];
        let mut data = Vec::new();
        data.extend_from_slice(&255.0f32.to_le_bytes()); // v
        data.extend_from_slice(&1.0f32.to_le_bytes()); // s
        data.extend_from_slice(&120.0f32.to_le_bytes()); // h
        let cloud = PointCloud::new(1, 1, 12, fields, data, true)?;
        let data = HsvFieldHandler::new(&cloud).color()?.unwrap();
        assert_eq!(data, ColorData::Rgb(vec![Rgb::new(0, 255, 0)]));
        Ok(())
    }
}
