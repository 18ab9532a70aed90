use anyhow::Result;
use log::warn;
use nalgebra::Vector3;

use crate::cloud::{Datatype, PointCloud};
use crate::traverse::try_alloc;
use crate::value::read_f32;

/// Extracts 3-component geometry (positions or surface normals) from a
/// schema-described cloud.
///
/// The three axis fields are resolved once, at construction. If any of them
/// is missing, the handler is permanently incapable and extracts nothing.
pub struct GeometryHandler<'a> {
    cloud: &'a PointCloud,
    offsets: Option<[usize; 3]>,
}

impl<'a> GeometryHandler<'a> {
    /// Handler over the `x`/`y`/`z` position fields
    pub fn xyz(cloud: &'a PointCloud) -> Self {
        Self::custom(cloud, "x", "y", "z")
    }

    /// Handler over the `normal_x`/`normal_y`/`normal_z` fields
    pub fn surface_normals(cloud: &'a PointCloud) -> Self {
        Self::custom(cloud, "normal_x", "normal_y", "normal_z")
    }

    /// Handler over three caller-named axis fields
    pub fn custom(cloud: &'a PointCloud, x_name: &str, y_name: &str, z_name: &str) -> Self {
        let offsets = resolve_axes(cloud, [x_name, y_name, z_name]);
        Self { cloud, offsets }
    }

    pub fn is_capable(&self) -> bool {
        self.offsets.is_some()
    }

    /// Extracts one point per usable record, in record order.
    ///
    /// Dense clouds are copied verbatim. Non-dense clouds are screened per
    /// component, short-circuiting in x, y, z order: a record with a
    /// non-finite x is abandoned without reading its y or z, and a failing
    /// record never emits a partial triple. Returns `None` if the handler is
    /// incapable.
    pub fn geometry(&self) -> Result<Option<Vec<Vector3<f32>>>> {
        let [x_offset, y_offset, z_offset] = match self.offsets {
            Some(offsets) => offsets,
            None => return Ok(None),
        };

        let mut points = try_alloc(self.cloud.point_count())?;

        if self.cloud.is_dense() {
            for cp in 0..self.cloud.point_count() {
                let record = self.cloud.record(cp);
                points.push(Vector3::new(
                    read_f32(record, x_offset),
                    read_f32(record, y_offset),
                    read_f32(record, z_offset),
                ));
            }
        } else {
            for cp in 0..self.cloud.point_count() {
                let record = self.cloud.record(cp);
                let x = read_f32(record, x_offset);
                if !x.is_finite() {
                    continue;
                }
                let y = read_f32(record, y_offset);
                if !y.is_finite() {
                    continue;
                }
                let z = read_f32(record, z_offset);
                if !z.is_finite() {
                    continue;
                }
                points.push(Vector3::new(x, y, z));
            }
        }

        Ok(Some(points))
    }
}

/// Resolves three axis fields in order, stopping at the first missing one
fn resolve_axes(cloud: &PointCloud, names: [&str; 3]) -> Option<[usize; 3]> {
    let mut offsets = [0usize; 3];
    for (slot, name) in offsets.iter_mut().zip(names.iter()) {
        let field = cloud.field(name)?;
        if field.datatype != Datatype::F32 {
            warn!(
                "Geometry field {:?} has datatype {:?}, expected F32",
                name, field.datatype
            );
            return None;
        }
        *slot = field.offset as usize;
    }
    Some(offsets)
}
