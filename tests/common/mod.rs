use anyhow::Result;
use cloud_handlers::{Datatype, PointCloud, PointField};

pub fn field(name: &str, offset: u32, datatype: Datatype) -> PointField {
    PointField {
        name: name.into(),
        offset,
        datatype,
        count: 1,
    }
}

/// Builds a cloud with `x`/`y`/`z` (F32) and `label` (U32) fields, one
/// record per input tuple, stride 16.
pub fn xyz_label_cloud(points: &[(f32, f32, f32, u32)], is_dense: bool) -> Result<PointCloud> {
    let fields = vec![
        field("x", 0, Datatype::F32),
        field("y", 4, Datatype::F32),
        field("z", 8, Datatype::F32),
        field("label", 12, Datatype::U32),
    ];
    let mut data = Vec::new();
    for &(x, y, z, label) in points {
        data.extend_from_slice(&x.to_le_bytes());
        data.extend_from_slice(&y.to_le_bytes());
        data.extend_from_slice(&z.to_le_bytes());
        data.extend_from_slice(&label.to_le_bytes());
    }
    PointCloud::new(points.len() as u32, 1, 16, fields, data, is_dense)
}

/// Builds a cloud with `x`/`y`/`z` (F32) and a trailing F32 field named
/// `extra_name`, one record per input tuple, stride 16.
pub fn xyz_scalar_cloud(
    extra_name: &str,
    points: &[(f32, f32, f32, f32)],
    is_dense: bool,
) -> Result<PointCloud> {
    let fields = vec![
        field("x", 0, Datatype::F32),
        field("y", 4, Datatype::F32),
        field("z", 8, Datatype::F32),
        field(extra_name, 12, Datatype::F32),
    ];
    let mut data = Vec::new();
    for &(x, y, z, extra) in points {
        data.extend_from_slice(&x.to_le_bytes());
        data.extend_from_slice(&y.to_le_bytes());
        data.extend_from_slice(&z.to_le_bytes());
        data.extend_from_slice(&extra.to_le_bytes());
    }
    PointCloud::new(points.len() as u32, 1, 16, fields, data, is_dense)
}
