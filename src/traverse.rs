//! Shared record traversal for the color handler family.

use anyhow::{Context, Result};

use crate::cloud::PointCloud;
use crate::value::{finite3, read_f32};

/// Visits every record of `cloud` that passes the position validity gate.
///
/// If the cloud carries an `x` field, three consecutive f32s are read at its
/// offset and the record is skipped when any component is non-finite —
/// regardless of what the visiting strategy extracts. Clouds without an `x`
/// field are visited unconditionally. The gate deliberately ignores
/// `is_dense`; only geometry extraction trusts that flag.
pub(crate) fn for_each_valid_record<F>(cloud: &PointCloud, mut visit: F)
where
    F: FnMut(&[u8]),
{
    // The gate reads the full 12-byte position block, so it needs the block
    // to fit inside the record stride.
    let x_offset = cloud
        .field("x")
        .map(|f| f.offset as usize)
        .filter(|&offset| offset + 12 <= cloud.point_step());

    for cp in 0..cloud.point_count() {
        let record = cloud.record(cp);
        if let Some(x_offset) = x_offset {
            let x = read_f32(record, x_offset);
            let y = read_f32(record, x_offset + 4);
            let z = read_f32(record, x_offset + 8);
            if !finite3(x, y, z) {
                continue;
            }
        }
        visit(record);
    }
}

/// Allocates an output vector for `capacity` elements up front, surfacing
/// allocation failure instead of letting the extraction die halfway through.
pub(crate) fn try_alloc<T>(capacity: usize) -> Result<Vec<T>> {
    let mut out = Vec::new();
    out.try_reserve_exact(capacity)
        .context("Failed to allocate extraction output")?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::{Datatype, PointField};

    fn xyz_cloud(points: &[(f32, f32, f32)]) -> Result<PointCloud> {
        let fields = vec![
            PointField {
                name: "x".into(),
                offset: 0,
                datatype: Datatype::F32,
                count: 1,
            },
            PointField {
                name: "y".into(),
                offset: 4,
                datatype: Datatype::F32,
                count: 1,
            },
            PointField {
                name: "z".into(),
                offset: 8,
                datatype: Datatype::F32,
                count: 1,
            },
        ];
        let mut data = Vec::new();
        for &(x, y, z) in points {
            data.extend_from_slice(&x.to_le_bytes());
            data.extend_from_slice(&y.to_le_bytes());
            data.extend_from_slice(&z.to_le_bytes());
        }
        PointCloud::new(points.len() as u32, 1, 12, fields, data, false)
    }

    #[test]
    fn test_gate_skips_non_finite_positions() -> Result<()> {
        let cloud = xyz_cloud(&[
            (0.0, 0.0, 0.0),
            (f32::NAN, 0.0, 0.0),
            (0.0, f32::INFINITY, 0.0),
            (1.0, 2.0, 3.0),
        ])?;
        let mut visited = 0;
        for_each_valid_record(&cloud, |_| visited += 1);
        assert_eq!(visited, 2);
        Ok(())
    }

    #[test]
    fn test_no_x_field_means_no_gate() -> Result<()> {
        let fields = vec![PointField {
            name: "intensity".into(),
            offset: 0,
            datatype: Datatype::F32,
            count: 1,
        }];
        let mut data = Vec::new();
        data.extend_from_slice(&f32::NAN.to_le_bytes());
        data.extend_from_slice(&1.0f32.to_le_bytes());
        let cloud = PointCloud::new(2, 1, 4, fields, data, false)?;

        let mut visited = 0;
        for_each_valid_record(&cloud, |_| visited += 1);
        assert_eq!(visited, 2);
        Ok(())
    }
}
