use anyhow::Result;
use log::warn;

use super::{ColorData, ColorHandler};
use crate::cloud::{Datatype, PointCloud};
use crate::traverse::{for_each_valid_record, try_alloc};
use crate::value::decode_f32;

/// Extracts an arbitrary named scalar field as a per-point intensity.
///
/// The field is decoded into f32 per its datatype; records whose decoded
/// value is non-finite are dropped on top of the shared position gate.
/// Fields wider than an f32 (F64) are rejected at construction.
pub struct GenericFieldHandler<'a> {
    cloud: &'a PointCloud,
    field: Option<(usize, Datatype)>,
}

impl<'a> GenericFieldHandler<'a> {
    pub fn new(cloud: &'a PointCloud, field_name: &str) -> Self {
        let field = match cloud.field(field_name) {
            Some(field) if field.datatype.size() <= 4 => {
                Some((field.offset as usize, field.datatype))
            }
            Some(field) => {
                warn!(
                    "Scalar field {:?} is {} bytes wide and does not fit the f32 output",
                    field_name,
                    field.datatype.size()
                );
                None
            }
            None => None,
        };
        Self { cloud, field }
    }
}

impl ColorHandler for GenericFieldHandler<'_> {
    fn is_capable(&self) -> bool {
        self.field.is_some()
    }

    fn color(&self) -> Result<Option<ColorData>> {
        let (offset, datatype) = match self.field {
            Some(field) => field,
            None => return Ok(None),
        };
        let width = datatype.size();

        let mut values = try_alloc(self.cloud.point_count())?;
        for_each_valid_record(self.cloud, |record| {
            let value = decode_f32(datatype, &record[offset..offset + width]);
            if !value.is_finite() {
                return;
            }
            values.push(value);
        });
        Ok(Some(ColorData::Scalar(values)))
    }
}
