use std::collections::BTreeSet;

use anyhow::Result;
use byteorder::{ByteOrder, LittleEndian};
use log::warn;

use super::{build_label_colormap, palette_color, ColorData, ColorHandler};
use crate::cloud::{Datatype, PointCloud};
use crate::traverse::{for_each_valid_record, try_alloc};

type LabelDecoder = fn(&[u8]) -> u32;

/// Categorical coloring from a `label` field.
///
/// Static mapping colors each label as `PALETTE[label % len]`, a pure
/// function of the label value. Dynamic mapping first collects the distinct
/// labels of the whole cloud and assigns palette colors to them in ascending
/// label order, so the colors depend on the label population but not on
/// record order.
pub struct LabelFieldHandler<'a> {
    cloud: &'a PointCloud,
    field: Option<(usize, usize, LabelDecoder)>,
    static_mapping: bool,
}

impl<'a> LabelFieldHandler<'a> {
    pub fn new(cloud: &'a PointCloud, static_mapping: bool) -> Self {
        let field = match cloud.field("label") {
            Some(field) => match label_decoder(field.datatype) {
                Some(decoder) => Some((field.offset as usize, field.datatype.size(), decoder)),
                None => {
                    warn!(
                        "Label field has datatype {:?}, expected an unsigned integer",
                        field.datatype
                    );
                    None
                }
            },
            None => None,
        };
        Self {
            cloud,
            field,
            static_mapping,
        }
    }
}

impl ColorHandler for LabelFieldHandler<'_> {
    fn is_capable(&self) -> bool {
        self.field.is_some()
    }

    fn color(&self) -> Result<Option<ColorData>> {
        let (offset, width, decode) = match self.field {
            Some(field) => field,
            None => return Ok(None),
        };

        // The dynamic mapping needs the complete distinct label set before
        // any color can be assigned, hence a first pass over all records.
        // This pass runs without the position gate: the mapping reflects the
        // label population of the whole cloud.
        let colormap = if self.static_mapping {
            None
        } else {
            let mut labels = BTreeSet::new();
            for cp in 0..self.cloud.point_count() {
                let record = self.cloud.record(cp);
                labels.insert(decode(&record[offset..offset + width]));
            }
            Some(build_label_colormap(&labels))
        };

        let mut colors = try_alloc(self.cloud.point_count())?;
        for_each_valid_record(self.cloud, |record| {
            let label = decode(&record[offset..offset + width]);
            let color = match &colormap {
                Some(map) => map
                    .get(&label)
                    .copied()
                    .unwrap_or_else(|| palette_color(label)),
                None => palette_color(label),
            };
            colors.push(color);
        });
        Ok(Some(ColorData::Rgb(colors)))
    }
}

/// Narrowing decoders for the accepted unsigned label encodings
fn label_decoder(datatype: Datatype) -> Option<LabelDecoder> {
    match datatype {
        Datatype::U8 => Some(|bytes| bytes[0] as u32),
        Datatype::U16 => Some(|bytes| LittleEndian::read_u16(bytes) as u32),
        Datatype::U32 => Some(|bytes| LittleEndian::read_u32(bytes)),
        _ => None,
    }
}
