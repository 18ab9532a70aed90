//! Decoding of field bytes into typed values. All layout assumptions
//! (little-endian, IEEE-754 f32) are concentrated here.

use byteorder::{ByteOrder, LittleEndian};

use crate::cloud::Datatype;

/// Reads the f32 at `offset` within a record
pub(crate) fn read_f32(record: &[u8], offset: usize) -> f32 {
    LittleEndian::read_f32(&record[offset..offset + 4])
}

/// Decodes a field value into an f32, widening explicitly per datatype.
/// `bytes` must hold exactly one value of `datatype`.
pub(crate) fn decode_f32(datatype: Datatype, bytes: &[u8]) -> f32 {
    match datatype {
        Datatype::I8 => bytes[0] as i8 as f32,
        Datatype::U8 => bytes[0] as f32,
        Datatype::I16 => LittleEndian::read_i16(bytes) as f32,
        Datatype::U16 => LittleEndian::read_u16(bytes) as f32,
        Datatype::I32 => LittleEndian::read_i32(bytes) as f32,
        Datatype::U32 => LittleEndian::read_u32(bytes) as f32,
        Datatype::F32 => LittleEndian::read_f32(bytes),
        Datatype::F64 => LittleEndian::read_f64(bytes) as f32,
    }
}

pub(crate) fn finite3(x: f32, y: f32, z: f32) -> bool {
    x.is_finite() && y.is_finite() && z.is_finite()
}
