use anyhow::{bail, Result};

/// Primitive datatypes for point record fields. The numeric codes match the
/// datatype constants of PointCloud2-style messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Datatype {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    F32,
    F64,
}

impl Datatype {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Datatype::I8),
            2 => Some(Datatype::U8),
            3 => Some(Datatype::I16),
            4 => Some(Datatype::U16),
            5 => Some(Datatype::I32),
            6 => Some(Datatype::U32),
            7 => Some(Datatype::F32),
            8 => Some(Datatype::F64),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Datatype::I8 => 1,
            Datatype::U8 => 2,
            Datatype::I16 => 3,
            Datatype::U16 => 4,
            Datatype::I32 => 5,
            Datatype::U32 => 6,
            Datatype::F32 => 7,
            Datatype::F64 => 8,
        }
    }

    /// Size of one value of this datatype in bytes
    pub fn size(self) -> usize {
        match self {
            Datatype::I8 | Datatype::U8 => 1,
            Datatype::I16 | Datatype::U16 => 2,
            Datatype::I32 | Datatype::U32 | Datatype::F32 => 4,
            Datatype::F64 => 8,
        }
    }
}

/// One named field inside a point record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointField {
    pub name: String,
    pub offset: u32,
    pub datatype: Datatype,
    pub count: u32,
}

/// A schema-described point cloud: `width * height` records of `point_step`
/// bytes each, with named fields at byte offsets within every record.
///
/// `is_dense` is the producer's promise that no record contains non-finite
/// position components. Non-dense clouds get screened during geometry
/// extraction.
#[derive(Debug)]
pub struct PointCloud {
    width: u32,
    height: u32,
    point_step: usize,
    fields: Vec<PointField>,
    data: Vec<u8>,
    is_dense: bool,
}

impl PointCloud {
    pub fn new(
        width: u32,
        height: u32,
        point_step: usize,
        fields: Vec<PointField>,
        data: Vec<u8>,
        is_dense: bool,
    ) -> Result<Self> {
        let point_count = width as usize * height as usize;
        if data.len() < point_count * point_step {
            bail!(
                "Point cloud data is {} bytes, but {} records with a stride of {} bytes require {}",
                data.len(),
                point_count,
                point_step,
                point_count * point_step
            );
        }
        for field in &fields {
            let field_end =
                field.offset as usize + field.datatype.size() * field.count.max(1) as usize;
            if field_end > point_step {
                bail!(
                    "Field {:?} ends at byte {} and does not fit into the record stride of {} bytes",
                    field.name,
                    field_end,
                    point_step
                );
            }
        }
        Ok(Self {
            width,
            height,
            point_step,
            fields,
            data,
            is_dense,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn point_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn point_step(&self) -> usize {
        self.point_step
    }

    pub fn is_dense(&self) -> bool {
        self.is_dense
    }

    pub fn fields(&self) -> &[PointField] {
        &self.fields
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Index of the field named `name`, matched case-sensitively
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&PointField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The raw bytes of the record at `index`
    pub fn record(&self, index: usize) -> &[u8] {
        let start = index * self.point_step;
        &self.data[start..start + self.point_step]
    }
}
