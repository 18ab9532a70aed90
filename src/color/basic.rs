use anyhow::Result;
use rand::{thread_rng, Rng};

use super::{ColorData, ColorHandler, Rgb};
use crate::cloud::PointCloud;
use crate::traverse::{for_each_valid_record, try_alloc};

/// Colors every point with one caller-supplied color. Always capable.
pub struct CustomColorHandler<'a> {
    cloud: &'a PointCloud,
    color: Rgb,
}

impl<'a> CustomColorHandler<'a> {
    pub fn new(cloud: &'a PointCloud, color: Rgb) -> Self {
        Self { cloud, color }
    }
}

impl ColorHandler for CustomColorHandler<'_> {
    fn is_capable(&self) -> bool {
        true
    }

    fn color(&self) -> Result<Option<ColorData>> {
        let mut colors = try_alloc(self.cloud.point_count())?;
        for_each_valid_record(self.cloud, |_record| colors.push(self.color));
        Ok(Some(ColorData::Rgb(colors)))
    }
}

/// Colors every point with a single random color, drawn once per extraction
/// call rather than per record. Always capable.
pub struct RandomColorHandler<'a> {
    cloud: &'a PointCloud,
}

impl<'a> RandomColorHandler<'a> {
    pub fn new(cloud: &'a PointCloud) -> Self {
        Self { cloud }
    }
}

impl ColorHandler for RandomColorHandler<'_> {
    fn is_capable(&self) -> bool {
        true
    }

    fn color(&self) -> Result<Option<ColorData>> {
        let mut rng = thread_rng();
        let color = Rgb::new(rng.gen(), rng.gen(), rng.gen());

        let mut colors = try_alloc(self.cloud.point_count())?;
        for_each_valid_record(self.cloud, |_record| colors.push(color));
        Ok(Some(ColorData::Rgb(colors)))
    }
}
