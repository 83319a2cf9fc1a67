use gdal::programs::raster::{
    MultiDimTranslateDestination, MultiDimTranslateOptions, multi_dim_translate,
};
use gdal::{Dataset, DatasetOptions, GdalOpenFlags};

use super::{SubsetError, SubsetRequest, Subsetter, translate_args};

/// Subsets with GDAL's multidimensional translate (`gdalmdimtranslate`).
#[derive(Debug, Clone)]
pub struct GdalSubsetter {
    format: String,
}

impl GdalSubsetter {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }
}

impl Default for GdalSubsetter {
    fn default() -> Self {
        Self::new("netCDF")
    }
}

impl Subsetter for GdalSubsetter {
    fn subset(&self, request: &SubsetRequest) -> Result<(), SubsetError> {
        let dataset = Dataset::open_ex(
            &request.input,
            DatasetOptions {
                open_flags: GdalOpenFlags::GDAL_OF_MULTIDIM_RASTER,
                ..Default::default()
            },
        )?;

        let options = MultiDimTranslateOptions::new(translate_args(&self.format, request))?;
        let destination = MultiDimTranslateDestination::path(&request.output)?;

        // Dropping the returned dataset flushes and closes the output
        let _written = multi_dim_translate(&[dataset], destination, Some(options))?;

        Ok(())
    }
}
