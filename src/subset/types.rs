use std::path::PathBuf;
use thiserror::Error;

/// Geographic subsetting of one NetCDF file.
pub trait Subsetter {
    /// Writes the subset of `request.input` to `request.output` or fails.
    fn subset(&self, request: &SubsetRequest) -> Result<(), SubsetError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubsetRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Names of the x and y dimensions, `["lon", "lat"]` for CCI products.
    pub dimensions: [String; 2],
    /// `[min_x, max_x]`
    pub x_bounds: [f64; 2],
    /// `[max_y, min_y]`
    pub y_bounds: [f64; 2],
}

#[derive(Debug, Error)]
pub enum SubsetError {
    #[cfg(feature = "gdal")]
    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),
    #[error("{0}")]
    Failed(String),
}
