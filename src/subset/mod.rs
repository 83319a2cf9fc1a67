#[cfg(feature = "gdal")]
pub mod mdim;
pub mod types;

#[cfg(feature = "gdal")]
pub use mdim::GdalSubsetter;
pub use types::{SubsetError, SubsetRequest, Subsetter};

/// Command line arguments for `gdalmdimtranslate`.
///
/// `-subset` follows the WCS trim syntax `dim(low,high)`, so the descending
/// latitude pair of the request is flipped back here.
pub fn translate_args(format: &str, request: &SubsetRequest) -> Vec<String> {
    let [x_dim, y_dim] = &request.dimensions;
    let [x_min, x_max] = request.x_bounds;
    let [y_max, y_min] = request.y_bounds;

    vec![
        "-of".to_string(),
        format.to_string(),
        "-subset".to_string(),
        format!("{}({},{})", x_dim, x_min, x_max),
        "-subset".to_string(),
        format!("{}({},{})", y_dim, y_min, y_max),
    ]
}
