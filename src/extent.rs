use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ExtentError {
    #[error("Extent needs exactly 4 values (ulx uly lrx lry), got {0}")]
    Arity(usize),
    #[error("Extent values must be finite numbers")]
    NotFinite,
    #[error("Longitude values must be between -180 and 180")]
    Longitude,
    #[error("Latitude values must be between -90 and 90")]
    Latitude,
    #[error("Extent must have a non-zero width and height")]
    Empty,
}

/// Bounding box given as upper-left and lower-right corners, in degrees.
///
/// The corners are kept exactly as supplied. [`Extent::x_bounds`] and
/// [`Extent::y_bounds`] derive the ordered pairs handed to the subsetter, so a
/// caller that swaps the corners still gets a correct subset.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct Extent {
    pub ulx: f64,
    pub uly: f64,
    pub lrx: f64,
    pub lry: f64,
}

impl Extent {
    pub fn new(ulx: f64, uly: f64, lrx: f64, lry: f64) -> Result<Self, ExtentError> {
        if ![ulx, uly, lrx, lry].iter().all(|v| v.is_finite()) {
            return Err(ExtentError::NotFinite);
        }

        if !(-180.0..=180.0).contains(&ulx) || !(-180.0..=180.0).contains(&lrx) {
            return Err(ExtentError::Longitude);
        }

        if !(-90.0..=90.0).contains(&uly) || !(-90.0..=90.0).contains(&lry) {
            return Err(ExtentError::Latitude);
        }

        if ulx == lrx || uly == lry {
            return Err(ExtentError::Empty);
        }

        Ok(Extent { ulx, uly, lrx, lry })
    }

    pub fn from_slice(values: &[f64]) -> Result<Self, ExtentError> {
        match values {
            [ulx, uly, lrx, lry] => Extent::new(*ulx, *uly, *lrx, *lry),
            _ => Err(ExtentError::Arity(values.len())),
        }
    }

    /// Longitude bounds, ascending.
    pub fn x_bounds(&self) -> [f64; 2] {
        [self.ulx.min(self.lrx), self.ulx.max(self.lrx)]
    }

    /// Latitude bounds, descending (north first).
    pub fn y_bounds(&self) -> [f64; 2] {
        [self.uly.max(self.lry), self.uly.min(self.lry)]
    }
}

impl TryFrom<Vec<f64>> for Extent {
    type Error = ExtentError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Extent::from_slice(&values)
    }
}
