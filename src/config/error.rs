use thiserror::Error;

use super::{CompositePeriod, DatasetFamily, Product};
use crate::extent::ExtentError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("end_date cannot be earlier than start_date")]
    DateOrder,
    #[error("Invalid {field} format: {source}")]
    DateParse {
        field: &'static str,
        #[source]
        source: chrono::ParseError,
    },
    #[error("Invalid extent: {0}")]
    Extent(#[from] ExtentError),
    #[error("{family} archives have no {product} product")]
    Product {
        family: DatasetFamily,
        product: Product,
    },
    #[error("{family} archives have no {composite} composite")]
    Composite {
        family: DatasetFamily,
        composite: CompositePeriod,
    },
    #[error("area label must be non-empty and contain no path separators")]
    Area,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}
