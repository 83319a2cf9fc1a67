use chrono::NaiveDate;

use serde::Deserialize;
use serde::Deserializer;
use serde::de::Error;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::extent::Extent;
use crate::locator::ArchiveLayout;
use crate::naming::NamingConvention;

pub mod composite;
pub use composite::CompositePeriod;

pub mod error;
pub use error::ConfigError;

pub mod family;
pub use family::DatasetFamily;

pub mod product;
pub use product::Product;

pub const DEFAULT_AREA: &str = "global-extracted";

/// A fully specified extraction job for one dataset family.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    family: DatasetFamily,
    input_dir: PathBuf,
    output_dir: PathBuf,
    start_date: NaiveDate,
    end_date: NaiveDate,
    extent: Extent,
    composite: CompositePeriod,
    product: Product,
    area: String,
    naming: NamingConvention,
    dimensions: [String; 2],
    sst_file_tag: String,
}

// Job files name the family and leave everything else optional. Family
// defaults are filled in here and the result goes through `validate` so a
// bad job file fails before any date is visited.
impl<'de> Deserialize<'de> for ExtractionConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct ConfigHelper {
            family: DatasetFamily,
            input_dir: Option<PathBuf>,
            output_dir: PathBuf,
            start_date: String,
            end_date: String,
            extent: Extent,
            composite: Option<CompositePeriod>,
            product: Option<Product>,
            area: Option<String>,
            neodaas_name: Option<bool>,
            dimensions: Option<[String; 2]>,
            sst_file_tag: Option<String>,
        }

        let helper = ConfigHelper::deserialize(deserializer)?;

        let start_date = parse_date("start_date", &helper.start_date).map_err(D::Error::custom)?;
        let end_date = parse_date("end_date", &helper.end_date).map_err(D::Error::custom)?;

        let family = helper.family;
        let mut config = ExtractionConfig::new(
            family,
            helper
                .input_dir
                .unwrap_or_else(|| family.default_input_dir()),
            helper.output_dir,
            start_date,
            end_date,
            helper.extent,
        );

        if let Some(composite) = helper.composite {
            config = config.with_composite(composite);
        }
        if let Some(product) = helper.product {
            config = config.with_product(product);
        }
        if let Some(area) = helper.area {
            config = config.with_area(area);
        }
        if let Some(neodaas) = helper.neodaas_name {
            config = config.with_naming(NamingConvention::from_neodaas_flag(neodaas));
        }
        if let Some(dimensions) = helper.dimensions {
            config = config.with_dimensions(dimensions);
        }
        if let Some(tag) = helper.sst_file_tag {
            config.sst_file_tag = tag;
        }

        config.validate().map_err(D::Error::custom)?;

        Ok(config)
    }
}

/// Parses a `YYYY-MM-DD` date, naming `field` in the error.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|source| ConfigError::DateParse { field, source })
}

impl ExtractionConfig {
    pub fn new(
        family: DatasetFamily,
        input_dir: PathBuf,
        output_dir: PathBuf,
        start_date: NaiveDate,
        end_date: NaiveDate,
        extent: Extent,
    ) -> Self {
        let naming = match family {
            DatasetFamily::OceanColour => NamingConvention::SourceDerived,
            DatasetFamily::Sst => NamingConvention::Neodaas,
        };

        Self {
            family,
            input_dir,
            output_dir,
            start_date,
            end_date,
            extent,
            composite: family.default_composite(),
            product: family.default_product(),
            area: DEFAULT_AREA.to_string(),
            naming,
            dimensions: ["lon".to_string(), "lat".to_string()],
            sst_file_tag: family::SST_FILE_TAG.to_string(),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ExtractionConfig, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let config: ExtractionConfig = serde_json::from_reader(reader)?;

        Ok(config)
    }

    pub fn with_composite(mut self, composite: CompositePeriod) -> Self {
        self.composite = composite;
        self
    }

    pub fn with_product(mut self, product: Product) -> Self {
        self.product = product;
        self
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = area.into();
        self
    }

    pub fn with_naming(mut self, naming: NamingConvention) -> Self {
        self.naming = naming;
        self
    }

    pub fn with_dimensions(mut self, dimensions: [String; 2]) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_date > self.end_date {
            return Err(ConfigError::DateOrder);
        }

        if !self.family.supports_product(self.product) {
            return Err(ConfigError::Product {
                family: self.family,
                product: self.product,
            });
        }

        if !self.family.supports_composite(self.composite) {
            return Err(ConfigError::Composite {
                family: self.family,
                composite: self.composite,
            });
        }

        // The area ends up in a file name
        if self.area.is_empty() || self.area.contains(['/', '\\']) {
            return Err(ConfigError::Area);
        }

        Ok(())
    }

    pub fn family(&self) -> DatasetFamily {
        self.family
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn extent(&self) -> &Extent {
        &self.extent
    }

    pub fn composite(&self) -> CompositePeriod {
        self.composite
    }

    pub fn product(&self) -> Product {
        self.product
    }

    pub fn area(&self) -> &str {
        &self.area
    }

    pub fn naming(&self) -> NamingConvention {
        self.naming
    }

    pub fn dimensions(&self) -> &[String; 2] {
        &self.dimensions
    }

    /// Directory layout of the source archive for this job.
    pub fn archive_layout(&self) -> ArchiveLayout {
        match self.family {
            DatasetFamily::OceanColour => ArchiveLayout::OceanColour {
                composite: self.composite,
                product: self.product,
            },
            DatasetFamily::Sst => ArchiveLayout::Sst {
                subdir: family::SST_SUBDIR.to_string(),
                file_tag: self.sst_file_tag.clone(),
            },
        }
    }
}
