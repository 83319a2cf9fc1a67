use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

use super::{CompositePeriod, Product};

const OC_CCI_ROOT: &str = "/data/datasets/Projects/CCI/v4.0-release/geographic/netcdf";
const SST_CCI_ROOT: &str = "/data/datasets/sst/esa-cci-sst/v2.1/global/1d/";

pub const SST_SUBDIR: &str = "nc";
pub const SST_FILE_TAG: &str = "ESACCI-L4_GHRSST-SSTdepth-OSTIA-GLOB_CDR2.1-v02.0";

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DatasetFamily {
    OceanColour,
    Sst,
}

impl DatasetFamily {
    /// Prefix of NEODAAS style output names.
    pub fn tag(&self) -> &'static str {
        match self {
            DatasetFamily::OceanColour => "OC-CCI",
            DatasetFamily::Sst => "SST-CCI",
        }
    }

    pub fn default_input_dir(&self) -> PathBuf {
        match self {
            DatasetFamily::OceanColour => PathBuf::from(OC_CCI_ROOT),
            DatasetFamily::Sst => PathBuf::from(SST_CCI_ROOT),
        }
    }

    pub fn default_product(&self) -> Product {
        match self {
            DatasetFamily::OceanColour => Product::AllProducts,
            DatasetFamily::Sst => Product::Sst,
        }
    }

    pub fn default_composite(&self) -> CompositePeriod {
        match self {
            DatasetFamily::OceanColour => CompositePeriod::Monthly,
            DatasetFamily::Sst => CompositePeriod::Daily,
        }
    }

    pub fn supports_product(&self, product: Product) -> bool {
        match self {
            DatasetFamily::OceanColour => product != Product::Sst,
            DatasetFamily::Sst => product == Product::Sst,
        }
    }

    pub fn supports_composite(&self, composite: CompositePeriod) -> bool {
        match self {
            DatasetFamily::OceanColour => true,
            DatasetFamily::Sst => composite == CompositePeriod::Daily,
        }
    }
}

impl fmt::Display for DatasetFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}
