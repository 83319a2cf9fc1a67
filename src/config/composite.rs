use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;

/// Temporal aggregation window of a CCI product.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompositePeriod {
    #[serde(rename = "daily")]
    #[value(name = "daily")]
    Daily,
    #[serde(rename = "5day")]
    #[value(name = "5day")]
    FiveDay,
    #[serde(rename = "8day")]
    #[value(name = "8day")]
    EightDay,
    #[serde(rename = "monthly")]
    #[value(name = "monthly")]
    Monthly,
}

impl CompositePeriod {
    /// Short code used in NEODAAS file names.
    pub fn code(&self) -> &'static str {
        match self {
            CompositePeriod::Daily => "1d",
            CompositePeriod::FiveDay => "5d",
            CompositePeriod::EightDay => "8d",
            CompositePeriod::Monthly => "1m",
        }
    }

    /// Directory name of the composite in the OC-CCI archive.
    pub fn dir_name(&self) -> &'static str {
        match self {
            CompositePeriod::Daily => "daily",
            CompositePeriod::FiveDay => "5day",
            CompositePeriod::EightDay => "8day",
            CompositePeriod::Monthly => "monthly",
        }
    }
}

impl fmt::Display for CompositePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}
