use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;

/// Sub-archive searched for source files.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Product {
    AllProducts,
    ChlorA,
    Iop,
    Kd,
    Rrs,
    Sst,
}

impl Product {
    pub fn name(&self) -> &'static str {
        match self {
            Product::AllProducts => "all_products",
            Product::ChlorA => "chlor_a",
            Product::Iop => "iop",
            Product::Kd => "kd",
            Product::Rrs => "rrs",
            Product::Sst => "sst",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
