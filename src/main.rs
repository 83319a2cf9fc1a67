use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use cci_extract::config::DEFAULT_AREA;
use cci_extract::logging;
use cci_extract::{
    CompositePeriod, ConfigError, DatasetFamily, Extent, ExtractionConfig, NamingConvention,
    Product, RunSummary,
};

#[derive(Parser, Debug)]
#[command(name = "cci-extract")]
#[command(about = "Subset ESA CCI NetCDF archives to a given area")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract OC-CCI ocean colour composites
    Oc(OcArgs),
    /// Extract daily SST-CCI analyses
    Sst(SstArgs),
    /// Run an extraction described by a JSON job file
    Run {
        #[arg(long)]
        config: PathBuf,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Output directory, one sub-directory per year is created
    #[arg(short = 'o', long = "outputdir")]
    output_dir: PathBuf,

    /// Start date in format YYYY-MM-DD
    #[arg(long = "startdate")]
    start_date: NaiveDate,

    /// End date in format YYYY-MM-DD (exclusive)
    #[arg(long = "enddate")]
    end_date: NaiveDate,

    /// Extent of output netCDF (ulx uly lrx lry)
    #[arg(
        long,
        num_args = 4,
        required = true,
        allow_negative_numbers = true,
        value_names = ["ULX", "ULY", "LRX", "LRY"]
    )]
    extent: Vec<f64>,
}

#[derive(Args, Debug)]
struct OcArgs {
    /// Input directory containing CCI netCDF files [default: OC-CCI v4.0 archive]
    #[arg(short = 'i', long = "inputdir")]
    input_dir: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,

    /// Short name to use for area on extracted file
    #[arg(long, default_value = DEFAULT_AREA)]
    area: String,

    /// Length of composite to consider
    #[arg(long, value_enum, default_value_t = CompositePeriod::Monthly)]
    composite: CompositePeriod,

    /// Product to extract
    #[arg(long, value_enum, default_value_t = Product::AllProducts)]
    product: Product,

    /// Rename according to NEODAAS convention
    #[arg(long = "neodaas-name", alias = "neodaas_name")]
    neodaas_name: bool,
}

#[derive(Args, Debug)]
struct SstArgs {
    /// Input directory of the daily SST-CCI archive [default: SST-CCI v2.1 archive]
    #[arg(short = 'i', long = "inputdir")]
    input_dir: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,

    /// Area code to use in file name
    #[arg(long = "area-code", alias = "area_code", default_value = DEFAULT_AREA)]
    area_code: String,
}

fn main() -> ExitCode {
    logging::init();

    let cli = Cli::parse();

    match run(cli.command) {
        Ok(summary) => {
            if !summary.gaps.is_empty() {
                info!(
                    "{} dates had no source file, see the diagnostics stream",
                    summary.gaps.len()
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<RunSummary, Box<dyn Error>> {
    let config = match command {
        Command::Oc(args) => {
            let family = DatasetFamily::OceanColour;
            base_config(family, args.input_dir, args.common)?
                .with_composite(args.composite)
                .with_product(args.product)
                .with_area(args.area)
                .with_naming(NamingConvention::from_neodaas_flag(args.neodaas_name))
        }
        Command::Sst(args) => {
            base_config(DatasetFamily::Sst, args.input_dir, args.common)?.with_area(args.area_code)
        }
        Command::Run { config } => ExtractionConfig::from_file(config)?,
    };

    config.validate()?;

    info!(
        "Extracting {} from {} to {} into {}",
        config.family(),
        config.start_date(),
        config.end_date(),
        config.output_dir().display()
    );

    extract(&config)
}

fn base_config(
    family: DatasetFamily,
    input_dir: Option<PathBuf>,
    common: CommonArgs,
) -> Result<ExtractionConfig, ConfigError> {
    let extent = Extent::from_slice(&common.extent)?;

    Ok(ExtractionConfig::new(
        family,
        input_dir.unwrap_or_else(|| family.default_input_dir()),
        common.output_dir,
        common.start_date,
        common.end_date,
        extent,
    ))
}

#[cfg(feature = "gdal")]
fn extract(config: &ExtractionConfig) -> Result<RunSummary, Box<dyn Error>> {
    use cci_extract::ExtractionDriver;
    use cci_extract::subset::GdalSubsetter;

    let driver = ExtractionDriver::from_config(config, GdalSubsetter::default());
    Ok(driver.run(config.start_date(), config.end_date())?)
}

#[cfg(not(feature = "gdal"))]
fn extract(_config: &ExtractionConfig) -> Result<RunSummary, Box<dyn Error>> {
    Err("built without the `gdal` feature, subsetting is unavailable".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_oc_flags() {
        let cli = Cli::try_parse_from([
            "cci-extract",
            "oc",
            "-o",
            "/tmp/out",
            "--startdate",
            "2019-01-01",
            "--enddate",
            "2019-02-01",
            "--extent",
            "-10",
            "60",
            "5",
            "45",
            "--composite",
            "8day",
            "--product",
            "chlor_a",
            "--neodaas-name",
        ])
        .unwrap();

        let Command::Oc(args) = cli.command else {
            panic!("expected the oc subcommand");
        };
        assert_eq!(args.common.extent, vec![-10.0, 60.0, 5.0, 45.0]);
        assert_eq!(args.composite, CompositePeriod::EightDay);
        assert_eq!(args.product, Product::ChlorA);
        assert_eq!(args.area, DEFAULT_AREA);
        assert!(args.neodaas_name);
        assert!(args.input_dir.is_none());
    }

    #[test]
    fn test_cli_rejects_bad_date() {
        let result = Cli::try_parse_from([
            "cci-extract",
            "sst",
            "-o",
            "/tmp/out",
            "--startdate",
            "2019-02-30",
            "--enddate",
            "2019-03-01",
            "--extent",
            "0",
            "10",
            "10",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_base_config_uses_family_default_root() {
        let cli = Cli::try_parse_from([
            "cci-extract",
            "sst",
            "-o",
            "/tmp/out",
            "--startdate",
            "2019-04-01",
            "--enddate",
            "2019-04-11",
            "--extent",
            "0",
            "10",
            "10",
            "0",
            "--area-code",
            "bay",
        ])
        .unwrap();

        let Command::Sst(args) = cli.command else {
            panic!("expected the sst subcommand");
        };
        let config = base_config(DatasetFamily::Sst, args.input_dir, args.common)
            .unwrap()
            .with_area(args.area_code);

        assert!(config.validate().is_ok());
        assert_eq!(config.input_dir(), DatasetFamily::Sst.default_input_dir());
        assert_eq!(config.naming(), NamingConvention::Neodaas);
        assert_eq!(config.area(), "bay");
    }
}
