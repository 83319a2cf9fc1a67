pub mod calendar;
pub mod config;
pub mod driver;
pub mod extent;
pub mod locator;
pub mod logging;
pub mod naming;
pub mod subset;

pub use calendar::CompositeCalendar;
pub use config::{CompositePeriod, ConfigError, DatasetFamily, ExtractionConfig, Product};
pub use driver::{ExtractionDriver, ExtractionError, RunSummary};
pub use extent::Extent;
pub use locator::{ArchiveLayout, Lookup, SourceLocator};
pub use naming::{NamingConvention, OutputNamer};
