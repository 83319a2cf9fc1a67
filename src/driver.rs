use chrono::NaiveDate;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::calendar::CompositeCalendar;
use crate::config::ExtractionConfig;
use crate::extent::Extent;
use crate::locator::{LocateError, Lookup, SourceFile, SourceLocator};
use crate::naming::OutputNamer;
use crate::subset::{SubsetError, SubsetRequest, Subsetter};

/// Log target of missing-source diagnostics.
pub const GAP_TARGET: &str = "cci_extract::gaps";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error(transparent)]
    Locate(#[from] LocateError),
    #[error("Failed to write output {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to extract {}: {source}", .input.display())]
    Subset {
        input: PathBuf,
        #[source]
        source: SubsetError,
    },
}

/// A date with no source file in the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gap {
    pub date: NaiveDate,
    pub pattern: String,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub dates: usize,
    pub extracted: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub gaps: Vec<Gap>,
}

enum Outcome {
    Extracted(PathBuf),
    Skipped(PathBuf),
}

/// Walks a date range and subsets every source file found for it.
#[derive(Debug)]
pub struct ExtractionDriver<S> {
    calendar: CompositeCalendar,
    locator: SourceLocator,
    namer: OutputNamer,
    extent: Extent,
    dimensions: [String; 2],
    subsetter: S,
}

impl<S: Subsetter> ExtractionDriver<S> {
    pub fn new(
        calendar: CompositeCalendar,
        locator: SourceLocator,
        namer: OutputNamer,
        extent: Extent,
        dimensions: [String; 2],
        subsetter: S,
    ) -> Self {
        Self {
            calendar,
            locator,
            namer,
            extent,
            dimensions,
            subsetter,
        }
    }

    pub fn from_config(config: &ExtractionConfig, subsetter: S) -> Self {
        let calendar = CompositeCalendar::new(config.composite());
        let locator = SourceLocator::new(config.input_dir(), config.archive_layout(), calendar);
        let namer = OutputNamer::new(
            config.output_dir(),
            config.family(),
            config.product(),
            calendar,
            config.area(),
            config.naming(),
        );

        Self::new(
            calendar,
            locator,
            namer,
            *config.extent(),
            config.dimensions().clone(),
            subsetter,
        )
    }

    pub fn subsetter(&self) -> &S {
        &self.subsetter
    }

    /// Processes every date in `[start, end)`.
    ///
    /// Dates without a source file are logged on [`GAP_TARGET`] and skipped.
    /// Outputs that already exist are left alone. The first subsetting
    /// failure ends the run.
    pub fn run(&self, start: NaiveDate, end: NaiveDate) -> Result<RunSummary, ExtractionError> {
        let mut summary = RunSummary::default();

        for date in self.calendar.walk(start, end) {
            summary.dates += 1;

            let sources = match self.locator.locate(date)? {
                Lookup::Found(sources) => sources,
                Lookup::NotFound { pattern } => {
                    warn!(target: GAP_TARGET, "Couldn't find file for date {}: {}", date, pattern);
                    summary.gaps.push(Gap { date, pattern });
                    continue;
                }
            };

            for source in &sources {
                match self.extract(source)? {
                    Outcome::Extracted(output) => summary.extracted.push(output),
                    Outcome::Skipped(output) => summary.skipped.push(output),
                }
            }
        }

        info!(
            "Visited {} dates: {} extracted, {} already present, {} missing",
            summary.dates,
            summary.extracted.len(),
            summary.skipped.len(),
            summary.gaps.len()
        );

        Ok(summary)
    }

    fn extract(&self, source: &SourceFile) -> Result<Outcome, ExtractionError> {
        let output = self.namer.output_path(source);
        if output.exists() {
            debug!("Skipping {}, output exists", output.display());
            return Ok(Outcome::Skipped(output));
        }

        info!("Extracting {}", source.path.display());

        let dir = self
            .namer
            .ensure_dir(source.date)
            .map_err(|e| io_error(&output, e))?;
        let staging = staging_path(&dir, &output).map_err(|e| io_error(&output, e))?;

        let request = SubsetRequest {
            input: source.path.clone(),
            output: staging.to_path_buf(),
            dimensions: self.dimensions.clone(),
            x_bounds: self.extent.x_bounds(),
            y_bounds: self.extent.y_bounds(),
        };

        // A failed subset drops `staging`, which removes the partial file
        self.subsetter
            .subset(&request)
            .map_err(|e| ExtractionError::Subset {
                input: source.path.clone(),
                source: e,
            })?;

        match staging.persist_noclobber(&output) {
            Ok(()) => {
                debug!("Wrote {}", output.display());
                Ok(Outcome::Extracted(output))
            }
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                warn!(
                    "{} appeared during extraction, keeping the existing file",
                    output.display()
                );
                Ok(Outcome::Skipped(output))
            }
            Err(e) => Err(io_error(&output, e.error)),
        }
    }
}

/// Hidden file next to `output` that the subsetter writes to.
fn staging_path(dir: &Path, output: &Path) -> io::Result<TempPath> {
    let name = output
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file = tempfile::Builder::new()
        .prefix(&format!(".{}.", name))
        .suffix(".part")
        .tempfile_in(dir)?;

    Ok(file.into_temp_path())
}

fn io_error(path: &Path, source: io::Error) -> ExtractionError {
    ExtractionError::Io {
        path: path.to_path_buf(),
        source,
    }
}
