use chrono::NaiveDate;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::calendar::CompositeCalendar;
use crate::config::{DatasetFamily, Product};
use crate::locator::SourceFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingConvention {
    /// Source basename with `_{area}` before the `.nc` suffix.
    SourceDerived,
    /// `{FAMILY}_{product}_L4_{area}_{period}_{date}.nc`
    Neodaas,
}

impl NamingConvention {
    pub fn from_neodaas_flag(neodaas: bool) -> Self {
        if neodaas {
            NamingConvention::Neodaas
        } else {
            NamingConvention::SourceDerived
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputNamer {
    root: PathBuf,
    family: DatasetFamily,
    product: Product,
    calendar: CompositeCalendar,
    area: String,
    convention: NamingConvention,
}

impl OutputNamer {
    pub fn new(
        root: impl Into<PathBuf>,
        family: DatasetFamily,
        product: Product,
        calendar: CompositeCalendar,
        area: impl Into<String>,
        convention: NamingConvention,
    ) -> Self {
        Self {
            root: root.into(),
            family,
            product,
            calendar,
            area: area.into(),
            convention,
        }
    }

    pub fn output_dir(&self, date: NaiveDate) -> PathBuf {
        self.root.join(date.format("%Y").to_string())
    }

    /// Creates the year directory for `date` if needed.
    ///
    /// An existing directory, including one created concurrently by another
    /// process, is success.
    pub fn ensure_dir(&self, date: NaiveDate) -> io::Result<PathBuf> {
        let dir = self.output_dir(date);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    pub fn file_name(&self, source: &SourceFile) -> String {
        match self.convention {
            NamingConvention::SourceDerived => {
                let basename = source
                    .path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let stem = basename.strip_suffix(".nc").unwrap_or(basename.as_str());
                format!("{}_{}.nc", stem, self.area)
            }
            NamingConvention::Neodaas => format!(
                "{}_{}_L4_{}_{}_{}.nc",
                self.family.tag(),
                self.product.name(),
                self.area,
                self.calendar.period().code(),
                self.calendar.date_token(source.date)
            ),
        }
    }

    pub fn output_path(&self, source: &SourceFile) -> PathBuf {
        self.output_dir(source.date).join(self.file_name(source))
    }
}
