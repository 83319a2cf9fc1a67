use chrono::NaiveDate;
use glob::{MatchOptions, Pattern};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

use crate::calendar::CompositeCalendar;
use crate::config::{CompositePeriod, Product};

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// How an archive nests its files below the root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveLayout {
    /// `{composite}/{product}/{YYYY}/*{token}*nc`, every match is a source.
    OceanColour {
        composite: CompositePeriod,
        product: Product,
    },
    /// `{YYYY}/{MM}/{DD}/{subdir}/{token}*{file_tag}*.nc`, first match only.
    Sst { subdir: String, file_tag: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub date: NaiveDate,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Lookup {
    Found(Vec<SourceFile>),
    NotFound { pattern: String },
}

#[derive(Debug, Clone)]
pub struct SourceLocator {
    root: PathBuf,
    layout: ArchiveLayout,
    calendar: CompositeCalendar,
}

impl SourceLocator {
    pub fn new(root: impl Into<PathBuf>, layout: ArchiveLayout, calendar: CompositeCalendar) -> Self {
        Self {
            root: root.into(),
            layout,
            calendar,
        }
    }

    /// Glob pattern matching the source files of `date`.
    pub fn search_pattern(&self, date: NaiveDate) -> String {
        // The root is taken literally, only the file name part is a wildcard
        let root = PathBuf::from(Pattern::escape(&self.root.to_string_lossy()));
        let token = self.calendar.date_token(date);
        let year = date.format("%Y").to_string();

        let pattern = match &self.layout {
            ArchiveLayout::OceanColour { composite, product } => root
                .join(composite.dir_name())
                .join(product.name())
                .join(year)
                .join(format!("*{}*nc", token)),
            ArchiveLayout::Sst { subdir, file_tag } => root
                .join(year)
                .join(date.format("%m").to_string())
                .join(date.format("%d").to_string())
                .join(subdir)
                .join(format!("{}*{}*.nc", token, Pattern::escape(file_tag))),
        };

        pattern.to_string_lossy().into_owned()
    }

    pub fn locate(&self, date: NaiveDate) -> Result<Lookup, LocateError> {
        let pattern = self.search_pattern(date);
        debug!("Searching {}", pattern);

        // Hidden files (partial transfers, editor leftovers) are never sources
        let options = MatchOptions {
            require_literal_leading_dot: true,
            ..MatchOptions::new()
        };

        let mut paths = Vec::new();
        for entry in glob::glob_with(&pattern, options)? {
            match entry {
                Ok(path) if path.is_file() => paths.push(path),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable archive entry: {}", e),
            }
        }

        if paths.is_empty() {
            return Ok(Lookup::NotFound { pattern });
        }

        paths.sort();
        if matches!(self.layout, ArchiveLayout::Sst { .. }) {
            paths.truncate(1);
        }

        Ok(Lookup::Found(
            paths
                .into_iter()
                .map(|path| SourceFile { path, date })
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("Invalid date")
    }

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    fn oc_locator(root: &Path, composite: CompositePeriod) -> SourceLocator {
        SourceLocator::new(
            root,
            ArchiveLayout::OceanColour {
                composite,
                product: Product::ChlorA,
            },
            CompositeCalendar::new(composite),
        )
    }

    fn sst_locator(root: &Path) -> SourceLocator {
        SourceLocator::new(
            root,
            ArchiveLayout::Sst {
                subdir: "nc".to_string(),
                file_tag: "GHRSST-SSTdepth".to_string(),
            },
            CompositeCalendar::new(CompositePeriod::Daily),
        )
    }

    #[test]
    fn test_search_pattern_ocean_colour() {
        let locator = oc_locator(Path::new("/archive"), CompositePeriod::Monthly);
        assert_eq!(
            locator.search_pattern(ymd(2019, 6, 15)),
            "/archive/monthly/chlor_a/2019/*201906*nc"
        );

        let locator = oc_locator(Path::new("/archive"), CompositePeriod::FiveDay);
        assert_eq!(
            locator.search_pattern(ymd(2019, 6, 5)),
            "/archive/5day/chlor_a/2019/*20190605*nc"
        );
    }

    #[test]
    fn test_search_pattern_sst() {
        let locator = sst_locator(Path::new("/sst/1d"));
        assert_eq!(
            locator.search_pattern(ymd(2019, 4, 11)),
            "/sst/1d/2019/04/11/nc/20190411*GHRSST-SSTdepth*.nc"
        );
    }

    #[test]
    fn test_locate_ocean_colour_returns_all_matches() {
        let dir = tempdir().unwrap();
        let year_dir = dir.path().join("daily/chlor_a/2019");
        touch(&year_dir.join("ESACCI-OC-L3S-CHLOR_A-MERGED-1D_DAILY_4km_GEO_PML_OCx-20190102-fv4.0.nc"));
        touch(&year_dir.join("ESACCI-OC-L3S-CHLOR_A-MERGED-1D_DAILY_4km_GEO_PML_OC4-20190102-fv4.0.nc"));
        touch(&year_dir.join("ESACCI-OC-L3S-CHLOR_A-MERGED-1D_DAILY_4km_GEO_PML_OCx-20190103-fv4.0.nc"));

        let locator = oc_locator(dir.path(), CompositePeriod::Daily);
        let Lookup::Found(files) = locator.locate(ymd(2019, 1, 2)).unwrap() else {
            panic!("expected matches");
        };

        assert_eq!(files.len(), 2);
        assert!(files[0].path < files[1].path);
        assert!(files.iter().all(|f| f.date == ymd(2019, 1, 2)));
    }

    #[test]
    fn test_locate_ignores_hidden_files() {
        let dir = tempdir().unwrap();
        let year_dir = dir.path().join("daily/chlor_a/2019");
        touch(&year_dir.join("OC-20190102-fv4.0.nc"));
        touch(&year_dir.join(".OC-20190102-fv4.0.nc"));

        let locator = oc_locator(dir.path(), CompositePeriod::Daily);
        let Lookup::Found(files) = locator.locate(ymd(2019, 1, 2)).unwrap() else {
            panic!("expected a match");
        };

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, year_dir.join("OC-20190102-fv4.0.nc"));

        fs::remove_file(year_dir.join("OC-20190102-fv4.0.nc")).unwrap();
        assert!(matches!(
            locator.locate(ymd(2019, 1, 2)).unwrap(),
            Lookup::NotFound { .. }
        ));
    }

    #[test]
    fn test_locate_reports_pattern_when_missing() {
        let dir = tempdir().unwrap();
        let locator = oc_locator(dir.path(), CompositePeriod::Monthly);

        let lookup = locator.locate(ymd(2019, 6, 1)).unwrap();
        assert_eq!(
            lookup,
            Lookup::NotFound {
                pattern: locator.search_pattern(ymd(2019, 6, 1))
            }
        );
    }

    #[test]
    fn test_locate_sst_takes_first_match() {
        let dir = tempdir().unwrap();
        let day_dir = dir.path().join("2019/04/11/nc");
        touch(&day_dir.join("20190411120000-ESACCI-L4_GHRSST-SSTdepth-OSTIA-GLOB_CDR2.1-v02.0-fv01.0.nc"));
        touch(&day_dir.join("20190411000000-ESACCI-L4_GHRSST-SSTdepth-OSTIA-GLOB_CDR2.1-v02.0-fv01.0.nc"));

        let locator = sst_locator(dir.path());
        let Lookup::Found(files) = locator.locate(ymd(2019, 4, 11)).unwrap() else {
            panic!("expected a match");
        };

        assert_eq!(files.len(), 1);
        assert_eq!(
            files[0].path,
            day_dir.join("20190411000000-ESACCI-L4_GHRSST-SSTdepth-OSTIA-GLOB_CDR2.1-v02.0-fv01.0.nc")
        );
    }

    #[test]
    fn test_locate_escapes_root() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("cci [v4.0]");
        touch(&root.join("monthly/chlor_a/2019/OC-201906-fv4.0.nc"));

        let locator = oc_locator(&root, CompositePeriod::Monthly);
        assert!(matches!(
            locator.locate(ymd(2019, 6, 1)).unwrap(),
            Lookup::Found(files) if files.len() == 1
        ));
    }
}
