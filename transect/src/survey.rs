use crate::{correction::CorrectionSource, records::Records, Transect, TransectError};
use chrono::Local;
use log::{info, warn};
use rayon::prelude::*;
use std::{
    collections::{HashMap, HashSet},
    ffi::OsStr,
    fs::{self, File},
    io::{BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};

/// One item of a bulk operation that did not succeed.
#[derive(Debug)]
pub struct Failure {
    /// Station id, or source location for blocks that never became a
    /// station.
    pub item: String,
    pub error: TransectError,
}

/// Outcome of a bulk operation over every station.
#[derive(Debug, Default)]
pub struct Report {
    pub succeeded: usize,
    pub failures: Vec<Failure>,
}

impl Report {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, item: &str, result: Result<(), TransectError>) {
        match result {
            Ok(()) => self.succeeded += 1,
            Err(error) => {
                warn!("{item}: {error}");
                self.failures.push(Failure {
                    item: item.to_owned(),
                    error,
                });
            }
        }
    }
}

/// A total-station job: every station in one export file, in file
/// order.
#[derive(Debug, Clone, Default)]
pub struct Survey {
    name: String,
    transects: Vec<Transect>,
    index: HashMap<String, usize>,
}

impl Survey {
    /// Reads and imports the export file at `path`, naming the survey
    /// after the file stem.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<(Self, Report), TransectError> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .and_then(OsStr::to_str)
            .unwrap_or("survey")
            .to_owned();
        let text = fs::read_to_string(path)?;
        Ok(Self::import(name, &text))
    }

    /// Imports every well-formed station in `text`.
    ///
    /// Malformed blocks and repeated station ids don't stop the
    /// import; they're returned in the report.
    pub fn import(name: impl Into<String>, text: &str) -> (Self, Report) {
        let mut survey = Self {
            name: name.into(),
            ..Self::default()
        };
        let mut report = Report::default();
        for record in Records::new(text) {
            match record {
                Ok(record) => {
                    let item = format!("line {}", record.line);
                    let result = survey.insert(Transect::from(record));
                    report.record(&item, result);
                }
                Err(error) => {
                    let item = match &error {
                        TransectError::MalformedInput { line, .. } => format!("line {line}"),
                        _ => String::from("input"),
                    };
                    report.record(&item, Err(error));
                }
            }
        }
        info!(
            "imported '{}' ({} stations, {} rejected)",
            survey.name,
            survey.len(),
            report.failures.len()
        );
        (survey, report)
    }

    /// Adds a station, refusing ids already present.
    pub fn insert(&mut self, transect: Transect) -> Result<(), TransectError> {
        if self.index.contains_key(transect.id()) {
            return Err(TransectError::DuplicateStation(transect.id().to_owned()));
        }
        self.index
            .insert(transect.id().to_owned(), self.transects.len());
        self.transects.push(transect);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.transects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transects.is_empty()
    }

    /// Station ids in file order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.transects.iter().map(Transect::id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transect> {
        self.transects.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Transect> {
        self.index.get(id).map(|&idx| &self.transects[idx])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Transect> {
        self.index.get(id).map(|&idx| &mut self.transects[idx])
    }

    /// Processes every station.
    pub fn process_all(&mut self) -> Report {
        let n_stations = self.len();
        let results: Vec<Result<(), TransectError>> = self
            .transects
            .par_iter_mut()
            .map(|transect| transect.process().map(|_| ()))
            .collect();
        let mut report = Report::default();
        for (count, (transect, result)) in self.transects.iter().zip(results).enumerate() {
            if result.is_ok() {
                info!(
                    "processed station '{}' ({}/{n_stations})",
                    transect.id(),
                    count + 1
                );
            }
            report.record(transect.id(), result);
        }
        report
    }

    /// Corrects every station, in file order, to the location `source`
    /// gives for its first shot.
    pub fn correct_all<S: CorrectionSource + ?Sized>(&mut self, source: &mut S) -> Report {
        let n_stations = self.len();
        let mut report = Report::default();
        for (count, transect) in self.transects.iter_mut().enumerate() {
            info!(
                "correcting station '{}' ({}/{n_stations})",
                transect.id(),
                count + 1
            );
            let result = source
                .target(transect)
                .and_then(|target| transect.correct(target))
                .map(|offset| info!("station '{}' offset: {offset:?}", transect.id()));
            report.record(transect.id(), result);
        }
        report
    }

    /// Writes every station to its own CSV file in a new run directory
    /// under `out_root`, returning that directory.
    ///
    /// `out_root` is created if needed. A previous run's directory is
    /// never reused.
    pub fn export_all<P: AsRef<Path>>(
        &mut self,
        out_root: P,
    ) -> Result<(PathBuf, Report), TransectError> {
        let out_root = out_root.as_ref();
        fs::create_dir_all(out_root)?;
        let run_dir = self.create_run_dir(out_root)?;
        info!("exporting {} stations to {run_dir:?}", self.len());

        let file_names = unique_file_names(&self.transects);
        let results: Vec<Result<(), TransectError>> = self
            .transects
            .par_iter_mut()
            .zip(file_names.par_iter())
            .map(|(transect, file_name)| export(transect, &run_dir.join(file_name)))
            .collect();
        let mut report = Report::default();
        for (transect, result) in self.transects.iter().zip(results) {
            report.record(transect.id(), result);
        }
        Ok((run_dir, report))
    }

    fn create_run_dir(&self, out_root: &Path) -> Result<PathBuf, TransectError> {
        let stem = format!("{}_{}", self.name, Local::now().format("%Y%m%d-%H%M%S"));
        let mut suffix = 0;
        loop {
            let dir_name = if suffix == 0 {
                stem.clone()
            } else {
                format!("{stem}-{suffix}")
            };
            let run_dir = out_root.join(dir_name);
            match fs::create_dir(&run_dir) {
                Ok(()) => return Ok(run_dir),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => suffix += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Returns an export file name per station, in station order.
///
/// Ids that sanitize to the same name get a `-2`, `-3`, ... suffix on
/// every occurrence after the first.
fn unique_file_names(transects: &[Transect]) -> Vec<String> {
    let mut taken = HashSet::new();
    transects
        .iter()
        .map(|transect| {
            let base = transect.file_name();
            let mut name = base.clone();
            let mut suffix = 1;
            while !taken.insert(name.clone()) {
                suffix += 1;
                let stem = base.strip_suffix(".csv").unwrap_or(&base);
                name = format!("{stem}-{suffix}.csv");
            }
            if name != base {
                warn!(
                    "station '{}' exported as {name}, {base} is already taken",
                    transect.id()
                );
            }
            name
        })
        .collect()
}

/// Writes one station to `out_path`, leaving nothing behind on
/// failure.
fn export(transect: &mut Transect, out_path: &Path) -> Result<(), TransectError> {
    let out_path = out_path.to_path_buf();
    let tmp_path = {
        let mut p = out_path.clone();
        p.set_extension("tmp");
        p
    };
    let written = File::create(&tmp_path)
        .map_err(TransectError::from)
        .and_then(|file| {
            let mut wtr = BufWriter::new(file);
            transect.write_csv(&mut wtr)?;
            wtr.flush()?;
            Ok(())
        });
    match written {
        Ok(()) => {
            fs::rename(&tmp_path, &out_path)?;
            info!("exported station '{}' to {out_path:?}", transect.id());
            Ok(())
        }
        Err(e) => {
            // Best effort; the write error is the one worth reporting.
            let _ = fs::remove_file(&tmp_path);
            Err(e)
        }
    }
}
