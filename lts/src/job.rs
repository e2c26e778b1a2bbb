use anyhow::{anyhow, Context, Result};
use std::path::Path;
use transect::{Failure, Report, Survey, Transect};

/// Imports a job file, printing any rejected blocks.
///
/// Returns the survey and the number of rejected blocks.
pub fn open(job: &Path) -> Result<(Survey, usize)> {
    let (survey, report) = Survey::open(job).with_context(|| format!("reading {job:?}"))?;
    let rejected = summarize("import", &report);
    Ok((survey, rejected))
}

pub fn station<'a>(survey: &'a mut Survey, id: &str) -> Result<&'a mut Transect> {
    let name = survey.name().to_owned();
    survey
        .get_mut(id)
        .ok_or_else(|| anyhow!("no station '{id}' in '{name}'"))
}

/// Prints each failure of a bulk step to stderr and returns how many
/// there were.
pub fn summarize(step: &str, report: &Report) -> usize {
    for Failure { item, error } in &report.failures {
        eprintln!("{step}: {item}: {error}");
    }
    report.failures.len()
}
