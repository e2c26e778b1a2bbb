use crate::{
    job,
    options::{CorrectFrom, Process},
};
use anyhow::{anyhow, bail, Context, Result};
use std::fs::File;
use transect::{CorrectionTable, Prompt};

impl Process {
    pub fn run(&self) -> Result<()> {
        let (mut survey, mut failed) = job::open(&self.job)?;
        failed += job::summarize("process", &survey.process_all());

        if let Some(from) = self.correct {
            let report = match from {
                CorrectFrom::Prompt => {
                    // Prompts go to stderr to keep stdout for results.
                    let stdin = std::io::stdin();
                    let mut prompt = Prompt::new(stdin.lock(), std::io::stderr());
                    survey.correct_all(&mut prompt)
                }
                CorrectFrom::Table => {
                    let path = self
                        .table
                        .as_ref()
                        .ok_or_else(|| anyhow!("--correct table needs --table"))?;
                    let file = File::open(path).with_context(|| format!("opening {path:?}"))?;
                    let mut table = CorrectionTable::from_reader(file)
                        .with_context(|| format!("reading {path:?}"))?;
                    survey.correct_all(&mut table)
                }
            };
            failed += job::summarize("correct", &report);
        }

        let (run_dir, report) = survey.export_all(&self.out_dir)?;
        failed += job::summarize("export", &report);
        println!(
            "{}: exported {} stations to {}",
            survey.name(),
            report.succeeded,
            run_dir.display()
        );
        if failed > 0 {
            bail!("{failed} failures, see above");
        }
        Ok(())
    }
}
