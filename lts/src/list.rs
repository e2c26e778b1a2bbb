use crate::{job, options::List};
use anyhow::Result;
use std::io::Write;

impl List {
    pub fn run(&self) -> Result<()> {
        let (mut survey, _) = job::open(&self.job)?;
        job::summarize("process", &survey.process_all());
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "station,shots,horizontal_distance")?;
        for transect in survey.iter() {
            let distance = transect
                .chainage()
                .map(|chainage| format!("{:.4}", chainage.horizontal_distance))
                .unwrap_or_default();
            writeln!(stdout, "{},{},{distance}", transect.id(), transect.len())?;
        }
        Ok(())
    }
}
