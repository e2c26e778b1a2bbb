use crate::{
    job,
    options::{Format, Show},
};
use anyhow::Result;

impl Show {
    pub fn run(&self) -> Result<()> {
        let (mut survey, _) = job::open(&self.job)?;
        let transect = job::station(&mut survey, &self.station)?;
        match self.format {
            Format::Csv => transect.write_csv(std::io::stdout().lock())?,
            Format::Json => {
                let rows = transect.rows()?;
                let json = serde_json::to_string(&rows)?;
                println!("{json}");
            }
        }
        Ok(())
    }
}
