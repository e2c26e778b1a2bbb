use crate::{job, options::Xsec, table::read_columns};
use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::{fs::File, io::Write};
use xsec::{
    geo::{coord, Coord},
    Analyzer, Bank, Channel, Mode, Profile, XsecError, DISPLAY_SIZE,
};

impl Xsec {
    pub fn run(&self) -> Result<()> {
        let points = match &self.station {
            Some(station) => self.station_points(station)?,
            None => {
                let file = File::open(&self.source)
                    .with_context(|| format!("opening {:?}", self.source))?;
                read_columns(file, &self.x_col, &self.y_col)?
            }
        };
        let mut analyzer = Analyzer::new(Profile::new(points)?, DISPLAY_SIZE)?;
        if self.snap {
            analyzer.set_mode(Mode::Snap);
        }
        for (bank, pick) in [(Bank::Left, self.left), (Bank::Right, self.right)] {
            analyzer.set_active(bank);
            let location = if self.display {
                analyzer.pick(coord!(x: pick, y: DISPLAY_SIZE.y / 2.0))?
            } else {
                analyzer.pick_data_x(pick)?
            };
            info!("{bank:?} bank: ({}, {})", location.x, location.y);
        }

        let summary = Summary::new(&analyzer, self.channel())?;
        if self.json {
            println!("{}", serde_json::to_string(&summary)?);
        } else {
            summary.print()?;
        }
        Ok(())
    }

    fn channel(&self) -> Option<Channel> {
        match (self.mannings_n, self.slope) {
            (Some(mannings_n), Some(slope)) => Some(Channel { mannings_n, slope }),
            _ => None,
        }
    }

    /// Reads the chosen columns from a station's processed table.
    fn station_points(&self, station: &str) -> Result<Vec<Coord>> {
        let (mut survey, _) = job::open(&self.source)?;
        let transect = job::station(&mut survey, station)?;
        let mut table = Vec::new();
        transect.write_csv(&mut table)?;
        let x_col = if self.mirrored { "mirrored" } else { self.x_col.as_str() };
        read_columns(table.as_slice(), x_col, &self.y_col)
    }
}

/// Section geometry, plus hydraulics when a channel was given.
#[derive(Debug, Serialize)]
struct Summary {
    left_bank: [f64; 2],
    right_bank: [f64; 2],
    width: f64,
    depth: f64,
    width_depth_ratio: Option<f64>,
    area: f64,
    flow_velocity: Option<f64>,
    discharge: Option<f64>,
}

impl Summary {
    fn new(analyzer: &Analyzer, channel: Option<Channel>) -> Result<Self> {
        let section = analyzer.section().ok_or(XsecError::NoSection)?;
        let (flow_velocity, discharge) = match channel {
            Some(channel) => {
                let hydraulics = analyzer.estimate(channel)?;
                (Some(hydraulics.flow_velocity), Some(hydraulics.discharge))
            }
            None => (None, None),
        };
        Ok(Self {
            left_bank: [section.left_bank.x, section.left_bank.y],
            right_bank: [section.right_bank.x, section.right_bank.y],
            width: section.width,
            depth: section.depth,
            width_depth_ratio: section.width_depth_ratio().ok(),
            area: section.area,
            flow_velocity,
            discharge,
        })
    }

    fn print(&self) -> Result<()> {
        let opt = |val: Option<f64>| val.map_or_else(|| String::from("-"), |val| format!("{val:.4}"));
        let mut stdout = std::io::stdout().lock();
        let [lx, ly] = self.left_bank;
        let [rx, ry] = self.right_bank;
        writeln!(stdout, "left bank:     {lx:.4}, {ly:.4}")?;
        writeln!(stdout, "right bank:    {rx:.4}, {ry:.4}")?;
        writeln!(stdout, "width:         {:.4}", self.width)?;
        writeln!(stdout, "depth:         {:.4}", self.depth)?;
        writeln!(stdout, "W/D ratio:     {}", opt(self.width_depth_ratio))?;
        writeln!(stdout, "area:          {:.4}", self.area)?;
        writeln!(stdout, "flow velocity: {}", opt(self.flow_velocity))?;
        writeln!(stdout, "discharge:     {}", opt(self.discharge))?;
        Ok(())
    }
}
