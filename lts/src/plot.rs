use crate::{job, options::Plot};
use anyhow::Result;
use num_traits::AsPrimitive;
use textplots::{Chart, Plot as _, Shape};

impl Plot {
    pub fn run(&self) -> Result<()> {
        let (mut survey, _) = job::open(&self.job)?;
        let transect = job::station(&mut survey, &self.station)?;
        let profile = transect.profile(self.mirrored)?;
        let plot_data: Vec<(f32, f32)> = profile
            .iter()
            .map(|coord| (coord.x.as_(), coord.y.as_()))
            .collect();
        let x_max = plot_data.iter().map(|&(x, _)| x).fold(0.0, f32::max);
        println!(
            "{} ({} shots{})",
            transect.id(),
            transect.len(),
            if self.mirrored { ", mirrored" } else { "" }
        );
        Chart::new(300, 150, 0.0, x_max.max(1.0))
            .lineplot(&Shape::Lines(&plot_data))
            .display();
        Ok(())
    }
}
