mod analyze;
mod job;
mod list;
mod options;
mod plot;
mod process;
mod show;
mod table;

use anyhow::Result;
use clap::Parser;
use options::Cli;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli {
        Cli::List(list) => list.run(),
        Cli::Show(show) => show.run(),
        Cli::Plot(plot) => plot.run(),
        Cli::Process(process) => process.run(),
        Cli::Xsec(xsec) => xsec.run(),
    }
}
