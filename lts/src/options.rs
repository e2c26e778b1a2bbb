use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

/// Process total-station transects and analyze channel
/// cross-sections.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub enum Cli {
    /// List the stations in a job file.
    List(List),

    /// Print one processed station to stdout.
    Show(Show),

    /// Plot a station's ground profile to the terminal.
    Plot(Plot),

    /// Process, optionally correct, and export every station.
    Process(Process),

    /// Estimate channel hydraulics between two bank picks.
    Xsec(Xsec),
}

#[derive(Debug, Clone, Args)]
pub struct List {
    /// Total-station export file.
    pub job: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Csv,
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct Show {
    /// Total-station export file.
    pub job: PathBuf,

    /// Station id.
    pub station: String,

    #[arg(short, long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,
}

#[derive(Debug, Clone, Args)]
pub struct Plot {
    /// Total-station export file.
    pub job: PathBuf,

    /// Station id.
    pub station: String,

    /// Measure chainage from the last shot.
    #[arg(short, long)]
    pub mirrored: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CorrectFrom {
    /// Ask for each station's first-shot location on stdin.
    Prompt,

    /// Read first-shot locations from `--table`.
    Table,
}

#[derive(Debug, Clone, Args)]
pub struct Process {
    /// Total-station export file.
    pub job: PathBuf,

    /// Root directory for run directories.
    #[arg(short, long, default_value = "lts_outputs")]
    pub out_dir: PathBuf,

    /// Translate every station so its first shot lands on a known
    /// location.
    #[arg(short, long, value_enum)]
    pub correct: Option<CorrectFrom>,

    /// CSV of `station,easting,northing,elevation`, for
    /// `--correct table`.
    #[arg(short, long, required_if_eq("correct", "table"))]
    pub table: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct Xsec {
    /// A CSV table, or a job file when `--station` is given.
    pub source: PathBuf,

    /// Analyze this station of a job file.
    #[arg(long)]
    pub station: Option<String>,

    /// Measure chainage from the last shot (with `--station`).
    #[arg(short, long, requires = "station")]
    pub mirrored: bool,

    /// Column holding x values.
    #[arg(short, long = "x-col", default_value = "cum_distance")]
    pub x_col: String,

    /// Column holding y values.
    #[arg(short, long = "y-col", default_value = "elevation")]
    pub y_col: String,

    /// Left bank pick.
    #[arg(long, allow_negative_numbers = true)]
    pub left: f64,

    /// Right bank pick.
    #[arg(long, allow_negative_numbers = true)]
    pub right: f64,

    /// Snap picks to the nearest surveyed point.
    #[arg(long)]
    pub snap: bool,

    /// Picks are display coordinates on a 1000 x 600 canvas instead
    /// of data x values.
    #[arg(long)]
    pub display: bool,

    /// Manning's roughness coefficient.
    #[arg(short = 'n', long, requires = "slope")]
    pub mannings_n: Option<f64>,

    /// Channel bed slope.
    #[arg(short, long, requires = "mannings_n")]
    pub slope: Option<f64>,

    /// Print results as JSON.
    #[arg(long)]
    pub json: bool,
}
