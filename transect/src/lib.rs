//! # Total-station transects
//!
//! `transect` reads total-station export files, splits them into
//! stations, and derives chainage and corrected coordinates for each.

pub mod correction;
mod error;
mod math;
pub mod records;
pub mod shot;
mod survey;
mod transect;

pub use crate::{
    correction::{CorrectionSource, CorrectionTable, Prompt},
    error::TransectError,
    shot::{Header, Position, Reading, SurveyPoint},
    survey::{Failure, Report, Survey},
    transect::{Chainage, Correction, Row, Transect},
};
pub use geo;

/// Base floating point type used for all survey coordinates.
pub type C = f64;
