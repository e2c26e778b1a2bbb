//! # Channel Cross-Sections
//!
//! `xsec` picks left and right banks on a ground profile and estimates
//! the channel's hydraulic metrics (width, depth, area, Manning flow
//! velocity and discharge) from the section between them.

mod analyzer;
pub mod bank;
mod error;
mod hydraulics;
mod math;
mod profile;
mod section;
mod viewport;

pub use crate::{
    analyzer::Analyzer,
    bank::{Bank, Mode},
    error::XsecError,
    hydraulics::{Channel, Hydraulics},
    math::{manning_velocity, shoelace_area},
    profile::Profile,
    section::CrossSection,
    viewport::{Viewport, DISPLAY_SIZE},
};
pub use geo;
