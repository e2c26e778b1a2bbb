use crate::{math::manning_velocity, CrossSection, XsecError};
use geo::CoordFloat;
use log::debug;
use serde::{Deserialize, Serialize};

/// Channel properties the operator supplies alongside the bank picks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Channel<C = f64> {
    /// Manning's roughness coefficient.
    pub mannings_n: C,

    /// Bed slope, as a dimensionless gradient.
    pub slope: C,
}

/// Hydraulic metrics of one cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hydraulics<C = f64> {
    pub width: C,
    pub depth: C,
    pub width_depth_ratio: C,
    pub area: C,

    /// Mean velocity from Manning's equation, using depth as the
    /// hydraulic radius.
    pub flow_velocity: C,

    /// `area * flow_velocity`.
    pub discharge: C,
}

impl<C: CoordFloat> Hydraulics<C> {
    pub fn estimate(section: &CrossSection<C>, channel: Channel<C>) -> Result<Self, XsecError> {
        let width_depth_ratio = section.width_depth_ratio()?;
        let flow_velocity = manning_velocity(section.depth, channel.slope, channel.mannings_n)?;
        let discharge = section.area * flow_velocity;
        debug!(
            "estimate; width: {:?}, depth: {:?}, area: {:?}, velocity: {:?}",
            section.width.to_f64(),
            section.depth.to_f64(),
            section.area.to_f64(),
            flow_velocity.to_f64()
        );
        Ok(Self {
            width: section.width,
            depth: section.depth,
            width_depth_ratio,
            area: section.area,
            flow_velocity,
            discharge,
        })
    }
}
