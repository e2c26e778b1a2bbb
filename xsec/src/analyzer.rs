use crate::{
    bank::{self, Bank, Mode},
    Channel, CrossSection, Hydraulics, Profile, Viewport, XsecError,
};
use geo::{Coord, CoordFloat};
use log::debug;

/// Bank-picking state for one profile.
///
/// Every pick replaces the active bank's location and, once both banks
/// are set, rebuilds the cross-section before returning.
#[derive(Debug, Clone)]
pub struct Analyzer<C: CoordFloat = f64> {
    profile: Profile<C>,
    viewport: Viewport<C>,
    mode: Mode,
    active: Bank,
    left: Option<Coord<C>>,
    right: Option<Coord<C>>,
    section: Option<CrossSection<C>>,
}

impl<C: CoordFloat> Analyzer<C> {
    /// Fits `profile` into a display of `size`.
    pub fn new(profile: Profile<C>, size: Coord<C>) -> Result<Self, XsecError> {
        let viewport = Viewport::new(profile.bounds(), size)?;
        Ok(Self {
            profile,
            viewport,
            mode: Mode::default(),
            active: Bank::Left,
            left: None,
            right: None,
            section: None,
        })
    }

    pub fn profile(&self) -> &Profile<C> {
        &self.profile
    }

    pub fn viewport(&self) -> &Viewport<C> {
        &self.viewport
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Changes how later picks are placed; existing picks stay put.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn active(&self) -> Bank {
        self.active
    }

    pub fn set_active(&mut self, bank: Bank) {
        self.active = bank;
    }

    /// Data coordinates under a display point.
    pub fn cursor(&self, display: Coord<C>) -> Coord<C> {
        self.viewport.to_data(display)
    }

    /// Places the active bank at a display point.
    pub fn pick(&mut self, display: Coord<C>) -> Result<Coord<C>, XsecError> {
        let Coord { x, .. } = self.cursor(display);
        self.pick_data_x(x)
    }

    /// Places the active bank at data-space `x`.
    ///
    /// A failed pick leaves every bank and the section unchanged.
    pub fn pick_data_x(&mut self, x: C) -> Result<Coord<C>, XsecError> {
        let location = bank::select(&self.profile, x, self.mode)?;
        match self.active {
            Bank::Left => self.left = Some(location),
            Bank::Right => self.right = Some(location),
        }
        debug!(
            "picked {:?} bank at ({:?}, {:?})",
            self.active,
            location.x.to_f64(),
            location.y.to_f64()
        );
        self.section = match (self.left, self.right) {
            (Some(left), Some(right)) => Some(CrossSection::new(&self.profile, left, right)),
            _ => None,
        };
        Ok(location)
    }

    pub fn bank(&self, bank: Bank) -> Option<Coord<C>> {
        match bank {
            Bank::Left => self.left,
            Bank::Right => self.right,
        }
    }

    pub fn section(&self) -> Option<&CrossSection<C>> {
        self.section.as_ref()
    }

    /// The section polygon in display coordinates, for drawing.
    pub fn outline(&self) -> Option<Vec<Coord<C>>> {
        self.section.as_ref().map(|section| {
            section
                .polygon
                .iter()
                .map(|&vertex| self.viewport.to_display(vertex))
                .collect()
        })
    }

    pub fn estimate(&self, channel: Channel<C>) -> Result<Hydraulics<C>, XsecError> {
        let section = self.section.as_ref().ok_or(XsecError::NoSection)?;
        Hydraulics::estimate(section, channel)
    }
}
