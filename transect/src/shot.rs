use crate::{TransectError, C};
use geo::geometry::Coord;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A numeric field as read from an instrument export.
///
/// Fields that do not parse as numbers are kept verbatim so they can
/// be written back out unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum Reading {
    Number(C),
    Text(String),
}

impl Reading {
    pub fn parse(field: &str) -> Self {
        let field = field.trim();
        field
            .parse::<C>()
            .map_or_else(|_| Self::Text(field.to_owned()), Self::Number)
    }

    pub fn as_number(&self) -> Option<C> {
        match self {
            Self::Number(val) => Some(*val),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(val) => write!(f, "{val}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<C> for Reading {
    fn from(val: C) -> Self {
        Self::Number(val)
    }
}

impl Serialize for Reading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(val) => serializer.serialize_f64(*val),
            Self::Text(text) => serializer.serialize_str(text),
        }
    }
}

/// One recorded shot.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyPoint {
    pub point_id: String,
    pub easting: Reading,
    pub northing: Reading,
    pub elevation: Reading,
    /// Height of the target (prism pole) above the ground.
    pub target_height: Reading,
}

impl SurveyPoint {
    /// Returns the planar (easting, northing) location of this shot.
    pub fn planar(&self, station: &str) -> Result<Coord<C>, TransectError> {
        Ok(Coord {
            x: self.number(station, "easting", &self.easting)?,
            y: self.number(station, "northing", &self.northing)?,
        })
    }

    /// Returns the full three-axis location of this shot.
    pub fn position(&self, station: &str) -> Result<Position, TransectError> {
        let Coord { x, y } = self.planar(station)?;
        Ok(Position {
            easting: x,
            northing: y,
            elevation: self.number(station, "elevation", &self.elevation)?,
        })
    }

    fn number(
        &self,
        station: &str,
        field: &'static str,
        reading: &Reading,
    ) -> Result<C, TransectError> {
        reading.as_number().ok_or_else(|| TransectError::NonNumeric {
            station: station.to_owned(),
            point: self.point_id.clone(),
            field,
        })
    }
}

/// Instrument setup for a station, from the row preceding its shots.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub station_id: String,
    pub station_easting: Reading,
    pub station_northing: Reading,
    pub station_elevation: Reading,
    /// Instrument height above the station mark.
    pub station_height: Reading,
}

/// A location in survey space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub easting: C,
    pub northing: C,
    pub elevation: C,
}

impl Position {
    pub fn new(easting: C, northing: C, elevation: C) -> Self {
        Self {
            easting,
            northing,
            elevation,
        }
    }
}
