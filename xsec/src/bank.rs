use crate::{Profile, XsecError};
use geo::{Coord, CoordFloat};
use serde::{Deserialize, Serialize};

/// Side of the channel, looking along increasing x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bank {
    Left,
    Right,
}

/// How a picked x becomes a bank location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Move to the nearest surveyed point.
    Snap,

    /// Keep the picked x and interpolate the ground height there.
    #[default]
    Free,
}

/// Returns the bank location for a pick at data-space `x`.
pub fn select<C: CoordFloat>(profile: &Profile<C>, x: C, mode: Mode) -> Result<Coord<C>, XsecError> {
    if !x.is_finite() {
        return Err(XsecError::NotFinite("bank pick"));
    }
    match mode {
        Mode::Snap => Ok(profile.nearest(x)),
        Mode::Free => Ok(Coord {
            x,
            y: profile.interpolate_y(x)?,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{select, Mode};
    use crate::{Profile, XsecError};
    use geo::coord;

    fn profile() -> Profile {
        Profile::new(vec![
            coord!(x: 0.0, y: 4.0),
            coord!(x: 1.0, y: 2.0),
            coord!(x: 3.0, y: 1.0),
            coord!(x: 4.0, y: 4.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_snap() {
        let profile = profile();
        assert_eq!(
            select(&profile, 2.4, Mode::Snap).unwrap(),
            coord!(x: 3.0, y: 1.0)
        );
        // Snapping never leaves the profile.
        assert_eq!(
            select(&profile, 9.0, Mode::Snap).unwrap(),
            coord!(x: 4.0, y: 4.0)
        );
    }

    #[test]
    fn test_free() {
        let profile = profile();
        assert_eq!(
            select(&profile, 2.0, Mode::Free).unwrap(),
            coord!(x: 2.0, y: 1.5)
        );
        assert!(matches!(
            select(&profile, 9.0, Mode::Free),
            Err(XsecError::OutOfRange { .. })
        ));
        assert!(select(&profile, f64::INFINITY, Mode::Snap).is_err());
    }
}
