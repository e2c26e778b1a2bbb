use crate::{math::shoelace_area, Profile, XsecError};
use geo::{Coord, CoordFloat};

/// The wetted cross-section between two banks.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSection<C: CoordFloat = f64> {
    pub left_bank: Coord<C>,

    pub right_bank: Coord<C>,

    /// Left bank, every surveyed point between the banks, right bank.
    pub polygon: Vec<Coord<C>>,

    /// Area enclosed by `polygon`.
    pub area: C,

    /// `right_bank.x - left_bank.x`; negative if the banks are swapped.
    pub width: C,

    /// Lower bank height above the lowest point of the whole profile.
    ///
    /// Note: this is measured against the whole profile's minimum,
    /// not just the points between the banks.
    pub depth: C,
}

impl<C: CoordFloat> CrossSection<C> {
    pub fn new(profile: &Profile<C>, left_bank: Coord<C>, right_bank: Coord<C>) -> Self {
        let polygon: Vec<Coord<C>> = std::iter::once(left_bank)
            .chain(profile.between(left_bank.x, right_bank.x))
            .chain(std::iter::once(right_bank))
            .collect();
        let area = shoelace_area(&polygon);
        Self {
            left_bank,
            right_bank,
            polygon,
            area,
            width: right_bank.x - left_bank.x,
            depth: left_bank.y.min(right_bank.y) - profile.min_y(),
        }
    }

    pub fn width_depth_ratio(&self) -> Result<C, XsecError> {
        if self.depth == C::zero() {
            return Err(XsecError::DivisionByZero("width/depth ratio (depth is zero)"));
        }
        Ok(self.width / self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::CrossSection;
    use crate::{Profile, XsecError};
    use approx::assert_relative_eq;
    use geo::coord;

    fn v_channel() -> Profile {
        Profile::new(vec![
            coord!(x: 0.0, y: 12.0),
            coord!(x: 2.0, y: 10.0),
            coord!(x: 5.0, y: 7.0),
            coord!(x: 8.0, y: 10.0),
            coord!(x: 10.0, y: 12.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_section() {
        let profile = v_channel();
        let section = CrossSection::new(&profile, coord!(x: 2.0, y: 10.0), coord!(x: 8.0, y: 10.0));
        assert_eq!(
            section.polygon,
            vec![
                coord!(x: 2.0, y: 10.0),
                coord!(x: 5.0, y: 7.0),
                coord!(x: 8.0, y: 10.0)
            ]
        );
        // Triangle 6 wide and 3 deep.
        assert_relative_eq!(section.area, 9.0);
        assert_relative_eq!(section.width, 6.0);
        assert_relative_eq!(section.depth, 3.0);
        assert_relative_eq!(section.width_depth_ratio().unwrap(), 2.0);
    }

    #[test]
    fn test_depth_uses_whole_profile() {
        let profile = Profile::new(vec![
            coord!(x: 0.0, y: 1.0),
            coord!(x: 2.0, y: 10.0),
            coord!(x: 5.0, y: 7.0),
            coord!(x: 8.0, y: 10.0),
        ])
        .unwrap();
        let section = CrossSection::new(&profile, coord!(x: 2.0, y: 10.0), coord!(x: 8.0, y: 10.0));
        assert_relative_eq!(section.depth, 9.0);
    }

    #[test]
    fn test_zero_depth() {
        let profile = v_channel();
        let section = CrossSection::new(&profile, coord!(x: 4.0, y: 8.0), coord!(x: 5.0, y: 7.0));
        assert_eq!(section.depth, 0.0);
        assert!(matches!(
            section.width_depth_ratio(),
            Err(XsecError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_swapped_banks() {
        let profile = v_channel();
        let section = CrossSection::new(&profile, coord!(x: 8.0, y: 10.0), coord!(x: 2.0, y: 10.0));
        assert_relative_eq!(section.width, -6.0);
        assert_eq!(section.polygon.len(), 2);
        assert_eq!(section.area, 0.0);
    }
}
