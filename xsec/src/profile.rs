use crate::XsecError;
use geo::{Coord, CoordFloat, Rect};
use std::cmp::Ordering;

/// A ground profile across a channel: (x, y) points in survey order.
///
/// Points stay paired with their index, so duplicate x values never
/// get mixed up; a sorted index over x serves the bracketing lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile<C: CoordFloat = f64> {
    /// Points in their original order.
    points: Vec<Coord<C>>,

    /// Indices into `points`, ordered by x. Ties keep original order.
    by_x: Vec<usize>,

    /// Bounding box of all points.
    bounds: Rect<C>,
}

impl<C: CoordFloat> Profile<C> {
    pub fn new(points: Vec<Coord<C>>) -> Result<Self, XsecError> {
        if points.len() < 2 {
            return Err(XsecError::TooFewPoints(points.len()));
        }
        if points.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(XsecError::NotFinite("profile point"));
        }
        let mut by_x: Vec<usize> = (0..points.len()).collect();
        by_x.sort_by(|&a, &b| {
            points[a]
                .x
                .partial_cmp(&points[b].x)
                .unwrap_or(Ordering::Equal)
        });
        let (min, max) = points.iter().skip(1).fold((points[0], points[0]), |(min, max), p| {
            (
                Coord {
                    x: min.x.min(p.x),
                    y: min.y.min(p.y),
                },
                Coord {
                    x: max.x.max(p.x),
                    y: max.y.max(p.y),
                },
            )
        });
        Ok(Self {
            points,
            by_x,
            bounds: Rect::new(min, max),
        })
    }

    pub fn points(&self) -> &[Coord<C>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounds(&self) -> Rect<C> {
        self.bounds
    }

    /// Lowest point of the whole profile.
    pub fn min_y(&self) -> C {
        self.bounds.min().y
    }

    /// Returns the point whose x is closest to `x`, the earliest one
    /// on ties.
    pub fn nearest(&self, x: C) -> Coord<C> {
        let mut best = self.points[0];
        for p in &self.points[1..] {
            if (p.x - x).abs() < (best.x - x).abs() {
                best = *p;
            }
        }
        best
    }

    /// Returns the points with the greatest x below `x` and the least
    /// x above it.
    ///
    /// Where several points share that x, the one adjacent to the gap
    /// in survey order is used: the last of the lower group and the
    /// first of the upper.
    pub fn surrounding(&self, x: C) -> Result<(Coord<C>, Coord<C>), XsecError> {
        let below = self.by_x.partition_point(|&idx| self.points[idx].x < x);
        let above = self.by_x.partition_point(|&idx| self.points[idx].x <= x);
        match (below.checked_sub(1), self.by_x.get(above)) {
            (Some(lower), Some(&upper)) => Ok((self.points[self.by_x[lower]], self.points[upper])),
            _ => Err(self.out_of_range(x)),
        }
    }

    /// Returns the profile's y at `x`, interpolating linearly between
    /// the surrounding points.
    ///
    /// Fails for `x` outside the profile; there's no extrapolation.
    pub fn interpolate_y(&self, x: C) -> Result<C, XsecError> {
        let Coord { x: min_x, .. } = self.bounds.min();
        let Coord { x: max_x, .. } = self.bounds.max();
        if !(min_x <= x && x <= max_x) {
            return Err(self.out_of_range(x));
        }
        let below = self.by_x.partition_point(|&idx| self.points[idx].x < x);
        if let Some(&idx) = self.by_x.get(below) {
            if self.points[idx].x == x {
                return Ok(self.points[idx].y);
            }
        }
        let (a, b) = self.surrounding(x)?;
        let dx = b.x - a.x;
        if dx == C::zero() {
            return Err(XsecError::DivisionByZero("interpolation slope"));
        }
        let slope = (b.y - a.y) / dx;
        Ok(a.y + slope * (x - a.x))
    }

    /// Points strictly between `left_x` and `right_x`, in survey
    /// order.
    pub fn between(&self, left_x: C, right_x: C) -> impl Iterator<Item = Coord<C>> + '_ {
        self.points
            .iter()
            .filter(move |p| left_x < p.x && p.x < right_x)
            .copied()
    }

    fn out_of_range(&self, x: C) -> XsecError {
        let f = |val: C| val.to_f64().unwrap_or(f64::NAN);
        XsecError::OutOfRange {
            x: f(x),
            min: f(self.bounds.min().x),
            max: f(self.bounds.max().x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Profile;
    use crate::XsecError;
    use approx::assert_relative_eq;
    use geo::coord;

    fn channel() -> Profile {
        Profile::new(vec![
            coord!(x: 0.0, y: 10.0),
            coord!(x: 2.0, y: 9.0),
            coord!(x: 4.0, y: 6.0),
            coord!(x: 4.0, y: 5.0),
            coord!(x: 6.0, y: 5.5),
            coord!(x: 8.0, y: 9.5),
            coord!(x: 10.0, y: 10.5),
        ])
        .unwrap()
    }

    #[test]
    fn test_new() {
        assert_eq!(
            Profile::new(vec![coord!(x: 0.0, y: 0.0)]),
            Err(XsecError::TooFewPoints(1))
        );
        assert_eq!(
            Profile::new(vec![coord!(x: 0.0, y: 0.0), coord!(x: f64::NAN, y: 0.0)]),
            Err(XsecError::NotFinite("profile point"))
        );
        let profile = channel();
        assert_eq!(profile.min_y(), 5.0);
        assert_eq!(profile.bounds().max(), coord!(x: 10.0, y: 10.5));
    }

    #[test]
    fn test_nearest() {
        let profile = channel();
        assert_eq!(profile.nearest(2.9), coord!(x: 2.0, y: 9.0));
        // Halfway between 2 and 4 goes to the earlier point.
        assert_eq!(profile.nearest(3.0), coord!(x: 2.0, y: 9.0));
        // Duplicate x values resolve to the first in survey order.
        assert_eq!(profile.nearest(4.2), coord!(x: 4.0, y: 6.0));
        assert_eq!(profile.nearest(-50.0), coord!(x: 0.0, y: 10.0));
    }

    #[test]
    fn test_surrounding() {
        let profile = channel();
        assert_eq!(
            profile.surrounding(1.0).unwrap(),
            (coord!(x: 0.0, y: 10.0), coord!(x: 2.0, y: 9.0))
        );
        assert_eq!(
            profile.surrounding(3.0).unwrap(),
            (coord!(x: 2.0, y: 9.0), coord!(x: 4.0, y: 6.0))
        );
        assert_eq!(
            profile.surrounding(5.0).unwrap(),
            (coord!(x: 4.0, y: 5.0), coord!(x: 6.0, y: 5.5))
        );
        assert!(matches!(
            profile.surrounding(0.0),
            Err(XsecError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_interpolate() {
        let profile = channel();
        assert_relative_eq!(profile.interpolate_y(1.0).unwrap(), 9.5);
        assert_relative_eq!(profile.interpolate_y(7.0).unwrap(), 7.5);
        assert_relative_eq!(profile.interpolate_y(5.0).unwrap(), 5.25);
        assert_eq!(profile.interpolate_y(0.0).unwrap(), 10.0);
        assert_eq!(profile.interpolate_y(10.0).unwrap(), 10.5);
        assert_eq!(profile.interpolate_y(8.0).unwrap(), 9.5);
    }

    #[test]
    fn test_interpolate_out_of_range() {
        let profile = channel();
        assert_eq!(
            profile.interpolate_y(10.5),
            Err(XsecError::OutOfRange {
                x: 10.5,
                min: 0.0,
                max: 10.0
            })
        );
        assert!(profile.interpolate_y(-0.1).is_err());
        assert!(profile.interpolate_y(f64::NAN).is_err());
    }

    #[test]
    fn test_between() {
        let profile = channel();
        let inner: Vec<_> = profile.between(2.0, 6.5).collect();
        assert_eq!(
            inner,
            vec![
                coord!(x: 4.0, y: 6.0),
                coord!(x: 4.0, y: 5.0),
                coord!(x: 6.0, y: 5.5)
            ]
        );
    }
}
