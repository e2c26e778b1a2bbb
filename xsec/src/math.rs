use crate::XsecError;
use geo::{Coord, CoordFloat};

/// Returns the area enclosed by `vertices`, closing the ring from the
/// last vertex back to the first.
///
/// Self-intersecting rings give a number, just not a meaningful one.
pub fn shoelace_area<C: CoordFloat>(vertices: &[Coord<C>]) -> C {
    let two = C::one() + C::one();
    let twice_signed = vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .fold(C::zero(), |acc, (a, b)| acc + a.x * b.y - a.y * b.x);
    (twice_signed / two).abs()
}

/// Mean flow velocity from Manning's equation,
/// `depth^(2/3) * slope^(1/2) / n`.
///
/// Units follow the inputs; with SI depths the result is m/s.
pub fn manning_velocity<C: CoordFloat>(depth: C, slope: C, mannings_n: C) -> Result<C, XsecError> {
    if mannings_n == C::zero() {
        return Err(XsecError::DivisionByZero("flow velocity (Manning's n is zero)"));
    }
    let two = C::one() + C::one();
    let two_thirds = two / (two + C::one());
    let velocity = depth.powf(two_thirds) * slope.sqrt() / mannings_n;
    if velocity.is_finite() {
        Ok(velocity)
    } else {
        Err(XsecError::NotFinite("flow velocity"))
    }
}

#[cfg(test)]
mod tests {
    use super::{manning_velocity, shoelace_area};
    use crate::XsecError;
    use approx::assert_relative_eq;
    use geo::{coord, Area, Coord, LineString, Polygon};

    #[test]
    fn test_square() {
        let square = [
            coord!(x: 0.0, y: 0.0),
            coord!(x: 10.0, y: 0.0),
            coord!(x: 10.0, y: 10.0),
            coord!(x: 0.0, y: 10.0),
        ];
        assert_eq!(shoelace_area(&square), 100.0);
    }

    #[test]
    fn test_degenerate() {
        let empty: [Coord; 0] = [];
        assert_eq!(shoelace_area(&empty), 0.0);
        assert_eq!(shoelace_area(&[coord!(x: 1.0, y: 2.0)]), 0.0);
        assert_eq!(
            shoelace_area(&[coord!(x: 1.0, y: 2.0), coord!(x: 4.0, y: 7.0)]),
            0.0
        );
    }

    #[test]
    fn test_order_invariance() {
        let channel = vec![
            coord!(x: 2.0, y: 10.0),
            coord!(x: 3.5, y: 8.25),
            coord!(x: 5.0, y: 7.0),
            coord!(x: 7.25, y: 7.5),
            coord!(x: 9.0, y: 9.75),
            coord!(x: 10.0, y: 10.0),
        ];
        let area = shoelace_area(&channel);

        let mut reversed = channel.clone();
        reversed.reverse();
        assert_relative_eq!(shoelace_area(&reversed), area, epsilon = 1e-12);

        for shift in 1..channel.len() {
            let mut rotated = channel.clone();
            rotated.rotate_left(shift);
            assert_relative_eq!(shoelace_area(&rotated), area, epsilon = 1e-12);
        }

        // Same answer as geo's own (closed) polygon area.
        let polygon = Polygon::new(LineString::from(channel), vec![]);
        assert_relative_eq!(polygon.unsigned_area(), area, epsilon = 1e-12);
    }

    #[test]
    fn test_manning() {
        let velocity = manning_velocity(1.0, 0.0001, 0.03).unwrap();
        assert_relative_eq!(velocity, 1.0 / 3.0, epsilon = 1e-12);

        let velocity = manning_velocity(2.0_f32, 0.001, 0.035).unwrap();
        assert_relative_eq!(velocity, 1.434_229, epsilon = 1e-4);
    }

    #[test]
    fn test_manning_errors() {
        assert!(matches!(
            manning_velocity(1.0, 0.001, 0.0),
            Err(XsecError::DivisionByZero(_))
        ));
        assert_eq!(
            manning_velocity(1.0, -0.001, 0.03),
            Err(XsecError::NotFinite("flow velocity"))
        );
    }
}
