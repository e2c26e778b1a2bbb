use crate::XsecError;
use geo::{Coord, CoordFloat, Rect};

/// Nominal display area, in display units.
pub const DISPLAY_SIZE: Coord<f64> = Coord {
    x: 1000.0,
    y: 600.0,
};

/// Linear mapping between data space and a display rectangle.
///
/// Each axis is scaled independently to fill the display, and y is
/// flipped so higher ground is drawn nearer the top. Display
/// coordinates start at one, leaving a one-unit border.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport<C: CoordFloat = f64> {
    data: Rect<C>,
    size: Coord<C>,
    scale: Coord<C>,
}

impl<C: CoordFloat> Viewport<C> {
    pub fn new(data: Rect<C>, size: Coord<C>) -> Result<Self, XsecError> {
        if !(size.x > C::zero() && size.y > C::zero()) {
            return Err(XsecError::DivisionByZero("display scale (empty display)"));
        }
        let (width, height) = (data.width(), data.height());
        if width == C::zero() {
            return Err(XsecError::DivisionByZero("display scale (flat x range)"));
        }
        if height == C::zero() {
            return Err(XsecError::DivisionByZero("display scale (flat y range)"));
        }
        Ok(Self {
            data,
            size,
            scale: Coord {
                x: size.x / width,
                y: size.y / height,
            },
        })
    }

    pub fn data(&self) -> Rect<C> {
        self.data
    }

    pub fn size(&self) -> Coord<C> {
        self.size
    }

    pub fn to_display(&self, point: Coord<C>) -> Coord<C> {
        let min = self.data.min();
        let offset = C::one();
        Coord {
            x: (point.x - min.x) * self.scale.x + offset,
            y: self.size.y + offset - (point.y - min.y) * self.scale.y,
        }
    }

    pub fn to_data(&self, display: Coord<C>) -> Coord<C> {
        let min = self.data.min();
        let offset = C::one();
        Coord {
            x: (display.x - offset) / self.scale.x + min.x,
            y: (self.size.y + offset - display.y) / self.scale.y + min.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Viewport, DISPLAY_SIZE};
    use crate::XsecError;
    use approx::assert_relative_eq;
    use geo::{coord, Rect};

    fn viewport() -> Viewport {
        let data = Rect::new(
            coord!(x: 512_301.0, y: 12.4),
            coord!(x: 512_347.5, y: 18.9),
        );
        Viewport::new(data, DISPLAY_SIZE).unwrap()
    }

    #[test]
    fn test_corners() {
        let viewport = viewport();
        let sw = viewport.to_display(coord!(x: 512_301.0, y: 12.4));
        assert_relative_eq!(sw.x, 1.0);
        assert_relative_eq!(sw.y, 601.0);
        let ne = viewport.to_display(coord!(x: 512_347.5, y: 18.9));
        assert_relative_eq!(ne.x, 1001.0, epsilon = 1e-9);
        assert_relative_eq!(ne.y, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_round_trip() {
        let viewport = viewport();
        for (x, y) in [
            (512_301.0, 12.4),
            (512_320.125, 15.0),
            (512_333.3, 13.75),
            (512_347.5, 18.9),
        ] {
            let data = coord!(x: x, y: y);
            let back = viewport.to_data(viewport.to_display(data));
            assert_relative_eq!(back.x, data.x, epsilon = 1e-9);
            assert_relative_eq!(back.y, data.y, epsilon = 1e-9);
        }
        let display = coord!(x: 500.0, y: 300.0);
        let back = viewport.to_display(viewport.to_data(display));
        assert_relative_eq!(back.x, display.x, epsilon = 1e-9);
        assert_relative_eq!(back.y, display.y, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate() {
        let flat = Rect::new(coord!(x: 0.0, y: 5.0), coord!(x: 10.0, y: 5.0));
        assert!(matches!(
            Viewport::new(flat, DISPLAY_SIZE),
            Err(XsecError::DivisionByZero(_))
        ));
        let data = Rect::new(coord!(x: 0.0, y: 0.0), coord!(x: 10.0, y: 5.0));
        assert_eq!(
            Viewport::new(data, coord!(x: 0.0, y: 600.0)),
            Err(XsecError::DivisionByZero("display scale (empty display)"))
        );
        assert!(matches!(
            Viewport::new(data, coord!(x: 1000.0, y: -1.0)),
            Err(XsecError::DivisionByZero(_))
        ));
    }
}
