use crate::C;
use geo::{geometry::Point, EuclideanDistance};
use itertools::Itertools;

/// Returns the horizontal distance between consecutive shots, with a
/// leading zero for the first shot.
pub fn step_distances(planar: &[Point<C>]) -> Vec<C> {
    let mut steps = Vec::with_capacity(planar.len());
    if !planar.is_empty() {
        steps.push(0.0);
    }
    steps.extend(
        planar
            .iter()
            .tuple_windows()
            .map(|(prev, next)| prev.euclidean_distance(next)),
    );
    steps
}

/// Returns the running total of `steps`.
pub fn cumulative(steps: &[C]) -> Vec<C> {
    steps
        .iter()
        .scan(0.0, |total, step| {
            *total += step;
            Some(*total)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{cumulative, step_distances};
    use geo::point;

    #[test]
    fn test_step_distances() {
        let planar = [
            point!(x: 0.0, y: 0.0),
            point!(x: 3.0, y: 4.0),
            point!(x: 3.0, y: 4.0),
        ];
        assert_eq!(step_distances(&planar), vec![0.0, 5.0, 0.0]);
        assert!(step_distances(&[]).is_empty());
    }

    #[test]
    fn test_cumulative() {
        assert_eq!(cumulative(&[0.0, 5.0, 0.0, 2.5]), vec![0.0, 5.0, 5.0, 7.5]);
    }
}
