#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Shortest signed angular difference from `current` to `target`,
/// wrapped into (-PI, PI].
pub fn shortest_angle_diff(target: f32, current: f32) -> f32 {
    let mut diff = target - current;
    while diff < -std::f32::consts::PI {
        diff += std::f32::consts::TAU;
    }
    while diff > std::f32::consts::PI {
        diff -= std::f32::consts::TAU;
    }
    diff
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_approx_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn angle_diff_takes_short_way_across_pi() {
        // From 3.0 rad toward -3.0 rad the short way crosses the +/- PI seam.
        let diff = shortest_angle_diff(-3.0, 3.0);
        assert!(diff.abs() <= std::f32::consts::PI);
        assert!(diff > 0.0, "short way is counter-clockwise through PI");
        assert_approx_eq!(diff, std::f32::consts::TAU - 6.0, 1e-5);
    }

    #[test]
    fn angle_diff_identity_is_zero() {
        assert_approx_eq!(shortest_angle_diff(1.25, 1.25), 0.0);
    }

    #[test]
    fn angle_diff_plain_case_is_unwrapped() {
        assert_approx_eq!(shortest_angle_diff(1.0, 0.5), 0.5);
        assert_approx_eq!(shortest_angle_diff(0.5, 1.0), -0.5);
    }
}
