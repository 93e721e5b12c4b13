use core::fmt;
use num_traits::Float;

/// A position in world space. Generic over the float type so the graph can follow whatever
/// precision the surrounding scene uses; [f32] is the default.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3<S = f32> {
    pub x: S,
    pub y: S,
    pub z: S,
}

impl<S: Float> Vec3<S> {
    pub fn new(x: S, y: S, z: S) -> Vec3<S> {
        Vec3 { x, y, z }
    }

    pub fn zero() -> Vec3<S> {
        Vec3::new(S::zero(), S::zero(), S::zero())
    }

    pub fn distance_squared(&self, other: &Vec3<S>) -> S {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// The [Euclidean distance](https://en.wikipedia.org/wiki/Euclidean_distance), used both as
    /// edge length and as the A* heuristic.
    pub fn distance(&self, other: &Vec3<S>) -> S {
        self.distance_squared(other).sqrt()
    }
}

impl<S: Float> From<(S, S, S)> for Vec3<S> {
    fn from((x, y, z): (S, S, S)) -> Self {
        Vec3::new(x, y, z)
    }
}

impl<S: fmt::Display> fmt::Display for Vec3<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 6.0, 3.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
        assert_eq!(a.distance_squared(&b), 25.0);
    }

    #[test]
    fn works_with_f64() {
        let a: Vec3<f64> = (0.0, 0.0, 0.0).into();
        let b = Vec3::new(0.0, 0.0, 10.0);
        assert_eq!(a.distance(&b), 10.0);
        assert_eq!(a, Vec3::zero());
    }
}
