#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl Point<i64> {
    /// Rectilinear distance between two points.
    #[inline]
    pub fn manhattan(&self, other: &Point<i64>) -> i64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_is_symmetric() {
        let a = Point::new(5, 5);
        let b = Point::new(20, 10);
        assert_eq!(a.manhattan(&b), 20);
        assert_eq!(b.manhattan(&a), 20);
        assert_eq!(a.manhattan(&a), 0);
    }
}
