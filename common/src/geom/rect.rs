use super::point::Point;

/// Axis-aligned rectangle in layout units, `max` exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub min: Point<i64>,
    pub max: Point<i64>,
}

impl Rect {
    pub fn new(min: Point<i64>, max: Point<i64>) -> Self {
        Self { min, max }
    }

    /// Interior intersection; rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}
