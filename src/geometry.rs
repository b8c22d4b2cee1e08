//! Geometry primitives for positioning screens during a transition.

/// A point in container coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Move the rect so its top edge sits at `top`
    pub fn set_top(&mut self, top: f32) {
        self.y = top;
    }

    /// Move the rect so its bottom edge sits at `bottom`
    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.height;
    }

    /// Move the rect so its left edge sits at `left`
    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    /// Move the rect so its right edge sits at `right`
    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.width;
    }

    /// Distance from a point to the farthest corner of this rect.
    /// A circle of this radius centered at the point covers the whole rect.
    pub fn corner_distance(&self, point: Point) -> f32 {
        let corners = [
            Point::new(self.left(), self.top()),
            Point::new(self.right(), self.top()),
            Point::new(self.left(), self.bottom()),
            Point::new(self.right(), self.bottom()),
        ];
        corners
            .iter()
            .map(|c| point.distance(*c))
            .fold(0.0, f32::max)
    }
}
