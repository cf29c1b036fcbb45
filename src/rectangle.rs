use crate::Coordinate;

use self::Side::*;

/// Axis-aligned bounding box.  Degenerate rectangles where min == max are
/// valid and represent points or axis-aligned segments.
#[derive(Copy, Clone, Debug)]
pub struct Rectangle {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl PartialEq for Rectangle {
    fn eq(&self, other: &Self) -> bool {
        if self.is_empty() {
            other.is_empty()
        } else {
            self.x_min == other.x_min
                && self.y_min == other.y_min
                && self.x_max == other.x_max
                && self.y_max == other.y_max
        }
    }
}

impl Rectangle {
    pub fn new(p1: Coordinate, p2: Coordinate) -> Self {
        Rectangle {
            x_min: p1.x.min(p2.x),
            y_min: p1.y.min(p2.y),
            x_max: p1.x.max(p2.x),
            y_max: p1.y.max(p2.y),
        }
    }

    pub fn new_empty() -> Self {
        Rectangle {
            x_min: f64::NAN,
            y_min: f64::NAN,
            x_max: f64::NAN,
            y_max: f64::NAN,
        }
    }

    pub fn of(rects: &[Rectangle]) -> Self {
        rects.iter().fold(Rectangle::new_empty(), |mut s, r| {
            s.expand(*r);
            s
        })
    }

    pub fn is_empty(&self) -> bool {
        self.x_min.is_nan() || self.y_min.is_nan() || self.x_max.is_nan() || self.y_max.is_nan()
    }

    pub fn center(&self) -> Coordinate {
        Coordinate {
            x: (self.x_max + self.x_min) / 2.,
            y: (self.y_max + self.y_min) / 2.,
        }
    }

    pub fn min(&self) -> Coordinate {
        Coordinate::new(self.x_min, self.y_min)
    }

    pub fn max(&self) -> Coordinate {
        Coordinate::new(self.x_max, self.y_max)
    }

    pub fn intersects(&self, other: Rectangle) -> bool {
        self.x_min <= other.x_max
            && self.x_max >= other.x_min
            && self.y_min <= other.y_max
            && self.y_max >= other.y_min
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        self.x_min <= point.x
            && point.x <= self.x_max
            && self.y_min <= point.y
            && point.y <= self.y_max
    }

    pub fn contains_rect(&self, other: Rectangle) -> bool {
        self.x_min <= other.x_min
            && self.x_max >= other.x_max
            && self.y_min <= other.y_min
            && self.y_max >= other.y_max
    }

    pub fn expand(&mut self, other: Rectangle) {
        self.x_min = self.x_min.min(other.x_min);
        self.y_min = self.y_min.min(other.y_min);
        self.x_max = self.x_max.max(other.x_max);
        self.y_max = self.y_max.max(other.y_max);
    }

    pub fn expand_coord(&mut self, point: Coordinate) {
        self.x_min = self.x_min.min(point.x);
        self.y_min = self.y_min.min(point.y);
        self.x_max = self.x_max.max(point.x);
        self.y_max = self.y_max.max(point.y);
    }

    /// Squared distance from the rectangle to a point; zero for contained
    /// points.  Used as the lower-bound ordering in nearest-neighbor
    /// traversals.
    pub fn distance2_to_coord(&self, point: Coordinate) -> f64 {
        let dx = (self.x_min - point.x).max(0.).max(point.x - self.x_max);
        let dy = (self.y_min - point.y).max(0.).max(point.y - self.y_max);
        dx * dx + dy * dy
    }

    /// Return the portion of the segment defined by start and end that lies
    /// within the rectangle, if any.
    /// Uses the Liang-Barsky algorithm:
    /// https://www.skytopia.com/project/articles/compsci/clipping.html
    pub fn intersect_segment(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Option<(Coordinate, Coordinate)> {
        if self.contains(start) && self.contains(end) {
            return Some((start, end));
        } else if start == end {
            return None;
        }

        let mut t0 = 0.;
        let mut t1 = 1.;
        let x_delta = end.x - start.x;
        let y_delta = end.y - start.y;

        for side in SIDES.iter() {
            let (p, q) = match side {
                Left => (-x_delta, -(self.x_min - start.x)),
                Right => (x_delta, (self.x_max - start.x)),
                Top => (-y_delta, -(self.y_min - start.y)),
                Bottom => (y_delta, (self.y_max - start.y)),
            };
            let r = q / p;
            if p == 0. && q < 0. {
                return None;
            }
            if p < 0. {
                if r > t1 {
                    return None;
                } else if r > t0 {
                    t0 = r;
                }
            } else if p > 0. {
                if r < t0 {
                    return None;
                } else if r < t1 {
                    t1 = r;
                }
            }
        }
        Some((
            Coordinate::new(start.x + t0 * x_delta, start.y + t0 * y_delta),
            Coordinate::new(start.x + t1 * x_delta, start.y + t1 * y_delta),
        ))
    }

    /// True if any part of the segment lies within the rectangle.
    pub fn intersects_segment(&self, start: Coordinate, end: Coordinate) -> bool {
        self.intersect_segment(start, end).is_some()
    }
}

enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

static SIDES: [Side; 4] = [Left, Right, Top, Bottom];
