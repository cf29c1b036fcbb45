use crate::config::{default_index, MAX_RECURSION_DEPTH};
use crate::index::MultiIndex;
use crate::{Coordinate, Polygon, Rectangle, Ring};
use std::sync::Arc;

/// Structural kind of a geometry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GeomKind {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

/// Coordinate dimensionality.  Z and M values are carried for callers
/// (writers, round-tripping) but never participate in predicates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Dims {
    Xy,
    Xyz,
    Xym,
    Xyzm,
}

impl Dims {
    pub fn has_z(self) -> bool {
        matches!(self, Dims::Xyz | Dims::Xyzm)
    }

    pub fn has_m(self) -> bool {
        matches!(self, Dims::Xym | Dims::Xyzm)
    }

    /// Extra values carried per position.
    pub fn extra_per_point(self) -> usize {
        match self {
            Dims::Xy => 0,
            Dims::Xyz | Dims::Xym => 1,
            Dims::Xyzm => 2,
        }
    }
}

/// Anything with a bounding rectangle; lets the multi-geometry record and the
/// predicate engine treat children uniformly.
pub trait HasRect {
    fn rect(&self) -> Rectangle;
}

impl HasRect for Coordinate {
    fn rect(&self) -> Rectangle {
        Rectangle::new(*self, *self)
    }
}

impl HasRect for Arc<Ring> {
    fn rect(&self) -> Rectangle {
        Ring::rect(self)
    }
}

impl HasRect for Arc<Polygon> {
    fn rect(&self) -> Rectangle {
        Polygon::rect(self)
    }
}

impl HasRect for Geometry {
    fn rect(&self) -> Rectangle {
        Geometry::rect(self)
    }
}

/// Children of a multi-geometry: the child array, their unioned rectangle,
/// and — once the child count reaches twice the index spread — a
/// Hilbert-ordered packed index over the child rectangles.
#[derive(Debug, Clone)]
pub struct Multi<T> {
    items: Vec<T>,
    rect: Rectangle,
    index: Option<MultiIndex>,
}

impl<T: HasRect> Multi<T> {
    pub(crate) fn new(items: Vec<T>) -> Self {
        let spread = default_index().spread;
        let rects: Vec<Rectangle> = items.iter().map(|i| i.rect()).collect();
        let rect = Rectangle::of(&rects);
        let index = if items.len() >= 2 * spread {
            Some(MultiIndex::new(&rects, spread))
        } else {
            None
        };
        Multi { items, rect, index }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    pub fn index(&self) -> Option<&MultiIndex> {
        self.index.as_ref()
    }

    /// Visit children whose rectangle intersects the query, through the
    /// index when one exists.  The visitor returns false to stop.
    pub fn search<F>(&self, query: Rectangle, visitor: &mut F) -> bool
    where
        F: FnMut(usize) -> bool,
    {
        match &self.index {
            Some(index) => {
                let items = &self.items;
                index.search(query, &mut |i| {
                    if items[i].rect().intersects(query) {
                        visitor(i)
                    } else {
                        true
                    }
                })
            }
            None => {
                for (i, item) in self.items.iter().enumerate() {
                    if item.rect().intersects(query) && !visitor(i) {
                        return false;
                    }
                }
                true
            }
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Shape {
    Point(Coordinate),
    Line(Arc<Ring>),
    Poly(Arc<Polygon>),
    MultiPoint(Multi<Coordinate>),
    MultiLine(Multi<Arc<Ring>>),
    MultiPoly(Multi<Arc<Polygon>>),
    Collection(Multi<Geometry>),
    Empty(GeomKind),
    Error(Box<str>),
}

/// A tagged geometry value: one of the seven structural kinds, an empty
/// placeholder, or a parse-error placeholder carrying a message.
///
/// Geometries are immutable after construction.  Rings and polygons are held
/// behind `Arc`, so clones share the underlying coordinate arrays and
/// indexes, and concurrent readers need no locking.
#[derive(Debug, Clone)]
pub struct Geometry {
    shape: Shape,
    dims: Dims,
    extra: Option<Box<[f64]>>,
    json: Option<Box<str>>,
}

impl Geometry {
    fn from_shape(shape: Shape) -> Self {
        Geometry {
            shape,
            dims: Dims::Xy,
            extra: None,
            json: None,
        }
    }

    pub fn point(coord: Coordinate) -> Self {
        Geometry::from_shape(Shape::Point(coord))
    }

    pub fn line(line: Ring) -> Self {
        Geometry::from_shape(Shape::Line(Arc::new(line)))
    }

    pub fn polygon(polygon: Polygon) -> Self {
        Geometry::from_shape(Shape::Poly(Arc::new(polygon)))
    }

    pub fn multi_point(coords: Vec<Coordinate>) -> Self {
        Geometry::from_shape(Shape::MultiPoint(Multi::new(coords)))
    }

    pub fn multi_line(lines: Vec<Ring>) -> Self {
        Geometry::from_shape(Shape::MultiLine(Multi::new(
            lines.into_iter().map(Arc::new).collect(),
        )))
    }

    pub fn multi_polygon(polygons: Vec<Polygon>) -> Self {
        Geometry::from_shape(Shape::MultiPoly(Multi::new(
            polygons.into_iter().map(Arc::new).collect(),
        )))
    }

    pub fn collection(geometries: Vec<Geometry>) -> Self {
        Geometry::from_shape(Shape::Collection(Multi::new(geometries)))
    }

    /// A typed empty placeholder, e.g. `POINT EMPTY`.
    pub fn new_empty(kind: GeomKind) -> Self {
        Geometry::from_shape(Shape::Empty(kind))
    }

    /// A parse-error placeholder.  Not a crash and not an empty geometry:
    /// predicates treat it as vacuously false, and the message survives for
    /// the caller.
    pub fn new_error(message: impl Into<String>) -> Self {
        Geometry::from_shape(Shape::Error(message.into().into_boxed_str()))
    }

    /// Attach Z/M values.  `extra` holds `dims.extra_per_point()` values per
    /// position, in position order.
    pub fn with_extra(mut self, dims: Dims, extra: Vec<f64>) -> Self {
        self.dims = dims;
        self.extra = if extra.is_empty() {
            None
        } else {
            Some(extra.into_boxed_slice())
        };
        self
    }

    /// Attach foreign-member JSON carried for the external GeoJSON layer.
    pub fn with_json(mut self, json: impl Into<String>) -> Self {
        self.json = Some(json.into().into_boxed_str());
        self
    }

    pub fn point_z(coord: Coordinate, z: f64) -> Self {
        Geometry::point(coord).with_extra(Dims::Xyz, vec![z])
    }

    pub fn point_m(coord: Coordinate, m: f64) -> Self {
        Geometry::point(coord).with_extra(Dims::Xym, vec![m])
    }

    pub fn point_zm(coord: Coordinate, z: f64, m: f64) -> Self {
        Geometry::point(coord).with_extra(Dims::Xyzm, vec![z, m])
    }

    pub(crate) fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Structural kind; `None` for error placeholders.
    pub fn kind(&self) -> Option<GeomKind> {
        match &self.shape {
            Shape::Point(_) => Some(GeomKind::Point),
            Shape::Line(_) => Some(GeomKind::LineString),
            Shape::Poly(_) => Some(GeomKind::Polygon),
            Shape::MultiPoint(_) => Some(GeomKind::MultiPoint),
            Shape::MultiLine(_) => Some(GeomKind::MultiLineString),
            Shape::MultiPoly(_) => Some(GeomKind::MultiPolygon),
            Shape::Collection(_) => Some(GeomKind::GeometryCollection),
            Shape::Empty(kind) => Some(*kind),
            Shape::Error(_) => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.shape, Shape::Error(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.shape {
            Shape::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match &self.shape {
            Shape::Empty(_) | Shape::Error(_) => true,
            Shape::MultiPoint(m) => m.is_empty(),
            Shape::MultiLine(m) => m.is_empty(),
            Shape::MultiPoly(m) => m.is_empty(),
            Shape::Collection(m) => m.items().iter().all(|g| g.is_empty()),
            _ => false,
        }
    }

    pub fn has_z(&self) -> bool {
        self.dims.has_z()
    }

    pub fn has_m(&self) -> bool {
        self.dims.has_m()
    }

    pub fn coord_dims(&self) -> Dims {
        self.dims
    }

    pub fn extra_coords(&self) -> &[f64] {
        self.extra.as_deref().unwrap_or(&[])
    }

    pub fn json(&self) -> Option<&str> {
        self.json.as_deref()
    }

    /// The Z value of a point geometry, when carried.
    pub fn z(&self) -> Option<f64> {
        match self.shape {
            Shape::Point(_) if self.dims.has_z() => self.extra_coords().first().copied(),
            _ => None,
        }
    }

    /// The M value of a point geometry, when carried.
    pub fn m(&self) -> Option<f64> {
        match self.shape {
            Shape::Point(_) if self.dims.has_m() => {
                let skip = if self.dims.has_z() { 1 } else { 0 };
                self.extra_coords().get(skip).copied()
            }
            _ => None,
        }
    }

    pub fn rect(&self) -> Rectangle {
        match &self.shape {
            Shape::Point(c) => Rectangle::new(*c, *c),
            Shape::Line(l) => l.rect(),
            Shape::Poly(p) => p.rect(),
            Shape::MultiPoint(m) => m.rect(),
            Shape::MultiLine(m) => m.rect(),
            Shape::MultiPoly(m) => m.rect(),
            Shape::Collection(m) => m.rect(),
            Shape::Empty(_) | Shape::Error(_) => Rectangle::new_empty(),
        }
    }

    pub fn as_point(&self) -> Option<Coordinate> {
        match &self.shape {
            Shape::Point(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&Ring> {
        match &self.shape {
            Shape::Line(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&Polygon> {
        match &self.shape {
            Shape::Poly(p) => Some(p),
            _ => None,
        }
    }

    /// Number of positions of a Point/MultiPoint geometry.
    pub fn num_points(&self) -> usize {
        match &self.shape {
            Shape::Point(_) => 1,
            Shape::MultiPoint(m) => m.len(),
            _ => 0,
        }
    }

    pub fn point_at(&self, index: usize) -> Option<Coordinate> {
        match &self.shape {
            Shape::Point(c) if index == 0 => Some(*c),
            Shape::MultiPoint(m) => m.items().get(index).copied(),
            _ => None,
        }
    }

    /// Number of direct children of a Multi*/GeometryCollection geometry.
    pub fn num_geometries(&self) -> usize {
        match &self.shape {
            Shape::MultiPoint(m) => m.len(),
            Shape::MultiLine(m) => m.len(),
            Shape::MultiPoly(m) => m.len(),
            Shape::Collection(m) => m.len(),
            _ => 0,
        }
    }

    /// Child at index, wrapped as a standalone geometry.  Ring and polygon
    /// children are shared, not copied.
    pub fn geometry_at(&self, index: usize) -> Option<Geometry> {
        match &self.shape {
            Shape::MultiPoint(m) => m.items().get(index).map(|c| Geometry::point(*c)),
            Shape::MultiLine(m) => m
                .items()
                .get(index)
                .map(|l| Geometry::from_shape(Shape::Line(l.clone()))),
            Shape::MultiPoly(m) => m
                .items()
                .get(index)
                .map(|p| Geometry::from_shape(Shape::Poly(p.clone()))),
            Shape::Collection(m) => m.items().get(index).cloned(),
            _ => None,
        }
    }

    /// DE-9IM-style dimensionality: 0 for point-like, 1 for line-like, 2 for
    /// area-like; collections report the maximum among their children.
    pub fn dims(&self) -> usize {
        self.dims_at(0)
    }

    fn dims_at(&self, depth: usize) -> usize {
        if depth >= MAX_RECURSION_DEPTH {
            return 0;
        }
        match &self.shape {
            Shape::Point(_) | Shape::MultiPoint(_) => 0,
            Shape::Line(_) | Shape::MultiLine(_) => 1,
            Shape::Poly(_) | Shape::MultiPoly(_) => 2,
            Shape::Collection(m) => m
                .items()
                .iter()
                .map(|g| g.dims_at(depth + 1))
                .max()
                .unwrap_or(0),
            Shape::Empty(kind) => match kind {
                GeomKind::Point | GeomKind::MultiPoint | GeomKind::GeometryCollection => 0,
                GeomKind::LineString | GeomKind::MultiLineString => 1,
                GeomKind::Polygon | GeomKind::MultiPolygon => 2,
            },
            Shape::Error(_) => 0,
        }
    }
}
