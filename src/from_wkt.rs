//! WKT boundary adapter: converts parsed WKT into geometries purely through
//! the public constructors.  Shape-level failures (short rings, bad arity)
//! surface as error geometries, not panics.

use crate::errors::GeometryError;
use crate::{Coordinate, GeomKind, Geometry, Polygon, Ring};
use wkt::types;
use wkt::types::Coord;

impl From<Coord<f64>> for Coordinate {
    fn from(coord: Coord<f64>) -> Self {
        Coordinate {
            x: coord.x,
            y: coord.y,
        }
    }
}

fn coords_to_positions(coords: Vec<Coord<f64>>) -> Vec<Coordinate> {
    coords.into_iter().map(Coordinate::from).collect()
}

/// Parse a WKT string into a geometry.  Parse failures and malformed shapes
/// come back as error geometries carrying a message; several concatenated
/// geometries come back as a collection.
pub fn parse_wkt(wkt_str: &str) -> Geometry {
    let wkt_geoms = match wkt::Wkt::from_str(wkt_str) {
        Ok(parsed) => parsed,
        Err(msg) => return Geometry::new_error(format!("ParseError: {}", msg)),
    };
    let mut geoms: Vec<Geometry> = wkt_geoms.items.into_iter().map(from_wkt_geometry).collect();
    match geoms.len() {
        0 => Geometry::new_error("ParseError: empty input"),
        1 => geoms.remove(0),
        _ => Geometry::collection(geoms),
    }
}

fn from_wkt_geometry(geom: wkt::Geometry<f64>) -> Geometry {
    match geom {
        wkt::Geometry::Point(p) => from_wkt_point(p),
        wkt::Geometry::LineString(ls) => from_wkt_linestring(ls),
        wkt::Geometry::Polygon(p) => from_wkt_polygon(p),
        wkt::Geometry::MultiPoint(mp) => from_wkt_multi_point(mp),
        wkt::Geometry::MultiLineString(mls) => from_wkt_multi_linestring(mls),
        wkt::Geometry::MultiPolygon(mpoly) => from_wkt_multi_polygon(mpoly),
        wkt::Geometry::GeometryCollection(gc) => {
            Geometry::collection(gc.0.into_iter().map(from_wkt_geometry).collect())
        }
    }
}

fn from_wkt_point(pt: types::Point<f64>) -> Geometry {
    match pt.0 {
        None => Geometry::new_empty(GeomKind::Point),
        Some(coord) => {
            let (z, m) = (coord.z, coord.m);
            let position = Coordinate::from(coord);
            match (z, m) {
                (Some(z), Some(m)) => Geometry::point_zm(position, z, m),
                (Some(z), None) => Geometry::point_z(position, z),
                (None, Some(m)) => Geometry::point_m(position, m),
                (None, None) => Geometry::point(position),
            }
        }
    }
}

fn error_geom(err: GeometryError) -> Geometry {
    Geometry::new_error(format!("ParseError: {}", err))
}

fn from_wkt_linestring(ls: types::LineString<f64>) -> Geometry {
    let positions = coords_to_positions(ls.0);
    if positions.is_empty() {
        return Geometry::new_empty(GeomKind::LineString);
    }
    match Ring::new_line(positions) {
        Ok(line) => Geometry::line(line),
        Err(err) => error_geom(err),
    }
}

fn build_polygon(poly: types::Polygon<f64>) -> Option<Result<Polygon, GeometryError>> {
    let mut linestrings = poly.0;
    if linestrings.is_empty() {
        return None;
    }
    let shell = match Ring::new(coords_to_positions(linestrings.remove(0).0)) {
        Ok(ring) => ring,
        Err(err) => return Some(Err(err)),
    };
    let mut holes = Vec::with_capacity(linestrings.len());
    for ls in linestrings {
        match Ring::new(coords_to_positions(ls.0)) {
            Ok(ring) => holes.push(ring),
            Err(err) => return Some(Err(err)),
        }
    }
    Some(Polygon::new(shell, holes))
}

fn from_wkt_polygon(poly: types::Polygon<f64>) -> Geometry {
    match build_polygon(poly) {
        None => Geometry::new_empty(GeomKind::Polygon),
        Some(Ok(polygon)) => Geometry::polygon(polygon),
        Some(Err(err)) => error_geom(err),
    }
}

fn from_wkt_multi_point(mp: types::MultiPoint<f64>) -> Geometry {
    Geometry::multi_point(
        mp.0.into_iter()
            .filter_map(|p| p.0)
            .map(Coordinate::from)
            .collect(),
    )
}

fn from_wkt_multi_linestring(mls: types::MultiLineString<f64>) -> Geometry {
    let mut lines = Vec::with_capacity(mls.0.len());
    for ls in mls.0 {
        match Ring::new_line(coords_to_positions(ls.0)) {
            Ok(line) => lines.push(line),
            Err(err) => return error_geom(err),
        }
    }
    Geometry::multi_line(lines)
}

fn from_wkt_multi_polygon(mpoly: types::MultiPolygon<f64>) -> Geometry {
    let mut polygons = Vec::with_capacity(mpoly.0.len());
    for poly in mpoly.0 {
        match build_polygon(poly) {
            None => continue,
            Some(Ok(polygon)) => polygons.push(polygon),
            Some(Err(err)) => return error_geom(err),
        }
    }
    Geometry::multi_polygon(polygons)
}
