//! Polygon files and GeoJSON interop.
//!
//! The plain-text format is a completeness flag on the first line followed
//! by one vertex per line:
//!
//! ```text
//! 1
//! (0, 0)
//! (4, 0)
//! (4, 4)
//! ```

use crate::error::{LocatorError, Result};
use crate::geometry::{Point, MAX_COORDINATE};
use crate::locator::PointLocator;
use geo_types::{Coord, LineString, MultiLineString};
use geojson::{Feature, GeoJson, Geometry};
use std::io::{BufRead, Write};

/// In-memory form of a polygon file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolygonFile {
    /// Whether the ring was closed by its author; an open ring is still being drawn.
    pub complete: bool,
    pub points: Vec<Point>,
}

impl PolygonFile {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            complete: true,
            points,
        }
    }
}

pub fn read_points<R: BufRead>(reader: R) -> Result<PolygonFile> {
    let mut complete = None;
    let mut points = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        let number = i + 1;
        match complete {
            None => complete = Some(parse_flag(text, number)?),
            Some(_) => points.push(parse_point(text, number)?),
        }
    }

    let complete = complete.ok_or_else(|| LocatorError::Parse {
        line: 1,
        message: "missing completeness flag".to_string(),
    })?;
    Ok(PolygonFile { complete, points })
}

pub fn write_points<W: Write>(mut writer: W, file: &PolygonFile) -> Result<()> {
    writeln!(writer, "{}", u8::from(file.complete))?;
    for p in &file.points {
        writeln!(writer, "{p}")?;
    }
    writer.flush()?;
    Ok(())
}

fn parse_flag(text: &str, line: usize) -> Result<bool> {
    match text {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => Err(LocatorError::Parse {
            line,
            message: format!("expected a completeness flag (0, 1, true or false), got {other:?}"),
        }),
    }
}

/// Accepts `(x, y)`, `x,y` and `x y`.
fn parse_point(text: &str, line: usize) -> Result<Point> {
    let err = |message: String| LocatorError::Parse { line, message };

    let inner = match (text.strip_prefix('('), text.strip_suffix(')')) {
        (Some(_), Some(_)) => &text[1..text.len() - 1],
        (None, None) => text,
        _ => return Err(err(format!("unbalanced parenthesis in {text:?}"))),
    };

    let parts: Vec<&str> = if inner.contains(',') {
        inner.split(',').map(str::trim).collect()
    } else {
        inner.split_whitespace().collect()
    };
    let &[x, y] = parts.as_slice() else {
        return Err(err(format!("expected two coordinates, got {text:?}")));
    };

    let coord = |s: &str| {
        s.parse::<i64>()
            .map_err(|e| err(format!("invalid coordinate {s:?}: {e}")))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}

/// Exterior ring of the first Polygon in a GeoJSON geometry, feature or
/// feature collection, without the repeated closing coordinate.
pub fn polygon_from_geojson(text: &str) -> Result<Vec<Point>> {
    let geojson: GeoJson = text
        .parse()
        .map_err(|e: geojson::Error| LocatorError::InvalidGeometry(e.to_string()))?;
    let value = first_polygon(&geojson)
        .ok_or_else(|| LocatorError::InvalidGeometry("no Polygon geometry found".to_string()))?;
    let polygon = geo_types::Polygon::<f64>::try_from(value)
        .map_err(|e| LocatorError::InvalidGeometry(e.to_string()))?;

    let mut coords: Vec<Coord<f64>> = polygon.exterior().coords().copied().collect();
    if coords.len() > 1 && coords.first() == coords.last() {
        coords.pop();
    }
    coords.into_iter().map(integral_point).collect()
}

fn first_polygon(geojson: &GeoJson) -> Option<&geojson::Value> {
    let is_polygon = |v: &&geojson::Value| matches!(v, geojson::Value::Polygon(_));
    match geojson {
        GeoJson::Geometry(g) => Some(&g.value).filter(is_polygon),
        GeoJson::Feature(f) => f.geometry.as_ref().map(|g| &g.value).filter(is_polygon),
        GeoJson::FeatureCollection(fc) => fc
            .features
            .iter()
            .filter_map(|f| f.geometry.as_ref())
            .map(|g| &g.value)
            .find(is_polygon),
    }
}

fn integral_point(c: Coord<f64>) -> Result<Point> {
    let limit = MAX_COORDINATE as f64;
    let ok = |v: f64| v.is_finite() && v.fract() == 0.0 && v.abs() <= limit;
    if !ok(c.x) || !ok(c.y) {
        return Err(LocatorError::InvalidGeometry(format!(
            "coordinate ({}, {}) is not an integer within +/-{MAX_COORDINATE}",
            c.x, c.y
        )));
    }
    Ok(Point::new(c.x as i64, c.y as i64))
}

/// The initial triangulation as a GeoJSON Feature holding a MultiLineString.
pub fn triangulation_to_geojson(locator: &PointLocator) -> String {
    let lines: Vec<LineString<f64>> = locator
        .triangulation()
        .iter()
        .map(|s| {
            LineString::from(vec![
                (s.start.x as f64, s.start.y as f64),
                (s.end.x as f64, s.end.y as f64),
            ])
        })
        .collect();
    let geometry = Geometry::new(geojson::Value::from(&MultiLineString::new(lines)));

    let mut feature = Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: None,
        foreign_members: None,
    };
    feature.set_property("edges", locator.triangulation().len());
    feature.set_property("rounds", locator.rounds());
    GeoJson::Feature(feature).to_string()
}
