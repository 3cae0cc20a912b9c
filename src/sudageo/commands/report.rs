use super::path_arg;
use super::vector::source_crs;
use crate::sudageo::{bbox, error::Error, features, table};
use clap::ArgMatches;
use geojson::{Feature, Value};
use std::collections::BTreeMap;
use std::collections::BTreeSet;

#[derive(Debug, Default, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub null_geometries: usize,
    pub invalid_geometries: usize,
    pub geometry_types: BTreeMap<&'static str, usize>,
    pub attributes: BTreeSet<String>,
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn valid_position(pos: &[f64]) -> bool {
    pos.len() >= 2 && pos.iter().all(|c| c.is_finite())
}

fn valid_line(line: &[Vec<f64>]) -> bool {
    line.len() >= 2 && line.iter().all(|p| valid_position(p))
}

// Closed, with at least four positions.
fn valid_ring(ring: &[Vec<f64>]) -> bool {
    ring.len() >= 4 && valid_line(ring) && ring.first() == ring.last()
}

fn valid_polygon(rings: &[Vec<Vec<f64>>]) -> bool {
    !rings.is_empty() && rings.iter().all(|r| valid_ring(r))
}

/// Structural checks from RFC 7946; self-intersections are not detected.
pub fn is_valid(value: &Value) -> bool {
    match value {
        Value::Point(p) => valid_position(p),
        Value::MultiPoint(ps) => ps.iter().all(|p| valid_position(p)),
        Value::LineString(ls) => valid_line(ls),
        Value::MultiLineString(mls) => mls.iter().all(|l| valid_line(l)),
        Value::Polygon(rings) => valid_polygon(rings),
        Value::MultiPolygon(mp) => mp.iter().all(|p| valid_polygon(p)),
        Value::GeometryCollection(gc) => gc.iter().all(|g| is_valid(&g.value)),
    }
}

pub fn summarize(features: &[Feature]) -> Summary {
    let mut summary = Summary {
        count: features.len(),
        ..Summary::default()
    };
    for f in features {
        match f.geometry {
            Some(ref g) => {
                *summary.geometry_types.entry(type_name(&g.value)).or_insert(0) += 1;
                if !is_valid(&g.value) {
                    summary.invalid_geometries += 1;
                }
            }
            None => summary.null_geometries += 1,
        }
        if let Some(ref props) = f.properties {
            summary.attributes.extend(props.keys().cloned());
        }
    }
    summary
}

pub fn run(matches: &ArgMatches) -> Result<(), Error> {
    let path = path_arg(matches, "in")?;
    let crs = source_crs(matches)?;
    let features = features::read(path)?;
    let summary = summarize(&features);

    let types: Vec<String> = summary
        .geometry_types
        .iter()
        .map(|(name, n)| format!("{} ({})", name, n))
        .collect();
    let attributes: Vec<&str> = summary.attributes.iter().map(|s| s.as_str()).collect();
    let bounds = match bbox::total_bounds(&features)? {
        Some(r) => format!("{}, {}, {}, {}", r.min().x, r.min().y, r.max().x, r.max().y),
        None => "empty".to_string(),
    };

    let rows = [
        ("CRS", crs.to_string()),
        ("Features", summary.count.to_string()),
        ("Geometry types", types.join(", ")),
        ("Null geometries", summary.null_geometries.to_string()),
        ("Invalid geometries", summary.invalid_geometries.to_string()),
        ("Attributes", attributes.join(", ")),
        ("Bounds", bounds),
    ];
    println!("{}", table::key_values(&path.display().to_string(), &rows));
    Ok(())
}
