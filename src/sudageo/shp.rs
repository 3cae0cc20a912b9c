use crate::sudageo::error::Error;
use dbase::{FieldValue, Record};
use serde_json::{Map, Number, Value};
use shapefile::PolygonRing;
use std::path::Path;

trait Position {
    fn position(&self) -> Vec<f64>;
}

impl Position for shapefile::Point {
    fn position(&self) -> Vec<f64> {
        vec![self.x, self.y]
    }
}

// Measures have no place in a GeoJSON position.
impl Position for shapefile::PointM {
    fn position(&self) -> Vec<f64> {
        vec![self.x, self.y]
    }
}

impl Position for shapefile::PointZ {
    fn position(&self) -> Vec<f64> {
        vec![self.x, self.y, self.z]
    }
}

fn line<P: Position>(points: &[P]) -> Vec<Vec<f64>> {
    points.iter().map(|p| p.position()).collect()
}

fn lines<P: Position>(parts: &[Vec<P>]) -> geojson::Value {
    let mut lines: Vec<Vec<Vec<f64>>> = parts.iter().map(|part| line(part)).collect();
    if lines.len() == 1 {
        geojson::Value::LineString(lines.remove(0))
    } else {
        geojson::Value::MultiLineString(lines)
    }
}

/// Each outer ring opens a new polygon; inner rings belong to the last one.
fn polygons<P: Position>(rings: &[PolygonRing<P>]) -> geojson::Value {
    let mut polys: Vec<Vec<Vec<Vec<f64>>>> = Vec::new();
    for ring in rings {
        let coords = line(ring.points());
        match ring {
            PolygonRing::Outer(_) => polys.push(vec![coords]),
            PolygonRing::Inner(_) => match polys.last_mut() {
                Some(poly) => poly.push(coords),
                None => polys.push(vec![coords]),
            },
        }
    }
    if polys.len() == 1 {
        geojson::Value::Polygon(polys.remove(0))
    } else {
        geojson::Value::MultiPolygon(polys)
    }
}

fn shape_value(shape: shapefile::Shape) -> Result<Option<geojson::Value>, Error> {
    let value = match shape {
        shapefile::Shape::NullShape => return Ok(None),
        shapefile::Shape::Point(p) => geojson::Value::Point(p.position()),
        shapefile::Shape::PointM(p) => geojson::Value::Point(p.position()),
        shapefile::Shape::PointZ(p) => geojson::Value::Point(p.position()),
        shapefile::Shape::Multipoint(g) => geojson::Value::MultiPoint(line(g.points())),
        shapefile::Shape::MultipointM(g) => geojson::Value::MultiPoint(line(g.points())),
        shapefile::Shape::MultipointZ(g) => geojson::Value::MultiPoint(line(g.points())),
        shapefile::Shape::Polyline(g) => lines(g.parts()),
        shapefile::Shape::PolylineM(g) => lines(g.parts()),
        shapefile::Shape::PolylineZ(g) => lines(g.parts()),
        shapefile::Shape::Polygon(g) => polygons(g.rings()),
        shapefile::Shape::PolygonM(g) => polygons(g.rings()),
        shapefile::Shape::PolygonZ(g) => polygons(g.rings()),
        shapefile::Shape::Multipatch(_) => {
            return Err(Error::file_format(
                "Multipatch shapes are not supported",
                Some("Convert the layer to polygons first.".to_string()),
            ))
        }
    };
    Ok(Some(value))
}

fn record_properties(record: Record) -> Map<String, Value> {
    let mut props = Map::new();
    for (name, value) in record.into_iter() {
        let json = match value {
            FieldValue::Character(Some(s)) => Value::String(s),
            FieldValue::Numeric(Some(n)) | FieldValue::Double(n) => {
                match Number::from_f64(n) {
                    Some(num) => Value::Number(num),
                    None => continue,
                }
            }
            FieldValue::Integer(i) => Value::Number(Number::from(i)),
            FieldValue::Logical(Some(b)) => Value::Bool(b),
            _ => Value::Null,
        };
        props.insert(name, json);
    }
    props
}

pub fn read(path: &Path) -> Result<Vec<geojson::Feature>, Error> {
    let mut reader = shapefile::Reader::from_path(path)?;
    let mut features = Vec::new();
    for shape_record in reader.iter_shapes_and_records() {
        let (shape, record) = shape_record?;
        features.push(geojson::Feature {
            bbox: None,
            geometry: shape_value(shape)?.map(geojson::Geometry::new),
            id: None,
            properties: Some(record_properties(record)),
            foreign_members: None,
        });
    }
    Ok(features)
}
