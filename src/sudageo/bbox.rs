use crate::sudageo::error::Error;
use geo::algorithm::bounding_rect::BoundingRect;
use geo_types::{Coordinate, Geometry, Rect};
use geojson::Feature;
use std::cmp::Ordering;
use std::convert::TryInto;

fn min(a: f64, b: f64) -> f64 {
    match a.partial_cmp(&b).unwrap_or(Ordering::Equal) {
        Ordering::Greater => b,
        _ => a,
    }
}

fn max(a: f64, b: f64) -> f64 {
    match a.partial_cmp(&b).unwrap_or(Ordering::Equal) {
        Ordering::Less => b,
        _ => a,
    }
}

fn merge(a: Rect<f64>, b: Rect<f64>) -> Rect<f64> {
    Rect::new(
        Coordinate {
            x: min(a.min().x, b.min().x),
            y: min(a.min().y, b.min().y),
        },
        Coordinate {
            x: max(a.max().x, b.max().x),
            y: max(a.max().y, b.max().y),
        },
    )
}

fn fold<I>(rects: I) -> Option<Rect<f64>>
where
    I: Iterator<Item = Option<Rect<f64>>>,
{
    rects.flatten().fold(None, |acc, r| match acc {
        None => Some(r),
        Some(a) => Some(merge(a, r)),
    })
}

/// None for empty geometries.
pub fn bbox(geom: &Geometry<f64>) -> Option<Rect<f64>> {
    match *geom {
        Geometry::Point(ref g) => {
            let c = g.0;
            Some(Rect::new(c, c))
        }
        Geometry::Line(ref g) => Some(g.bounding_rect()),
        Geometry::LineString(ref g) => g.bounding_rect(),
        Geometry::Polygon(ref g) => g.bounding_rect(),
        Geometry::MultiPoint(ref g) => g.bounding_rect(),
        Geometry::MultiLineString(ref g) => g.bounding_rect(),
        Geometry::MultiPolygon(ref g) => g.bounding_rect(),
        Geometry::Rect(ref g) => Some(*g),
        Geometry::Triangle(ref g) => g.to_polygon().bounding_rect(),
        Geometry::GeometryCollection(ref gc) => fold(gc.0.iter().map(bbox)),
    }
}

pub fn feature_bbox(feature: &Feature) -> Result<Option<Rect<f64>>, Error> {
    match feature.geometry {
        Some(ref gj_geom) => {
            let geom: Geometry<f64> = gj_geom.value.clone().try_into()?;
            Ok(bbox(&geom))
        }
        None => Ok(None),
    }
}

/// Bounds of every geometry in the dataset; None when nothing has coordinates.
pub fn total_bounds(features: &[Feature]) -> Result<Option<Rect<f64>>, Error> {
    let rects = features
        .iter()
        .map(feature_bbox)
        .collect::<Result<Vec<_>, Error>>()?;
    Ok(fold(rects.into_iter()))
}
