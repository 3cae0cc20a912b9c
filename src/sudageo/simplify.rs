use crate::sudageo::error::Error;
use geo::algorithm::simplify::Simplify;
use geo_types::Geometry;
use geojson::Feature;
use std::convert::TryInto;

/// Douglas-Peucker simplification; points and collections pass through.
pub fn simplify(geom: Geometry<f64>, epsilon: f64) -> Geometry<f64> {
    match geom {
        Geometry::LineString(g) => Geometry::LineString(g.simplify(&epsilon)),
        Geometry::Polygon(g) => Geometry::Polygon(g.simplify(&epsilon)),
        Geometry::MultiLineString(g) => Geometry::MultiLineString(g.simplify(&epsilon)),
        Geometry::MultiPolygon(g) => Geometry::MultiPolygon(g.simplify(&epsilon)),
        _ => geom,
    }
}

pub fn simplify_features(features: &mut [Feature], epsilon: f64) -> Result<(), Error> {
    if !(epsilon >= 0.0) || !epsilon.is_finite() {
        return Err(Error::InvalidInput(format!(
            "tolerance must be a non-negative number, got {}",
            epsilon
        )));
    }
    for feature in features.iter_mut() {
        if let Some(ref mut gj_geom) = feature.geometry {
            let geom: Geometry<f64> = gj_geom.value.clone().try_into()?;
            gj_geom.value = geojson::Value::from(&simplify(geom, epsilon));
        }
    }
    Ok(())
}
