use crate::sudageo::{bbox, epsg, epsg::CrsHandle, error::Error, utm};
use geojson::{Feature, Geometry, Value};
use tracing::info;

pub struct Transformer<'a> {
    src: &'a CrsHandle,
    dst: &'a CrsHandle,
}

impl<'a> Transformer<'a> {
    pub fn new(src: &'a CrsHandle, dst: &'a CrsHandle) -> Transformer<'a> {
        Transformer { src, dst }
    }

    /// Geographic coordinates are lon/lat degrees on both sides.
    pub fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), Error> {
        let mut point = if self.src.is_geographic() {
            (x.to_radians(), y.to_radians(), 0.0)
        } else {
            (x, y, 0.0)
        };
        proj4rs::transform::transform(self.src.proj(), self.dst.proj(), &mut point).map_err(
            |e| {
                Error::Projection(format!(
                    "({}, {}) from EPSG:{} to EPSG:{}: {:?}",
                    x,
                    y,
                    self.src.epsg(),
                    self.dst.epsg(),
                    e
                ))
            },
        )?;
        if self.dst.is_geographic() {
            Ok((point.0.to_degrees(), point.1.to_degrees()))
        } else {
            Ok((point.0, point.1))
        }
    }

    fn position(&self, pos: &mut Vec<f64>) -> Result<(), Error> {
        if pos.len() < 2 {
            return Err(Error::InvalidGeoJSON(format!(
                "position needs at least 2 coordinates, got {}",
                pos.len()
            )));
        }
        let (x, y) = self.transform(pos[0], pos[1])?;
        pos[0] = x;
        pos[1] = y;
        Ok(())
    }

    fn positions(&self, line: &mut Vec<Vec<f64>>) -> Result<(), Error> {
        line.iter_mut().try_for_each(|p| self.position(p))
    }

    fn rings(&self, rings: &mut Vec<Vec<Vec<f64>>>) -> Result<(), Error> {
        rings.iter_mut().try_for_each(|r| self.positions(r))
    }

    pub fn transform_geometry(&self, geom: &mut Geometry) -> Result<(), Error> {
        // Any bbox refers to the old coordinates.
        geom.bbox = None;
        match geom.value {
            Value::Point(ref mut p) => self.position(p),
            Value::MultiPoint(ref mut ps) => self.positions(ps),
            Value::LineString(ref mut ls) => self.positions(ls),
            Value::MultiLineString(ref mut mls) => self.rings(mls),
            Value::Polygon(ref mut poly) => self.rings(poly),
            Value::MultiPolygon(ref mut mp) => mp.iter_mut().try_for_each(|p| self.rings(p)),
            Value::GeometryCollection(ref mut gc) => {
                gc.iter_mut().try_for_each(|g| self.transform_geometry(g))
            }
        }
    }

    pub fn transform_features(&self, features: &mut [Feature]) -> Result<(), Error> {
        for feature in features.iter_mut() {
            feature.bbox = None;
            if let Some(ref mut geom) = feature.geometry {
                self.transform_geometry(geom)?;
            }
        }
        Ok(())
    }
}

/// Picks the primary UTM suggestion for the centre of the dataset's extent.
pub fn estimate_utm_crs(features: &[Feature], src: &CrsHandle) -> Result<CrsHandle, Error> {
    let extent = bbox::total_bounds(features)?.ok_or_else(|| {
        Error::InvalidInput("cannot estimate a UTM zone for a dataset without geometries".into())
    })?;
    let center = extent.center();
    let (lon, lat) = if src.is_geographic() {
        (center.x, center.y)
    } else {
        let wgs84 = epsg::validate_epsg(4326)?;
        Transformer::new(src, &wgs84).transform(center.x, center.y)?
    };
    let suggestions = utm::suggest_utm_zone(lon, lat)?;
    let primary = &suggestions[0];
    info!("Using estimated UTM CRS {} for ({:.4}, {:.4})", primary.name, lon, lat);
    epsg::validate_epsg(primary.epsg)
}

/// A copy of `features` in metres, in the estimated UTM zone when `src` is
/// geographic.
pub fn projected_copy(features: &[Feature], src: &CrsHandle) -> Result<Vec<Feature>, Error> {
    let mut copy = features.to_vec();
    if src.is_geographic() && bbox::total_bounds(features)?.is_some() {
        let utm = estimate_utm_crs(features, src)?;
        Transformer::new(src, &utm).transform_features(&mut copy)?;
    }
    Ok(copy)
}

/// Runs `op` with `features` in metres: geographic input is projected to its
/// estimated UTM zone first and back afterwards.
pub fn in_projected<F>(features: &mut Vec<Feature>, src: &CrsHandle, op: F) -> Result<(), Error>
where
    F: FnOnce(&mut Vec<Feature>) -> Result<(), Error>,
{
    if !src.is_geographic() {
        return op(features);
    }
    let utm = estimate_utm_crs(features, src)?;
    Transformer::new(src, &utm).transform_features(features)?;
    op(features)?;
    Transformer::new(&utm, src).transform_features(features)
}
