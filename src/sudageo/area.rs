use crate::sudageo::{epsg::CrsHandle, error::Error, reproject};
use geo::algorithm::area::Area;
use geo_types::Geometry;
use geojson::Feature;
use serde_json::{Number, Value};
use std::convert::TryInto;

pub const DEFAULT_FIELD: &str = "area_m2";

/// Planar area in the units of the current CRS; None for null geometries.
pub fn feature_area(feature: &Feature) -> Result<Option<f64>, Error> {
    match feature.geometry {
        Some(ref gj_geom) => {
            let geom: Geometry<f64> = gj_geom.value.clone().try_into()?;
            Ok(Some(geom.unsigned_area()))
        }
        None => Ok(None),
    }
}

fn area_value(feature: &Feature) -> Result<Value, Error> {
    Ok(match feature_area(feature)?.and_then(Number::from_f64) {
        Some(num) => Value::Number(num),
        None => Value::Null,
    })
}

fn set_field(feature: &mut Feature, field: &str, value: Value) {
    feature
        .properties
        .get_or_insert_with(serde_json::Map::new)
        .insert(field.to_string(), value);
}

/// Areas in square metres. Geographic features are measured on a UTM copy;
/// their own geometries are left as they are.
pub fn add_metric_area_field(
    features: &mut [Feature],
    src: &CrsHandle,
    field: &str,
) -> Result<(), Error> {
    let measured = reproject::projected_copy(features, src)?;
    for (feature, copy) in features.iter_mut().zip(measured.iter()) {
        set_field(feature, field, area_value(copy)?);
    }
    Ok(())
}
