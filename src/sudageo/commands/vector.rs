use super::{number_arg, path_arg, required};
use crate::sudageo::epsg::{self, CrsHandle};
use crate::sudageo::reproject::{self, Transformer};
use crate::sudageo::{area, error::Error, features, simplify};
use clap::ArgMatches;
use geojson::Feature;
use tracing::{info, warn};

pub const DEFAULT_SOURCE_CRS: &str = "4326";

/// Source CRS of the input, `--from` or WGS 84.
pub(crate) fn source_crs(matches: &ArgMatches) -> Result<CrsHandle, Error> {
    epsg::resolve(matches.value_of("from").unwrap_or(DEFAULT_SOURCE_CRS))
}

fn load(matches: &ArgMatches) -> Result<Vec<Feature>, Error> {
    features::read(path_arg(matches, "in")?)
}

fn reproject(matches: &ArgMatches) -> Result<(), Error> {
    let src = source_crs(matches)?;
    let dst = epsg::resolve(required(matches, "to")?)?;
    let out = path_arg(matches, "out")?;
    let mut features = load(matches)?;

    Transformer::new(&src, &dst).transform_features(&mut features)?;
    let count = features.len();
    features::write(features, out)?;
    println!("Reprojected {} features from {} to {}", count, src, dst);
    Ok(())
}

fn simplify(matches: &ArgMatches) -> Result<(), Error> {
    let tolerance = number_arg(matches, "tolerance")?;
    let src = source_crs(matches)?;
    let out = path_arg(matches, "out")?;
    let mut features = load(matches)?;

    reproject::in_projected(&mut features, &src, |fs| {
        simplify::simplify_features(fs, tolerance)
    })?;
    let count = features.len();
    features::write(features, out)?;
    println!("Simplified {} features (tolerance {} m)", count, tolerance);
    Ok(())
}

fn area(matches: &ArgMatches) -> Result<(), Error> {
    let field = matches.value_of("field").unwrap_or(area::DEFAULT_FIELD);
    let src = source_crs(matches)?;
    let out = path_arg(matches, "out")?;
    let mut features = load(matches)?;

    if src.is_geographic() {
        warn!("{} is geographic; measuring areas in the estimated UTM zone", src);
    }
    area::add_metric_area_field(&mut features, &src, field)?;
    info!("Added '{}' to {} features", field, features.len());
    let count = features.len();
    features::write(features, out)?;
    println!("Area field '{}' added to {} features", field, count);
    Ok(())
}

pub fn run(matches: &ArgMatches) -> Result<(), Error> {
    match matches.subcommand() {
        ("reproject", Some(m)) => reproject(m),
        ("simplify", Some(m)) => simplify(m),
        ("area", Some(m)) => area(m),
        _ => Err(Error::UnknownCommand),
    }
}
