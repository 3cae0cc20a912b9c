use super::{number_arg, number_or, path_arg};
use crate::sudageo::utm::check_range;
use crate::sudageo::resample::{self, Method};
use crate::sudageo::{error::Error, mosaic, raster, table, terrain};
use clap::ArgMatches;
use tracing::{info, warn};

fn slope(matches: &ArgMatches) -> Result<(), Error> {
    let dem = raster::read(path_arg(matches, "in")?)?;
    let out = path_arg(matches, "out")?;
    let grid = terrain::compute_slope(&dem.grid, dem.dx, dem.dy)?;
    raster::write_f32(out, &grid, &dem)?;
    println!("Slope written to {}", out.display());
    Ok(())
}

fn hillshade(matches: &ArgMatches) -> Result<(), Error> {
    let azimuth = number_or(matches, "azimuth", terrain::DEFAULT_AZIMUTH)?;
    let altitude = number_or(matches, "altitude", terrain::DEFAULT_ALTITUDE)?;
    check_range("Azimuth", azimuth, 0.0, 360.0)?;
    check_range("Altitude", altitude, 0.0, 90.0)?;

    let dem = raster::read(path_arg(matches, "in")?)?;
    let out = path_arg(matches, "out")?;
    info!("Hillshade with sun at azimuth {} altitude {}", azimuth, altitude);
    let grid = terrain::compute_hillshade(&dem.grid, dem.dx, dem.dy, azimuth, altitude)?;
    raster::write_f32(out, &grid, &dem)?;
    println!("Hillshade written to {}", out.display());
    Ok(())
}

fn resample_raster(matches: &ArgMatches) -> Result<(), Error> {
    let scale = number_arg(matches, "scale")?;
    let method = match matches.value_of("method") {
        Some(name) => name.parse::<Method>()?,
        None => resample::DEFAULT_METHOD,
    };
    let dem = raster::read(path_arg(matches, "in")?)?;
    let out = path_arg(matches, "out")?;
    let resampled = resample::resample(&dem, scale, method)?;
    raster::write_f32(out, &resampled.grid, &resampled)?;
    println!(
        "Resampled to {} rows x {} cols ({} x {}) in {}",
        resampled.rows(),
        resampled.cols(),
        resampled.dx,
        resampled.dy,
        out.display()
    );
    Ok(())
}

fn mosaic_tiles(matches: &ArgMatches) -> Result<(), Error> {
    let out = path_arg(matches, "out")?;
    let merged = mosaic::mosaic_dir(path_arg(matches, "dir")?, out)?;
    println!(
        "Mosaic of {} rows x {} cols written to {}",
        merged.rows(),
        merged.cols(),
        out.display()
    );
    Ok(())
}

fn info(matches: &ArgMatches) -> Result<(), Error> {
    let path = path_arg(matches, "in")?;
    let dem = raster::read(path)?;
    let mut rows = vec![
        ("Size", format!("{} rows x {} cols", dem.rows(), dem.cols())),
        ("Cell size", format!("{} x {}", dem.dx, dem.dy)),
    ];
    if let Some((x, y)) = dem.tags.origin() {
        rows.push(("Origin", format!("{}, {}", x, y)));
    }
    rows.push((
        "NoData",
        dem.nodata
            .map(|v| v.to_string())
            .unwrap_or_else(|| "none".to_string()),
    ));
    rows.push(("NoData cells", dem.nodata_count().to_string()));
    match dem.value_range() {
        Some((lo, hi)) => rows.push(("Range", format!("{} .. {}", lo, hi))),
        None => warn!("{} has no valid cells", path.display()),
    }
    println!("{}", table::key_values(&path.display().to_string(), &rows));
    Ok(())
}

pub fn run(matches: &ArgMatches) -> Result<(), Error> {
    match matches.subcommand() {
        ("slope", Some(m)) => slope(m),
        ("hillshade", Some(m)) => hillshade(m),
        ("resample", Some(m)) => resample_raster(m),
        ("mosaic", Some(m)) => mosaic_tiles(m),
        ("info", Some(m)) => info(m),
        _ => Err(Error::UnknownCommand),
    }
}
