use crate::sudageo::{error::Error, table};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run() -> Result<(), Error> {
    let rows = [
        ("Version", VERSION.to_string()),
        ("Vector input", "GeoJSON (.geojson, .json), Shapefile (.shp)".to_string()),
        ("Vector output", "GeoJSON (.geojson, .json)".to_string()),
        ("Raster input", "single-band GeoTIFF (.tif, .tiff)".to_string()),
        ("Raster output", "32-bit float GeoTIFF".to_string()),
        ("CRS database", "EPSG via crs-definitions, transforms via proj4rs".to_string()),
    ];
    println!("{}", table::key_values("sudageo", &rows));
    Ok(())
}
