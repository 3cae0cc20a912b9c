extern crate assert_cli;
use assert_cli::Assert;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::Command;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::colortype::Gray32Float;
use tiff::encoder::TiffEncoder;
use tiff::tags::Tag;

fn path_str(p: &Path) -> &str {
    p.to_str().unwrap()
}

// 30 m cells, tied to a UTM 36N origin north of Khartoum.
fn write_dem(path: &Path, rows: u32, cols: u32, values: &[f32]) {
    write_dem_at(path, rows, cols, values, 444000.0)
}

fn write_dem_at(path: &Path, rows: u32, cols: u32, values: &[f32], west: f64) {
    let mut encoder = TiffEncoder::new(File::create(path).unwrap()).unwrap();
    let mut image = encoder.new_image::<Gray32Float>(cols, rows).unwrap();
    image
        .encoder()
        .write_tag(Tag::Unknown(33550), &[30.0, 30.0, 0.0][..])
        .unwrap();
    image
        .encoder()
        .write_tag(Tag::Unknown(33922), &[0.0, 0.0, 0.0, west, 1730000.0, 0.0][..])
        .unwrap();
    image.write_data(values).unwrap();
}

fn read_f32(path: &Path) -> Vec<f32> {
    let mut decoder = Decoder::new(File::open(path).unwrap()).unwrap();
    match decoder.read_image().unwrap() {
        DecodingResult::F32(buf) => buf,
        _ => panic!("expected a float raster"),
    }
}

fn write_geojson(dir: &Path, name: &str, json: serde_json::Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, json.to_string()).unwrap();
    path
}

fn read_geojson(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn lists_presets() {
    Assert::main_binary()
        .with_args(&["crs", "list"])
        .stdout()
        .contains("Adindan / UTM zone 36N")
        .unwrap();
    Assert::main_binary()
        .with_args(&["crs", "list"])
        .stdout()
        .contains("32634")
        .unwrap();
}

#[test]
fn suggests_utm_for_khartoum() {
    Assert::main_binary()
        .with_args(&["crs", "suggest", "--lon", "32.5", "--lat", "15.6"])
        .stdout()
        .contains("32636")
        .stdout()
        .contains("20136")
        .unwrap();
}

#[test]
fn suggests_as_json_in_rank_order() {
    let output = Command::new(env!("CARGO_BIN_EXE_sudageo"))
        .args(&["crs", "suggest", "--lon", "32.5", "--lat", "15.6", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let suggestions: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let epsgs: Vec<u64> = suggestions
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["epsg"].as_u64().unwrap())
        .collect();
    assert_eq!(vec![32636, 20136], epsgs);
    assert_eq!("Adindan / UTM zone 36N", suggestions[1]["name"]);
    assert_eq!("N", suggestions[0]["hemisphere"]);
    assert_eq!(36, suggestions[0]["zone"]);
}

#[test]
fn suggests_southern_zone_for_negative_coordinates() {
    Assert::main_binary()
        .with_args(&["crs", "suggest", "--lon", "-3.2", "--lat", "-12.5"])
        .stdout()
        .contains("32730")
        .unwrap();
}

#[test]
fn rejects_out_of_range_longitude() {
    Assert::main_binary()
        .with_args(&["crs", "suggest", "--lon", "200", "--lat", "15"])
        .stderr()
        .contains("Longitude 200 out of range [-180, 180]")
        .fails()
        .unwrap();
}

#[test]
fn rejects_non_numeric_latitude() {
    Assert::main_binary()
        .with_args(&["crs", "suggest", "--lon", "32", "--lat", "north"])
        .stderr()
        .contains("--lat")
        .fails()
        .unwrap();
}

#[test]
fn shows_crs_info() {
    Assert::main_binary()
        .with_args(&["crs", "info", "EPSG:32636"])
        .stdout()
        .contains("+proj=utm")
        .unwrap();
}

#[test]
fn invalid_epsg_has_hint() {
    Assert::main_binary()
        .with_args(&["crs", "info", "0"])
        .stderr()
        .contains("Application error: Invalid EPSG code: 0")
        .stderr()
        .contains("Hint: Use 'sudageo crs list'")
        .fails()
        .unwrap();
}

#[test]
fn slope_of_flat_dem_is_zero() {
    let dir = tempfile::tempdir().unwrap();
    let dem = dir.path().join("dem.tif");
    let out = dir.path().join("slope.tif");
    write_dem(&dem, 3, 4, &[381.0; 12]);

    Assert::main_binary()
        .with_args(&["raster", "slope", "--in", path_str(&dem), "--out", path_str(&out)])
        .stdout()
        .contains("Slope written to")
        .unwrap();
    let values = read_f32(&out);
    assert_eq!(12, values.len());
    assert!(values.iter().all(|&v| v == 0.0));
}

#[test]
fn hillshade_of_flat_dem() {
    let dir = tempfile::tempdir().unwrap();
    let dem = dir.path().join("dem.tif");
    let out = dir.path().join("hs.tif");
    write_dem(&dem, 3, 3, &[500.0; 9]);

    Assert::main_binary()
        .with_args(&["raster", "hillshade", "--in", path_str(&dem), "--out", path_str(&out)])
        .unwrap();
    // sin(45 deg) * 255
    assert!(read_f32(&out).iter().all(|&v| (v - 180.312).abs() < 1e-2));
}

#[test]
fn hillshade_rejects_high_altitude() {
    let dir = tempfile::tempdir().unwrap();
    let dem = dir.path().join("dem.tif");
    let out = dir.path().join("hs.tif");
    write_dem(&dem, 2, 2, &[1.0; 4]);

    Assert::main_binary()
        .with_args(&[
            "raster",
            "hillshade",
            "--in",
            path_str(&dem),
            "--out",
            path_str(&out),
            "--altitude",
            "95",
        ])
        .stderr()
        .contains("Altitude 95 out of range [0, 90]")
        .fails()
        .unwrap();
    assert!(!out.exists());
}

#[test]
fn raster_info() {
    let dir = tempfile::tempdir().unwrap();
    let dem = dir.path().join("dem.tif");
    write_dem(&dem, 2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

    Assert::main_binary()
        .with_args(&["raster", "info", "--in", path_str(&dem)])
        .stdout()
        .contains("2 rows x 3 cols")
        .stdout()
        .contains("1 .. 6")
        .unwrap();
}

#[test]
fn resamples_to_finer_cells() {
    let dir = tempfile::tempdir().unwrap();
    let dem = dir.path().join("dem.tif");
    let out = dir.path().join("fine.tif");
    write_dem(&dem, 2, 2, &[1.0, 2.0, 3.0, 4.0]);

    Assert::main_binary()
        .with_args(&[
            "raster",
            "resample",
            "--in",
            path_str(&dem),
            "--out",
            path_str(&out),
            "--scale",
            "2",
            "--method",
            "nearest",
        ])
        .stdout()
        .contains("4 rows x 4 cols (15 x 15)")
        .unwrap();
    let values = read_f32(&out);
    assert_eq!(16, values.len());
    assert_eq!(&[1.0, 1.0, 2.0, 2.0], &values[..4]);
    assert_eq!(&[3.0, 3.0, 4.0, 4.0], &values[12..]);

    Assert::main_binary()
        .with_args(&["raster", "info", "--in", path_str(&out)])
        .stdout()
        .contains("15 x 15")
        .stdout()
        .contains("444000, 1730000")
        .unwrap();
}

#[test]
fn resample_rejects_zero_scale() {
    let dir = tempfile::tempdir().unwrap();
    let dem = dir.path().join("dem.tif");
    let out = dir.path().join("out.tif");
    write_dem(&dem, 2, 2, &[1.0; 4]);

    Assert::main_binary()
        .with_args(&[
            "raster",
            "resample",
            "--in",
            path_str(&dem),
            "--out",
            path_str(&out),
            "--scale",
            "0",
        ])
        .stderr()
        .contains("scale factor must be a positive number")
        .fails()
        .unwrap();
    assert!(!out.exists());
}

#[test]
fn mosaics_adjacent_tiles() {
    let dir = tempfile::tempdir().unwrap();
    let tiles = dir.path().join("tiles");
    fs::create_dir(&tiles).unwrap();
    write_dem_at(&tiles.join("a.tif"), 2, 2, &[1.0, 2.0, 3.0, 4.0], 444000.0);
    write_dem_at(&tiles.join("b.tif"), 2, 2, &[5.0, 6.0, 7.0, 8.0], 444060.0);
    let out = dir.path().join("merged.tif");

    Assert::main_binary()
        .with_args(&["raster", "mosaic", "--dir", path_str(&tiles), "--out", path_str(&out)])
        .stdout()
        .contains("2 rows x 4 cols")
        .unwrap();
    assert_eq!(
        vec![1.0, 2.0, 5.0, 6.0, 3.0, 4.0, 7.0, 8.0],
        read_f32(&out)
    );
}

#[test]
fn mosaic_of_empty_directory_has_hint() {
    let dir = tempfile::tempdir().unwrap();
    Assert::main_binary()
        .with_args(&[
            "raster",
            "mosaic",
            "--dir",
            path_str(dir.path()),
            "--out",
            path_str(&dir.path().join("merged.tif")),
        ])
        .stderr()
        .contains("No GeoTIFF tiles")
        .stderr()
        .contains("Hint:")
        .fails()
        .unwrap();
}

#[test]
fn missing_raster() {
    Assert::main_binary()
        .with_args(&["raster", "slope", "--in", "nope.tif", "--out", "out.tif"])
        .stderr()
        .contains("File not found: nope.tif")
        .fails()
        .unwrap();
}

#[test]
fn adds_area_to_projected_square() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_geojson(
        dir.path(),
        "square.geojson",
        serde_json::json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"name": "plot"},
                "geometry": {"type": "Polygon", "coordinates": [[
                    [500000.0, 1700000.0], [501000.0, 1700000.0], [501000.0, 1701000.0],
                    [500000.0, 1701000.0], [500000.0, 1700000.0]
                ]]}
            }]
        }),
    );
    let out = dir.path().join("area.geojson");

    Assert::main_binary()
        .with_args(&[
            "vector",
            "area",
            "--in",
            path_str(&input),
            "--out",
            path_str(&out),
            "--from",
            "32635",
        ])
        .unwrap();
    let fc = read_geojson(&out);
    let area = fc["features"][0]["properties"]["area_m2"].as_f64().unwrap();
    assert!((area - 1_000_000.0).abs() < 1e-6);
    assert_eq!("plot", fc["features"][0]["properties"]["name"]);
}

#[test]
fn reprojects_points() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_geojson(
        dir.path(),
        "towns.geojson",
        serde_json::json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [33.0, 15.0]}},
                {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [32.5, 15.6]}}
            ]
        }),
    );
    let out = dir.path().join("utm.geojson");

    Assert::main_binary()
        .with_args(&[
            "vector",
            "reproject",
            "--in",
            path_str(&input),
            "--out",
            path_str(&out),
            "--to",
            "32636",
        ])
        .stdout()
        .contains("Reprojected 2 features")
        .unwrap();
    let fc = read_geojson(&out);
    assert_eq!(2, fc["features"].as_array().unwrap().len());
    let x = fc["features"][0]["geometry"]["coordinates"][0].as_f64().unwrap();
    assert!((x - 500_000.0).abs() < 0.01);
}

#[test]
fn rejects_unsupported_output_format() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_geojson(
        dir.path(),
        "pt.geojson",
        serde_json::json!({"type": "Point", "coordinates": [32.5, 15.6]}),
    );
    let out = dir.path().join("out.gpkg");

    Assert::main_binary()
        .with_args(&[
            "vector",
            "simplify",
            "--in",
            path_str(&input),
            "--out",
            path_str(&out),
            "--tolerance",
            "10",
        ])
        .stderr()
        .contains("Unsupported output format '.gpkg'")
        .fails()
        .unwrap();
}

#[test]
fn reports_dataset_summary() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_geojson(
        dir.path(),
        "mixed.geojson",
        serde_json::json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"name": "a"}, "geometry": {"type": "Point", "coordinates": [32.5, 15.6]}},
                {"type": "Feature", "properties": {"name": "b"}, "geometry": null}
            ]
        }),
    );

    Assert::main_binary()
        .with_args(&["report", "--in", path_str(&input)])
        .stdout()
        .contains("Point (1)")
        .stdout()
        .contains("EPSG:4326 (WGS 84)")
        .stdout()
        .contains("Invalid geometries")
        .unwrap();
}

#[test]
fn shows_version_info() {
    Assert::main_binary()
        .with_args(&["info"])
        .stdout()
        .contains("Shapefile (.shp)")
        .unwrap();
}

#[test]
fn simplifies_lon_lat_input_in_metres() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_geojson(
        dir.path(),
        "road.geojson",
        serde_json::json!({
            "type": "Feature",
            "properties": {"name": "road"},
            "geometry": {"type": "LineString", "coordinates": [
                [32.5, 15.6], [32.505, 15.60001], [32.51, 15.6]
            ]}
        }),
    );
    let out = dir.path().join("simple.geojson");

    Assert::main_binary()
        .with_args(&[
            "vector",
            "simplify",
            "--in",
            path_str(&input),
            "--out",
            path_str(&out),
            "--tolerance",
            "50",
        ])
        .stdout()
        .contains("Simplified 1 features")
        .unwrap();
    let fc = read_geojson(&out);
    let coords = fc["features"][0]["geometry"]["coordinates"].as_array().unwrap();
    assert_eq!(2, coords.len());
    let lon = coords[1][0].as_f64().unwrap();
    let lat = coords[1][1].as_f64().unwrap();
    assert!((lon - 32.51).abs() < 1e-7 && (lat - 15.6).abs() < 1e-7);
}

#[test]
fn area_keeps_lon_lat_geometry() {
    let dir = tempfile::tempdir().unwrap();
    let ring = serde_json::json!([[
        [32.5, 15.6], [32.51, 15.6], [32.51, 15.61], [32.5, 15.61], [32.5, 15.6]
    ]]);
    let input = write_geojson(
        dir.path(),
        "plot.geojson",
        serde_json::json!({
            "type": "Feature",
            "properties": {},
            "geometry": {"type": "Polygon", "coordinates": ring.clone()}
        }),
    );
    let out = dir.path().join("area.geojson");

    Assert::main_binary()
        .with_args(&["vector", "area", "--in", path_str(&input), "--out", path_str(&out)])
        .unwrap();
    let fc = read_geojson(&out);
    let area = fc["features"][0]["properties"]["area_m2"].as_f64().unwrap();
    assert!((area - 1_185_817.76).abs() < 1.0);
    assert_eq!(ring, fc["features"][0]["geometry"]["coordinates"]);
}
