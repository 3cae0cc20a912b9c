pub const MAIN_ABOUT: &str = "sudageo - geomatics utility belt for Sudan and the surrounding region";

pub const MAIN_AFTER_HELP: &str = r#"
Logging goes to STDERR. Set SUDAGEO_LOG to an env-filter directive
(e.g. SUDAGEO_LOG=sudageo=trace) to override the default level.
"#;

pub const CRS_SUGGEST_AFTER_HELP: &str = r#"
Suggest projected coordinate systems for a longitude/latitude in degrees.

The WGS 84 UTM zone containing the point always comes first. For points
north of the equator in zones 35-37 the legacy Adindan UTM zone follows.

Example:

$ sudageo crs suggest --lon 32.5 --lat 15.6 --json
  [{"datum":"WGS 84","epsg":32636,"hemisphere":"N","name":"WGS 84 / UTM zone 36N","zone":36},
   {"datum":"Adindan","epsg":20136,"hemisphere":"N","name":"Adindan / UTM zone 36N","zone":36}]

Negative coordinates are accepted as-is: --lon -3.2 --lat -12.5
"#;

pub const CRS_INFO_AFTER_HELP: &str = r#"
Resolve an EPSG code (e.g. 32636 or EPSG:32636) and print its PROJ definition.
"#;

pub const HILLSHADE_AFTER_HELP: &str = r#"
Azimuth is the compass direction of the sun in degrees [0, 360],
altitude its angle above the horizon in degrees [0, 90].
Output cells range from 0 (unlit) to 255 (fully lit).
"#;

pub const VECTOR_AFTER_HELP: &str = r#"
Input may be GeoJSON (.geojson, .json) or an ESRI Shapefile (.shp).
Output is written as a GeoJSON FeatureCollection.

Coordinates are assumed to be WGS 84 longitude/latitude unless --from
names another EPSG code.
"#;

pub const SIMPLIFY_AFTER_HELP: &str = r#"
Douglas-Peucker simplification. The tolerance is in metres; geographic
input is projected to its UTM zone for the operation and back afterwards.
"#;

pub const AREA_AFTER_HELP: &str = r#"
Adds the planar area of each feature in square metres. Geographic input
is measured in its estimated UTM zone. Features without a geometry get null.
"#;

pub const RESAMPLE_AFTER_HELP: &str = r#"
Resize a raster by a scale factor while keeping its extent:
2 doubles the resolution, 0.5 halves it.

Methods: nearest, bilinear (default), cubic.

Example:

$ sudageo raster resample --in dem_30m.tif --out dem_15m.tif --scale 2
"#;

pub const MOSAIC_AFTER_HELP: &str = r#"
Merge every .tif/.tiff file in a directory into one raster. Tiles must
share a cell size and coordinate system. Where tiles overlap, the first
in name order wins; cells no tile covers are written as NaN.
"#;
