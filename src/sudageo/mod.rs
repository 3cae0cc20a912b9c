pub mod area;
pub mod bbox;
pub mod commands;
pub mod epsg;
pub mod error;
pub mod features;
pub mod logging;
pub mod mosaic;
pub mod presets;
pub mod raster;
pub mod reproject;
pub mod resample;
pub mod shp;
pub mod simplify;
pub mod table;
pub mod terrain;
pub mod text;
pub mod utm;
