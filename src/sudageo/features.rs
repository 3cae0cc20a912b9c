use crate::sudageo::{error::Error, shp};
use geojson::{Feature, FeatureCollection, GeoJson};
use std::fs;
use std::path::Path;
use tracing::info;

const READ_FORMATS: &str = "GeoJSON (.geojson, .json), Shapefile (.shp)";
const WRITE_FORMATS: &str = "GeoJSON (.geojson, .json)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorFormat {
    GeoJson,
    Shapefile,
}

impl VectorFormat {
    pub fn from_path(path: &Path) -> Option<VectorFormat> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "geojson" | "json" => Some(VectorFormat::GeoJson),
            "shp" => Some(VectorFormat::Shapefile),
            _ => None,
        }
    }
}

fn suffix(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}

pub fn parse_features(raw: &str) -> Result<Vec<Feature>, Error> {
    let gj: GeoJson = raw.parse()?;
    Ok(match gj {
        GeoJson::Geometry(geom) => vec![Feature {
            bbox: None,
            geometry: Some(geom),
            id: None,
            properties: Some(serde_json::Map::new()),
            foreign_members: None,
        }],
        GeoJson::Feature(f) => vec![f],
        GeoJson::FeatureCollection(fc) => fc.features,
    })
}

// test helper fn
#[cfg(test)]
pub fn fvec(gj: &str) -> Vec<Feature> {
    parse_features(gj).expect("invalid geojson")
}

pub fn read(path: &Path) -> Result<Vec<Feature>, Error> {
    if !path.exists() {
        return Err(Error::file_format(
            format!("File not found: {}", path.display()),
            None,
        ));
    }
    let features = match VectorFormat::from_path(path) {
        Some(VectorFormat::GeoJson) => parse_features(&fs::read_to_string(path)?)?,
        Some(VectorFormat::Shapefile) => shp::read(path)?,
        None => {
            return Err(Error::file_format(
                format!("Cannot read vector file: {}", path.display()),
                Some(format!("Supported formats: {}.", READ_FORMATS)),
            ))
        }
    };
    info!("Read {} features from {}", features.len(), path.display());
    Ok(features)
}

pub fn write(features: Vec<Feature>, path: &Path) -> Result<(), Error> {
    if VectorFormat::from_path(path) != Some(VectorFormat::GeoJson) {
        return Err(Error::file_format(
            format!("Unsupported output format '{}'", suffix(path)),
            Some(format!("Use one of: {}.", WRITE_FORMATS)),
        ));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let count = features.len();
    let fc = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };
    fs::write(path, GeoJson::from(fc).to_string())?;
    info!("Wrote {} features to {}", count, path.display());
    Ok(())
}
