use crate::sudageo::{error::Error, presets};
use once_cell::sync::Lazy;
use proj4rs::Proj;
use regex::Regex;
use std::convert::TryFrom;
use std::fmt;
use tracing::debug;

static EPSG_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*(?:epsg:)?(\d+)\s*$").unwrap());

pub const PRESET_HINT: &str = "Use 'sudageo crs list' to see common Sudan CRS presets.";

/// A resolved coordinate reference system, ready for transformation.
pub struct CrsHandle {
    epsg: u32,
    proj4: &'static str,
    proj: Proj,
}

impl fmt::Debug for CrsHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrsHandle")
            .field("epsg", &self.epsg)
            .field("proj4", &self.proj4)
            .finish()
    }
}

impl CrsHandle {
    pub fn epsg(&self) -> u32 {
        self.epsg
    }

    pub fn proj4(&self) -> &'static str {
        self.proj4
    }

    pub fn proj(&self) -> &Proj {
        &self.proj
    }

    pub fn is_geographic(&self) -> bool {
        self.proj4.contains("+proj=longlat")
    }

    pub fn name(&self) -> Option<&'static str> {
        presets::get_preset(self.epsg).map(|p| p.name)
    }
}

impl fmt::Display for CrsHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "EPSG:{} ({})", self.epsg, name),
            None => write!(f, "EPSG:{}", self.epsg),
        }
    }
}

fn invalid(code: impl fmt::Display) -> Error {
    Error::crs(format!("Invalid EPSG code: {}", code), PRESET_HINT)
}

/// Accepts `32636` or `EPSG:32636`.
pub fn parse_epsg(text: &str) -> Result<u32, Error> {
    EPSG_CODE
        .captures(text)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .ok_or_else(|| invalid(text.trim()))
}

pub fn validate_epsg(code: u32) -> Result<CrsHandle, Error> {
    let short = u16::try_from(code).map_err(|_| invalid(code))?;
    let def = crs_definitions::from_code(short).ok_or_else(|| invalid(code))?;
    let proj = Proj::from_proj_string(def.proj4).map_err(|e| {
        debug!("proj4rs rejected EPSG:{} ({}): {:?}", code, def.proj4, e);
        invalid(code)
    })?;
    debug!("Resolved EPSG:{} to '{}'", code, def.proj4);
    Ok(CrsHandle {
        epsg: code,
        proj4: def.proj4,
        proj,
    })
}

pub fn resolve(text: &str) -> Result<CrsHandle, Error> {
    validate_epsg(parse_epsg(text)?)
}
