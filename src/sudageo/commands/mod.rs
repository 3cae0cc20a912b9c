use crate::sudageo::error::Error;
use clap::ArgMatches;
use std::path::Path;
use std::str::FromStr;

pub mod crs;
pub mod info;
pub mod raster;
pub mod report;
pub mod vector;

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, Error> {
    matches
        .value_of(name)
        .ok_or_else(|| Error::MissingArgument(format!("--{}", name)))
}

fn path_arg<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a Path, Error> {
    required(matches, name).map(Path::new)
}

fn number_arg(matches: &ArgMatches, name: &str) -> Result<f64, Error> {
    let raw = required(matches, name)?;
    f64::from_str(raw.trim()).map_err(|_| {
        Error::InvalidNumberFormat(format!("--{} {:?} must be a number, e.g. 32.5", name, raw))
    })
}

/// Like `number_arg`, falling back to `default` when the option is absent.
fn number_or(matches: &ArgMatches, name: &str, default: f64) -> Result<f64, Error> {
    if matches.is_present(name) {
        number_arg(matches, name)
    } else {
        Ok(default)
    }
}
