use super::{number_arg, required};
use crate::sudageo::{epsg, error::Error, presets, table, utm};
use clap::ArgMatches;

fn list() -> Result<(), Error> {
    println!("{}", table::presets(presets::list_presets()));
    Ok(())
}

fn suggest(matches: &ArgMatches) -> Result<(), Error> {
    let lon = number_arg(matches, "lon")?;
    let lat = number_arg(matches, "lat")?;
    let suggestions = utm::suggest_utm_zone(lon, lat)?;

    if matches.is_present("json") {
        let values: Vec<serde_json::Value> = suggestions.iter().map(|s| s.to_json()).collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
    } else {
        println!("Suggested CRS for ({}, {}):", lon, lat);
        println!("{}", table::suggestions(&suggestions));
    }
    Ok(())
}

fn info(matches: &ArgMatches) -> Result<(), Error> {
    let crs = epsg::resolve(required(matches, "epsg")?)?;
    let kind = if crs.is_geographic() {
        "geographic"
    } else {
        "projected"
    };
    let mut rows = vec![("EPSG", crs.epsg().to_string())];
    if let Some(preset) = presets::get_preset(crs.epsg()) {
        rows.push(("Name", preset.name.to_string()));
        rows.push(("Region", preset.region.to_string()));
    }
    rows.push(("Type", kind.to_string()));
    rows.push(("PROJ", crs.proj4().to_string()));
    println!("{}", table::key_values(&crs.to_string(), &rows));
    Ok(())
}

pub fn run(matches: &ArgMatches) -> Result<(), Error> {
    match matches.subcommand() {
        ("list", Some(_)) => list(),
        ("suggest", Some(m)) => suggest(m),
        ("info", Some(m)) => info(m),
        _ => Err(Error::UnknownCommand),
    }
}
