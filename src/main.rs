#[macro_use]
extern crate serde_json;

mod sudageo;
use sudageo::commands;
use sudageo::error::Error;
use sudageo::{logging, text};

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use std::process;

fn run(matches: ArgMatches) -> Result<(), Error> {
    match matches.subcommand() {
        ("crs", Some(m)) => commands::crs::run(m),
        ("raster", Some(m)) => commands::raster::run(m),
        ("vector", Some(m)) => commands::vector::run(m),
        ("report", Some(m)) => commands::report::run(m),
        ("info", Some(_)) => commands::info::run(),
        _ => Err(Error::UnknownCommand),
    }
}

// -v may follow any subcommand.
fn verbose(matches: &ArgMatches) -> bool {
    matches.is_present("verbose") || matches.subcommand().1.map_or(false, verbose)
}

const VERSION: &'static str = env!("CARGO_PKG_VERSION");

fn input_arg<'a, 'b>(help: &'static str) -> Arg<'a, 'b> {
    Arg::with_name("in")
        .long("in")
        .short("i")
        .takes_value(true)
        .required(true)
        .help(help)
}

fn output_arg<'a, 'b>(help: &'static str) -> Arg<'a, 'b> {
    Arg::with_name("out")
        .long("out")
        .short("o")
        .takes_value(true)
        .required(true)
        .help(help)
}

fn from_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("from")
        .long("from")
        .takes_value(true)
        .help("EPSG code of the input coordinates [default: 4326]")
}

fn main() {
    let crs = SubCommand::with_name("crs")
        .about("Coordinate reference systems used around Sudan")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(SubCommand::with_name("list").about("List common Sudan CRS presets"))
        .subcommand(
            SubCommand::with_name("suggest")
                .about("Suggest projected CRSs for a longitude/latitude")
                .after_help(text::CRS_SUGGEST_AFTER_HELP)
                .arg(
                    Arg::with_name("lon")
                        .long("lon")
                        .takes_value(true)
                        .allow_hyphen_values(true)
                        .required(true)
                        .help("Longitude in degrees [-180, 180]"),
                )
                .arg(
                    Arg::with_name("lat")
                        .long("lat")
                        .takes_value(true)
                        .allow_hyphen_values(true)
                        .required(true)
                        .help("Latitude in degrees [-90, 90]"),
                )
                .arg(
                    Arg::with_name("json")
                        .long("json")
                        .help("Print suggestions as a JSON array"),
                ),
        )
        .subcommand(
            SubCommand::with_name("info")
                .about("Show the definition of an EPSG code")
                .after_help(text::CRS_INFO_AFTER_HELP)
                .arg(
                    Arg::with_name("epsg")
                        .help("EPSG code, e.g. 32636 or EPSG:32636")
                        .required(true)
                        .index(1),
                ),
        );

    let raster = SubCommand::with_name("raster")
        .about("Terrain derivatives and grid operations on GeoTIFF rasters")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("slope")
                .about("Slope in degrees")
                .arg(input_arg("Input DEM (GeoTIFF)"))
                .arg(output_arg("Output slope raster (GeoTIFF)")),
        )
        .subcommand(
            SubCommand::with_name("hillshade")
                .about("Shaded relief for a sun position")
                .after_help(text::HILLSHADE_AFTER_HELP)
                .arg(input_arg("Input DEM (GeoTIFF)"))
                .arg(output_arg("Output hillshade raster (GeoTIFF)"))
                .arg(
                    Arg::with_name("azimuth")
                        .long("azimuth")
                        .takes_value(true)
                        .allow_hyphen_values(true)
                        .help("Sun azimuth in degrees [default: 315]"),
                )
                .arg(
                    Arg::with_name("altitude")
                        .long("altitude")
                        .takes_value(true)
                        .allow_hyphen_values(true)
                        .help("Sun altitude in degrees [default: 45]"),
                ),
        )
        .subcommand(
            SubCommand::with_name("resample")
                .about("Change the resolution of a raster")
                .after_help(text::RESAMPLE_AFTER_HELP)
                .arg(input_arg("Input raster (GeoTIFF)"))
                .arg(output_arg("Output raster (GeoTIFF)"))
                .arg(
                    Arg::with_name("scale")
                        .long("scale")
                        .takes_value(true)
                        .allow_hyphen_values(true)
                        .required(true)
                        .help("Resolution factor, e.g. 2 or 0.5"),
                )
                .arg(
                    Arg::with_name("method")
                        .long("method")
                        .takes_value(true)
                        .possible_values(&["nearest", "bilinear", "cubic"])
                        .help("Interpolation [default: bilinear]"),
                ),
        )
        .subcommand(
            SubCommand::with_name("mosaic")
                .about("Merge a directory of GeoTIFF tiles")
                .after_help(text::MOSAIC_AFTER_HELP)
                .arg(
                    Arg::with_name("dir")
                        .long("dir")
                        .short("d")
                        .takes_value(true)
                        .required(true)
                        .help("Directory holding the tiles"),
                )
                .arg(output_arg("Output raster (GeoTIFF)")),
        )
        .subcommand(
            SubCommand::with_name("info")
                .about("Size, cell size and value range of a raster")
                .arg(input_arg("Input raster (GeoTIFF)")),
        );

    let vector = SubCommand::with_name("vector")
        .about("Vector dataset operations")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .after_help(text::VECTOR_AFTER_HELP)
        .subcommand(
            SubCommand::with_name("reproject")
                .about("Transform coordinates to another CRS")
                .arg(input_arg("Input vector file"))
                .arg(output_arg("Output GeoJSON file"))
                .arg(
                    Arg::with_name("to")
                        .long("to")
                        .takes_value(true)
                        .required(true)
                        .help("Target EPSG code"),
                )
                .arg(from_arg()),
        )
        .subcommand(
            SubCommand::with_name("simplify")
                .about("Simplify geometries")
                .after_help(text::SIMPLIFY_AFTER_HELP)
                .arg(input_arg("Input vector file"))
                .arg(output_arg("Output GeoJSON file"))
                .arg(
                    Arg::with_name("tolerance")
                        .long("tolerance")
                        .short("t")
                        .takes_value(true)
                        .allow_hyphen_values(true)
                        .required(true)
                        .help("Tolerance in metres"),
                )
                .arg(from_arg()),
        )
        .subcommand(
            SubCommand::with_name("area")
                .about("Add an area attribute in square metres")
                .after_help(text::AREA_AFTER_HELP)
                .arg(input_arg("Input vector file"))
                .arg(output_arg("Output GeoJSON file"))
                .arg(
                    Arg::with_name("field")
                        .long("field")
                        .takes_value(true)
                        .help("Name of the area attribute [default: area_m2]"),
                )
                .arg(from_arg()),
        );

    let report = SubCommand::with_name("report")
        .about("Summarize a vector dataset")
        .arg(input_arg("Input vector file"))
        .arg(from_arg());

    let matches = App::new("sudageo")
        .version(VERSION)
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .about(text::MAIN_ABOUT)
        .after_help(text::MAIN_AFTER_HELP)
        .arg(
            Arg::with_name("verbose")
                .long("verbose")
                .short("v")
                .global(true)
                .help("Log debug output to STDERR"),
        )
        .subcommand(crs)
        .subcommand(raster)
        .subcommand(vector)
        .subcommand(report)
        .subcommand(SubCommand::with_name("info").about("Version and supported formats"))
        .get_matches();

    logging::init(verbose(&matches));

    if let Err(e) = run(matches) {
        eprintln!("Application error: {}", e);
        process::exit(1);
    }
}
