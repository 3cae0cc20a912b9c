//! Single-band GeoTIFF elevation rasters.
//!
//! Only the georeferencing tags are interpreted; everything else about the
//! source is dropped when a derived grid is written back.

use crate::sudageo::error::Error;
use ndarray::Array2;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::colortype::Gray32Float;
use tiff::encoder::TiffEncoder;
use tiff::tags::Tag;
use tiff::ColorType;
use tracing::{debug, info, warn};

const MODEL_PIXEL_SCALE: u16 = 33550;
const MODEL_TIEPOINT: u16 = 33922;
const MODEL_TRANSFORMATION: u16 = 34264;
const GEO_KEY_DIRECTORY: u16 = 34735;
const GEO_DOUBLE_PARAMS: u16 = 34736;
const GEO_ASCII_PARAMS: u16 = 34737;
const GDAL_NODATA: u16 = 42113;

/// Georeferencing carried from a source raster to its derivatives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoTags {
    pub pixel_scale: Option<Vec<f64>>,
    pub tiepoints: Option<Vec<f64>>,
    pub transformation: Option<Vec<f64>>,
    pub geo_keys: Option<Vec<u16>>,
    pub geo_doubles: Option<Vec<f64>>,
    pub geo_ascii: Option<String>,
}

impl GeoTags {
    /// Cell width and height in CRS units, always positive.
    pub fn cell_size(&self) -> Option<(f64, f64)> {
        if let Some(scale) = self.pixel_scale.as_ref().filter(|s| s.len() >= 2) {
            return Some((scale[0].abs(), scale[1].abs()));
        }
        self.transformation
            .as_ref()
            .filter(|m| m.len() >= 16)
            .map(|m| (m[0].abs(), m[5].abs()))
    }

    /// Upper-left corner of the raster, from the first tie point.
    pub fn origin(&self) -> Option<(f64, f64)> {
        match (&self.tiepoints, &self.pixel_scale) {
            (Some(tp), Some(scale)) if tp.len() >= 6 && scale.len() >= 2 => {
                Some((tp[3] - tp[0] * scale[0], tp[4] + tp[1] * scale[1]))
            }
            _ => self
                .transformation
                .as_ref()
                .filter(|m| m.len() >= 16)
                .map(|m| (m[3], m[7])),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dem {
    pub grid: Array2<f64>,
    pub dx: f64,
    pub dy: f64,
    pub tags: GeoTags,
    /// Sentinel value declared by the source; those cells are NaN in `grid`.
    pub nodata: Option<f64>,
}

impl Dem {
    pub fn rows(&self) -> usize {
        self.grid.nrows()
    }

    pub fn cols(&self) -> usize {
        self.grid.ncols()
    }

    pub fn nodata_count(&self) -> usize {
        self.grid.iter().filter(|v| v.is_nan()).count()
    }

    /// Minimum and maximum of the valid cells.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.grid
            .iter()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

fn f64_tag<R>(decoder: &mut Decoder<R>, id: u16) -> Result<Option<Vec<f64>>, Error>
where
    R: std::io::Read + std::io::Seek,
{
    match decoder.find_tag(Tag::from_u16_exhaustive(id))? {
        Some(value) => Ok(Some(value.into_f64_vec()?)),
        None => Ok(None),
    }
}

fn read_tags<R>(decoder: &mut Decoder<R>) -> Result<(GeoTags, Option<String>), Error>
where
    R: std::io::Read + std::io::Seek,
{
    let geo_keys = match decoder.find_tag(Tag::from_u16_exhaustive(GEO_KEY_DIRECTORY))? {
        Some(value) => Some(value.into_u16_vec()?),
        None => None,
    };
    let geo_ascii = match decoder.find_tag(Tag::from_u16_exhaustive(GEO_ASCII_PARAMS))? {
        Some(value) => Some(value.into_string()?),
        None => None,
    };
    let nodata = match decoder.find_tag(Tag::from_u16_exhaustive(GDAL_NODATA))? {
        Some(value) => Some(value.into_string()?),
        None => None,
    };
    let tags = GeoTags {
        pixel_scale: f64_tag(decoder, MODEL_PIXEL_SCALE)?,
        tiepoints: f64_tag(decoder, MODEL_TIEPOINT)?,
        transformation: f64_tag(decoder, MODEL_TRANSFORMATION)?,
        geo_keys,
        geo_doubles: f64_tag(decoder, GEO_DOUBLE_PARAMS)?,
        geo_ascii,
    };
    Ok((tags, nodata))
}

fn to_f64(result: DecodingResult) -> Result<Vec<f64>, Error> {
    #[allow(unreachable_patterns)]
    let data = match result {
        DecodingResult::U8(buf) => buf.into_iter().map(f64::from).collect(),
        DecodingResult::U16(buf) => buf.into_iter().map(f64::from).collect(),
        DecodingResult::U32(buf) => buf.into_iter().map(f64::from).collect(),
        DecodingResult::U64(buf) => buf.into_iter().map(|v| v as f64).collect(),
        DecodingResult::I8(buf) => buf.into_iter().map(f64::from).collect(),
        DecodingResult::I16(buf) => buf.into_iter().map(f64::from).collect(),
        DecodingResult::I32(buf) => buf.into_iter().map(f64::from).collect(),
        DecodingResult::I64(buf) => buf.into_iter().map(|v| v as f64).collect(),
        DecodingResult::F32(buf) => buf.into_iter().map(f64::from).collect(),
        DecodingResult::F64(buf) => buf,
        _ => {
            return Err(Error::file_format(
                "Unsupported GeoTIFF sample format",
                Some("Convert the raster to an integer or floating point band.".to_string()),
            ))
        }
    };
    Ok(data)
}

fn parse_nodata(raw: &str) -> Option<f64> {
    // GDAL writes the value NUL-terminated.
    let text = raw.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    match text.parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring unparseable GDAL_NODATA value '{}'", text);
            None
        }
    }
}

pub fn read(path: &Path) -> Result<Dem, Error> {
    if !path.exists() {
        return Err(Error::file_format(
            format!("File not found: {}", path.display()),
            None,
        ));
    }
    let file = File::open(path)?;
    let mut decoder = Decoder::new(BufReader::new(file))?;

    match decoder.colortype()? {
        ColorType::Gray(_) => {}
        other => {
            return Err(Error::file_format(
                format!("{} is not a single-band raster ({:?})", path.display(), other),
                Some("Extract the elevation band into its own GeoTIFF first.".to_string()),
            ))
        }
    }

    let (width, height) = decoder.dimensions()?;
    let (tags, nodata_raw) = read_tags(&mut decoder)?;
    let (dx, dy) = tags.cell_size().ok_or_else(|| {
        Error::file_format(
            format!("{} has no georeferencing", path.display()),
            Some("The raster needs a ModelPixelScale or ModelTransformation tag.".to_string()),
        )
    })?;

    let data = to_f64(decoder.read_image()?)?;
    let mut grid = Array2::from_shape_vec((height as usize, width as usize), data)?;

    let nodata = nodata_raw.as_deref().and_then(parse_nodata);
    if let Some(nd) = nodata {
        if !nd.is_nan() {
            grid.mapv_inplace(|v| if v == nd { std::f64::NAN } else { v });
        }
    }

    debug!(
        "Read {}x{} raster from {}, cell size {} x {}, nodata {:?}",
        height,
        width,
        path.display(),
        dx,
        dy,
        nodata
    );
    Ok(Dem {
        grid,
        dx,
        dy,
        tags,
        nodata,
    })
}

/// Writes `grid` as a 32-bit float GeoTIFF georeferenced like `source`.
pub fn write_f32(path: &Path, grid: &Array2<f64>, source: &Dem) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let (rows, cols) = grid.dim();
    let data: Vec<f32> = grid.iter().map(|&v| v as f32).collect();

    let mut encoder = TiffEncoder::new(File::create(path)?)?;
    let mut image = encoder.new_image::<Gray32Float>(cols as u32, rows as u32)?;
    {
        let dir = image.encoder();
        let tags = &source.tags;
        if let Some(ref v) = tags.pixel_scale {
            dir.write_tag(Tag::Unknown(MODEL_PIXEL_SCALE), &v[..])?;
        }
        if let Some(ref v) = tags.tiepoints {
            dir.write_tag(Tag::Unknown(MODEL_TIEPOINT), &v[..])?;
        }
        if let Some(ref v) = tags.transformation {
            dir.write_tag(Tag::Unknown(MODEL_TRANSFORMATION), &v[..])?;
        }
        if let Some(ref v) = tags.geo_keys {
            dir.write_tag(Tag::Unknown(GEO_KEY_DIRECTORY), &v[..])?;
        }
        if let Some(ref v) = tags.geo_doubles {
            dir.write_tag(Tag::Unknown(GEO_DOUBLE_PARAMS), &v[..])?;
        }
        if let Some(ref s) = tags.geo_ascii {
            dir.write_tag(Tag::Unknown(GEO_ASCII_PARAMS), s.as_str())?;
        }
        if source.nodata.is_some() {
            dir.write_tag(Tag::Unknown(GDAL_NODATA), "nan")?;
        }
    }
    image.write_data(&data)?;
    info!("Wrote {}x{} raster to {}", rows, cols, path.display());
    Ok(())
}
