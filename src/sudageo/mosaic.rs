//! Merging adjacent GeoTIFF tiles into one raster.

use crate::sudageo::error::Error;
use crate::sudageo::raster::{self, Dem, GeoTags};
use ndarray::Array2;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const TILE_EXTENSIONS: [&str; 2] = ["tif", "tiff"];

/// GeoTIFF files directly inside `dir`, in name order.
pub fn tile_paths(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    if !dir.is_dir() {
        return Err(Error::file_format(
            format!("Not a directory: {}", dir.display()),
            None,
        ));
    }
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_tile = path
            .extension()
            .and_then(|e| e.to_str())
            .map_or(false, |e| {
                TILE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str())
            });
        if path.is_file() && is_tile {
            paths.push(path);
        }
    }
    if paths.is_empty() {
        return Err(Error::file_format(
            format!("No GeoTIFF tiles in {}", dir.display()),
            Some("Tiles are picked up by their .tif or .tiff extension.".to_string()),
        ));
    }
    paths.sort();
    Ok(paths)
}

fn is_rotated(tags: &GeoTags) -> bool {
    tags.transformation
        .as_ref()
        .filter(|m| m.len() >= 16)
        .map_or(false, |m| m[1] != 0.0 || m[4] != 0.0)
}

fn same_size(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs())
}

struct Placed<'a> {
    tile: &'a Dem,
    x: f64,
    y: f64,
}

fn place<'a>(tile: &'a Dem, first: &Dem) -> Result<Placed<'a>, Error> {
    if is_rotated(&tile.tags) {
        return Err(Error::file_format(
            "Rotated rasters cannot be mosaicked",
            Some("Warp the tiles to a north-up grid first.".to_string()),
        ));
    }
    if !same_size(tile.dx, first.dx) || !same_size(tile.dy, first.dy) {
        return Err(Error::file_format(
            format!(
                "Tiles have different cell sizes ({} x {} and {} x {})",
                first.dx, first.dy, tile.dx, tile.dy
            ),
            Some("Bring the tiles to one resolution with 'sudageo raster resample'.".to_string()),
        ));
    }
    if tile.tags.geo_keys != first.tags.geo_keys {
        return Err(Error::file_format(
            "Tiles use different coordinate reference systems",
            None,
        ));
    }
    let (x, y) = tile.tags.origin().ok_or_else(|| {
        Error::file_format(
            "Tile has no tie point or transformation",
            Some("Every tile needs its position in the CRS.".to_string()),
        )
    })?;
    Ok(Placed { tile, x, y })
}

/// Tiles earlier in the slice win where they overlap; cells no tile covers are NaN.
pub fn mosaic(tiles: &[Dem]) -> Result<Dem, Error> {
    let first = tiles
        .first()
        .ok_or_else(|| Error::InvalidInput("no tiles to mosaic".to_string()))?;
    let placed = tiles
        .iter()
        .map(|t| place(t, first))
        .collect::<Result<Vec<_>, Error>>()?;

    let (dx, dy) = (first.dx, first.dy);
    let min_x = placed.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_y = placed.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    let max_x = placed
        .iter()
        .map(|p| p.x + p.tile.cols() as f64 * dx)
        .fold(f64::NEG_INFINITY, f64::max);
    let min_y = placed
        .iter()
        .map(|p| p.y - p.tile.rows() as f64 * dy)
        .fold(f64::INFINITY, f64::min);

    let rows = ((max_y - min_y) / dy).round() as usize;
    let cols = ((max_x - min_x) / dx).round() as usize;
    debug!(
        "Mosaic of {} tiles covers {}x{} cells from ({}, {})",
        tiles.len(),
        rows,
        cols,
        min_x,
        max_y
    );

    let mut grid = Array2::from_elem((rows, cols), std::f64::NAN);
    for p in &placed {
        let row0 = ((max_y - p.y) / dy).round() as usize;
        let col0 = ((p.x - min_x) / dx).round() as usize;
        for ((r, c), &v) in p.tile.grid.indexed_iter() {
            if v.is_nan() {
                continue;
            }
            if let Some(cell) = grid.get_mut([row0 + r, col0 + c]) {
                if cell.is_nan() {
                    *cell = v;
                }
            }
        }
    }

    let tags = GeoTags {
        pixel_scale: Some(vec![dx, dy, 0.0]),
        tiepoints: Some(vec![0.0, 0.0, 0.0, min_x, max_y, 0.0]),
        transformation: None,
        ..first.tags.clone()
    };
    Ok(Dem {
        grid,
        dx,
        dy,
        tags,
        nodata: Some(std::f64::NAN),
    })
}

/// Reads every tile in `dir` and writes their mosaic to `out`.
pub fn mosaic_dir(dir: &Path, out: &Path) -> Result<Dem, Error> {
    let tiles = tile_paths(dir)?
        .iter()
        .filter(|p| p.as_path() != out)
        .map(|p| raster::read(p))
        .collect::<Result<Vec<_>, Error>>()?;
    info!("Mosaicking {} tiles from {}", tiles.len(), dir.display());
    let merged = mosaic(&tiles)?;
    raster::write_f32(out, &merged.grid, &merged)?;
    Ok(merged)
}
