//! Resizing a raster by a scale factor.
//!
//! Output cells are sampled at their centres mapped back into the source
//! grid, so the raster keeps its extent and only the cell size changes.

use crate::sudageo::error::Error;
use crate::sudageo::raster::{Dem, GeoTags};
use ndarray::Array2;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Nearest,
    Bilinear,
    Cubic,
}

pub const DEFAULT_METHOD: Method = Method::Bilinear;

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Method, Error> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(Method::Nearest),
            "bilinear" => Ok(Method::Bilinear),
            "cubic" => Ok(Method::Cubic),
            _ => Err(Error::InvalidInput(format!(
                "unknown resampling method '{}', use nearest, bilinear or cubic",
                s
            ))),
        }
    }
}

fn clamp_index(i: i64, len: usize) -> usize {
    i.max(0).min(len as i64 - 1) as usize
}

fn nearest(grid: &Array2<f64>, x: f64, y: f64) -> f64 {
    let (rows, cols) = grid.dim();
    grid[[
        clamp_index(y.round() as i64, rows),
        clamp_index(x.round() as i64, cols),
    ]]
}

fn bilinear(grid: &Array2<f64>, x: f64, y: f64) -> f64 {
    let (rows, cols) = grid.dim();
    let x0 = clamp_index(x.floor() as i64, cols);
    let y0 = clamp_index(y.floor() as i64, rows);
    let x1 = (x0 + 1).min(cols - 1);
    let y1 = (y0 + 1).min(rows - 1);
    let xf = x - x0 as f64;
    let yf = y - y0 as f64;

    let top = grid[[y0, x0]] * (1.0 - xf) + grid[[y0, x1]] * xf;
    let bottom = grid[[y1, x0]] * (1.0 - xf) + grid[[y1, x1]] * xf;
    top * (1.0 - yf) + bottom * yf
}

/// Catmull-Rom spline through p1 and p2.
fn cubic_1d(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let a = -0.5 * p0 + 1.5 * p1 - 1.5 * p2 + 0.5 * p3;
    let b = p0 - 2.5 * p1 + 2.0 * p2 - 0.5 * p3;
    let c = -0.5 * p0 + 0.5 * p2;
    ((a * t + b) * t + c) * t + p1
}

fn cubic(grid: &Array2<f64>, x: f64, y: f64) -> f64 {
    let (rows, cols) = grid.dim();
    let xi = x.floor() as i64;
    let yi = y.floor() as i64;
    let xf = x - xi as f64;
    let yf = y - yi as f64;

    let mut row_values = [0.0; 4];
    for (j, slot) in row_values.iter_mut().enumerate() {
        let r = clamp_index(yi + j as i64 - 1, rows);
        let mut p = [0.0; 4];
        for (i, v) in p.iter_mut().enumerate() {
            *v = grid[[r, clamp_index(xi + i as i64 - 1, cols)]];
        }
        if p.iter().any(|v| v.is_nan()) {
            // Keep nodata holes from spreading over the whole 4x4 window.
            return bilinear(grid, x, y);
        }
        *slot = cubic_1d(p[0], p[1], p[2], p[3], xf);
    }
    cubic_1d(row_values[0], row_values[1], row_values[2], row_values[3], yf)
}

pub fn resample_grid(grid: &Array2<f64>, rows: usize, cols: usize, method: Method) -> Array2<f64> {
    let (src_rows, src_cols) = grid.dim();
    let fx = src_cols as f64 / cols as f64;
    let fy = src_rows as f64 / rows as f64;
    let max_x = (src_cols - 1) as f64;
    let max_y = (src_rows - 1) as f64;

    Array2::from_shape_fn((rows, cols), |(r, c)| {
        let x = ((c as f64 + 0.5) * fx - 0.5).max(0.0).min(max_x);
        let y = ((r as f64 + 0.5) * fy - 0.5).max(0.0).min(max_y);
        match method {
            Method::Nearest => nearest(grid, x, y),
            Method::Bilinear => bilinear(grid, x, y),
            Method::Cubic => cubic(grid, x, y),
        }
    })
}

/// Georeferencing for the same extent with cells `fx` by `fy` times larger.
fn scale_tags(tags: &GeoTags, fx: f64, fy: f64) -> GeoTags {
    let mut out = tags.clone();
    if let Some(ref mut scale) = out.pixel_scale {
        if scale.len() >= 2 {
            scale[0] *= fx;
            scale[1] *= fy;
        }
    }
    if let Some(ref mut tiepoints) = out.tiepoints {
        for tp in tiepoints.chunks_mut(6).filter(|tp| tp.len() == 6) {
            tp[0] /= fx;
            tp[1] /= fy;
        }
    }
    if let Some(ref mut m) = out.transformation {
        if m.len() >= 16 {
            m[0] *= fx;
            m[4] *= fx;
            m[1] *= fy;
            m[5] *= fy;
        }
    }
    out
}

/// A scale factor of 2 doubles the resolution, 0.5 halves it.
pub fn resample(dem: &Dem, scale: f64, method: Method) -> Result<Dem, Error> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "scale factor must be a positive number, got {}",
            scale
        )));
    }
    let rows = (dem.rows() as f64 * scale).floor() as usize;
    let cols = (dem.cols() as f64 * scale).floor() as usize;
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidInput(format!(
            "scale factor {} shrinks a {}x{} raster to nothing",
            scale,
            dem.rows(),
            dem.cols()
        )));
    }

    let fx = dem.cols() as f64 / cols as f64;
    let fy = dem.rows() as f64 / rows as f64;
    debug!(
        "Resampling {}x{} to {}x{} with {:?}",
        dem.rows(),
        dem.cols(),
        rows,
        cols,
        method
    );
    Ok(Dem {
        grid: resample_grid(&dem.grid, rows, cols, method),
        dx: dem.dx * fx,
        dy: dem.dy * fy,
        tags: scale_tags(&dem.tags, fx, fy),
        nodata: dem.nodata,
    })
}
