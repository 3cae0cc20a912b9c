//! Slope and hillshade from an elevation grid.
//!
//! Gradients follow the usual finite-difference convention: central
//! differences inside the grid, one-sided first differences on the edges.
//! Rows run along the y axis and columns along the x axis.

use crate::sudageo::error::Error;
use ndarray::{Array2, ArrayView2, Axis, Zip};

/// Sun azimuth in compass degrees (northwest).
pub const DEFAULT_AZIMUTH: f64 = 315.0;
/// Sun altitude in degrees above the horizon.
pub const DEFAULT_ALTITUDE: f64 = 45.0;

fn check_inputs(grid: &ArrayView2<f64>, dx: f64, dy: f64) -> Result<(), Error> {
    if !(dx > 0.0) || !(dy > 0.0) {
        return Err(Error::InvalidInput(format!(
            "cell size must be positive, got dx={} dy={}",
            dx, dy
        )));
    }
    let (rows, cols) = grid.dim();
    if rows < 2 || cols < 2 {
        return Err(Error::InvalidInput(format!(
            "grid must have at least 2 rows and 2 columns, got {}x{}",
            rows, cols
        )));
    }
    Ok(())
}

fn axis_gradient(grid: &ArrayView2<f64>, axis: Axis, spacing: f64) -> Array2<f64> {
    let n = grid.len_of(axis);
    let mut out = Array2::<f64>::zeros(grid.raw_dim());
    for (src, mut dst) in grid.lanes(axis).into_iter().zip(out.lanes_mut(axis)) {
        dst[0] = (src[1] - src[0]) / spacing;
        dst[n - 1] = (src[n - 1] - src[n - 2]) / spacing;
        for i in 1..n - 1 {
            dst[i] = (src[i + 1] - src[i - 1]) / (2.0 * spacing);
        }
    }
    out
}

/// Returns `(grad_x, grad_y)`, the elevation change per unit distance along
/// columns and rows.
pub fn gradient(grid: &Array2<f64>, dx: f64, dy: f64) -> Result<(Array2<f64>, Array2<f64>), Error> {
    let view = grid.view();
    check_inputs(&view, dx, dy)?;
    let grad_y = axis_gradient(&view, Axis(0), dy);
    let grad_x = axis_gradient(&view, Axis(1), dx);
    Ok((grad_x, grad_y))
}

fn slope_rad(gx: f64, gy: f64) -> f64 {
    (gx * gx + gy * gy).sqrt().atan()
}

/// Slope in degrees, in [0, 90).
pub fn compute_slope(grid: &Array2<f64>, dx: f64, dy: f64) -> Result<Array2<f64>, Error> {
    let (grad_x, grad_y) = gradient(grid, dx, dy)?;
    Ok(Zip::from(&grad_x)
        .and(&grad_y)
        .map_collect(|&gx, &gy| slope_rad(gx, gy).to_degrees()))
}

/// Illumination in [0, 255] for a sun at `azimuth_deg` (compass) and
/// `altitude_deg` above the horizon.
pub fn compute_hillshade(
    grid: &Array2<f64>,
    dx: f64,
    dy: f64,
    azimuth_deg: f64,
    altitude_deg: f64,
) -> Result<Array2<f64>, Error> {
    let (grad_x, grad_y) = gradient(grid, dx, dy)?;

    // Compass azimuth to the math angle convention of atan2 below.
    let az_rad = (360.0 - azimuth_deg + 90.0).to_radians();
    let alt_rad = altitude_deg.to_radians();
    let (sin_alt, cos_alt) = alt_rad.sin_cos();

    Ok(Zip::from(&grad_x).and(&grad_y).map_collect(|&gx, &gy| {
        let slope = slope_rad(gx, gy);
        let aspect = (-gy).atan2(gx);
        let shade = sin_alt * slope.cos() + cos_alt * slope.sin() * (az_rad - aspect).cos();
        shade.clamp(0.0, 1.0) * 255.0
    }))
}
