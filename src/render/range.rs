//! Discover the world range visible inside the frame.
//!
//! Samples a pixel grid, irons out 360° jumps in angular coordinates, then
//! picks whichever of the raw, `[0, 360)` and `(-180, 180]` representations is
//! tightest.

use glam::dvec2;

use crate::coords::CoordinateType;
use crate::coords::defaults::RANGE_SAMPLES;
use crate::errors::AxisError;
use crate::locate::VisibleRange;
use crate::render::types::{PixelRect, WorldTransform};

/// Share of the span added on each side of angular ranges
const PADDING: f64 = 0.1;

/// Longitude spans wider than this are shown as the whole circle
const WHOLE_CIRCLE_SPAN: f64 = 300.0;

/// Visible range of the first two world coordinates.
pub fn find_coordinate_range<T: WorldTransform + ?Sized>(
    transform: &T,
    frame: &PixelRect,
    types: [CoordinateType; 2],
) -> Result<[VisibleRange; 2], AxisError> {
    let cols = RANGE_SAMPLES + 1;
    let size = frame.size();
    let mut world = [Vec::with_capacity(cols * cols), Vec::with_capacity(cols * cols)];
    for iy in 0..cols {
        for ix in 0..cols {
            let t = dvec2(ix as f64, iy as f64) / RANGE_SAMPLES as f64;
            let pixel = frame.min + size * t;
            let w = transform.pixel_to_world(pixel).unwrap_or(dvec2(f64::NAN, f64::NAN));
            world[0].push(w.x);
            world[1].push(w.y);
        }
    }

    let [x, y] = world;
    Ok([axis_range(x, cols, types[0])?, axis_range(y, cols, types[1])?])
}

fn axis_range(mut values: Vec<f64>, cols: usize, coord_type: CoordinateType) -> Result<VisibleRange, AxisError> {
    if coord_type.is_angular() {
        iron(&mut values, cols);
    }
    let (mut min, mut max) = extent(values.iter().copied()).ok_or(AxisError::EmptyRange {
        min: f64::NAN,
        max: f64::NAN,
    })?;

    if coord_type.is_angular() {
        if let Some((lo, hi)) = extent(values.iter().map(|v| v.rem_euclid(360.0))) {
            if max - min < 360.0 && max - min >= hi - lo {
                (min, max) = (lo, hi);
            }
        }
        if let Some((lo, hi)) = extent(values.iter().map(|v| wrap_180(*v))) {
            if hi - lo < 360.0 && max - min >= hi - lo {
                (min, max) = (lo, hi);
            }
        }
    }

    let span = max - min;
    let pad = PADDING * span;
    let range = match coord_type {
        CoordinateType::Longitude if span > WHOLE_CIRCLE_SPAN => VisibleRange::new(0.0, 360.0),
        CoordinateType::Longitude if min < 0.0 => {
            VisibleRange::new((min - pad).max(-180.0), (max + pad).min(180.0))
        }
        CoordinateType::Longitude => VisibleRange::new((min - pad).max(0.0), (max + pad).min(360.0)),
        CoordinateType::Latitude => VisibleRange::new((min - pad).max(-90.0), (max + pad).min(90.0)),
        CoordinateType::Scalar => VisibleRange::new(min, max),
    };
    crate::log::debug!(?coord_type, min = range.min, max = range.max, "coordinate range");
    Ok(range)
}

/// Remove 360° jumps: first along the bottom row, then up every column.
fn iron(values: &mut [f64], cols: usize) {
    for ix in 1..cols.min(values.len()) {
        let jump = values[ix] - values[ix - 1];
        if jump.abs() > 180.0 {
            values[ix] -= whole_turns(jump);
        }
    }
    for i in cols..values.len() {
        let jump = values[i] - values[i - cols];
        if jump.abs() > 180.0 {
            values[i] -= whole_turns(jump);
        }
    }
}

/// `jump` rounded to the nearest multiple of 360°
fn whole_turns(jump: f64) -> f64 {
    360.0 * ((jump + jump.signum() * 180.0) / 360.0).trunc()
}

fn wrap_180(value: f64) -> f64 {
    let wrapped = value.rem_euclid(360.0);
    if wrapped > 180.0 { wrapped - 360.0 } else { wrapped }
}

/// Min and max of the finite values
fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
