//! Drawing coordinate overlays onto a host surface
//!
//! This module is organized into submodules:
//! - `types`: the `WorldTransform` and `DrawSurface` collaborator traits
//! - `range`: visible world range discovery
//! - `geometry`: edge sampling and world-line runs

pub mod geometry;
pub mod range;
pub mod types;

pub use range::find_coordinate_range;
pub use types::{DrawSurface, PixelRect, Stroke, WorldTransform};

use glam::DVec2;

use crate::coords::CoordinateHelper;
use crate::coords::defaults::{AXISLABEL_PAD, EDGE_SAMPLES, GRID_SAMPLES, TEXT_COLOR, TICKLABEL_PAD};
use crate::coords::edges::Edge;
use crate::coords::set::CoordinateHelperSet;
use crate::errors::AxisError;
use crate::locate::VisibleRange;
use crate::types::Color;
use geometry::{EdgeSamples, world_line_runs};

/// Draw grids, ticks and tick labels for the first two coordinates of `set`,
/// then their axis labels.
pub fn draw<T, S>(set: &CoordinateHelperSet, transform: &T, surface: &mut S) -> Result<(), AxisError>
where
    T: WorldTransform + ?Sized,
    S: DrawSurface + ?Sized,
{
    if set.len() < 2 {
        return Ok(());
    }
    let frame = surface.frame();
    let ranges = find_coordinate_range(transform, &frame, [set[0].coord_type(), set[1].coord_type()])?;

    for axis in 0..2 {
        draw_coordinate(&set[axis], axis, ranges, transform, surface)?;
    }
    for axis in 0..2 {
        draw_axislabel(&set[axis], &frame, surface);
    }
    Ok(())
}

fn draw_coordinate<T, S>(
    helper: &CoordinateHelper,
    axis: usize,
    ranges: [VisibleRange; 2],
    transform: &T,
    surface: &mut S,
) -> Result<(), AxisError>
where
    T: WorldTransform + ?Sized,
    S: DrawSurface + ?Sized,
{
    let ticks = helper.tick_values(ranges[axis])?;
    let labels = helper.format_ticks(&ticks)?;
    let kind = helper.kind();
    let worlds: Vec<f64> = ticks.values.iter().filter_map(|q| kind.world_value(*q)).collect();
    let wraps = helper.coord_type().wraps();
    crate::log::debug!(axis, ticks = worlds.len(), "drawing coordinate");

    if helper.grid_enabled() {
        let stroke = Stroke::from(helper.grid_style());
        let other = ranges[1 - axis];
        for world in &worlds {
            let points = (0..=GRID_SAMPLES).map(|i| {
                let along = other.min + (other.max - other.min) * i as f64 / GRID_SAMPLES as f64;
                if axis == 0 { DVec2::new(*world, along) } else { DVec2::new(along, *world) }
            });
            for run in world_line_runs(transform, points) {
                surface.draw_line(&run, &stroke);
            }
        }
    }

    let frame = surface.frame();
    let tick_edges = helper.ticks_position().edges();
    let label_edges = helper.ticklabel_position().edges();
    let tick_stroke = Stroke::from(helper.tick_style());
    let size = helper.tick_style().size;
    let text_color = Color::named(TEXT_COLOR);

    for edge in Edge::ALL {
        let (marks, labelled) = (tick_edges.contains(edge), label_edges.contains(edge));
        if !marks && !labelled {
            continue;
        }
        let samples = EdgeSamples::along(transform, &frame, edge, axis, EDGE_SAMPLES);
        let outward = PixelRect::outward(edge);
        for (world, label) in worlds.iter().zip(&labels) {
            for at in samples.crossings(*world, wraps) {
                if marks {
                    surface.draw_line(&[at, at - outward * size], &tick_stroke);
                }
                if labelled {
                    surface.draw_text(at + outward * TICKLABEL_PAD, label, edge, &text_color);
                }
            }
        }
    }
    Ok(())
}

fn draw_axislabel<S: DrawSurface + ?Sized>(helper: &CoordinateHelper, frame: &PixelRect, surface: &mut S) {
    if helper.axis_label().is_empty() {
        return;
    }
    let color = Color::named(TEXT_COLOR);
    for edge in helper.axislabel_position().edges().iter() {
        let at = frame.midpoint(edge) + PixelRect::outward(edge) * AXISLABEL_PAD;
        surface.draw_text(at, helper.axis_label(), edge, &color);
    }
}
