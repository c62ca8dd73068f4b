//! Default styles and sample counts (pixel sizes, matplotlib-like colours)

use crate::coords::style::LineStyle;

pub const TICK_SIZE: f64 = 7.0;
pub const TICK_WIDTH: f64 = 1.0;
pub const TICK_COLOR: &str = "black";

pub const GRID_COLOR: &str = "white";
pub const GRID_ALPHA: f64 = 0.5;
pub const GRID_LINE_STYLE: LineStyle = LineStyle::Solid;
pub const GRID_LINE_WIDTH: f64 = 1.0;

pub const TEXT_COLOR: &str = "black";
/// Gap between a tick mark's outer end and its label
pub const TICKLABEL_PAD: f64 = 4.0;
/// Gap between the frame edge and the axis label
pub const AXISLABEL_PAD: f64 = 24.0;

pub const DEFAULT_TICK_COUNT: usize = 5;

/// Pixel grid side used to discover the visible world range
pub const RANGE_SAMPLES: usize = 50;
/// Points sampled along each frame edge when looking for tick crossings
pub const EDGE_SAMPLES: usize = 100;
/// Points per grid line
pub const GRID_SAMPLES: usize = 50;

pub const MAX_TICKS: usize = 10_000;
