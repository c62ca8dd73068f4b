//! Collaborator traits and the small value types passed across them.

use glam::{DVec2, dvec2};

use crate::coords::edges::Edge;
use crate::coords::style::{GridStyle, LineStyle, TickStyle};
use crate::types::Color;

/// World ↔ pixel mapping supplied by the host (a WCS projection, usually).
///
/// World points are `(coord 0, coord 1)`, angles in degrees. `None` means the
/// point falls outside the projection.
pub trait WorldTransform {
    fn world_to_pixel(&self, world: DVec2) -> Option<DVec2>;
    fn pixel_to_world(&self, pixel: DVec2) -> Option<DVec2>;
}

/// Drawing backend supplied by the host.
pub trait DrawSurface {
    /// The plotting frame in pixels
    fn frame(&self) -> PixelRect;
    fn draw_line(&mut self, points: &[DVec2], stroke: &Stroke);
    /// Draw `text` anchored at `at`, on the outside of `edge`
    fn draw_text(&mut self, at: DVec2, text: &str, edge: Edge, color: &Color);
}

/// Axis-aligned pixel rectangle. Y grows upward, so the bottom edge is `min.y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub min: DVec2,
    pub max: DVec2,
}

impl PixelRect {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    /// The edge as a segment, running left to right or bottom to top
    pub fn edge_segment(&self, edge: Edge) -> (DVec2, DVec2) {
        let (min, max) = (self.min, self.max);
        match edge {
            Edge::Left => (min, dvec2(min.x, max.y)),
            Edge::Bottom => (min, dvec2(max.x, min.y)),
            Edge::Right => (dvec2(max.x, min.y), max),
            Edge::Top => (dvec2(min.x, max.y), max),
        }
    }

    pub fn midpoint(&self, edge: Edge) -> DVec2 {
        let (start, end) = self.edge_segment(edge);
        start.lerp(end, 0.5)
    }

    /// Unit normal pointing away from the frame
    pub fn outward(edge: Edge) -> DVec2 {
        match edge {
            Edge::Left => DVec2::NEG_X,
            Edge::Bottom => DVec2::NEG_Y,
            Edge::Right => DVec2::X,
            Edge::Top => DVec2::Y,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub alpha: f64,
    pub width: f64,
    pub line_style: LineStyle,
}

impl From<&TickStyle> for Stroke {
    fn from(style: &TickStyle) -> Self {
        Self {
            color: style.color.clone(),
            alpha: 1.0,
            width: style.width,
            line_style: LineStyle::Solid,
        }
    }
}

impl From<&GridStyle> for Stroke {
    fn from(style: &GridStyle) -> Self {
        Self {
            color: style.color.clone(),
            alpha: style.alpha,
            width: style.line_width,
            line_style: style.line_style,
        }
    }
}
