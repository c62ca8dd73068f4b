//! Sampling along frame edges and world lines.

use glam::DVec2;

use crate::coords::edges::Edge;
use crate::render::types::{PixelRect, WorldTransform};

/// World values closer than this to a tick count as on it
const ON_TICK: f64 = 1e-9;

/// Samples of one world coordinate along a frame edge
#[derive(Debug, Clone)]
pub struct EdgeSamples {
    pixels: Vec<DVec2>,
    /// `NaN` where the transform has no world position
    world: Vec<f64>,
}

impl EdgeSamples {
    /// Sample coordinate `axis` at `samples + 1` evenly spaced points on `edge`.
    pub fn along<T: WorldTransform + ?Sized>(
        transform: &T,
        frame: &PixelRect,
        edge: Edge,
        axis: usize,
        samples: usize,
    ) -> Self {
        let (start, end) = frame.edge_segment(edge);
        let steps = samples.max(1);
        let pixels: Vec<DVec2> = (0..=steps)
            .map(|i| start.lerp(end, i as f64 / steps as f64))
            .collect();
        let world = pixels
            .iter()
            .map(|p| transform.pixel_to_world(*p).map_or(f64::NAN, |w| w[axis]))
            .collect();
        Self { pixels, world }
    }

    /// Pixel positions where the sampled coordinate equals `tick`.
    ///
    /// A crossing is a change of sign in `world − tick`, with zero counted as
    /// positive. For wrapping coordinates the difference is taken on the
    /// circle and sign flips over 180° (the far side) are ignored.
    pub fn crossings(&self, tick: f64, wraps: bool) -> Vec<DVec2> {
        let diff: Vec<f64> = self
            .world
            .iter()
            .map(|w| {
                let d = w - tick;
                if wraps { (d + 180.0).rem_euclid(360.0) - 180.0 } else { d }
            })
            .collect();

        let mut found = Vec::new();
        let Some(last) = diff.len().checked_sub(1) else {
            return found;
        };
        for i in 0..last {
            let (a, b) = (diff[i], diff[i + 1]);
            if a.is_nan() || b.is_nan() || (a >= 0.0) == (b >= 0.0) {
                continue;
            }
            if wraps && (a - b).abs() > 180.0 {
                continue;
            }
            let t = a / (a - b);
            found.push(self.pixels[i].lerp(self.pixels[i + 1], t));
        }

        // A tick sitting exactly on an end sample with no sign change next to it
        if last > 0 {
            if diff[0].abs() <= ON_TICK && diff[1] >= 0.0 {
                found.insert(0, self.pixels[0]);
            }
            if diff[last].abs() <= ON_TICK && diff[last - 1] >= 0.0 {
                found.push(self.pixels[last]);
            }
        }
        found
    }
}

/// Contiguous pixel runs of a world line, split where the projection fails.
pub fn world_line_runs<T: WorldTransform + ?Sized>(transform: &T, points: impl Iterator<Item = DVec2>) -> Vec<Vec<DVec2>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for world in points {
        match transform.world_to_pixel(world).filter(|p| p.is_finite()) {
            Some(pixel) => current.push(pixel),
            None => {
                if current.len() > 1 {
                    runs.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            }
        }
    }
    if current.len() > 1 {
        runs.push(current);
    }
    runs
}
