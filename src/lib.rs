//! Tick location, tick-label formatting and edge placement for
//! coordinate-aware plot axes.
//!
//! The crate turns a visible world-coordinate range into tick values
//! ([`locate`]), renders them as sexagesimal or decimal labels ([`format`],
//! driven by format specs such as `dd:mm:ss.s` parsed in [`parse`]), and keeps
//! per-coordinate placement policy ([`coords`]). Drawing goes through the
//! [`render::WorldTransform`] and [`render::DrawSurface`] traits, which the
//! host plotting library implements.
//!
//! ```
//! use coordaxes::{Quantity, format_value};
//!
//! let angle = Quantity::from_dms(15.0, 23.0, 32.0316);
//! assert_eq!(format_value(angle, "dd:mm:ss.s").unwrap(), "15d23m32.0s");
//! assert_eq!(format_value(angle, "hh:mm:ss.ssss").unwrap(), "1h01m34.1354s");
//! ```

use pest_derive::Parser;

pub mod coords;
pub mod errors;
pub mod format;
pub mod locate;
mod log;
pub mod parse;
pub mod render;
pub mod types;

pub use coords::set::{CelestialFrame, CoordinateHelperSet, CoordinateKey};
pub use coords::{
    CoordinateHelper, CoordinateType, Edge, EdgePlacement, FormatterChoice, GridOptions, LineStyle, TickOptions,
};
pub use errors::AxisError;
pub use format::{MajorFormatter, SexagesimalFormatter, TickFormatter};
pub use locate::{AxisKind, TickLocator, TickSpec, Ticks, VisibleRange};
pub use parse::FormatSpec;
pub use render::{DrawSurface, PixelRect, Stroke, WorldTransform};
pub use types::{Color, Quantity, Unit};

#[derive(Parser)]
#[grammar = "format_spec.pest"]
pub struct FormatSpecParser;

/// Format a single value with a format spec string.
///
/// The value is not wrapped; use [`SexagesimalFormatter::wrapping`] for
/// longitude-like coordinates.
pub fn format_value(value: Quantity, spec: &str) -> Result<String, AxisError> {
    let spec = parse::parse(spec)?;
    SexagesimalFormatter::new(spec).format(&value)
}
