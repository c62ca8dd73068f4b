//! Tick and grid styles, and the option builders that update them.

use std::fmt;
use std::str::FromStr;

use crate::coords::defaults;
use crate::errors::AxisError;
use crate::locate::TickSpec;
use crate::types::{Color, NumericError, Quantity, check_finite};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl FromStr for LineStyle {
    type Err = AxisError;

    /// Accepts names and the matplotlib shorthands `-`, `--`, `:`, `-.`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "solid" | "-" => Ok(LineStyle::Solid),
            "dashed" | "--" => Ok(LineStyle::Dashed),
            "dotted" | ":" => Ok(LineStyle::Dotted),
            "dashdot" | "-." => Ok(LineStyle::DashDot),
            other => Err(AxisError::InvalidLineStyle {
                style: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineStyle::Solid => "solid",
            LineStyle::Dashed => "dashed",
            LineStyle::Dotted => "dotted",
            LineStyle::DashDot => "dashdot",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickStyle {
    pub color: Color,
    /// Mark length in pixels, drawn inward from the edge
    pub size: f64,
    pub width: f64,
}

impl Default for TickStyle {
    fn default() -> Self {
        Self {
            color: Color::named(defaults::TICK_COLOR),
            size: defaults::TICK_SIZE,
            width: defaults::TICK_WIDTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridStyle {
    pub color: Color,
    pub alpha: f64,
    pub line_style: LineStyle,
    pub line_width: f64,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            color: Color::named(defaults::GRID_COLOR),
            alpha: defaults::GRID_ALPHA,
            line_style: defaults::GRID_LINE_STYLE,
            line_width: defaults::GRID_LINE_WIDTH,
        }
    }
}

/// Grid settings to merge onto the current style. Unset fields keep their
/// current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridOptions {
    pub color: Option<Color>,
    pub alpha: Option<f64>,
    pub line_style: Option<LineStyle>,
    pub line_width: Option<f64>,
}

impl GridOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn line_style(mut self, style: LineStyle) -> Self {
        self.line_style = Some(style);
        self
    }

    pub fn line_width(mut self, width: f64) -> Self {
        self.line_width = Some(width);
        self
    }

    pub fn validate(&self) -> Result<(), AxisError> {
        if let Some(alpha) = self.alpha {
            if !(0.0..=1.0).contains(&check_finite(alpha)?) {
                return Err(NumericError::OutOfRange { min: 0.0, max: 1.0 }.into());
            }
        }
        if let Some(width) = self.line_width {
            if check_finite(width)? < 0.0 {
                return Err(NumericError::Negative.into());
            }
        }
        Ok(())
    }

    /// Merge onto `style`. Call [`GridOptions::validate`] first.
    pub(crate) fn apply(&self, style: &mut GridStyle) {
        if let Some(color) = &self.color {
            style.color = color.clone();
        }
        if let Some(alpha) = self.alpha {
            style.alpha = alpha;
        }
        if let Some(line_style) = self.line_style {
            style.line_style = line_style;
        }
        if let Some(width) = self.line_width {
            style.line_width = width;
        }
    }
}

/// Arguments for `set_ticks`: at most one of values, spacing or number,
/// plus independent style updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOptions {
    pub values: Option<Vec<Quantity>>,
    pub spacing: Option<Quantity>,
    pub number: Option<usize>,
    pub color: Option<Color>,
    pub size: Option<f64>,
    pub width: Option<f64>,
}

impl TickOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(mut self, values: impl Into<Vec<Quantity>>) -> Self {
        self.values = Some(values.into());
        self
    }

    pub fn spacing(mut self, spacing: Quantity) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn number(mut self, number: usize) -> Self {
        self.number = Some(number);
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// The requested tick mode, if any. More than one is a conflict.
    pub(crate) fn tick_spec(&self) -> Result<Option<TickSpec>, AxisError> {
        let supplied: Vec<&str> = [
            ("values", self.values.is_some()),
            ("spacing", self.spacing.is_some()),
            ("number", self.number.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect();
        if supplied.len() > 1 {
            return Err(AxisError::ConflictingTickSpec {
                supplied: supplied.join(", "),
            });
        }

        Ok(if let Some(values) = &self.values {
            Some(TickSpec::Explicit(values.clone()))
        } else if let Some(spacing) = self.spacing {
            Some(TickSpec::BySpacing(spacing))
        } else {
            self.number.map(TickSpec::ByCount)
        })
    }

    pub(crate) fn validate_style(&self) -> Result<(), AxisError> {
        for value in [self.size, self.width].into_iter().flatten() {
            if check_finite(value)? < 0.0 {
                return Err(NumericError::Negative.into());
            }
        }
        Ok(())
    }

    pub(crate) fn apply_style(&self, style: &mut TickStyle) {
        if let Some(color) = &self.color {
            style.color = color.clone();
        }
        if let Some(size) = self.size {
            style.size = size;
        }
        if let Some(width) = self.width {
            style.width = width;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_style_shorthands() {
        assert_eq!("--".parse::<LineStyle>().unwrap(), LineStyle::Dashed);
        assert_eq!("dotted".parse::<LineStyle>().unwrap(), LineStyle::Dotted);
        assert_eq!("-.".parse::<LineStyle>().unwrap(), LineStyle::DashDot);
        assert!("wavy".parse::<LineStyle>().is_err());
    }

    #[test]
    fn grid_options_merge() {
        let mut style = GridStyle::default();
        GridOptions::new().alpha(0.2).apply(&mut style);
        GridOptions::new().color("red").apply(&mut style);
        assert_eq!(style.alpha, 0.2);
        assert_eq!(style.color, Color::named("red"));
        assert_eq!(style.line_style, LineStyle::Solid);
    }

    #[test]
    fn grid_options_validate() {
        assert!(GridOptions::new().alpha(0.5).line_width(2.0).validate().is_ok());
        assert!(matches!(
            GridOptions::new().alpha(1.5).validate(),
            Err(AxisError::Numeric(NumericError::OutOfRange { .. }))
        ));
        assert!(matches!(
            GridOptions::new().line_width(-1.0).validate(),
            Err(AxisError::Numeric(NumericError::Negative))
        ));
        assert!(GridOptions::new().alpha(f64::NAN).validate().is_err());
    }

    #[test]
    fn tick_options_conflict() {
        let options = TickOptions::new()
            .values(vec![Quantity::scalar(1.0), Quantity::scalar(2.0), Quantity::scalar(3.0)])
            .spacing(Quantity::scalar(0.1));
        let Err(AxisError::ConflictingTickSpec { supplied }) = options.tick_spec() else {
            panic!("expected ConflictingTickSpec");
        };
        assert_eq!(supplied, "values, spacing");
    }

    #[test]
    fn tick_options_style_only() {
        let options = TickOptions::new().color("red").size(10.0);
        assert_eq!(options.tick_spec().unwrap(), None);
        let mut style = TickStyle::default();
        options.apply_style(&mut style);
        assert_eq!(style.size, 10.0);
        assert_eq!(style.width, defaults::TICK_WIDTH);
    }
}
