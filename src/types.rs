//! Strongly-typed numeric primitives for coordaxes.
//!
//! Design goals:
//! - No raw `f64` angles in domain logic
//! - Angle units convert through their size in arcseconds, so degree/hour
//!   scaling is an exact rational factor (15° = 1h)
//! - Illegal values (NaN, infinities) are rejected at the edge via `try_new`

use std::fmt;
use std::ops::{Mul, Neg};
use std::str::FromStr;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is negative when non-negative required
    Negative,
    /// Value lies outside the accepted interval
    OutOfRange { min: f64, max: f64 },
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Negative => write!(f, "value is negative"),
            NumericError::OutOfRange { min, max } => {
                write!(f, "value is outside [{}, {}]", min, max)
            }
        }
    }
}

impl std::error::Error for NumericError {}

/// Reject NaN and infinite values.
pub(crate) fn check_finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// Arcseconds in a full turn (360°, 24h).
const FULL_TURN_ARCSEC: f64 = 1_296_000.0;

/// Unit attached to a [`Quantity`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Unit {
    Degree,
    /// Hour angle: 1h = 15°
    Hour,
    Arcmin,
    Arcsec,
    Radian,
    /// Plain numbers on non-angular axes
    Dimensionless,
}

impl Unit {
    pub fn is_angular(self) -> bool {
        !matches!(self, Unit::Dimensionless)
    }

    /// Size of one unit in arcseconds. `None` for dimensionless values.
    pub fn arcsec(self) -> Option<f64> {
        match self {
            Unit::Degree => Some(3600.0),
            Unit::Hour => Some(54000.0),
            Unit::Arcmin => Some(60.0),
            Unit::Arcsec => Some(1.0),
            Unit::Radian => Some(FULL_TURN_ARCSEC / std::f64::consts::TAU),
            Unit::Dimensionless => None,
        }
    }

    /// The full-turn period (360°, 24h, 21600′, …) expressed in this unit.
    pub fn wrap_period(self) -> Option<f64> {
        match self {
            Unit::Degree => Some(360.0),
            Unit::Hour => Some(24.0),
            Unit::Arcmin => Some(21600.0),
            Unit::Arcsec => Some(FULL_TURN_ARCSEC),
            Unit::Radian => Some(std::f64::consts::TAU),
            Unit::Dimensionless => None,
        }
    }

    /// Label suffix for this unit
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Degree => "d",
            Unit::Hour => "h",
            Unit::Arcmin => "m",
            Unit::Arcsec => "s",
            Unit::Radian => "rad",
            Unit::Dimensionless => "",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Unit::Degree => "deg",
            Unit::Hour => "hourangle",
            Unit::Arcmin => "arcmin",
            Unit::Arcsec => "arcsec",
            Unit::Radian => "rad",
            Unit::Dimensionless => "dimensionless",
        };
        f.write_str(name)
    }
}

/// A world-coordinate value with its unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quantity {
    value: f64,
    unit: Unit,
}

impl Quantity {
    /// Create a quantity (unchecked).
    /// Use `try_new` for user-provided values.
    #[inline]
    pub const fn new(value: f64, unit: Unit) -> Quantity {
        Quantity { value, unit }
    }

    /// Create a quantity with validation (rejects NaN/infinite)
    pub fn try_new(value: f64, unit: Unit) -> Result<Quantity, NumericError> {
        Ok(Quantity::new(check_finite(value)?, unit))
    }

    pub const fn degrees(value: f64) -> Quantity {
        Quantity::new(value, Unit::Degree)
    }

    pub const fn hours(value: f64) -> Quantity {
        Quantity::new(value, Unit::Hour)
    }

    pub const fn arcmin(value: f64) -> Quantity {
        Quantity::new(value, Unit::Arcmin)
    }

    pub const fn arcsec(value: f64) -> Quantity {
        Quantity::new(value, Unit::Arcsec)
    }

    pub const fn radians(value: f64) -> Quantity {
        Quantity::new(value, Unit::Radian)
    }

    pub const fn scalar(value: f64) -> Quantity {
        Quantity::new(value, Unit::Dimensionless)
    }

    /// Build an angle from degree, arcminute and arcsecond components.
    ///
    /// The sign is taken from the first non-zero component and applied to the
    /// whole angle, so `from_dms(-15.0, 23.0, 32.0)` is -15°23′32″. The result
    /// is stored in arcseconds so no component is rescaled inexactly.
    pub fn from_dms(degrees: f64, arcmin: f64, arcsec: f64) -> Quantity {
        let total = degrees.abs() * 3600.0 + arcmin.abs() * 60.0 + arcsec.abs();
        Quantity::arcsec(leading_sign(&[degrees, arcmin, arcsec]) * total)
    }

    /// Build an hour angle from hour, minute and second components.
    ///
    /// Stored in arcseconds: one second of time is exactly 15″.
    pub fn from_hms(hours: f64, minutes: f64, seconds: f64) -> Quantity {
        let total = hours.abs() * 3600.0 + minutes.abs() * 60.0 + seconds.abs();
        Quantity::arcsec(leading_sign(&[hours, minutes, seconds]) * total * 15.0)
    }

    /// Get the raw magnitude in this quantity's own unit
    #[inline]
    pub fn value(self) -> f64 {
        self.value
    }

    #[inline]
    pub fn unit(self) -> Unit {
        self.unit
    }

    pub fn is_angular(self) -> bool {
        self.unit.is_angular()
    }

    pub fn is_finite(self) -> bool {
        self.value.is_finite()
    }

    /// Magnitude expressed in `target`, or `None` when one side is
    /// dimensionless and the other is not.
    ///
    /// Multiplies by the source size before dividing by the target size so
    /// integral conversions (hours to degrees, arcminutes to arcseconds) stay
    /// exact.
    pub fn in_unit(self, target: Unit) -> Option<f64> {
        if self.unit == target {
            return Some(self.value);
        }
        let from = self.unit.arcsec()?;
        let to = target.arcsec()?;
        Some(self.value * from / to)
    }

    /// Magnitude scaled into `subunits` steps of `prime`, i.e.
    /// `value × unit / prime × subunits`, ordered to keep integral steps exact.
    pub(crate) fn scaled_to(self, prime: Unit, subunits: f64) -> Option<f64> {
        if self.unit == prime {
            return Some(self.value * subunits);
        }
        let from = self.unit.arcsec()?;
        let to = prime.arcsec()?;
        Some(self.value * from * subunits / to)
    }

    pub fn to_degrees(self) -> Option<f64> {
        self.in_unit(Unit::Degree)
    }

    /// Reduce an angle into `[0, period)` in its own unit. Dimensionless
    /// values are returned unchanged.
    pub fn wrapped(self) -> Quantity {
        match self.unit.wrap_period() {
            Some(period) => Quantity::new(self.value.rem_euclid(period), self.unit),
            None => self,
        }
    }
}

fn leading_sign(components: &[f64]) -> f64 {
    components
        .iter()
        .find(|c| **c != 0.0)
        .map(|c| c.signum())
        .unwrap_or(1.0)
}

/// Quantity * f64 = Quantity (integer tick multiples)
impl Mul<f64> for Quantity {
    type Output = Quantity;
    fn mul(self, rhs: f64) -> Quantity {
        Quantity::new(self.value * rhs, self.unit)
    }
}

impl Neg for Quantity {
    type Output = Quantity;
    fn neg(self) -> Quantity {
        Quantity::new(-self.value, self.unit)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::Dimensionless => write!(f, "{}", self.value),
            unit => write!(f, "{} {}", self.value, unit),
        }
    }
}

/// Simple color model; named colors stay as names for the drawing backend.
#[derive(Clone, Debug, PartialEq)]
pub enum Color {
    Named(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, u8),
    Raw(String),
}

const NAMED_COLORS: &[&str] = &[
    "black", "white", "red", "green", "blue", "yellow", "cyan", "magenta", "orange", "purple",
    "brown", "pink", "gray", "grey", "lightgray", "lightgrey", "darkgray", "darkgrey", "silver",
    "none",
];

impl Color {
    pub fn named(name: &str) -> Color {
        Color::Named(name.to_string())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Named(s) | Color::Raw(s) => write!(f, "{}", s),
            Color::Rgb(r, g, b) => write!(f, "rgb({},{},{})", r, g, b),
            Color::Rgba(r, g, b, a) => write!(f, "rgba({},{},{},{})", r, g, b, a),
        }
    }
}

impl FromStr for Color {
    type Err = std::convert::Infallible;

    /// `#rrggbb` and `#rrggbbaa` become RGB(A); known names stay named;
    /// anything else is passed through raw.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
            match hex.len() {
                6 => {
                    if let (Some(r), Some(g), Some(b)) = (channel(0), channel(2), channel(4)) {
                        return Ok(Color::Rgb(r, g, b));
                    }
                }
                8 => {
                    if let (Some(r), Some(g), Some(b), Some(a)) =
                        (channel(0), channel(2), channel(4), channel(6))
                    {
                        return Ok(Color::Rgba(r, g, b, a));
                    }
                }
                _ => {}
            }
        }
        let lower = trimmed.to_lowercase();
        if NAMED_COLORS.contains(&lower.as_str()) {
            Ok(Color::Named(lower))
        } else {
            Ok(Color::Raw(trimmed.to_string()))
        }
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Color {
        match s.parse() {
            Ok(color) => color,
            Err(never) => match never {},
        }
    }
}
