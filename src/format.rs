//! Tick label formatting.
//!
//! Angular values are scaled once into fixed-point steps of the lowest field,
//! rounded there, and only then split into degrees/hours, minutes and seconds
//! with integer division. Rounding carry (59.99″ → next minute) and wrap
//! (360° → 0°) fall out of the integer arithmetic.

use std::fmt;

use crate::errors::AxisError;
use crate::locate::AxisKind;
use crate::parse::{FieldUnit, FormatBase, FormatSpec};
use crate::types::{NumericError, Quantity, Unit, check_finite};

/// Lowest-field step counts at or above this do not fit the `i64` decomposition
const FIXED_POINT_LIMIT: f64 = i64::MAX as f64;

/// Upper bound on decimals picked automatically from a tick spacing
const MAX_AUTO_DECIMALS: u32 = 9;

/// Anything that can turn a tick value into label text.
///
/// Closures `Fn(&Quantity) -> String` implement this directly.
pub trait TickFormatter {
    fn format(&self, value: &Quantity) -> Result<String, AxisError>;

    fn format_all(&self, values: &[Quantity]) -> Result<Vec<String>, AxisError> {
        values.iter().map(|v| self.format(v)).collect()
    }
}

impl<F> TickFormatter for F
where
    F: Fn(&Quantity) -> String,
{
    fn format(&self, value: &Quantity) -> Result<String, AxisError> {
        Ok(self(value))
    }
}

/// Renders quantities according to a [`FormatSpec`].
///
/// Handles all three spec families: sexagesimal, angular decimal and plain
/// decimal.
#[derive(Debug, Clone, PartialEq)]
pub struct SexagesimalFormatter {
    spec: FormatSpec,
    wraps: bool,
}

impl SexagesimalFormatter {
    pub fn new(spec: FormatSpec) -> Self {
        Self { spec, wraps: false }
    }

    /// Reduce angles modulo 360°/24h after rounding (longitude-like axes).
    pub fn wrapping(mut self, wraps: bool) -> Self {
        self.wraps = wraps;
        self
    }

    pub fn spec(&self) -> &FormatSpec {
        &self.spec
    }

    pub fn wraps(&self) -> bool {
        self.wraps
    }

    fn unsupported(&self, value: &Quantity) -> AxisError {
        AxisError::UnsupportedUnitForFormat {
            unit: value.unit(),
            format: self.spec.to_string(),
        }
    }

    fn format_angle(&self, value: &Quantity) -> Result<String, AxisError> {
        let spec = &self.spec;
        if !value.is_angular() {
            return Err(self.unsupported(value));
        }
        let stride = spec.stride();
        let scaled = value
            .scaled_to(spec.prime(), stride as f64)
            .ok_or_else(|| self.unsupported(value))?;
        let scaled = check_finite(scaled)?;

        // The only rounding step
        let rounded = if spec.truncates() { scaled.trunc() } else { scaled.round() };
        if rounded.abs() >= FIXED_POINT_LIMIT {
            let max = value.value().abs() * FIXED_POINT_LIMIT / scaled.abs();
            return Err(NumericError::OutOfRange { min: -max, max }.into());
        }
        let mut total = rounded as i64;
        if self.wraps {
            if let Some(period) = spec.prime().wrap_period() {
                total = total.rem_euclid(period as i64 * stride);
            }
        }

        let negative = total < 0;
        let fields = spec.fields();
        let count = fields.len();
        let frac_scale = 10_u64.pow(spec.decimals());

        let mut parts = vec![0_u64; count];
        let mut rest = total.unsigned_abs();
        for i in (1..count).rev() {
            let modulus = if i == count - 1 { 60 * frac_scale } else { 60 };
            parts[i] = rest % modulus;
            rest /= modulus;
        }
        parts[0] = rest;

        // Clock-style zero padding for hour-based specs
        let pad = spec.prime() == Unit::Hour && spec.base() == FormatBase::Sexagesimal;
        let mut out = String::new();
        if negative {
            out.push('-');
        }
        for (i, (field, part)) in fields.iter().zip(&parts).enumerate() {
            let last = i == count - 1;
            let (whole, frac) = if last {
                (part / frac_scale, part % frac_scale)
            } else {
                (*part, 0)
            };
            if i > 0 && pad {
                out.push_str(&format!("{whole:02}"));
            } else {
                out.push_str(&whole.to_string());
            }
            if last && field.decimals > 0 {
                out.push_str(&format!(".{frac:0width$}", width = field.decimals as usize));
            }
            if spec.base() == FormatBase::Sexagesimal || field.decimals == 0 {
                out.push(suffix(field.unit));
            }
        }
        Ok(out)
    }

    fn format_plain(&self, value: &Quantity) -> Result<String, AxisError> {
        if value.is_angular() {
            return Err(self.unsupported(value));
        }
        let text = format!("{:.*}", self.spec.decimals() as usize, check_finite(value.value())?);
        Ok(strip_negative_zero(text))
    }
}

impl TickFormatter for SexagesimalFormatter {
    fn format(&self, value: &Quantity) -> Result<String, AxisError> {
        match self.spec.base() {
            FormatBase::PlainDecimal => self.format_plain(value),
            FormatBase::Sexagesimal | FormatBase::AngularDecimal => self.format_angle(value),
        }
    }
}

fn suffix(unit: FieldUnit) -> char {
    match unit {
        FieldUnit::Degree => 'd',
        FieldUnit::Hour => 'h',
        FieldUnit::Minute => 'm',
        FieldUnit::Second => 's',
        FieldUnit::Scalar => ' ',
    }
}

/// `-0.00` → `0.00`
fn strip_negative_zero(text: String) -> String {
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => text,
    }
}

/// The formatter configured on a coordinate: either spec-driven or custom.
pub enum MajorFormatter {
    Spec(SexagesimalFormatter),
    Custom(Box<dyn TickFormatter>),
}

impl MajorFormatter {
    pub fn custom(formatter: impl TickFormatter + 'static) -> Self {
        MajorFormatter::Custom(Box::new(formatter))
    }

    /// The format spec, when this formatter is spec-driven
    pub fn spec(&self) -> Option<&FormatSpec> {
        match self {
            MajorFormatter::Spec(f) => Some(f.spec()),
            MajorFormatter::Custom(_) => None,
        }
    }
}

impl TickFormatter for MajorFormatter {
    fn format(&self, value: &Quantity) -> Result<String, AxisError> {
        match self {
            MajorFormatter::Spec(f) => f.format(value),
            MajorFormatter::Custom(f) => f.format(value),
        }
    }
}

impl fmt::Debug for MajorFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MajorFormatter::Spec(inner) => f.debug_tuple("Spec").field(inner).finish(),
            MajorFormatter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Pick a format able to show ticks `spacing` apart without losing information.
///
/// Without a spacing (explicit ticks with nothing to compare), angles fall
/// back to whole seconds and scalars to integers.
pub fn auto_format(kind: AxisKind, spacing: Option<Quantity>) -> FormatSpec {
    match kind {
        AxisKind::Angular(prime) => {
            let Some(arcsec) = spacing.and_then(|s| s.in_unit(Unit::Arcsec)) else {
                return FormatSpec::sexagesimal(prime, 3, 0);
            };
            // Seconds of the prime unit: arcseconds, or seconds of time
            let seconds = arcsec.abs() / if prime == Unit::Hour { 15.0 } else { 1.0 };
            if is_multiple(seconds, 3600.0) {
                FormatSpec::sexagesimal(prime, 1, 0)
            } else if is_multiple(seconds, 60.0) {
                FormatSpec::sexagesimal(prime, 2, 0)
            } else {
                FormatSpec::sexagesimal(prime, 3, decimals_for(seconds))
            }
        }
        AxisKind::Scalar => {
            let step = spacing.map_or(1.0, |s| s.value().abs());
            FormatSpec::plain(decimals_for(step))
        }
    }
}

/// Whether `value` is a positive whole multiple of `unit`.
fn is_multiple(value: f64, unit: f64) -> bool {
    let ratio = value / unit;
    ratio.round() >= 1.0 && (ratio - ratio.round()).abs() <= 1e-9 * ratio
}

/// Fewest decimals that render `step` exactly.
fn decimals_for(step: f64) -> u32 {
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    let mut decimals = 0;
    while decimals < MAX_AUTO_DECIMALS {
        let scaled = step * 10_f64.powi(decimals as i32);
        if (scaled - scaled.round()).abs() <= 1e-9 * scaled {
            break;
        }
        decimals += 1;
    }
    decimals
}
