//! Parse format spec strings (and rendered labels) via the pest grammar.

use std::fmt;

use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::Pair;

use crate::errors::AxisError;
use crate::types::{Quantity, Unit};
use crate::{FormatSpecParser, Rule};

/// How a format spec renders its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatBase {
    /// `dd:mm:ss` style, one suffix per field
    Sexagesimal,
    /// `d.ddd` style, a single angular field
    AngularDecimal,
    /// `x.xxx` style, unit-agnostic numbers
    PlainDecimal,
}

/// Unit of one rendered field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUnit {
    Degree,
    Hour,
    Minute,
    Second,
    Scalar,
}

impl FieldUnit {
    fn letter(self) -> char {
        match self {
            FieldUnit::Degree => 'd',
            FieldUnit::Hour => 'h',
            FieldUnit::Minute => 'm',
            FieldUnit::Second => 's',
            FieldUnit::Scalar => 'x',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub unit: FieldUnit,
    pub decimals: u32,
}

/// A parsed format descriptor.
///
/// Fields run from largest to smallest unit; only the last one may carry
/// decimal places.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    base: FormatBase,
    prime: Unit,
    fields: Vec<Field>,
}

/// Most decimal places a spec may ask for. A full turn in lowest-field steps,
/// `1_296_000 × 10^12` arcsecond steps, still fits in an `i64`.
pub const MAX_DECIMALS: u32 = 12;

/// Sexagesimal breakdown of an angle: degrees or hours, then minutes, then seconds.
const SEXAGESIMAL_UNITS: [FieldUnit; 3] = [FieldUnit::Degree, FieldUnit::Minute, FieldUnit::Second];

impl FormatSpec {
    /// Sexagesimal spec with `field_count` fields (1 to 3) and decimals on the last.
    ///
    /// `prime` must be `Unit::Degree` or `Unit::Hour`. Decimals are capped at
    /// [`MAX_DECIMALS`].
    pub fn sexagesimal(prime: Unit, field_count: usize, decimals: u32) -> FormatSpec {
        let top = if prime == Unit::Hour { FieldUnit::Hour } else { FieldUnit::Degree };
        let count = field_count.clamp(1, 3);
        let mut fields: Vec<Field> = SEXAGESIMAL_UNITS[..count]
            .iter()
            .map(|&unit| Field { unit, decimals: 0 })
            .collect();
        fields[0].unit = top;
        // A lone degree/hour field stays integral
        if count > 1 {
            fields[count - 1].decimals = decimals.min(MAX_DECIMALS);
        }
        FormatSpec {
            base: FormatBase::Sexagesimal,
            prime: if prime == Unit::Hour { Unit::Hour } else { Unit::Degree },
            fields,
        }
    }

    /// Single-field angular decimal spec in `prime` (degree, hour, arcmin or arcsec).
    pub fn angular_decimal(prime: Unit, decimals: u32) -> FormatSpec {
        let unit = match prime {
            Unit::Hour => FieldUnit::Hour,
            Unit::Arcmin => FieldUnit::Minute,
            Unit::Arcsec => FieldUnit::Second,
            _ => FieldUnit::Degree,
        };
        let prime = match unit {
            FieldUnit::Hour => Unit::Hour,
            FieldUnit::Minute => Unit::Arcmin,
            FieldUnit::Second => Unit::Arcsec,
            _ => Unit::Degree,
        };
        FormatSpec {
            base: FormatBase::AngularDecimal,
            prime,
            fields: vec![Field {
                unit,
                decimals: decimals.min(MAX_DECIMALS),
            }],
        }
    }

    /// Plain decimal spec (`x.xx…`) with `decimals` places.
    pub fn plain(decimals: u32) -> FormatSpec {
        FormatSpec {
            base: FormatBase::PlainDecimal,
            prime: Unit::Dimensionless,
            fields: vec![Field {
                unit: FieldUnit::Scalar,
                decimals: decimals.min(MAX_DECIMALS),
            }],
        }
    }

    pub fn base(&self) -> FormatBase {
        self.base
    }

    /// Unit the highest field is expressed in
    pub fn prime(&self) -> Unit {
        self.prime
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Decimal places on the last field
    pub fn decimals(&self) -> u32 {
        self.fields.last().map_or(0, |f| f.decimals)
    }

    pub fn is_angular(&self) -> bool {
        self.base != FormatBase::PlainDecimal
    }

    /// A single integral degree/hour field is truncated rather than rounded.
    pub(crate) fn truncates(&self) -> bool {
        self.fields.len() == 1
            && self.decimals() == 0
            && matches!(self.fields[0].unit, FieldUnit::Degree | FieldUnit::Hour)
    }

    /// Number of lowest-field steps in one prime unit: `60^(fields-1) × 10^decimals`.
    pub(crate) fn stride(&self) -> i64 {
        let sexagesimal = 60_i64.pow(self.fields.len().saturating_sub(1) as u32);
        sexagesimal * 10_i64.pow(self.decimals())
    }

    /// The smallest step this spec can represent without losing information.
    pub fn base_spacing(&self) -> Quantity {
        let step = 1.0 / 10_f64.powi(self.decimals() as i32);
        match self.base {
            FormatBase::PlainDecimal => Quantity::scalar(step),
            FormatBase::AngularDecimal => Quantity::new(step, self.prime),
            FormatBase::Sexagesimal => {
                // Minutes and seconds of time are fifteen arc units
                let scale = if self.prime == Unit::Hour { 15.0 } else { 1.0 };
                match self.fields.len() {
                    1 => Quantity::new(1.0, self.prime),
                    2 => Quantity::arcmin(scale * step),
                    _ => Quantity::arcsec(scale * step),
                }
            }
        }
    }

    /// Read a label rendered by this spec back into a quantity in the prime unit.
    pub fn parse_label(&self, text: &str) -> Result<Quantity, AxisError> {
        let mut pairs = FormatSpecParser::parse(Rule::label, text)
            .map_err(|e| AxisError::invalid_label(text, error_offset(&e.location), "unexpected character"))?;
        let label = pairs
            .next()
            .ok_or_else(|| AxisError::invalid_label(text, 0, "empty label"))?;

        let mut sign = 1.0;
        let mut total = 0.0;
        let mut suffixed = false;
        for pair in label.into_inner() {
            match pair.as_rule() {
                Rule::sign => {
                    if pair.as_str() == "-" {
                        sign = -1.0;
                    }
                }
                Rule::number => total = parse_number(text, &pair)?,
                Rule::component => {
                    suffixed = true;
                    total += self.component_value(text, pair)?;
                }
                _ => {}
            }
        }

        if !suffixed && self.base == FormatBase::Sexagesimal {
            return Err(AxisError::invalid_label(text, 0, "missing unit suffix"));
        }
        Ok(Quantity::new(sign * total, self.prime))
    }

    /// Value of one `<number><suffix>` component in prime units.
    fn component_value(&self, text: &str, pair: Pair<Rule>) -> Result<f64, AxisError> {
        let offset = pair.as_span().start();
        let mut inner = pair.into_inner();
        let (Some(number), Some(suffix)) = (inner.next(), inner.next()) else {
            return Err(AxisError::invalid_label(text, offset, "incomplete field"));
        };
        let value = parse_number(text, &number)?;
        let divisor = match (self.base, suffix.as_str()) {
            (FormatBase::AngularDecimal, _) => 1.0,
            (_, "d") if self.prime == Unit::Degree => 1.0,
            (_, "h") if self.prime == Unit::Hour => 1.0,
            (FormatBase::Sexagesimal, "m") => 60.0,
            (FormatBase::Sexagesimal, "s") => 3600.0,
            _ => {
                return Err(AxisError::invalid_label(
                    text,
                    suffix.as_span().start(),
                    format!("`{}` does not belong to this format", suffix.as_str()),
                ));
            }
        };
        Ok(value / divisor)
    }
}

fn parse_number(text: &str, pair: &Pair<Rule>) -> Result<f64, AxisError> {
    pair.as_str()
        .parse::<f64>()
        .map_err(|_| AxisError::invalid_label(text, pair.as_span().start(), "not a number"))
}

fn error_offset(location: &InputLocation) -> usize {
    match location {
        InputLocation::Pos(pos) => *pos,
        InputLocation::Span((start, _)) => *start,
    }
}

impl fmt::Display for FormatSpec {
    /// Canonical spec string, e.g. `dd:mm:ss.ss` or `x.xxx`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doubled = self.base == FormatBase::Sexagesimal;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            let letter = field.unit.letter();
            if doubled {
                write!(f, "{letter}{letter}")?;
            } else {
                write!(f, "{letter}")?;
            }
            if field.decimals > 0 {
                f.write_str(".")?;
                for _ in 0..field.decimals {
                    write!(f, "{letter}")?;
                }
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for FormatSpec {
    type Err = AxisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parse a format spec string such as `dd:mm:ss.s`, `hh:mm`, `d.ddd` or `x.xxxx`.
pub fn parse(source: &str) -> Result<FormatSpec, AxisError> {
    let pairs = FormatSpecParser::parse(Rule::format_spec, source).map_err(|e| {
        let offset = error_offset(&e.location);
        let reason = if offset >= source.len() {
            "format ends too early"
        } else {
            "unexpected character"
        };
        AxisError::invalid_spec(source, offset, reason)
    })?;

    for pair in pairs {
        if pair.as_rule() != Rule::format_spec {
            continue;
        }
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::sexagesimal => return parse_sexagesimal(source, inner),
                Rule::angular_decimal => return parse_angular_decimal(source, inner),
                Rule::plain_decimal => return Ok(FormatSpec::plain(places(source, inner)?)),
                _ => {}
            }
        }
    }
    Err(AxisError::invalid_spec(source, 0, "empty format"))
}

/// Count of precision letters in a trailing `.xxx` group, if any.
fn places(source: &str, pair: Pair<Rule>) -> Result<u32, AxisError> {
    pair.into_inner()
        .find(|p| {
            matches!(
                p.as_rule(),
                Rule::degree_places
                    | Rule::hour_places
                    | Rule::minute_places
                    | Rule::second_places
                    | Rule::scalar_places
            )
        })
        .map_or(Ok(0), |p| decimal_places(source, &p))
}

/// Letters after the `.` of a places group, rejected past [`MAX_DECIMALS`].
fn decimal_places(source: &str, pair: &Pair<Rule>) -> Result<u32, AxisError> {
    let count = pair.as_str().len() - 1;
    if count > MAX_DECIMALS as usize {
        let offset = pair.as_span().start() + 1 + MAX_DECIMALS as usize;
        return Err(AxisError::invalid_spec(
            source,
            offset,
            format!("at most {MAX_DECIMALS} decimal places"),
        ));
    }
    Ok(count as u32)
}

fn parse_sexagesimal(source: &str, pair: Pair<Rule>) -> Result<FormatSpec, AxisError> {
    let mut prime = Unit::Degree;
    let mut fields = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::degrees => fields.push(Field { unit: FieldUnit::Degree, decimals: 0 }),
            Rule::hours => {
                prime = Unit::Hour;
                fields.push(Field { unit: FieldUnit::Hour, decimals: 0 });
            }
            Rule::minutes => fields.push(Field { unit: FieldUnit::Minute, decimals: 0 }),
            Rule::seconds => fields.push(Field { unit: FieldUnit::Second, decimals: 0 }),
            Rule::minute_places | Rule::second_places => {
                let decimals = decimal_places(source, &inner)?;
                if let Some(last) = fields.last_mut() {
                    last.decimals = decimals;
                }
            }
            _ => {}
        }
    }
    Ok(FormatSpec {
        base: FormatBase::Sexagesimal,
        prime,
        fields,
    })
}

fn parse_angular_decimal(source: &str, pair: Pair<Rule>) -> Result<FormatSpec, AxisError> {
    let Some(inner) = pair.into_inner().next() else {
        return Err(AxisError::invalid_spec(source, 0, "empty format"));
    };
    let prime = match inner.as_rule() {
        Rule::decimal_hours => Unit::Hour,
        Rule::decimal_arcmin => Unit::Arcmin,
        Rule::decimal_arcsec => Unit::Arcsec,
        _ => Unit::Degree,
    };
    Ok(FormatSpec::angular_decimal(prime, places(source, inner)?))
}
