//! Error types with rich diagnostics using miette
//!
//! Parser-facing errors carry the offending string and a span so the fancy
//! reporter can point at the bad character.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::{NumericError, Quantity, Unit};

/// Everything that can go wrong while configuring or evaluating an axis.
#[derive(Error, Diagnostic, Debug)]
pub enum AxisError {
    #[error("invalid format spec: {spec:?}")]
    #[diagnostic(
        code(coordaxes::format::invalid_spec),
        help("use forms like `dd:mm:ss.s`, `hh:mm`, `d.ddd` or `x.xx`")
    )]
    InvalidFormatSpec {
        spec: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("{reason}")]
        span: SourceSpan,
        reason: String,
    },

    #[error("cannot read tick label: {text:?}")]
    #[diagnostic(code(coordaxes::format::invalid_label))]
    InvalidLabel {
        text: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("{reason}")]
        span: SourceSpan,
        reason: String,
    },

    #[error("cannot use {unit} values with `{format}` formatting")]
    #[diagnostic(
        code(coordaxes::format::unsupported_unit),
        help("angular formats need angle units; `x` formats need dimensionless values")
    )]
    UnsupportedUnitForFormat { unit: Unit, format: String },

    #[error("empty coordinate range [{min}, {max}]")]
    #[diagnostic(code(coordaxes::locate::empty_range))]
    EmptyRange { min: f64, max: f64 },

    #[error("tick spacing must be positive, got {spacing}")]
    #[diagnostic(code(coordaxes::locate::non_positive_spacing))]
    NonPositiveSpacing { spacing: Quantity },

    #[error("{count} ticks requested, the limit is {limit}")]
    #[diagnostic(
        code(coordaxes::locate::too_many_ticks),
        help("use a coarser spacing or a narrower range")
    )]
    TooManyTicks { count: u64, limit: usize },

    #[error("conflicting tick settings: {supplied}")]
    #[diagnostic(
        code(coordaxes::ticks::conflicting),
        help("set at most one of values, spacing or number per call")
    )]
    ConflictingTickSpec { supplied: String },

    #[error("invalid edge set: {edges:?}")]
    #[diagnostic(
        code(coordaxes::edges::invalid),
        help("use any combination of l, b, r, t (or `all` for ticks)")
    )]
    InvalidEdgeSet {
        edges: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("{reason}")]
        span: SourceSpan,
        reason: String,
    },

    #[error("unknown line style: {style:?}")]
    #[diagnostic(
        code(coordaxes::style::line_style),
        help("use solid, dashed, dotted, dashdot or `-`, `--`, `:`, `-.`")
    )]
    InvalidLineStyle { style: String },

    #[error("unknown coordinate name: {name}")]
    #[diagnostic(code(coordaxes::coords::unknown_name))]
    UnknownCoordinateName {
        name: String,
        #[help]
        suggestion: Option<String>,
    },

    #[error("coordinate index {index} out of range")]
    #[diagnostic(
        code(coordaxes::coords::index_out_of_range),
        help("only {count} coordinates exist")
    )]
    CoordinateIndexOutOfRange { index: usize, count: usize },

    #[error("invalid numeric value: {0}")]
    #[diagnostic(code(coordaxes::numeric))]
    Numeric(#[from] NumericError),
}

impl AxisError {
    /// Build an error pointing at `offset` inside `input`.
    pub(crate) fn invalid_spec(input: &str, offset: usize, reason: impl Into<String>) -> Self {
        AxisError::InvalidFormatSpec {
            spec: input.to_string(),
            src: NamedSource::new("format spec", input.to_string()),
            span: point_span(input, offset),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_label(input: &str, offset: usize, reason: impl Into<String>) -> Self {
        AxisError::InvalidLabel {
            text: input.to_string(),
            src: NamedSource::new("label", input.to_string()),
            span: point_span(input, offset),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_edges(input: &str, offset: usize, len: usize, reason: impl Into<String>) -> Self {
        AxisError::InvalidEdgeSet {
            edges: input.to_string(),
            src: NamedSource::new("edges", input.to_string()),
            span: (offset, len).into(),
            reason: reason.into(),
        }
    }
}

/// One-character span at `offset`, or an empty span at the end of input.
fn point_span(input: &str, offset: usize) -> SourceSpan {
    let offset = offset.min(input.len());
    let len = input[offset..].chars().next().map_or(0, char::len_utf8);
    (offset, len).into()
}
