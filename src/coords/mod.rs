//! Per-coordinate configuration: tick request, label format, edge placement
//! and styles.
//!
//! Setters validate and mutate in place; nothing is drawn until
//! [`set::CoordinateHelperSet::draw`] reads the state back.

pub mod defaults;
pub mod edges;
pub mod set;
pub mod style;

pub use edges::{Edge, EdgePlacement, EdgeSet};
pub use style::{GridOptions, GridStyle, LineStyle, TickOptions, TickStyle};

use crate::errors::AxisError;
use crate::format::{MajorFormatter, SexagesimalFormatter, TickFormatter, auto_format};
use crate::locate::{AxisKind, TickLocator, TickSpec, Ticks, VisibleRange};
use crate::parse::{FormatSpec, parse};
use crate::types::{Quantity, Unit};

/// Role of a coordinate in its frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateType {
    /// Angular and wrapping (RA, galactic longitude)
    Longitude,
    /// Angular, bounded to ±90°
    Latitude,
    Scalar,
}

impl CoordinateType {
    pub fn wraps(self) -> bool {
        self == CoordinateType::Longitude
    }

    pub fn is_angular(self) -> bool {
        self != CoordinateType::Scalar
    }
}

/// What `set_major_formatter` accepts.
pub enum FormatterChoice {
    /// A format spec string, parsed on use
    Spec(String),
    Parsed(FormatSpec),
    Custom(Box<dyn TickFormatter>),
}

impl FormatterChoice {
    pub fn custom(formatter: impl TickFormatter + 'static) -> Self {
        FormatterChoice::Custom(Box::new(formatter))
    }
}

impl From<&str> for FormatterChoice {
    fn from(spec: &str) -> Self {
        FormatterChoice::Spec(spec.to_string())
    }
}

impl From<String> for FormatterChoice {
    fn from(spec: String) -> Self {
        FormatterChoice::Spec(spec)
    }
}

impl From<FormatSpec> for FormatterChoice {
    fn from(spec: FormatSpec) -> Self {
        FormatterChoice::Parsed(spec)
    }
}

/// Everything needed to tick, label and grid one world coordinate.
#[derive(Debug)]
pub struct CoordinateHelper {
    index: usize,
    name: Option<String>,
    coord_type: CoordinateType,
    prime: Unit,
    formatter: Option<MajorFormatter>,
    ticks: TickSpec,
    tick_style: TickStyle,
    ticks_position: EdgePlacement,
    ticklabel_position: EdgePlacement,
    axislabel_position: EdgePlacement,
    grid_style: GridStyle,
    grid_enabled: bool,
    axis_label: String,
}

impl CoordinateHelper {
    /// A helper for the coordinate at `index` in its frame.
    ///
    /// The ordinal decides default label edges: 0 labels the bottom, 1 the
    /// left, later coordinates nothing. `prime` picks degrees or hours for
    /// angular coordinates and is ignored for scalars.
    pub fn new(index: usize, coord_type: CoordinateType, prime: Unit) -> Self {
        let prime = match (coord_type, prime) {
            (CoordinateType::Scalar, _) => Unit::Dimensionless,
            (_, Unit::Hour) => Unit::Hour,
            _ => Unit::Degree,
        };
        let label_edge = match index {
            0 => EdgePlacement::single(Edge::Bottom),
            1 => EdgePlacement::single(Edge::Left),
            _ => EdgePlacement::NONE,
        };
        Self {
            index,
            name: None,
            coord_type,
            prime,
            formatter: None,
            ticks: TickSpec::default(),
            tick_style: TickStyle::default(),
            ticks_position: EdgePlacement::All,
            ticklabel_position: label_edge,
            axislabel_position: label_edge,
            grid_style: GridStyle::default(),
            grid_enabled: false,
            axis_label: String::new(),
        }
    }

    pub(crate) fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn coord_type(&self) -> CoordinateType {
        self.coord_type
    }

    pub fn prime(&self) -> Unit {
        self.prime
    }

    pub fn kind(&self) -> AxisKind {
        match self.coord_type {
            CoordinateType::Scalar => AxisKind::Scalar,
            _ => AxisKind::Angular(self.prime),
        }
    }

    pub fn formatter(&self) -> Option<&MajorFormatter> {
        self.formatter.as_ref()
    }

    pub fn ticks(&self) -> &TickSpec {
        &self.ticks
    }

    pub fn tick_style(&self) -> &TickStyle {
        &self.tick_style
    }

    pub fn ticks_position(&self) -> EdgePlacement {
        self.ticks_position
    }

    pub fn ticklabel_position(&self) -> EdgePlacement {
        self.ticklabel_position
    }

    pub fn axislabel_position(&self) -> EdgePlacement {
        self.axislabel_position
    }

    pub fn grid_style(&self) -> &GridStyle {
        &self.grid_style
    }

    pub fn grid_enabled(&self) -> bool {
        self.grid_enabled
    }

    pub fn axis_label(&self) -> &str {
        &self.axis_label
    }

    pub fn set_axislabel(&mut self, text: impl Into<String>) {
        self.axis_label = text.into();
    }

    /// Replace the label formatter.
    ///
    /// Spec strings and parsed specs must match the coordinate kind. A tick
    /// spacing the new format cannot represent is snapped to a multiple of
    /// its precision.
    pub fn set_major_formatter(&mut self, choice: impl Into<FormatterChoice>) -> Result<(), AxisError> {
        let formatter = match choice.into() {
            FormatterChoice::Spec(text) => self.spec_formatter(parse(&text)?)?,
            FormatterChoice::Parsed(spec) => self.spec_formatter(spec)?,
            FormatterChoice::Custom(custom) => MajorFormatter::Custom(custom),
        };
        if let Some(spec) = formatter.spec() {
            self.snap_spacing(spec.base_spacing());
        }
        self.formatter = Some(formatter);
        Ok(())
    }

    fn spec_formatter(&self, spec: FormatSpec) -> Result<MajorFormatter, AxisError> {
        if spec.is_angular() != self.coord_type.is_angular() {
            return Err(AxisError::UnsupportedUnitForFormat {
                unit: self.prime,
                format: spec.to_string(),
            });
        }
        Ok(MajorFormatter::Spec(
            SexagesimalFormatter::new(spec).wrapping(self.coord_type.wraps()),
        ))
    }

    fn snap_spacing(&mut self, base: Quantity) {
        let TickSpec::BySpacing(step) = self.ticks else {
            return;
        };
        let unit = if self.coord_type.is_angular() { Unit::Arcsec } else { Unit::Dimensionless };
        let (Some(step_size), Some(base_size)) = (step.in_unit(unit), base.in_unit(unit)) else {
            return;
        };
        let ratio = step_size / base_size;
        let multiple = ratio.round().max(1.0);
        if (ratio - multiple).abs() <= 1e-9 * ratio.max(1.0) {
            return;
        }
        let snapped = base * multiple;
        crate::log::warn!(
            from = %step,
            to = %snapped,
            "tick spacing is not a multiple of the format precision, resetting"
        );
        self.ticks = TickSpec::BySpacing(snapped);
    }

    /// Update the tick request and/or tick style. All-or-nothing.
    pub fn set_ticks(&mut self, options: TickOptions) -> Result<(), AxisError> {
        let spec = options.tick_spec()?;
        options.validate_style()?;
        if let Some(spec) = &spec {
            self.validate_tick_spec(spec)?;
        }
        options.apply_style(&mut self.tick_style);
        if let Some(spec) = spec {
            self.ticks = spec;
        }
        Ok(())
    }

    fn validate_tick_spec(&self, spec: &TickSpec) -> Result<(), AxisError> {
        let kind = self.kind();
        match spec {
            TickSpec::BySpacing(step) => TickLocator::new(kind).validate_step(*step).map(|_| ()),
            TickSpec::Explicit(values) => match values.iter().find(|v| kind.world_value(**v).is_none()) {
                Some(bad) => Err(AxisError::UnsupportedUnitForFormat {
                    unit: bad.unit(),
                    format: self.prime.to_string(),
                }),
                None => Ok(()),
            },
            TickSpec::ByCount(_) => Ok(()),
        }
    }

    /// Edges that get tick marks; `all` is accepted.
    pub fn set_ticks_position(&mut self, edges: &str) -> Result<(), AxisError> {
        self.ticks_position = EdgePlacement::parse(edges, true)?;
        Ok(())
    }

    pub fn set_ticklabel_position(&mut self, edges: &str) -> Result<(), AxisError> {
        self.ticklabel_position = EdgePlacement::parse(edges, false)?;
        Ok(())
    }

    pub fn set_axislabel_position(&mut self, edges: &str) -> Result<(), AxisError> {
        self.axislabel_position = EdgePlacement::parse(edges, false)?;
        Ok(())
    }

    /// Turn the grid on, merging `options` onto the current style.
    pub fn grid(&mut self, options: &GridOptions) -> Result<(), AxisError> {
        options.validate()?;
        options.apply(&mut self.grid_style);
        self.grid_enabled = true;
        Ok(())
    }

    pub fn set_grid_visible(&mut self, visible: bool) {
        self.grid_enabled = visible;
    }

    fn locator(&self) -> TickLocator {
        let base = self.formatter.as_ref().and_then(|f| f.spec()).map(FormatSpec::base_spacing);
        TickLocator::new(self.kind()).with_base_spacing(base)
    }

    /// Tick values for a visible range (degrees for angular coordinates).
    pub fn tick_values(&self, range: VisibleRange) -> Result<Ticks, AxisError> {
        self.locator().ticks(range, &self.ticks, self.coord_type.wraps())
    }

    /// Ticks paired with their label text.
    pub fn tick_labels(&self, range: VisibleRange) -> Result<Vec<(Quantity, String)>, AxisError> {
        let ticks = self.tick_values(range)?;
        let labels = self.format_ticks(&ticks)?;
        Ok(ticks.values.into_iter().zip(labels).collect())
    }

    pub(crate) fn format_ticks(&self, ticks: &Ticks) -> Result<Vec<String>, AxisError> {
        match &self.formatter {
            Some(formatter) => formatter.format_all(&ticks.values),
            None => SexagesimalFormatter::new(auto_format(self.kind(), ticks.spacing))
                .wrapping(self.coord_type.wraps())
                .format_all(&ticks.values),
        }
    }
}
