//! Tick location: turn a visible range and a [`TickSpec`] into tick values.
//!
//! Angular ranges are given in degrees whatever the axis prime unit is; scalar
//! ranges are raw values. Ticks come back as [`Quantity`] values built from
//! integer multiples of the step, so `k × 10′` never accumulates error.

use crate::coords::defaults::{DEFAULT_TICK_COUNT, MAX_TICKS};
use crate::errors::AxisError;
use crate::types::{Quantity, Unit};

/// Degrees in one full turn
const FULL_TURN: f64 = 360.0;

/// Relative slack used when testing whether a tick sits on a range endpoint
const ENDPOINT_TOLERANCE: f64 = 1e-9;

/// Sexagesimal ladder rungs shared by degrees, minutes and seconds
const SEXAGESIMAL_RUNGS: [f64; 7] = [30.0, 20.0, 15.0, 10.0, 5.0, 2.0, 1.0];

/// How ticks are requested. Exactly one mode is active.
#[derive(Debug, Clone, PartialEq)]
pub enum TickSpec {
    /// These values, filtered to the visible range, in the order given
    Explicit(Vec<Quantity>),
    /// Every integer multiple of the step inside the range
    BySpacing(Quantity),
    /// Roughly this many ticks, on a "nice" step
    ByCount(usize),
}

impl Default for TickSpec {
    fn default() -> Self {
        TickSpec::ByCount(DEFAULT_TICK_COUNT)
    }
}

/// Visible world range of one coordinate.
///
/// For wrapping coordinates `max < min` means the range crosses 0°/360°.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleRange {
    pub min: f64,
    pub max: f64,
}

impl VisibleRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Ordered `(lo, hi)` bounds. Wrapping ranges may run past 360 so that
    /// `lo < hi` always holds.
    fn bounds(self, wraps: bool) -> (f64, f64) {
        if wraps {
            let mut span = self.max - self.min;
            if span < 0.0 {
                span += FULL_TURN;
            }
            (self.min, self.min + span.min(FULL_TURN))
        } else {
            (self.min.min(self.max), self.min.max(self.max))
        }
    }
}

/// What kind of values an axis carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    /// Angles, labelled in the given prime unit (degrees or hours)
    Angular(Unit),
    Scalar,
}

impl AxisKind {
    /// Position of `value` in range units: degrees, or the raw scalar.
    pub fn world_value(self, value: Quantity) -> Option<f64> {
        match self {
            AxisKind::Angular(_) => value.to_degrees(),
            AxisKind::Scalar if value.unit() == Unit::Dimensionless => Some(value.value()),
            AxisKind::Scalar => None,
        }
    }

    /// A quantity from a value in range units
    pub fn quantity(self, world: f64) -> Quantity {
        match self {
            AxisKind::Angular(_) => Quantity::degrees(world),
            AxisKind::Scalar => Quantity::scalar(world),
        }
    }

    pub fn is_angular(self) -> bool {
        matches!(self, AxisKind::Angular(_))
    }
}

/// Tick values together with the step that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticks {
    pub values: Vec<Quantity>,
    /// `None` for explicit ticks with fewer than two distinct values
    pub spacing: Option<Quantity>,
}

/// Chooses tick values along one coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct TickLocator {
    kind: AxisKind,
    base_spacing: Option<Quantity>,
}

impl TickLocator {
    pub fn new(kind: AxisKind) -> Self {
        Self {
            kind,
            base_spacing: None,
        }
    }

    /// Smallest step the label format can show; finer ladder steps are skipped.
    pub fn with_base_spacing(mut self, base: Option<Quantity>) -> Self {
        self.base_spacing = base;
        self
    }

    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    pub fn locate(&self, range: VisibleRange, spec: &TickSpec, wraps: bool) -> Result<Vec<Quantity>, AxisError> {
        Ok(self.ticks(range, spec, wraps)?.values)
    }

    pub fn ticks(&self, range: VisibleRange, spec: &TickSpec, wraps: bool) -> Result<Ticks, AxisError> {
        if !range.min.is_finite() || !range.max.is_finite() || range.min == range.max {
            return Err(AxisError::EmptyRange {
                min: range.min,
                max: range.max,
            });
        }
        let wraps = wraps && self.kind.is_angular();
        let (lo, hi) = range.bounds(wraps);

        match spec {
            TickSpec::Explicit(values) => self.explicit(lo, hi, values, wraps),
            TickSpec::BySpacing(step) => {
                let step_world = self.validate_step(*step)?;
                self.multiples(lo, hi, *step, step_world, wraps)
            }
            TickSpec::ByCount(count) => {
                let (step, step_world) = self.choose_step(lo, hi, (*count).max(1));
                self.multiples(lo, hi, step, step_world, wraps)
            }
        }
    }

    /// Step size in range units, after checking sign and unit kind.
    pub(crate) fn validate_step(&self, step: Quantity) -> Result<f64, AxisError> {
        let world = self
            .kind
            .world_value(step)
            .ok_or(AxisError::UnsupportedUnitForFormat {
                unit: step.unit(),
                format: self.kind_name().to_string(),
            })?;
        if !(world.is_finite() && world > 0.0) {
            return Err(AxisError::NonPositiveSpacing { spacing: step });
        }
        Ok(world)
    }

    fn kind_name(&self) -> &'static str {
        match self.kind {
            AxisKind::Angular(_) => "angular axis",
            AxisKind::Scalar => "scalar axis",
        }
    }

    fn explicit(&self, lo: f64, hi: f64, values: &[Quantity], wraps: bool) -> Result<Ticks, AxisError> {
        let tol = ENDPOINT_TOLERANCE * (hi - lo);
        let mut kept = Vec::new();
        let mut worlds = Vec::new();
        for value in values {
            let world = self
                .kind
                .world_value(*value)
                .ok_or(AxisError::UnsupportedUnitForFormat {
                    unit: value.unit(),
                    format: self.kind_name().to_string(),
                })?;
            let inside = if wraps {
                (world - lo).rem_euclid(FULL_TURN) <= hi - lo + tol
            } else {
                world >= lo - tol && world <= hi + tol
            };
            if inside {
                kept.push(*value);
                worlds.push(world);
            }
        }

        worlds.sort_by(f64::total_cmp);
        let spacing = worlds
            .windows(2)
            .map(|w| w[1] - w[0])
            .filter(|gap| *gap > tol)
            .min_by(f64::total_cmp)
            .map(|gap| self.kind.quantity(gap));

        crate::log::debug!(given = values.len(), kept = kept.len(), "explicit ticks");
        Ok(Ticks { values: kept, spacing })
    }

    fn multiples(&self, lo: f64, hi: f64, step: Quantity, step_world: f64, wraps: bool) -> Result<Ticks, AxisError> {
        let (first, last) = multiple_bounds(lo, hi, step_world);
        let count = last - first + 1.0;
        if count > MAX_TICKS as f64 {
            return Err(AxisError::TooManyTicks {
                count: count as u64,
                limit: MAX_TICKS,
            });
        }
        if count < 1.0 {
            return Ok(Ticks {
                values: Vec::new(),
                spacing: Some(step),
            });
        }

        let (first, last) = (first as i64, last as i64);
        let mut values: Vec<Quantity> = (first..=last).map(|k| step * k as f64).collect();
        if wraps {
            values = values.into_iter().map(Quantity::wrapped).collect();
            // A full turn puts the last tick back on the first
            let covered = (last - first) as f64 * step_world;
            if values.len() > 1 && (covered - FULL_TURN).abs() <= ENDPOINT_TOLERANCE * FULL_TURN {
                values.pop();
            }
        }

        crate::log::debug!(step = %step, count = values.len(), "located ticks");
        Ok(Ticks {
            values,
            spacing: Some(step),
        })
    }

    /// Pick the ladder step whose tick count inside `[lo, hi]` best matches `count`.
    fn choose_step(&self, lo: f64, hi: f64, count: usize) -> (Quantity, f64) {
        let target = (hi - lo) / count as f64;
        let base = self
            .base_spacing
            .and_then(|b| self.kind.world_value(b).map(|w| (b, w)))
            .filter(|(_, w)| *w > 0.0);

        if let Some((base, base_world)) = base {
            if target < base_world {
                crate::log::debug!(%base, "tick step limited by label precision");
                return (base, base_world);
            }
        }

        let floor = base.map_or(0.0, |(_, w)| w * (1.0 - ENDPOINT_TOLERANCE));
        let candidates: Vec<(Quantity, f64, usize)> = self
            .ladder(target)
            .into_iter()
            .filter_map(|q| self.kind.world_value(q).map(|w| (q, w)))
            .filter(|(_, w)| *w >= floor)
            .map(|(q, w)| {
                let (first, last) = multiple_bounds(lo, hi, w);
                (q, w, (last - first + 1.0).max(0.0) as usize)
            })
            .collect();

        let miss = |ticks: usize| ticks.abs_diff(count);
        // Ladders run coarse to fine, and min_by_key keeps the first minimum
        let chosen = candidates
            .iter()
            .filter(|(_, _, ticks)| *ticks <= count + 1)
            .min_by_key(|(_, _, ticks)| miss(*ticks))
            .or_else(|| candidates.iter().min_by_key(|(_, _, ticks)| miss(*ticks)));

        match chosen {
            Some((step, world, _)) => (*step, *world),
            None => match base {
                Some(base) => base,
                None => (self.kind.quantity(target), target),
            },
        }
    }

    /// Candidate steps, coarsest first.
    fn ladder(&self, target: f64) -> Vec<Quantity> {
        match self.kind {
            AxisKind::Angular(Unit::Hour) => hour_ladder(),
            AxisKind::Angular(_) => degree_ladder(),
            AxisKind::Scalar => scalar_ladder(target),
        }
    }
}

fn degree_ladder() -> Vec<Quantity> {
    let mut ladder: Vec<Quantity> = [90.0, 45.0, 30.0, 20.0, 15.0, 10.0, 5.0, 2.0, 1.0]
        .into_iter()
        .map(Quantity::degrees)
        .collect();
    ladder.extend(SEXAGESIMAL_RUNGS.map(Quantity::arcmin));
    ladder.extend(SEXAGESIMAL_RUNGS.map(Quantity::arcsec));
    ladder.extend(fractional_seconds(1.0));
    ladder
}

/// Hours, then minutes and seconds of time as exact multiples of 15 arc units.
fn hour_ladder() -> Vec<Quantity> {
    let mut ladder: Vec<Quantity> = [6.0, 4.0, 3.0, 2.0, 1.0].into_iter().map(Quantity::hours).collect();
    ladder.extend(SEXAGESIMAL_RUNGS.map(|m| Quantity::arcmin(15.0 * m)));
    ladder.extend(SEXAGESIMAL_RUNGS.map(|s| Quantity::arcsec(15.0 * s)));
    ladder.extend(fractional_seconds(15.0));
    ladder
}

/// `{5, 2, 1} × 10⁻ᵏ` seconds for k in 1..=6, scaled by `scale` arcseconds.
fn fractional_seconds(scale: f64) -> impl Iterator<Item = Quantity> {
    (1..=6).flat_map(move |k| {
        let decade = 10_f64.powi(-k);
        [5.0, 2.0, 1.0].map(|m| Quantity::arcsec(scale * m * decade))
    })
}

/// Lowest and highest `k` with `k × step` inside `[lo, hi]`, endpoints included.
/// `first > last` when no multiple lands in the range.
fn multiple_bounds(lo: f64, hi: f64, step: f64) -> (f64, f64) {
    let tol = ENDPOINT_TOLERANCE * (hi - lo).max(step);
    (((lo - tol) / step).ceil(), ((hi + tol) / step).floor())
}

/// `{1, 2, 5} × 10ᵉ` around the target step.
fn scalar_ladder(target: f64) -> Vec<Quantity> {
    let exponent = if target > 0.0 && target.is_finite() {
        target.log10().floor() as i32
    } else {
        0
    };
    let mut ladder: Vec<Quantity> = ((exponent - 1)..=(exponent + 1))
        .flat_map(|e| {
            let decade = 10_f64.powi(e);
            [1.0, 2.0, 5.0].map(|m| Quantity::scalar(m * decade))
        })
        .collect();
    ladder.reverse();
    ladder
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar() -> TickLocator {
        TickLocator::new(AxisKind::Scalar)
    }

    fn degrees() -> TickLocator {
        TickLocator::new(AxisKind::Angular(Unit::Degree))
    }

    fn values(ticks: &[Quantity]) -> Vec<f64> {
        ticks.iter().map(|q| q.value()).collect()
    }

    #[test]
    fn by_count_scalar() {
        let ticks = scalar()
            .ticks(VisibleRange::new(0.0, 100.0), &TickSpec::ByCount(4), false)
            .unwrap();
        assert_eq!(values(&ticks.values), vec![0.0, 50.0, 100.0]);
        assert_eq!(ticks.spacing, Some(Quantity::scalar(50.0)));
    }

    #[test]
    fn by_count_ties_prefer_fewer_ticks() {
        // 20° gives 3 ticks, 10° gives 5: both one away from 4
        let ticks = degrees()
            .locate(VisibleRange::new(0.0, 40.0), &TickSpec::ByCount(4), false)
            .unwrap();
        assert_eq!(values(&ticks), vec![0.0, 20.0, 40.0]);
    }

    #[test]
    fn by_count_counts_multiples_inside_unaligned_range() {
        // 500 and 100 have no multiple in [5, 95]; 50 has exactly one
        let ticks = scalar()
            .ticks(VisibleRange::new(5.0, 95.0), &TickSpec::ByCount(1), false)
            .unwrap();
        assert_eq!(values(&ticks.values), vec![50.0]);
        assert_eq!(ticks.spacing, Some(Quantity::scalar(50.0)));

        // 90° has no multiple in [1, 89]; 45° has one
        let ticks = degrees()
            .ticks(VisibleRange::new(1.0, 89.0), &TickSpec::ByCount(1), false)
            .unwrap();
        assert_eq!(ticks.values, vec![Quantity::degrees(45.0)]);
    }

    #[test]
    fn by_count_scores_the_ticks_actually_placed() {
        // By span alone 10 looks like 2 ticks, yet only 10 itself lands in [1, 19]
        let ticks = scalar()
            .locate(VisibleRange::new(1.0, 19.0), &TickSpec::ByCount(3), false)
            .unwrap();
        assert_eq!(values(&ticks), vec![5.0, 10.0, 15.0]);
        assert!(ticks.iter().all(|t| (1.0..=19.0).contains(&t.value())));
    }

    #[test]
    fn by_count_zero_behaves_like_one() {
        let ticks = scalar()
            .locate(VisibleRange::new(0.0, 10.0), &TickSpec::ByCount(0), false)
            .unwrap();
        assert_eq!(ticks.len(), 1);
    }

    #[test]
    fn hour_axis_steps_in_hours() {
        let locator = TickLocator::new(AxisKind::Angular(Unit::Hour));
        let ticks = locator
            .locate(VisibleRange::new(0.0, 90.0), &TickSpec::ByCount(5), false)
            .unwrap();
        assert_eq!(ticks, vec![Quantity::hours(0.0), Quantity::hours(2.0), Quantity::hours(4.0), Quantity::hours(6.0)]);
    }

    #[test]
    fn by_count_falls_to_arcminutes() {
        let ticks = degrees()
            .ticks(VisibleRange::new(10.0, 11.0), &TickSpec::ByCount(5), false)
            .unwrap();
        assert_eq!(ticks.spacing, Some(Quantity::arcmin(15.0)));
        assert_eq!(ticks.values.len(), 5);
        assert_eq!(ticks.values[0], Quantity::arcmin(600.0));
    }

    #[test]
    fn base_spacing_limits_step() {
        let locator = degrees().with_base_spacing(Some(Quantity::arcmin(1.0)));
        let ticks = locator
            .ticks(VisibleRange::new(0.0, 0.01), &TickSpec::ByCount(5), false)
            .unwrap();
        assert_eq!(ticks.spacing, Some(Quantity::arcmin(1.0)));
        assert_eq!(ticks.values, vec![Quantity::arcmin(0.0)]);
    }

    #[test]
    fn spacing_uses_integer_multiples() {
        let ticks = degrees()
            .locate(VisibleRange::new(0.0, 1.0), &TickSpec::BySpacing(Quantity::arcmin(10.0)), false)
            .unwrap();
        let expected: Vec<Quantity> = (0..=6).map(|k| Quantity::arcmin(10.0 * k as f64)).collect();
        assert_eq!(ticks, expected);
    }

    #[test]
    fn spacing_keeps_endpoint_ticks() {
        let ticks = scalar()
            .locate(VisibleRange::new(0.0, 0.3), &TickSpec::BySpacing(Quantity::scalar(0.1)), false)
            .unwrap();
        assert_eq!(ticks.len(), 4);
    }

    #[test]
    fn reversed_range_is_reordered_without_wrap() {
        let ticks = scalar()
            .locate(VisibleRange::new(10.0, 0.0), &TickSpec::BySpacing(Quantity::scalar(5.0)), false)
            .unwrap();
        assert_eq!(values(&ticks), vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn wrapping_range_crosses_zero() {
        let ticks = degrees()
            .locate(VisibleRange::new(350.0, 10.0), &TickSpec::BySpacing(Quantity::degrees(5.0)), true)
            .unwrap();
        assert_eq!(values(&ticks), vec![350.0, 355.0, 0.0, 5.0, 10.0]);
    }

    #[test]
    fn full_turn_drops_duplicate_tick() {
        let ticks = degrees()
            .locate(VisibleRange::new(0.0, 360.0), &TickSpec::BySpacing(Quantity::degrees(90.0)), true)
            .unwrap();
        assert_eq!(values(&ticks), vec![0.0, 90.0, 180.0, 270.0]);
    }

    #[test]
    fn explicit_values_keep_order() {
        let given = vec![
            Quantity::degrees(10.0),
            Quantity::degrees(5.0),
            Quantity::degrees(400.0),
            Quantity::degrees(-3.0),
        ];
        let ticks = degrees()
            .ticks(VisibleRange::new(0.0, 20.0), &TickSpec::Explicit(given), false)
            .unwrap();
        assert_eq!(values(&ticks.values), vec![10.0, 5.0]);
        assert_eq!(ticks.spacing, Some(Quantity::degrees(5.0)));
    }

    #[test]
    fn explicit_values_wrap() {
        let given = vec![
            Quantity::degrees(355.0),
            Quantity::degrees(5.0),
            Quantity::degrees(20.0),
            Quantity::degrees(-2.0),
        ];
        let ticks = degrees()
            .locate(VisibleRange::new(350.0, 10.0), &TickSpec::Explicit(given), true)
            .unwrap();
        assert_eq!(values(&ticks), vec![355.0, 5.0, -2.0]);
    }

    #[test]
    fn single_explicit_value_has_no_spacing() {
        let ticks = scalar()
            .ticks(VisibleRange::new(0.0, 1.0), &TickSpec::Explicit(vec![Quantity::scalar(0.5)]), false)
            .unwrap();
        assert_eq!(ticks.spacing, None);
    }

    #[test]
    fn empty_range_is_rejected() {
        let result = scalar().locate(VisibleRange::new(1.0, 1.0), &TickSpec::default(), false);
        assert!(matches!(result, Err(AxisError::EmptyRange { .. })));
        let result = scalar().locate(VisibleRange::new(f64::NAN, 1.0), &TickSpec::default(), false);
        assert!(matches!(result, Err(AxisError::EmptyRange { .. })));
    }

    #[test]
    fn bad_spacing_is_rejected() {
        let range = VisibleRange::new(0.0, 10.0);
        let result = degrees().locate(range, &TickSpec::BySpacing(Quantity::degrees(0.0)), false);
        assert!(matches!(result, Err(AxisError::NonPositiveSpacing { .. })));
        let result = degrees().locate(range, &TickSpec::BySpacing(Quantity::degrees(-1.0)), false);
        assert!(matches!(result, Err(AxisError::NonPositiveSpacing { .. })));
        let result = degrees().locate(range, &TickSpec::BySpacing(Quantity::scalar(1.0)), false);
        assert!(matches!(result, Err(AxisError::UnsupportedUnitForFormat { .. })));
        let result = scalar().locate(range, &TickSpec::BySpacing(Quantity::degrees(1.0)), false);
        assert!(matches!(result, Err(AxisError::UnsupportedUnitForFormat { .. })));
    }

    #[test]
    fn too_many_ticks_is_rejected() {
        let result = scalar().locate(
            VisibleRange::new(0.0, 1e6),
            &TickSpec::BySpacing(Quantity::scalar(0.01)),
            false,
        );
        assert!(matches!(result, Err(AxisError::TooManyTicks { limit: MAX_TICKS, .. })));
    }

    #[test]
    fn ladders_run_coarse_to_fine() {
        for ladder in [degree_ladder(), hour_ladder(), scalar_ladder(3.0)] {
            let degrees: Vec<f64> = ladder
                .iter()
                .map(|q| q.to_degrees().unwrap_or(q.value()))
                .collect();
            assert!(degrees.windows(2).all(|w| w[0] > w[1]), "{degrees:?}");
        }
    }
}
