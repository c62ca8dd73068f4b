//! Drawing whole coordinate sets onto a recording surface.

use coordaxes::{
    AxisKind, CelestialFrame, Color, CoordinateHelperSet, DrawSurface, Edge, FormatSpec, GridOptions, PixelRect,
    Quantity, Stroke, TickLocator, TickOptions, TickSpec, Unit, VisibleRange, WorldTransform,
};
use glam::{DVec2, dvec2};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// `world = (pixel + 5) / 10` on both axes
struct Linear;

impl WorldTransform for Linear {
    fn world_to_pixel(&self, world: DVec2) -> Option<DVec2> {
        Some(world * 10.0 - 5.0)
    }
    fn pixel_to_world(&self, pixel: DVec2) -> Option<DVec2> {
        Some((pixel + 5.0) / 10.0)
    }
}

/// Longitude runs 340° → 20° left to right, latitude -5° → 5° bottom to top
struct AcrossZero;

impl WorldTransform for AcrossZero {
    fn world_to_pixel(&self, world: DVec2) -> Option<DVec2> {
        Some(dvec2((world.x - 340.0).rem_euclid(360.0) / 0.4, (world.y + 5.0) * 10.0))
    }
    fn pixel_to_world(&self, pixel: DVec2) -> Option<DVec2> {
        Some(dvec2((340.0 + pixel.x * 0.4).rem_euclid(360.0), pixel.y / 10.0 - 5.0))
    }
}

#[derive(Debug)]
struct Text {
    at: DVec2,
    text: String,
    edge: Edge,
}

#[derive(Default)]
struct Recording {
    lines: Vec<(Vec<DVec2>, Stroke)>,
    texts: Vec<Text>,
}

impl Recording {
    fn labels_on(&self, edge: Edge) -> Vec<&str> {
        self.texts
            .iter()
            .filter(|t| t.edge == edge)
            .map(|t| t.text.as_str())
            .collect()
    }

    fn lines_in(&self, color: &Color) -> Vec<&[DVec2]> {
        self.lines
            .iter()
            .filter(|(_, stroke)| &stroke.color == color)
            .map(|(points, _)| points.as_slice())
            .collect()
    }
}

impl DrawSurface for Recording {
    fn frame(&self) -> PixelRect {
        PixelRect::new(dvec2(0.0, 0.0), dvec2(100.0, 100.0))
    }

    fn draw_line(&mut self, points: &[DVec2], stroke: &Stroke) {
        self.lines.push((points.to_vec(), stroke.clone()));
    }

    fn draw_text(&mut self, at: DVec2, text: &str, edge: Edge, _color: &Color) {
        self.texts.push(Text {
            at,
            text: text.to_string(),
            edge,
        });
    }
}

fn pixel_set() -> CoordinateHelperSet {
    let mut set = CoordinateHelperSet::for_frame(CelestialFrame::Pixel);
    set[0]
        .set_ticks(TickOptions::new().spacing(Quantity::scalar(2.0)))
        .unwrap();
    set[1]
        .set_ticks(TickOptions::new().spacing(Quantity::scalar(5.0)).color("blue"))
        .unwrap();
    set
}

#[test]
fn pixel_axes_get_labels_on_their_default_edges() {
    init_tracing();
    let set = pixel_set();
    let mut surface = Recording::default();
    set.draw(&Linear, &mut surface).unwrap();

    assert_eq!(surface.labels_on(Edge::Bottom), ["2", "4", "6", "8", "10"]);
    assert_eq!(surface.labels_on(Edge::Left), ["5", "10"]);
    assert!(surface.labels_on(Edge::Top).is_empty());
    assert!(surface.labels_on(Edge::Right).is_empty());
}

#[test]
fn tick_marks_go_on_every_edge_the_coordinate_crosses() {
    let set = pixel_set();
    let mut surface = Recording::default();
    set.draw(&Linear, &mut surface).unwrap();

    // x crosses bottom and top, y crosses left and right
    assert_eq!(surface.lines_in(&Color::named("black")).len(), 10);
    let marks = surface.lines_in(&Color::named("blue"));
    assert_eq!(marks.len(), 4);

    // Marks point into the frame
    for mark in marks {
        let [start, end] = mark else {
            panic!("tick mark should be a single segment: {mark:?}");
        };
        assert!((start.distance(*end) - 7.0).abs() < 1e-9);
        assert!(end.x > 0.0 && end.x < 100.0, "{mark:?}");
    }
}

#[test]
fn tick_labels_sit_outside_the_frame() {
    let set = pixel_set();
    let mut surface = Recording::default();
    set.draw(&Linear, &mut surface).unwrap();

    let bottom: Vec<&Text> = surface.texts.iter().filter(|t| t.edge == Edge::Bottom).collect();
    assert!((bottom[0].at.x - 15.0).abs() < 1e-6, "{:?}", bottom[0]);
    assert!(bottom.iter().all(|t| t.at.y < 0.0));
    let left: Vec<&Text> = surface.texts.iter().filter(|t| t.edge == Edge::Left).collect();
    assert!(left.iter().all(|t| t.at.x < 0.0));
}

#[test]
fn axis_labels_are_drawn_last_at_edge_midpoints() {
    let mut set = pixel_set();
    set.set_xlabel("x pixel");
    let mut surface = Recording::default();
    set.draw(&Linear, &mut surface).unwrap();

    let last = surface.texts.last().unwrap();
    assert_eq!(last.text, "x pixel");
    assert_eq!(last.edge, Edge::Bottom);
    assert_eq!(last.at.x, 50.0);
    assert!(last.at.y < surface.texts[0].at.y);
    // No y label was set
    assert_eq!(surface.texts.iter().filter(|t| t.edge == Edge::Left).count(), 2);
}

#[test]
fn grid_lines_span_the_other_coordinate() {
    let mut set = pixel_set();
    set.grid(&GridOptions::new().color("red")).unwrap();
    let mut surface = Recording::default();
    set.draw(&Linear, &mut surface).unwrap();

    let grid = surface.lines_in(&Color::named("red"));
    assert_eq!(grid.len(), 7);
    let first = grid[0];
    assert!((first[0] - dvec2(15.0, 0.0)).length() < 1e-9, "{first:?}");
    assert!((first[first.len() - 1] - dvec2(15.0, 100.0)).length() < 1e-9, "{first:?}");
}

#[test]
fn moving_labels_to_another_edge() {
    let mut set = pixel_set();
    set[0].set_ticklabel_position("t").unwrap();
    set[1].set_ticks_position("l").unwrap();
    let mut surface = Recording::default();
    set.draw(&Linear, &mut surface).unwrap();

    assert_eq!(surface.labels_on(Edge::Top), ["2", "4", "6", "8", "10"]);
    assert!(surface.labels_on(Edge::Bottom).is_empty());
    assert_eq!(surface.lines_in(&Color::named("blue")).len(), 2);
}

#[test]
fn longitude_labels_wrap_through_zero() {
    init_tracing();
    let set = CoordinateHelperSet::for_frame(CelestialFrame::Galactic);
    let mut surface = Recording::default();
    set.draw(&AcrossZero, &mut surface).unwrap();

    let bottom = surface.labels_on(Edge::Bottom);
    assert_eq!(bottom, ["340d", "350d", "0d", "10d", "20d"]);

    let shape = regex_lite::Regex::new(r"^-?\d+d$").unwrap();
    let spec: FormatSpec = "dd".parse().unwrap();
    for label in bottom {
        assert!(shape.is_match(label), "{label}");
        let parsed = spec.parse_label(label).unwrap();
        assert_eq!(parsed.wrapped().to_degrees().unwrap() % 10.0, 0.0, "{label}");
    }

    // Latitude labels go on the left
    assert!(!surface.labels_on(Edge::Left).is_empty());
}

#[test]
fn overlay_set_labels_the_opposite_edges() {
    let set = CoordinateHelperSet::overlay(CelestialFrame::Galactic);
    let mut surface = Recording::default();
    set.draw(&AcrossZero, &mut surface).unwrap();

    assert_eq!(surface.labels_on(Edge::Top), ["340d", "350d", "0d", "10d", "20d"]);
    assert!(surface.labels_on(Edge::Bottom).is_empty());
    assert!(!surface.labels_on(Edge::Right).is_empty());
}

#[test]
fn standalone_locator_from_the_crate_root() {
    let locator = TickLocator::new(AxisKind::Angular(Unit::Degree));
    let ticks = locator
        .locate(VisibleRange::new(1.0, 89.0), &TickSpec::ByCount(1), false)
        .unwrap();
    assert_eq!(ticks, vec![Quantity::degrees(45.0)]);

    let ticks = TickLocator::new(AxisKind::Scalar)
        .ticks(VisibleRange::new(5.0, 95.0), &TickSpec::ByCount(1), false)
        .unwrap();
    assert_eq!(ticks.values, vec![Quantity::scalar(50.0)]);
}
