//! Frame edges and edge-placement strings (`"lb"`, `"all"`, ...)

use std::fmt;

use crate::errors::AxisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Bottom,
    Right,
    Top,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Bottom, Edge::Right, Edge::Top];

    pub fn letter(self) -> char {
        match self {
            Edge::Left => 'l',
            Edge::Bottom => 'b',
            Edge::Right => 'r',
            Edge::Top => 't',
        }
    }

    pub fn from_letter(letter: char) -> Option<Edge> {
        match letter {
            'l' => Some(Edge::Left),
            'b' => Some(Edge::Bottom),
            'r' => Some(Edge::Right),
            't' => Some(Edge::Top),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// A subset of the four frame edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EdgeSet(u8);

impl EdgeSet {
    pub const EMPTY: EdgeSet = EdgeSet(0);
    pub const FULL: EdgeSet = EdgeSet(0b1111);

    pub fn single(edge: Edge) -> EdgeSet {
        EdgeSet(edge.bit())
    }

    pub fn with(self, edge: Edge) -> EdgeSet {
        EdgeSet(self.0 | edge.bit())
    }

    pub fn contains(self, edge: Edge) -> bool {
        self.0 & edge.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Edge> {
        Edge::ALL.into_iter().filter(move |e| self.contains(*e))
    }
}

impl fmt::Display for EdgeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for edge in self.iter() {
            write!(f, "{}", edge.letter())?;
        }
        Ok(())
    }
}

/// Where an element is drawn: a set of edges, or every edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgePlacement {
    All,
    Edges(EdgeSet),
}

impl EdgePlacement {
    pub const NONE: EdgePlacement = EdgePlacement::Edges(EdgeSet::EMPTY);

    pub fn single(edge: Edge) -> EdgePlacement {
        EdgePlacement::Edges(EdgeSet::single(edge))
    }

    /// Parse an edge string over `l b r t`.
    ///
    /// `all` is only accepted when `allow_all` is set (ticks and grid). Repeated
    /// letters are harmless; the empty string places nothing.
    pub fn parse(text: &str, allow_all: bool) -> Result<EdgePlacement, AxisError> {
        if text == "all" {
            return if allow_all {
                Ok(EdgePlacement::All)
            } else {
                Err(AxisError::invalid_edges(text, 0, text.len(), "`all` is only valid for ticks"))
            };
        }
        let mut set = EdgeSet::EMPTY;
        for (offset, letter) in text.char_indices() {
            let edge = Edge::from_letter(letter).ok_or_else(|| {
                AxisError::invalid_edges(text, offset, letter.len_utf8(), "expected one of l, b, r, t")
            })?;
            set = set.with(edge);
        }
        Ok(EdgePlacement::Edges(set))
    }

    /// The concrete edges this placement covers
    pub fn edges(self) -> EdgeSet {
        match self {
            EdgePlacement::All => EdgeSet::FULL,
            EdgePlacement::Edges(set) => set,
        }
    }

    pub fn contains(self, edge: Edge) -> bool {
        self.edges().contains(edge)
    }
}

impl fmt::Display for EdgePlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgePlacement::All => f.write_str("all"),
            EdgePlacement::Edges(set) => write!(f, "{set}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_letter_combinations() {
        let placement = EdgePlacement::parse("lbrt", false).unwrap();
        assert_eq!(placement.edges(), EdgeSet::FULL);
        let placement = EdgePlacement::parse("tb", false).unwrap();
        assert!(placement.contains(Edge::Top));
        assert!(placement.contains(Edge::Bottom));
        assert!(!placement.contains(Edge::Left));
        assert_eq!(placement.to_string(), "bt");
    }

    #[test]
    fn all_only_where_allowed() {
        assert_eq!(EdgePlacement::parse("all", true).unwrap(), EdgePlacement::All);
        assert!(matches!(
            EdgePlacement::parse("all", false),
            Err(AxisError::InvalidEdgeSet { .. })
        ));
    }

    #[test]
    fn empty_string_places_nothing() {
        let placement = EdgePlacement::parse("", false).unwrap();
        assert_eq!(placement, EdgePlacement::NONE);
        assert!(placement.edges().is_empty());
    }

    #[test]
    fn bad_letter_is_labelled() {
        let Err(AxisError::InvalidEdgeSet { span, .. }) = EdgePlacement::parse("lbx", true) else {
            panic!("expected InvalidEdgeSet");
        };
        assert_eq!(span.offset(), 2);
        assert_eq!(span.len(), 1);
        assert!(EdgePlacement::parse("xyz", true).is_err());
    }

    #[test]
    fn set_iterates_in_canonical_order() {
        let set = EdgeSet::single(Edge::Top).with(Edge::Left);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Edge::Left, Edge::Top]);
    }
}
