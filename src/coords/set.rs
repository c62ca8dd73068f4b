//! The coordinates of one frame, addressable by index or canonical name.

use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use crate::coords::{CoordinateHelper, CoordinateType, Edge, EdgePlacement, GridOptions};
use crate::errors::AxisError;
use crate::render::{self, DrawSurface, WorldTransform};
use crate::types::Unit;

/// Celestial frames with known coordinate names and types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CelestialFrame {
    Icrs,
    Fk5,
    Fk4,
    Galactic,
    /// Plain pixel axes; no canonical names
    Pixel,
}

impl CelestialFrame {
    /// Name, type and prime unit of each coordinate, in frame order.
    fn coordinates(self) -> [(Option<&'static str>, CoordinateType, Unit); 2] {
        match self {
            CelestialFrame::Icrs | CelestialFrame::Fk5 | CelestialFrame::Fk4 => [
                (Some("ra"), CoordinateType::Longitude, Unit::Hour),
                (Some("dec"), CoordinateType::Latitude, Unit::Degree),
            ],
            CelestialFrame::Galactic => [
                (Some("glon"), CoordinateType::Longitude, Unit::Degree),
                (Some("glat"), CoordinateType::Latitude, Unit::Degree),
            ],
            CelestialFrame::Pixel => [
                (None, CoordinateType::Scalar, Unit::Dimensionless),
                (None, CoordinateType::Scalar, Unit::Dimensionless),
            ],
        }
    }
}

/// Lookup key for [`CoordinateHelperSet::get`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinateKey {
    Index(usize),
    Name(String),
}

impl From<usize> for CoordinateKey {
    fn from(index: usize) -> Self {
        CoordinateKey::Index(index)
    }
}

impl From<&str> for CoordinateKey {
    fn from(name: &str) -> Self {
        CoordinateKey::Name(name.to_string())
    }
}

impl From<String> for CoordinateKey {
    fn from(name: String) -> Self {
        CoordinateKey::Name(name)
    }
}

#[derive(Debug, Default)]
pub struct CoordinateHelperSet {
    helpers: Vec<CoordinateHelper>,
    /// Only present when the frame defines canonical names
    names: Option<HashMap<String, usize>>,
}

impl CoordinateHelperSet {
    /// Collect helpers; named helpers populate the name table (first index
    /// wins on duplicates).
    pub fn new(helpers: Vec<CoordinateHelper>) -> Self {
        let mut names: HashMap<String, usize> = HashMap::new();
        for (index, helper) in helpers.iter().enumerate() {
            if let Some(name) = helper.name() {
                names.entry(name.to_string()).or_insert(index);
            }
        }
        let names = (!names.is_empty()).then_some(names);
        Self { helpers, names }
    }

    pub fn for_frame(frame: CelestialFrame) -> Self {
        let helpers = frame
            .coordinates()
            .into_iter()
            .enumerate()
            .map(|(index, (name, coord_type, prime))| {
                let helper = CoordinateHelper::new(index, coord_type, prime);
                match name {
                    Some(name) => helper.named(name),
                    None => helper,
                }
            })
            .collect();
        Self::new(helpers)
    }

    /// A second set drawn over an existing plot: labels go on top and right.
    pub fn overlay(frame: CelestialFrame) -> Self {
        let mut set = Self::for_frame(frame);
        for (helper, edge) in set.helpers.iter_mut().zip([Edge::Top, Edge::Right]) {
            helper.ticklabel_position = EdgePlacement::single(edge);
            helper.axislabel_position = EdgePlacement::single(edge);
        }
        set
    }

    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CoordinateHelper> {
        self.helpers.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CoordinateHelper> {
        self.helpers.iter_mut()
    }

    fn resolve(&self, key: CoordinateKey) -> Result<usize, AxisError> {
        match key {
            CoordinateKey::Index(index) if index < self.helpers.len() => Ok(index),
            CoordinateKey::Index(index) => Err(AxisError::CoordinateIndexOutOfRange {
                index,
                count: self.helpers.len(),
            }),
            CoordinateKey::Name(name) => match self.names.as_ref().and_then(|n| n.get(&name)) {
                Some(index) => Ok(*index),
                None => Err(AxisError::UnknownCoordinateName {
                    suggestion: Some(self.name_help()),
                    name,
                }),
            },
        }
    }

    fn name_help(&self) -> String {
        let known: Vec<&str> = self.helpers.iter().filter_map(|h| h.name()).collect();
        if known.is_empty() {
            "this frame has no coordinate names, use an index".to_string()
        } else {
            format!("known names: {}", known.join(", "))
        }
    }

    pub fn get(&self, key: impl Into<CoordinateKey>) -> Result<&CoordinateHelper, AxisError> {
        let index = self.resolve(key.into())?;
        Ok(&self.helpers[index])
    }

    pub fn get_mut(&mut self, key: impl Into<CoordinateKey>) -> Result<&mut CoordinateHelper, AxisError> {
        let index = self.resolve(key.into())?;
        Ok(&mut self.helpers[index])
    }

    /// Turn on the grid of every coordinate with the same options.
    pub fn grid(&mut self, options: &GridOptions) -> Result<(), AxisError> {
        options.validate()?;
        for helper in &mut self.helpers {
            helper.grid(options)?;
        }
        Ok(())
    }

    pub fn set_xlabel(&mut self, text: impl Into<String>) {
        if let Some(helper) = self.helpers.first_mut() {
            helper.set_axislabel(text);
        }
    }

    pub fn set_ylabel(&mut self, text: impl Into<String>) {
        if let Some(helper) = self.helpers.get_mut(1) {
            helper.set_axislabel(text);
        }
    }

    /// Render this set; see [`render::draw`].
    pub fn draw<T, S>(&self, transform: &T, surface: &mut S) -> Result<(), AxisError>
    where
        T: WorldTransform + ?Sized,
        S: DrawSurface + ?Sized,
    {
        render::draw(self, transform, surface)
    }
}

impl Index<usize> for CoordinateHelperSet {
    type Output = CoordinateHelper;

    fn index(&self, index: usize) -> &CoordinateHelper {
        &self.helpers[index]
    }
}

impl IndexMut<usize> for CoordinateHelperSet {
    fn index_mut(&mut self, index: usize) -> &mut CoordinateHelper {
        &mut self.helpers[index]
    }
}
