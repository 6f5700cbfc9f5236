//! Direction and axis types for face and rotation handling.

use crate::error::ModelError;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The six face directions of a cuboid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    North,
    South,
    East,
    West,
}

/// Lowercase name to direction. Lookups compare ASCII case-insensitively.
const DIRECTION_NAMES: [(&str, Direction); 6] = [
    ("up", Direction::Up),
    ("down", Direction::Down),
    ("north", Direction::North),
    ("south", Direction::South),
    ("east", Direction::East),
    ("west", Direction::West),
];

impl Direction {
    /// All six directions in slot order.
    pub const ALL: [Direction; 6] = [
        Direction::Up,
        Direction::Down,
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Look up a direction by name (case-insensitive, no abbreviations).
    pub fn from_name(name: &str) -> Option<Self> {
        DIRECTION_NAMES
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, dir)| *dir)
    }

    /// Canonical lowercase name, as used in model documents.
    pub fn name(&self) -> &'static str {
        DIRECTION_NAMES[self.index()].0
    }

    /// Position of this direction in [`Direction::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::North => 2,
            Direction::South => 3,
            Direction::East => 4,
            Direction::West => 5,
        }
    }

    /// Get the normal vector for this direction.
    pub fn normal(&self) -> Vec3 {
        match self {
            Direction::Up => Vec3::Y,
            Direction::Down => Vec3::NEG_Y,
            Direction::North => Vec3::NEG_Z,
            Direction::South => Vec3::Z,
            Direction::East => Vec3::X,
            Direction::West => Vec3::NEG_X,
        }
    }

    /// Get the opposite direction.
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Get the axis this direction is on.
    pub fn axis(&self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Y,
            Direction::North | Direction::South => Axis::Z,
            Direction::East | Direction::West => Axis::X,
        }
    }
}

impl FromStr for Direction {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::from_name(s).ok_or_else(|| ModelError::UnknownDirection(s.to_string()))
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The three rotation axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

const AXIS_NAMES: [(&str, Axis); 3] = [("x", Axis::X), ("y", Axis::Y), ("z", Axis::Z)];

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Look up an axis by name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        AXIS_NAMES
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, axis)| *axis)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }

    /// Get the unit vector for this axis.
    pub fn unit_vector(&self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

impl FromStr for Axis {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Axis::from_name(s).ok_or_else(|| ModelError::UnknownAxis(s.to_string()))
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
