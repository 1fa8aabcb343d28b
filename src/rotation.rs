use crate::error::{Error, Result};
use std::str::FromStr;

/// Rotation applied to a page, as a quarter- or half-turn.
///
/// Only these four values exist; the engine rejects anything that is not a
/// multiple of 90 and we reject anything beyond one full turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// 90° clockwise
    Right,
    /// 90° counter-clockwise
    Left,
    /// 180°
    Down,
    /// 180° the other way (inverse of Down)
    Up,
}

impl Rotation {
    pub fn from_angle(angle: i32) -> Result<Self> {
        match angle {
            90 => Ok(Rotation::Right),
            -90 => Ok(Rotation::Left),
            180 => Ok(Rotation::Down),
            -180 => Ok(Rotation::Up),
            _ => Err(Error::InvalidRotation(angle.to_string())),
        }
    }

    pub fn from_cardinal(name: &str) -> Result<Self> {
        match name {
            "right" => Ok(Rotation::Right),
            "left" => Ok(Rotation::Left),
            "down" => Ok(Rotation::Down),
            "up" => Ok(Rotation::Up),
            _ => Err(Error::InvalidRotation(name.to_string())),
        }
    }

    /// The signed-angle form the engine's `--rotate` flag expects.
    pub fn angle_arg(self) -> &'static str {
        match self {
            Rotation::Right => "+90",
            Rotation::Left => "-90",
            Rotation::Down => "+180",
            Rotation::Up => "-180",
        }
    }
}

impl FromStr for Rotation {
    type Err = Error;

    /// Accepts either a cardinal name ("right") or a signed angle ("-90").
    fn from_str(s: &str) -> Result<Self> {
        match s.parse::<i32>() {
            Ok(angle) => Rotation::from_angle(angle),
            Err(_) => Rotation::from_cardinal(s),
        }
    }
}
