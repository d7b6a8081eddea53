use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::CoreError;

/// Identifier shared by the nodes and edges of the ring. Every edge is named
/// after the node it leaves from.
#[derive(Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Cardinal {
    Bottom,
    Right,
    Top,
    Left,
}

impl Cardinal {
    /// Direction of travel around the ring.
    pub const RING: [Cardinal; 4] = [
        Cardinal::Bottom,
        Cardinal::Right,
        Cardinal::Top,
        Cardinal::Left,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Cardinal::Bottom => "bottom",
            Cardinal::Right => "right",
            Cardinal::Top => "top",
            Cardinal::Left => "left",
        }
    }

    pub fn ring_index(&self) -> usize {
        match self {
            Cardinal::Bottom => 0,
            Cardinal::Right => 1,
            Cardinal::Top => 2,
            Cardinal::Left => 3,
        }
    }

    pub fn next(&self) -> Cardinal {
        Self::RING[(self.ring_index() + 1) % Self::RING.len()]
    }

    /// Polar angle of the node, chosen so that the arc leaving it spans
    /// `[angle, angle + pi/2]` without wrapping.
    pub fn angle(&self) -> f64 {
        match self {
            Cardinal::Bottom => -FRAC_PI_2,
            Cardinal::Right => 0.0,
            Cardinal::Top => FRAC_PI_2,
            Cardinal::Left => PI,
        }
    }
}

impl Display for Cardinal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cardinal {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bottom" => Ok(Cardinal::Bottom),
            "right" => Ok(Cardinal::Right),
            "top" => Ok(Cardinal::Top),
            "left" => Ok(Cardinal::Left),
            other => Err(CoreError::configuration(
                "route",
                format!("unknown edge `{}`, expected bottom, right, top or left", other),
            )),
        }
    }
}
