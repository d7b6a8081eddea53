//! Node coordinates and arc polylines of the ring road.
//!
//! The four nodes sit at the cardinal angles of a circle with radius
//! `length / pi`. Each edge is the quarter arc leaving its node in the
//! direction of travel, sampled at `resolution` evenly spaced angles with
//! both end points included.

use std::f64::consts::FRAC_PI_2;

use itertools::Itertools;

use crate::cardinal::Cardinal;
use crate::params::NetworkParams;

pub const EDGE_TYPE_ID: &str = "edgeType";

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn on_circle(radius: f64, angle: f64) -> Self {
        Self {
            x: radius * angle.cos(),
            y: radius * angle.sin(),
        }
    }

    pub fn distance(&self, other: &Point2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: Cardinal,
    pub pos: Point2D,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: Cardinal,
    pub from: Cardinal,
    pub to: Cardinal,
    pub shape: Vec<Point2D>,
    pub length: f64,
}

impl Edge {
    /// Space separated `x,y` pairs with two decimals, as netconvert expects.
    pub fn shape_string(&self) -> String {
        self.shape
            .iter()
            .map(|point| format!("{:.2},{:.2}", point.x, point.y))
            .join(" ")
    }
}

/// Lane count and speed limit shared by every edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeType {
    pub id: &'static str,
    pub lanes: u32,
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RingGeometry {
    pub radius: f64,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub edge_type: EdgeType,
}

impl RingGeometry {
    pub fn build(params: &NetworkParams) -> Self {
        let radius = params.radius();
        let nodes = Cardinal::RING
            .iter()
            .map(|&id| Node {
                id,
                pos: cardinal_point(radius, id),
            })
            .collect();
        let edges = Cardinal::RING
            .iter()
            .map(|&id| Edge {
                id,
                from: id,
                to: id.next(),
                shape: arc_shape(radius, id.angle(), params.resolution()),
                length: params.edge_length(),
            })
            .collect();
        Self {
            radius,
            nodes,
            edges,
            edge_type: EdgeType {
                id: EDGE_TYPE_ID,
                lanes: params.lanes(),
                speed: params.speed_limit(),
            },
        }
    }

    pub fn node(&self, id: Cardinal) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn edge(&self, id: Cardinal) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.id == id)
    }
}

// Exact cardinal coordinates; cos/sin would leave ~1e-15 residue on the axes.
fn cardinal_point(radius: f64, id: Cardinal) -> Point2D {
    match id {
        Cardinal::Bottom => Point2D { x: 0.0, y: -radius },
        Cardinal::Right => Point2D { x: radius, y: 0.0 },
        Cardinal::Top => Point2D { x: 0.0, y: radius },
        Cardinal::Left => Point2D { x: -radius, y: 0.0 },
    }
}

fn arc_shape(radius: f64, start: f64, samples: usize) -> Vec<Point2D> {
    linspace(start, start + FRAC_PI_2, samples)
        .map(|angle| Point2D::on_circle(radius, angle))
        .collect()
}

fn linspace(start: f64, stop: f64, samples: usize) -> impl Iterator<Item = f64> {
    let step = (stop - start) / (samples - 1) as f64;
    (0..samples).map(move |i| {
        if i == samples - 1 {
            stop
        } else {
            start + step * i as f64
        }
    })
}
