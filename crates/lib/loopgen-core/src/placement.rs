use indexmap::IndexMap;
use log::debug;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use serde::Deserialize;
use typed_builder::TypedBuilder;

use crate::cardinal::Cardinal;
use crate::error::CoreError;
use crate::params::NetworkParams;

#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct VehicleType {
    #[builder(setter(into))]
    pub id: String,
    pub count: usize,
    /// Passed through untouched for downstream controllers.
    #[builder(default)]
    pub attributes: IndexMap<String, String>,
}

/// Vehicle types in declaration order together with the requested total.
#[derive(Debug, Clone)]
pub struct Fleet {
    types: IndexMap<String, VehicleType>,
    num_vehicles: usize,
}

impl Fleet {
    pub fn new(
        vehicle_types: impl IntoIterator<Item = VehicleType>,
        num_vehicles: usize,
    ) -> Result<Self, CoreError> {
        let mut types = IndexMap::new();
        for vehicle_type in vehicle_types {
            if types.contains_key(&vehicle_type.id) {
                return Err(CoreError::configuration(
                    "types",
                    format!("vehicle type `{}` is declared twice", vehicle_type.id),
                ));
            }
            types.insert(vehicle_type.id.clone(), vehicle_type);
        }

        let declared: usize = types.values().map(|vehicle_type| vehicle_type.count).sum();
        if num_vehicles > 0 && num_vehicles != declared {
            return Err(CoreError::configuration(
                "num_vehicles",
                format!(
                    "{} vehicles requested but the types declare {}",
                    num_vehicles, declared
                ),
            ));
        }
        Ok(Self {
            types,
            num_vehicles,
        })
    }

    pub fn types(&self) -> impl Iterator<Item = &VehicleType> {
        self.types.values()
    }

    /// Number of vehicles that will actually be emitted. A zero total
    /// disables vehicle generation while keeping the type declarations.
    pub fn vehicle_count(&self) -> usize {
        if self.num_vehicles == 0 {
            0
        } else {
            self.types().map(|vehicle_type| vehicle_type.count).sum()
        }
    }

    /// `(type, id)` pairs with ids `{type}_{index}`, grouped by type.
    pub fn vehicle_ids(&self) -> Vec<(String, String)> {
        if self.num_vehicles == 0 {
            return Vec::new();
        }
        self.types()
            .flat_map(|vehicle_type| {
                (0..vehicle_type.count).map(move |index| {
                    (
                        vehicle_type.id.clone(),
                        format!("{}_{}", vehicle_type.id, index),
                    )
                })
            })
            .collect()
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct StartPosition {
    pub route: Cardinal,
    pub pos: f64,
}

impl StartPosition {
    pub fn new(route: Cardinal, pos: f64) -> Self {
        Self { route, pos }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VehiclePlacement {
    pub vehicle_type: String,
    pub id: String,
    pub route: Cardinal,
    pub depart_pos: f64,
}

pub struct VehiclePlacer {
    shuffle: bool,
    rng: Pcg64Mcg,
}

impl VehiclePlacer {
    pub fn new(shuffle: bool, seed: u64) -> Self {
        Self {
            shuffle,
            rng: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Pairs every vehicle of the fleet with a start position, in order.
    /// Extra positions are left unused.
    pub fn place(
        &mut self,
        fleet: &Fleet,
        positions: &[StartPosition],
    ) -> Result<Vec<VehiclePlacement>, CoreError> {
        let mut vehicle_ids = fleet.vehicle_ids();
        if positions.len() < vehicle_ids.len() {
            return Err(CoreError::PlacementRange {
                required: vehicle_ids.len(),
                available: positions.len(),
            });
        }

        if self.shuffle {
            vehicle_ids.shuffle(&mut self.rng);
        }

        let placements: Vec<VehiclePlacement> = vehicle_ids
            .into_iter()
            .zip(positions)
            .map(|((vehicle_type, id), position)| VehiclePlacement {
                vehicle_type,
                id,
                route: position.route,
                depart_pos: position.pos,
            })
            .collect();
        debug!("Placed {} vehicles", placements.len());
        Ok(placements)
    }
}

/// Spreads `count` vehicles evenly around the ring, leaving a gap of
/// `bunching` metres behind the last one. Positions are measured from the
/// bottom node in the direction of travel and reported relative to the edge
/// they fall on.
pub fn even_start_positions(
    params: &NetworkParams,
    count: usize,
    bunching: f64,
) -> Result<Vec<StartPosition>, CoreError> {
    if !(0.0..params.length()).contains(&bunching) {
        return Err(CoreError::configuration(
            "bunching",
            format!(
                "must lie in [0, {}) for a ring of that length, got {}",
                params.length(),
                bunching
            ),
        ));
    }
    if count == 0 {
        return Ok(Vec::new());
    }

    let increment = (params.length() - bunching) / count as f64;
    let edge_length = params.edge_length();
    let last_edge = Cardinal::RING.len() - 1;
    Ok((0..count)
        .map(|i| {
            let distance = increment * i as f64;
            let edge_index = ((distance / edge_length).floor() as usize).min(last_edge);
            StartPosition {
                route: Cardinal::RING[edge_index],
                pos: distance - edge_index as f64 * edge_length,
            }
        })
        .collect())
}
