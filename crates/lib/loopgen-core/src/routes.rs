use itertools::Itertools;

use crate::cardinal::Cardinal;

/// End of the rerouter activation interval, far beyond any run length.
pub const REROUTE_HORIZON: u64 = 100_000;

/// Order in which routes are listed in the additional file.
const ROUTE_ORDER: [Cardinal; 4] = [
    Cardinal::Top,
    Cardinal::Left,
    Cardinal::Bottom,
    Cardinal::Right,
];

pub fn route_id(start: Cardinal) -> String {
    format!("route{}", start)
}

/// One full loop of the ring beginning on `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub start: Cardinal,
    pub edges: [Cardinal; 4],
}

impl Route {
    pub fn starting_at(start: Cardinal) -> Self {
        let offset = start.ring_index();
        let edges = std::array::from_fn(|i| Cardinal::RING[(offset + i) % Cardinal::RING.len()]);
        Self { start, edges }
    }

    pub fn id(&self) -> String {
        route_id(self.start)
    }

    pub fn edges_string(&self) -> String {
        self.edges.iter().join(" ")
    }
}

/// Forces vehicles entering `edge` back onto the loop that starts there.
#[derive(Debug, Clone, PartialEq)]
pub struct Rerouter {
    pub id: &'static str,
    pub edge: Cardinal,
    pub target: Cardinal,
    pub begin: u64,
    pub end: u64,
}

impl Rerouter {
    fn always_on(id: &'static str, edge: Cardinal) -> Self {
        Self {
            id,
            edge,
            target: edge,
            begin: 0,
            end: REROUTE_HORIZON,
        }
    }

    pub fn target_route(&self) -> String {
        route_id(self.target)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteTable {
    routes: Vec<Route>,
    rerouters: Vec<Rerouter>,
}

impl RouteTable {
    pub fn build() -> Self {
        let routes = ROUTE_ORDER.iter().map(|&start| Route::starting_at(start)).collect();
        let rerouters = vec![
            Rerouter::always_on("rerouterBottom", Cardinal::Bottom),
            Rerouter::always_on("rerouterTop", Cardinal::Top),
        ];
        Self { routes, rerouters }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn rerouters(&self) -> &[Rerouter] {
        &self.rerouters
    }

    pub fn route(&self, start: Cardinal) -> Option<&Route> {
        self.routes.iter().find(|route| route.start == start)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::build()
    }
}
