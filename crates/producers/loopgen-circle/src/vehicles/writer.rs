use std::path::PathBuf;

use log::info;

use loopgen_core::context::GenerationContext;
use loopgen_core::placement::{Fleet, VehiclePlacement};
use loopgen_core::routes::route_id;
use loopgen_output::xml::{write_xml, XmlElement};

use crate::produce::config::ArtifactPaths;
use crate::produce::error::GenerationError;

const ROUTES_SCHEMA: &str = "http://sumo.dlr.de/xsd/routes_file.xsd";
const VEHICLE_COLOR: &str = "1,0.0,0.0";

/// Writes the vehicle types and the initial population into the route file
/// named by the generation context.
pub(crate) struct RouteFileWriter<'a> {
    paths: &'a ArtifactPaths,
}

impl<'a> RouteFileWriter<'a> {
    pub(crate) fn new(paths: &'a ArtifactPaths) -> Self {
        Self { paths }
    }

    pub(crate) fn write(
        &self,
        context: &GenerationContext,
        fleet: &Fleet,
        placements: &[VehiclePlacement],
    ) -> Result<PathBuf, GenerationError> {
        let route_file = self.paths.cfg_path.join(context.route_file());
        write_xml(&routes_element(fleet, placements), &route_file)?;
        info!(
            "Wrote {} vehicles of {} types to {}",
            placements.len(),
            fleet.types().count(),
            route_file.display()
        );
        Ok(route_file)
    }
}

fn routes_element(fleet: &Fleet, placements: &[VehiclePlacement]) -> XmlElement {
    let mut root = XmlElement::with_schema("routes", ROUTES_SCHEMA);
    for vehicle_type in fleet.types() {
        root.push(
            XmlElement::new("vType")
                .attr("id", &vehicle_type.id)
                .attr("minGap", "0"),
        );
    }
    for placement in placements {
        root.push(vehicle_element(placement));
    }
    root
}

fn vehicle_element(placement: &VehiclePlacement) -> XmlElement {
    XmlElement::new("vehicle")
        .attr("type", &placement.vehicle_type)
        .attr("route", route_id(placement.route))
        .attr("depart", "0")
        .attr("departSpeed", "0")
        .attr("departPos", placement.depart_pos)
        .attr("id", &placement.id)
        .attr("color", VEHICLE_COLOR)
}
