use std::path::{Path, PathBuf};

use log::{debug, info};

use loopgen_core::context::GenerationContext;
use loopgen_core::params::{NetworkParams, ScenarioParams};
use loopgen_core::placement::{
    even_start_positions, Fleet, VehiclePlacement, VehiclePlacer, VehicleType,
};
use loopgen_output::error::OutputError;
use loopgen_output::logger::initiate_logger;
use loopgen_runner::tool::{Netconvert, NetworkCompiler};

use crate::network::topology::TopologyAssembler;
use crate::produce::config::{read_config, Config, PlacementSettings, VehicleTypeSettings};
use crate::produce::error::GenerationError;
use crate::scenario::assembler::{ScenarioConfigAssembler, ScenarioFiles};
use crate::vehicles::writer::RouteFileWriter;

pub(crate) struct GenerationSummary {
    pub(crate) context: GenerationContext,
    pub(crate) scenario: ScenarioFiles,
    pub(crate) route_file: PathBuf,
    pub(crate) placements: Vec<VehiclePlacement>,
    pub(crate) vehicle_types: Vec<VehicleType>,
}

/// Generates a ring road scenario in two phases: the compiled network first,
/// then the run configuration and initial population that reference it.
pub(crate) struct CircleGenerator<C: NetworkCompiler> {
    config: Config,
    config_dir: PathBuf,
    compiler: C,
}

impl CircleGenerator<Netconvert> {
    pub(crate) fn new(config_file: &str) -> Result<Self, GenerationError> {
        let file_path = PathBuf::from(config_file);
        let config = read_config(&file_path)?;
        let config_dir = file_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let compiler = Netconvert::from(&config.tool_settings);
        Ok(Self::with_compiler(config, config_dir, compiler))
    }
}

impl<C: NetworkCompiler> CircleGenerator<C> {
    pub(crate) fn with_compiler(config: Config, config_dir: PathBuf, compiler: C) -> Self {
        Self {
            config,
            config_dir,
            compiler,
        }
    }

    pub(crate) fn initialize_logger(&self) -> Result<PathBuf, GenerationError> {
        Ok(initiate_logger(&self.config_dir, &self.config.log_settings)?)
    }

    /// Validates every input before touching the file system, so bad
    /// parameters never leave partial artifacts behind.
    pub(crate) fn generate(&self) -> Result<GenerationSummary, GenerationError> {
        let network = NetworkParams::try_from(&self.config.network_settings)?;
        let window = ScenarioParams::try_from(&self.config.scenario_settings)?;
        let (fleet, placements) = self.plan_vehicles(&network)?;
        debug!(
            "Inputs valid: {} m ring, window [{}, {}], {} vehicles",
            network.length(),
            window.start_time(),
            window.end_time(),
            placements.len()
        );

        let paths = self.config.path_settings.resolve(&self.config_dir);
        paths.ensure_dirs().map_err(OutputError::from)?;

        let context = TopologyAssembler::new(&paths, &self.compiler).assemble(&network)?;
        info!("Network ready: {}", context.net_file());

        let scenario = ScenarioConfigAssembler::new(&paths, &self.config.output_settings)
            .assemble(&context, &window)?;
        debug!(
            "Additional file {}, view settings {}",
            scenario.additional.display(),
            scenario.view_settings.display()
        );
        info!("Scenario ready: {}", scenario.run_config.display());

        let route_file = RouteFileWriter::new(&paths).write(&context, &fleet, &placements)?;
        let vehicle_types: Vec<VehicleType> = fleet.types().cloned().collect();
        for vehicle_type in &vehicle_types {
            debug!(
                "Vehicle type {} x{} with attributes {:?}",
                vehicle_type.id, vehicle_type.count, vehicle_type.attributes
            );
        }

        Ok(GenerationSummary {
            context,
            scenario,
            route_file,
            placements,
            vehicle_types,
        })
    }

    fn plan_vehicles(
        &self,
        network: &NetworkParams,
    ) -> Result<(Fleet, Vec<VehiclePlacement>), GenerationError> {
        let settings = &self.config.vehicle_settings;
        let fleet = Fleet::new(
            settings
                .types
                .iter()
                .map(VehicleTypeSettings::to_vehicle_type),
            settings.num_vehicles,
        )?;
        let positions = match &settings.placement {
            PlacementSettings::Explicit { positions } => positions.clone(),
            PlacementSettings::Even { bunching } => {
                even_start_positions(network, fleet.vehicle_count(), *bunching)?
            }
        };
        let placements =
            VehiclePlacer::new(settings.shuffle, settings.seed).place(&fleet, &positions)?;
        Ok((fleet, placements))
    }
}
