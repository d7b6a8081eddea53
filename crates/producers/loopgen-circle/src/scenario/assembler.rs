use std::path::PathBuf;

use log::{debug, info};

use loopgen_core::context::GenerationContext;
use loopgen_core::params::ScenarioParams;
use loopgen_core::routes::{Rerouter, RouteTable};
use loopgen_output::result::{output_element, OutputManifest, OutputSettings};
use loopgen_output::xml::{write_xml, XmlElement};

use crate::produce::config::ArtifactPaths;
use crate::produce::error::GenerationError;

const ADDITIONAL_SCHEMA: &str = "http://sumo.dlr.de/xsd/additional_file.xsd";
const SUMO_SCHEMA: &str = "http://sumo.dlr.de/xsd/sumoConfiguration.xsd";
const VIEW_SCHEME: &str = "real world";

#[derive(Debug, Clone)]
pub(crate) struct ScenarioFiles {
    pub(crate) run_config: PathBuf,
    pub(crate) additional: PathBuf,
    pub(crate) view_settings: PathBuf,
    pub(crate) manifest: OutputManifest,
}

/// Second phase: routes, rerouters, view settings and the run configuration
/// that ties them to the compiled network.
pub(crate) struct ScenarioConfigAssembler<'a> {
    paths: &'a ArtifactPaths,
    output_settings: &'a OutputSettings,
}

impl<'a> ScenarioConfigAssembler<'a> {
    pub(crate) fn new(paths: &'a ArtifactPaths, output_settings: &'a OutputSettings) -> Self {
        Self {
            paths,
            output_settings,
        }
    }

    pub(crate) fn assemble(
        &self,
        context: &GenerationContext,
        window: &ScenarioParams,
    ) -> Result<ScenarioFiles, GenerationError> {
        let name = context.name();
        let additional_file = format!("{}.add.xml", name);
        let gui_file = format!("{}.gui.cfg", name);
        let config_file = format!("{}.sumo.cfg", name);

        let cfg_dir = &self.paths.cfg_path;
        let additional = cfg_dir.join(&additional_file);
        write_xml(&additional_element(context.route_table()), &additional)?;
        let view_settings = cfg_dir.join(&gui_file);
        write_xml(&view_settings_element(), &view_settings)?;

        let manifest = self.output_settings.manifest(name);
        debug!("Run configuration references network {}", context.net_file());
        let run_config = cfg_dir.join(&config_file);
        let root = XmlElement::with_schema("configuration", SUMO_SCHEMA)
            .child(inputs_element(context, &additional_file, &gui_file))
            .child(output_element(&manifest))
            .child(time_element(window));
        write_xml(&root, &run_config)?;
        info!(
            "Run configuration {} covers [{}, {}]",
            run_config.display(),
            window.start_time(),
            window.end_time()
        );

        Ok(ScenarioFiles {
            run_config,
            additional,
            view_settings,
            manifest,
        })
    }
}

fn additional_element(route_table: &RouteTable) -> XmlElement {
    let mut root = XmlElement::with_schema("additional", ADDITIONAL_SCHEMA);
    for route in route_table.routes() {
        root.push(
            XmlElement::new("route")
                .attr("id", route.id())
                .attr("edges", route.edges_string()),
        );
    }
    for rerouter in route_table.rerouters() {
        root.push(rerouter_element(rerouter));
    }
    root
}

fn rerouter_element(rerouter: &Rerouter) -> XmlElement {
    XmlElement::new("rerouter")
        .attr("id", rerouter.id)
        .attr("edges", rerouter.edge)
        .child(
            XmlElement::new("interval")
                .attr("begin", rerouter.begin)
                .attr("end", rerouter.end)
                .child(XmlElement::new("routeProbReroute").attr("id", rerouter.target_route())),
        )
}

fn view_settings_element() -> XmlElement {
    XmlElement::new("viewsettings").child(XmlElement::new("scheme").attr("name", VIEW_SCHEME))
}

fn inputs_element(context: &GenerationContext, additional_file: &str, gui_file: &str) -> XmlElement {
    XmlElement::new("input")
        .child(XmlElement::new("net-file").attr("value", context.net_file()))
        .child(XmlElement::new("additional-files").attr("value", additional_file))
        .child(XmlElement::new("route-files").attr("value", context.route_file()))
        .child(XmlElement::new("gui-settings-file").attr("value", gui_file))
}

fn time_element(window: &ScenarioParams) -> XmlElement {
    XmlElement::new("time")
        .child(XmlElement::new("begin").attr("value", window.start_time()))
        .child(XmlElement::new("end").attr("value", window.end_time()))
}
