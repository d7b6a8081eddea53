use log::{debug, info};

use loopgen_core::context::{scenario_name, GenerationContext};
use loopgen_core::geometry::RingGeometry;
use loopgen_core::params::NetworkParams;
use loopgen_output::xml::{write_xml, XmlElement};
use loopgen_runner::tool::NetworkCompiler;

use crate::produce::config::ArtifactPaths;
use crate::produce::error::GenerationError;

const NODES_SCHEMA: &str = "http://sumo.dlr.de/xsd/nodes_file.xsd";
const EDGES_SCHEMA: &str = "http://sumo.dlr.de/xsd/edges_file.xsd";
const TYPES_SCHEMA: &str = "http://sumo.dlr.de/xsd/types_file.xsd";
const NETCONVERT_SCHEMA: &str = "http://sumo.dlr.de/xsd/netconvertConfiguration.xsd";

pub(crate) struct NetworkFiles {
    pub(crate) nodes: String,
    pub(crate) edges: String,
    pub(crate) types: String,
    pub(crate) config: String,
    pub(crate) net: String,
}

impl NetworkFiles {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            nodes: format!("{}.nod.xml", name),
            edges: format!("{}.edg.xml", name),
            types: format!("{}.typ.xml", name),
            config: format!("{}.netccfg", name),
            net: format!("{}.net.xml", name),
        }
    }
}

/// Writes the raw ring description, compiles it with the network compiler
/// and hands back the context the scenario phase depends on.
pub(crate) struct TopologyAssembler<'a, C: NetworkCompiler> {
    paths: &'a ArtifactPaths,
    compiler: &'a C,
}

impl<'a, C: NetworkCompiler> TopologyAssembler<'a, C> {
    pub(crate) fn new(paths: &'a ArtifactPaths, compiler: &'a C) -> Self {
        Self { paths, compiler }
    }

    pub(crate) fn assemble(
        &self,
        params: &NetworkParams,
    ) -> Result<GenerationContext, GenerationError> {
        let name = scenario_name(&self.paths.base, params);
        let files = NetworkFiles::new(&name);
        let ring = RingGeometry::build(params);
        info!(
            "Writing ring network {} with radius {:.2} m",
            name, ring.radius
        );

        let net_dir = &self.paths.net_path;
        write_xml(&nodes_element(&ring), &net_dir.join(&files.nodes))?;
        write_xml(&edges_element(&ring), &net_dir.join(&files.edges))?;
        write_xml(&types_element(&ring), &net_dir.join(&files.types))?;
        let config_file = net_dir.join(&files.config);
        write_xml(&netconvert_element(&files), &config_file)?;

        let net_path = self.paths.cfg_path.join(&files.net);
        let report = self
            .compiler
            .compile(&config_file, &net_path)?
            .into_result()?;
        debug!("{} output: {}", report.tool, report.stdout.trim());
        info!("Network compiled to {}", net_path.display());

        Ok(GenerationContext::builder()
            .name(name.clone())
            .net_file(files.net)
            .net_path(net_path)
            .route_file(format!("{}.rou.xml", name))
            .build())
    }
}

fn nodes_element(ring: &RingGeometry) -> XmlElement {
    ring.nodes
        .iter()
        .fold(XmlElement::with_schema("nodes", NODES_SCHEMA), |root, node| {
            root.child(
                XmlElement::new("node")
                    .attr("id", node.id)
                    .attr("x", node.pos.x)
                    .attr("y", node.pos.y),
            )
        })
}

fn edges_element(ring: &RingGeometry) -> XmlElement {
    ring.edges
        .iter()
        .fold(XmlElement::with_schema("edges", EDGES_SCHEMA), |root, edge| {
            root.child(
                XmlElement::new("edge")
                    .attr("id", edge.id)
                    .attr("from", edge.from)
                    .attr("to", edge.to)
                    .attr("type", ring.edge_type.id)
                    .attr("shape", edge.shape_string())
                    .attr("length", edge.length),
            )
        })
}

fn types_element(ring: &RingGeometry) -> XmlElement {
    XmlElement::with_schema("types", TYPES_SCHEMA).child(
        XmlElement::new("type")
            .attr("id", ring.edge_type.id)
            .attr("numLanes", ring.edge_type.lanes)
            .attr("speed", ring.edge_type.speed),
    )
}

fn netconvert_element(files: &NetworkFiles) -> XmlElement {
    XmlElement::with_schema("configuration", NETCONVERT_SCHEMA)
        .child(
            XmlElement::new("input")
                .child(XmlElement::new("node-files").attr("value", &files.nodes))
                .child(XmlElement::new("edge-files").attr("value", &files.edges))
                .child(XmlElement::new("type-files").attr("value", &files.types)),
        )
        .child(
            XmlElement::new("output")
                .child(XmlElement::new("output-file").attr("value", &files.net)),
        )
        .child(
            XmlElement::new("processing")
                .child(XmlElement::new("no-internal-links").attr("value", "true"))
                .child(XmlElement::new("no-turnarounds").attr("value", "true")),
        )
}

#[cfg(test)]
pub(crate) mod tests {
    use std::path::Path;

    use loopgen_runner::error::ToolError;
    use loopgen_testutils::compiler::{FailingCompiler, FakeCompiler};
    use loopgen_testutils::xml::{read_elements, root_attributes};

    use super::*;

    pub(crate) fn artifact_paths(root: &Path) -> ArtifactPaths {
        let paths = ArtifactPaths {
            base: "sugiyama".to_string(),
            net_path: root.join("net"),
            cfg_path: root.join("cfg"),
        };
        paths.ensure_dirs().unwrap();
        paths
    }

    fn params() -> NetworkParams {
        NetworkParams::new(100.0, 2, 30.0, 3).unwrap()
    }

    #[test]
    fn test_writes_network_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let paths = artifact_paths(dir.path());
        let compiler = FakeCompiler::default();
        let context = TopologyAssembler::new(&paths, &compiler)
            .assemble(&params())
            .unwrap();

        assert_eq!(context.name(), "sugiyama-100m2l");
        assert_eq!(context.net_file(), "sugiyama-100m2l.net.xml");
        assert_eq!(context.route_file(), "sugiyama-100m2l.rou.xml");
        assert_eq!(context.net_path(), paths.cfg_path.join("sugiyama-100m2l.net.xml"));
        assert!(context.net_path().exists());

        let net_dir = &paths.net_path;
        let nodes = read_elements(&net_dir.join("sugiyama-100m2l.nod.xml"), "node");
        let ids: Vec<&str> = nodes.iter().map(|n| n["id"].as_str()).collect();
        assert_eq!(ids, vec!["bottom", "right", "top", "left"]);
        let bottom_y: f64 = nodes[0]["y"].parse().unwrap();
        assert!((bottom_y + 100.0 / std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(nodes[0]["x"], "0");

        let edge_file = net_dir.join("sugiyama-100m2l.edg.xml");
        assert_eq!(
            root_attributes(&edge_file)["xsi:noNamespaceSchemaLocation"],
            EDGES_SCHEMA
        );
        let edges = read_elements(&edge_file, "edge");
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[0]["from"], "bottom");
        assert_eq!(edges[0]["to"], "right");
        assert_eq!(edges[0]["type"], "edgeType");
        assert_eq!(edges[0]["shape"], "0.00,-31.83 22.51,-22.51 31.83,0.00");
        assert_eq!(edges[3]["to"], "bottom");
        assert!(edges.iter().all(|edge| edge["length"] == "25"));

        let types = read_elements(&net_dir.join("sugiyama-100m2l.typ.xml"), "type");
        assert_eq!(types.len(), 1);
        assert_eq!(types[0]["numLanes"], "2");
        assert_eq!(types[0]["speed"], "30");
    }

    #[test]
    fn test_netconvert_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let paths = artifact_paths(dir.path());
        let compiler = FakeCompiler::default();
        TopologyAssembler::new(&paths, &compiler)
            .assemble(&params())
            .unwrap();

        let config_file = paths.net_path.join("sugiyama-100m2l.netccfg");
        assert_eq!(
            compiler.calls(),
            vec![(
                config_file.clone(),
                paths.cfg_path.join("sugiyama-100m2l.net.xml")
            )]
        );
        assert_eq!(
            read_elements(&config_file, "node-files")[0]["value"],
            "sugiyama-100m2l.nod.xml"
        );
        assert_eq!(
            read_elements(&config_file, "output-file")[0]["value"],
            "sugiyama-100m2l.net.xml"
        );
        assert_eq!(read_elements(&config_file, "no-internal-links")[0]["value"], "true");
        assert_eq!(read_elements(&config_file, "no-turnarounds")[0]["value"], "true");
    }

    #[test]
    fn test_failed_compilation_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let paths = artifact_paths(dir.path());
        let result = TopologyAssembler::new(&paths, &FailingCompiler { code: 1 }).assemble(&params());
        match result {
            Err(GenerationError::Tool(ToolError::NonZeroExit { code, stderr, .. })) => {
                assert_eq!(code, Some(1));
                assert!(stderr.contains("No nodes loaded"));
            }
            other => panic!("expected tool failure, got {:?}", other),
        }
        assert!(paths.net_path.join("sugiyama-100m2l.nod.xml").exists());
        assert!(!paths.cfg_path.join("sugiyama-100m2l.net.xml").exists());
    }
}
