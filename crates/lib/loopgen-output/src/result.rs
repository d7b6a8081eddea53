use indexmap::IndexMap;
use serde::Deserialize;

use crate::xml::XmlElement;

/// Simulator outputs that can be wired into the run configuration.
#[derive(Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum OutputType {
    NetstateDump,
    FcdOutput,
    EmissionOutput,
    TripinfoOutput,
    SummaryOutput,
}

impl OutputType {
    pub fn option_name(&self) -> &'static str {
        match self {
            OutputType::NetstateDump => "netstate-dump",
            OutputType::FcdOutput => "fcd-output",
            OutputType::EmissionOutput => "emission-output",
            OutputType::TripinfoOutput => "tripinfo-output",
            OutputType::SummaryOutput => "summary-output",
        }
    }

    fn suffix(&self) -> &'static str {
        match self {
            OutputType::NetstateDump => "netstate",
            OutputType::FcdOutput => "fcd",
            OutputType::EmissionOutput => "emission",
            OutputType::TripinfoOutput => "tripinfo",
            OutputType::SummaryOutput => "summary",
        }
    }
}

/// Output file name per wired output, in configuration order.
pub type OutputManifest = IndexMap<OutputType, String>;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct OutputSettings {
    #[serde(default)]
    pub outputs: Vec<OutputType>,
}

impl OutputSettings {
    pub fn manifest(&self, name: &str) -> OutputManifest {
        self.outputs
            .iter()
            .map(|output| (*output, format!("{}.{}.xml", name, output.suffix())))
            .collect()
    }
}

/// The `output` block of a run configuration.
pub fn output_element(manifest: &OutputManifest) -> XmlElement {
    manifest
        .iter()
        .fold(XmlElement::new("output"), |block, (output, file)| {
            block.child(XmlElement::new(output.option_name()).attr("value", file))
        })
}
