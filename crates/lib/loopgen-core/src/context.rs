use std::path::{Path, PathBuf};

use typed_builder::TypedBuilder;

use crate::params::NetworkParams;
use crate::routes::RouteTable;

/// `{base}-{length}m{lanes}l`, with the length truncated to whole metres.
pub fn scenario_name(base: &str, params: &NetworkParams) -> String {
    format!(
        "{}-{}m{}l",
        base,
        params.length().trunc() as u64,
        params.lanes()
    )
}

/// Everything the network phase hands over to the scenario phase. It is
/// built once from the compiled network and never modified afterwards.
#[derive(Debug, Clone, TypedBuilder)]
pub struct GenerationContext {
    #[builder(setter(into))]
    name: String,
    #[builder(setter(into))]
    net_file: String,
    #[builder(setter(into))]
    net_path: PathBuf,
    #[builder(setter(into))]
    route_file: String,
    #[builder(default)]
    route_table: RouteTable,
}

impl GenerationContext {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File name of the compiled network, relative to the config directory.
    pub fn net_file(&self) -> &str {
        &self.net_file
    }

    pub fn net_path(&self) -> &Path {
        &self.net_path
    }

    pub fn route_file(&self) -> &str {
        &self.route_file
    }

    pub fn route_table(&self) -> &RouteTable {
        &self.route_table
    }
}
