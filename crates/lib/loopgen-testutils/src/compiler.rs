use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use loopgen_runner::error::ToolError;
use loopgen_runner::tool::{NetworkCompiler, ToolReport};

/// Stands in for netconvert: writes a stub network and exits cleanly.
#[derive(Default)]
pub struct FakeCompiler {
    calls: RefCell<Vec<(PathBuf, PathBuf)>>,
}

impl FakeCompiler {
    pub fn calls(&self) -> Vec<(PathBuf, PathBuf)> {
        self.calls.borrow().clone()
    }
}

impl NetworkCompiler for FakeCompiler {
    fn compile(&self, config_file: &Path, output_file: &Path) -> Result<ToolReport, ToolError> {
        self.calls
            .borrow_mut()
            .push((config_file.to_path_buf(), output_file.to_path_buf()));
        fs::write(output_file, "<net version=\"1.9\"/>\n").map_err(|source| ToolError::Io {
            tool: "fake-netconvert".to_string(),
            source,
        })?;
        Ok(ToolReport::builder()
            .tool("fake-netconvert")
            .code(Some(0))
            .stdout("Success.\n")
            .build())
    }
}

/// Exits with `code` without producing a network.
pub struct FailingCompiler {
    pub code: i32,
}

impl NetworkCompiler for FailingCompiler {
    fn compile(&self, _config_file: &Path, _output_file: &Path) -> Result<ToolReport, ToolError> {
        Ok(ToolReport::builder()
            .tool("fake-netconvert")
            .code(Some(self.code))
            .stderr("Error: No nodes loaded.\n")
            .build())
    }
}
