//! Synchronous invocation of external SUMO tools.
//!
//! The child's stdout and stderr are echoed to ours as they arrive and kept
//! for the returned [`ToolReport`]. Waiting is bounded: a child still running
//! at the deadline is killed and reported as timed out.

use std::ffi::{OsStr, OsString};
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use serde::Deserialize;
use typed_builder::TypedBuilder;

use crate::error::ToolError;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Deserialize, Debug, Clone)]
pub struct ToolSettings {
    #[serde(default = "default_netconvert")]
    pub netconvert: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_netconvert() -> String {
    "netconvert".to_string()
}

fn default_timeout() -> u64 {
    120
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            netconvert: default_netconvert(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Exit status and captured streams of a finished tool run.
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct ToolReport {
    #[builder(setter(into))]
    pub tool: String,
    pub code: Option<i32>,
    #[builder(default, setter(into))]
    pub stdout: String,
    #[builder(default, setter(into))]
    pub stderr: String,
}

impl ToolReport {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Turns a non-zero exit into [`ToolError::NonZeroExit`].
    pub fn into_result(self) -> Result<ToolReport, ToolError> {
        if self.success() {
            return Ok(self);
        }
        warn!("{} failed with status {:?}", self.tool, self.code);
        Err(ToolError::NonZeroExit {
            tool: self.tool,
            code: self.code,
            stderr: self.stderr.trim().to_string(),
        })
    }
}

/// Compiles raw node, edge and type descriptions into a network file.
pub trait NetworkCompiler {
    fn compile(&self, config_file: &Path, output_file: &Path) -> Result<ToolReport, ToolError>;
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct Netconvert {
    #[builder(default = default_netconvert(), setter(into))]
    binary: String,
    #[builder(default = Duration::from_secs(default_timeout()))]
    timeout: Duration,
}

impl From<&ToolSettings> for Netconvert {
    fn from(settings: &ToolSettings) -> Self {
        Netconvert::builder()
            .binary(settings.netconvert.clone())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
    }
}

impl NetworkCompiler for Netconvert {
    fn compile(&self, config_file: &Path, output_file: &Path) -> Result<ToolReport, ToolError> {
        let mut output_arg = OsString::from("--output-file=");
        output_arg.push(output_file);
        let args = [OsString::from("-c"), config_file.as_os_str().to_owned(), output_arg];
        info!(
            "Running {} -c {} --output-file={}",
            self.binary,
            config_file.display(),
            output_file.display()
        );
        run_tool(&self.binary, &args, self.timeout)
    }
}

pub fn run_tool<S: AsRef<OsStr>>(
    program: &str,
    args: &[S],
    timeout: Duration,
) -> Result<ToolReport, ToolError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ToolError::Launch {
            tool: program.to_string(),
            source,
        })?;
    debug!("{} started with pid {}", program, child.id());

    let stdout = child
        .stdout
        .take()
        .map(|stream| forward_stream(stream, std::io::stdout));
    let stderr = child
        .stderr
        .take()
        .map(|stream| forward_stream(stream, std::io::stderr));

    let deadline = Instant::now() + timeout;
    let status = match wait_until(&mut child, deadline) {
        Ok(status) => status,
        Err(source) => {
            terminate(&mut child);
            return Err(ToolError::Io {
                tool: program.to_string(),
                source,
            });
        }
    };
    let Some(status) = status else {
        // Readers stay detached; a grandchild may still hold the pipes open.
        warn!("{} killed after {:?}", program, timeout);
        return Err(ToolError::TimedOut {
            tool: program.to_string(),
            seconds: timeout.as_secs_f64(),
        });
    };

    Ok(ToolReport::builder()
        .tool(program)
        .code(status.code())
        .stdout(collect_stream(stdout, deadline))
        .stderr(collect_stream(stderr, deadline))
        .build())
}

/// Polls the child until it exits or the deadline passes. A child that
/// outlives the deadline is killed and reaped before returning `None`.
fn wait_until(child: &mut Child, deadline: Instant) -> std::io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            child.kill()?;
            child.wait()?;
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn forward_stream<R, W, F>(stream: R, sink: F) -> JoinHandle<String>
where
    R: Read + Send + 'static,
    W: Write,
    F: Fn() -> W + Send + 'static,
{
    thread::spawn(move || {
        let mut reader = BufReader::new(stream);
        let mut captured = Vec::new();
        let mut line = Vec::new();
        let mut echo_failed = false;
        while let Ok(read) = reader.read_until(b'\n', &mut line) {
            if read == 0 {
                break;
            }
            let mut out = sink();
            if let Err(e) = out.write_all(&line).and_then(|_| out.flush()) {
                if !echo_failed {
                    debug!("Echo of tool output failed, capturing only: {}", e);
                    echo_failed = true;
                }
            }
            captured.extend_from_slice(&line);
            line.clear();
        }
        String::from_utf8_lossy(&captured).into_owned()
    })
}

/// Joins a reader thread unless it outlives `deadline`, in which case it is
/// left detached and nothing is captured.
fn collect_stream(handle: Option<JoinHandle<String>>, deadline: Instant) -> String {
    let Some(handle) = handle else {
        return String::new();
    };
    while !handle.is_finished() {
        if Instant::now() >= deadline {
            debug!("Tool output still open at the deadline, not captured");
            return String::new();
        }
        thread::sleep(POLL_INTERVAL);
    }
    handle.join().unwrap_or_default()
}

/// Kills and reaps the child, ignoring failures: it may already be gone.
fn terminate(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
