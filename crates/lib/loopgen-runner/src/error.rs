use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to launch `{tool}`: {source}")]
    Launch {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{tool}` exited with status {}: {stderr}", describe_code(.code))]
    NonZeroExit {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("`{tool}` did not finish within {seconds} s and was killed")]
    TimedOut { tool: String, seconds: f64 },

    #[error("lost track of `{tool}`: {source}")]
    Io {
        tool: String,
        #[source]
        source: std::io::Error,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "<killed by signal>".to_string(),
    }
}
