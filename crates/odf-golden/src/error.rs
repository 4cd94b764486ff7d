//! Error types for the golden-file harness.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Generation script failed with exit code {}\nOutput: {stdout}\nError: {stderr}",
        exit_code.map_or_else(|| "none (terminated by signal)".to_string(), |c| c.to_string())
    )]
    GenerationFailed {
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("{} does not exist.", .0.display())]
    MissingArtifact(PathBuf),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to parse configuration {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: odf_golden_odt::OdtError,
    },
}

pub type HarnessResult<T> = std::result::Result<T, HarnessError>;
