//! CLI command implementations

pub mod build;
pub mod decode;
pub mod inspect;

use std::path::Path;

use anyhow::Result;
use songpair_spec::{Config, PipelineError};

/// Converts a pipeline error into an `anyhow` error tagged with its code.
pub(crate) fn coded<E: PipelineError>(err: E) -> anyhow::Error {
    anyhow::anyhow!("[{}] {}", err.code(), err.message())
}

/// Loads the config file, or the built-in defaults when no path is given.
pub fn load_config(path: Option<&str>) -> Result<Config> {
    match path {
        Some(path) => Config::load(Path::new(path)).map_err(coded),
        None => Ok(Config::default()),
    }
}
