use crate::{err_new_io, err_new_json, error::Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Hash function feeding the pool.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HashKind {
    Sha224,
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl std::fmt::Display for HashKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        };
        f.write_str(name)
    }
}

/// Settings read from a JSON file; command-line flags take precedence.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DrawConfig {
    pub hash: HashKind,
    pub skip_blank: bool,
    pub init_seed: Option<String>,
    pub report: Option<PathBuf>,
}

/// Loads a [`DrawConfig`] from a JSON file.
///
/// # Errors
/// - The file cannot be read.
/// - The file is not a valid config document.
///
pub fn read_config(path: &Path) -> Result<DrawConfig> {
    let file = fs::read(path).map_err(|e| err_new_io!(e))?;
    let config: DrawConfig = serde_json::from_slice(&file).map_err(|e| err_new_json!(e))?;
    Ok(config)
}
