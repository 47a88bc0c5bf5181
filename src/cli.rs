use crate::{
    config::{DrawConfig, HashKind},
    err_new, err_new_io,
    error::{Kind, Result},
};
use clap::Parser;
use std::{ffi::OsString, path::PathBuf};

#[derive(Parser, Debug)]
#[command(name = "primedraw", version)]
#[command(about = "Reproducible draw from a list, driven by a chain of seeds")]
pub struct Cli {
    #[arg(help = "File with one update seed per line")]
    pub seed_list: PathBuf,
    #[arg(help = "File with one candidate per line")]
    pub source_list: PathBuf,
    #[arg(help = "Number of items to choose", allow_hyphen_values = true)]
    pub how_many: String,

    #[arg(long, help = "JSON config file")]
    pub config: Option<PathBuf>,
    #[arg(long, value_enum, help = "Hash function feeding the pool [default: sha256]")]
    pub hash: Option<HashKind>,
    #[arg(long, help = "Initial seed (prompted on stdin when absent)")]
    pub init_seed: Option<String>,
    #[arg(long, help = "Write a JSON report of the draw to this path")]
    pub report: Option<PathBuf>,
    #[arg(long, help = "Ignore blank candidate lines", default_value_t = false)]
    pub skip_blank: bool,
    #[arg(short, long, help = "Debug logging on stderr", default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    /// Overlays the flags given on the command line onto `config`.
    #[must_use]
    pub fn resolve(&self, mut config: DrawConfig) -> DrawConfig {
        if let Some(hash) = self.hash {
            config.hash = hash;
        }
        if let Some(ref seed) = self.init_seed {
            config.init_seed = Some(seed.clone());
        }
        if let Some(ref report) = self.report {
            config.report = Some(report.clone());
        }
        config.skip_blank |= self.skip_blank;
        config
    }
}

/// Parses `args` into a [`Cli`].
///
/// `Ok(None)` means help or version text was asked for and has been printed.
///
/// # Errors
/// - `Usage` if the arguments do not fit; the message is clap's rendered usage text.
/// - `IoError` if help or version text cannot be written.
///
pub fn parse_args<I, T>(args: I) -> Result<Option<Cli>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(e) if e.use_stderr() => Err(err_new!(Kind::Usage, &e.to_string())),
        Err(e) => {
            e.print().map_err(|e| err_new_io!(e))?;
            Ok(None)
        }
    }
}
