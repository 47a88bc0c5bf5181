use crate::{
    err_new, err_new_io, err_new_json, err_new_utf8,
    error::{Kind, Result},
};
use serde::Serialize;
use std::{
    fs::{self, File},
    io::{BufRead, Write},
    path::Path,
};

pub const SEED_PROMPT: &str = "Input initialize seed:";

/// Reads one candidate per line.
///
/// Line terminators are stripped and nothing else; blank lines are kept unless
/// `skip_blank` is set.
///
/// # Errors
/// - The file cannot be read or is not UTF-8.
///
pub fn read_candidates(path: &Path, skip_blank: bool) -> Result<Vec<String>> {
    let bytes = fs::read(path).map_err(|e| err_new_io!(e))?;
    let text = std::str::from_utf8(&bytes).map_err(|e| err_new_utf8!(e))?;
    Ok(text
        .lines()
        .filter(|line| !skip_blank || !line.trim().is_empty())
        .map(str::to_string)
        .collect())
}

/// Reads update seeds as raw lines, split on `\n`.
///
/// Decoding is left to the selector so that a bad line fails with its own error.
///
/// # Errors
/// - The file cannot be read.
///
pub fn read_seed_lines(path: &Path) -> Result<Vec<Vec<u8>>> {
    let bytes = fs::read(path).map_err(|e| err_new_io!(e))?;
    let mut lines: Vec<Vec<u8>> = bytes.split(|&b| b == b'\n').map(<[u8]>::to_vec).collect();
    if lines.last().is_some_and(Vec::is_empty) {
        lines.pop();
    }
    Ok(lines)
}

/// Writes [`SEED_PROMPT`] to `prompt` and reads one trimmed line from `input`.
///
/// # Errors
/// - Reading or writing fails.
/// - `input` is already at end of file.
///
pub fn prompt_seed<R: BufRead, W: Write>(mut input: R, mut prompt: W) -> Result<String> {
    write!(prompt, "{SEED_PROMPT}").map_err(|e| err_new_io!(e))?;
    prompt.flush().map_err(|e| err_new_io!(e))?;
    let mut line = String::new();
    if input.read_line(&mut line).map_err(|e| err_new_io!(e))? == 0 {
        return Err(err_new!(
            Kind::IoError(std::io::ErrorKind::UnexpectedEof),
            "no initial seed given"
        ));
    }
    Ok(line.trim().to_string())
}

pub fn write_json<P: AsRef<Path>, T: Serialize>(path: P, data: &T) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent).map_err(|e| err_new_io!(e))?;
    }
    let writer = File::create(path.as_ref()).map_err(|e| err_new_io!(e))?;
    serde_json::to_writer_pretty(writer, data).map_err(|e| err_new_json!(e))?;
    Ok(())
}
