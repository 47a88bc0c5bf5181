use crate::{
    config::HashKind,
    draw::Selector,
    error::Result,
};
use serde::Serialize;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use tracing::info;

/// Everything one draw needs, already read from disk.
#[derive(Debug, Clone)]
pub struct DrawJob {
    pub hash: HashKind,
    pub init_seed: String,
    pub candidates: Vec<String>,
    pub seeds: Vec<Vec<u8>>,
    pub how_many: usize,
}

/// Outcome of a draw, written out as JSON on request.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DrawReport {
    pub hash: HashKind,
    pub pool_size: usize,
    pub candidates: usize,
    pub updates: usize,
    pub chosen: Vec<String>,
    pub remaining: usize,
}

/// Seeds a selector, applies every update seed in order, then chooses.
///
/// # Errors
/// - An update seed is not UTF-8.
/// - `how_many` is larger than the candidate list.
/// - An update is applied to an empty candidate list.
///
pub fn run(job: DrawJob) -> Result<DrawReport> {
    match job.hash {
        HashKind::Sha224 => run_with::<Sha224>(job),
        HashKind::Sha256 => run_with::<Sha256>(job),
        HashKind::Sha384 => run_with::<Sha384>(job),
        HashKind::Sha512 => run_with::<Sha512>(job),
    }
}

fn run_with<D: Digest>(job: DrawJob) -> Result<DrawReport> {
    let candidates = job.candidates.len();
    let mut selector = Selector::<D>::new(job.candidates, job.init_seed.as_bytes())?;
    for seed in &job.seeds {
        selector.update_raw(seed)?;
    }
    let chosen: Vec<String> = selector.choose(job.how_many)?.collect();
    info!(
        hash = %job.hash,
        candidates,
        updates = job.seeds.len(),
        chosen = chosen.len(),
        "draw finished"
    );
    Ok(DrawReport {
        hash: job.hash,
        pool_size: selector.pool().len(),
        candidates,
        updates: job.seeds.len(),
        chosen,
        remaining: selector.remaining(),
    })
}
