//! Reproducible selection of items from a candidate list.
//!
//! A [`Selector`] is seeded once, absorbs any number of further seeds through
//! [`Selector::update`], and finally hands out items with [`Selector::choose`].
//! The same seeds applied to the same candidates always give the same draw.
//! Nothing here is cryptographically unpredictable.

pub mod pool;
pub mod primes;
pub mod shuffle;

use crate::{
    err_new, err_new_tryfrom, err_new_utf8,
    error::{Kind, Result},
    prelude::{SHUFFLE_MULTIPLIER, SKIP_FACTOR, UPDATE_ROUNDS},
};
use pool::Pool;
use primes::{primes, Sieve};
use sha2::{Digest, Sha256};
use shuffle::shuffle;
use std::{
    iter::{Skip, Take},
    marker::PhantomData,
};
use tracing::{debug, trace};

/// Selection engine: the pool, the remaining candidates, and the hash `D` used for every seed.
pub struct Selector<D = Sha256> {
    pool: Pool,
    data: Vec<String>,
    hasher: PhantomData<D>,
}

impl<D> std::fmt::Debug for Selector<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selector")
            .field("pool", &self.pool)
            .field("data", &self.data)
            .finish()
    }
}

impl<D: Digest> Selector<D> {
    /// Seeds the pool with `init_seed` and shuffles `candidates` once.
    ///
    /// # Parameters
    /// - `candidates`: the items to draw from, in their original order.
    /// - `init_seed`: raw seed bytes; text is used as its UTF-8 encoding.
    ///
    /// # Errors
    /// - The digest of `D` is too short to feed an update.
    ///
    pub fn new(candidates: Vec<String>, init_seed: impl AsRef<[u8]>) -> Result<Self> {
        let pool = Pool::new::<D>(init_seed.as_ref())?;
        let mut data = candidates;
        shuffle(&mut data, SHUFFLE_MULTIPLIER);
        debug!(pool_size = pool.len(), candidates = data.len(), "selector seeded");
        Ok(Self {
            pool,
            data,
            hasher: PhantomData,
        })
    }

    /// Folds one more seed into the pool and reorders the candidates.
    ///
    /// The seed is trimmed and hashed, the digest is mixed into the pool, and the pool
    /// window seeds a pair `a, b`. Each of the ten folding rounds narrows the pair to a
    /// range `[a, b)`, shuffles that range and reorders the sequence to `data[b..]`,
    /// the shuffled range, then `data[..a]`.
    ///
    /// # Errors
    /// - `DegenerateSequence` if no candidates are left. The pool is not touched.
    ///
    pub fn update(&mut self, seed: &str) -> Result<()> {
        if self.data.is_empty() {
            return Err(err_new!(
                Kind::DegenerateSequence,
                "cannot update an empty candidate sequence"
            ));
        }
        let len = u32::try_from(self.data.len()).map_err(|e| err_new_tryfrom!(e))?;

        let digest = D::digest(seed.trim().as_bytes());
        self.pool.mixin(&digest);

        let (mut a, mut b) = self.pool.window();
        for _ in 0..UPDATE_ROUNDS {
            a = (a ^ b) % len;
            b = (b ^ a.wrapping_sub(1)) % len;
            if a > b {
                std::mem::swap(&mut a, &mut b);
            }
            trace!(a, b, len, "update round");
            self.rotate_range(a as usize, b as usize);
        }
        debug!(a, b, len, "update window");
        Ok(())
    }

    /// Shuffles `data[a..b]` and reorders the sequence to `data[b..]`, the shuffled
    /// range, then `data[..a]`.
    fn rotate_range(&mut self, a: usize, b: usize) {
        let tail = self.data.split_off(b);
        let mut middle = self.data.split_off(a);
        shuffle(&mut middle, SHUFFLE_MULTIPLIER);
        let head = std::mem::replace(&mut self.data, tail);
        self.data.extend(middle);
        self.data.extend(head);
    }

    /// Same as [`Selector::update`] for a seed that has not been decoded yet.
    ///
    /// # Errors
    /// - `EncodingError` if `seed` is not valid UTF-8.
    /// - Anything [`Selector::update`] returns.
    ///
    pub fn update_raw(&mut self, seed: &[u8]) -> Result<()> {
        let seed = std::str::from_utf8(seed).map_err(|e| err_new_utf8!(e))?;
        self.update(seed)
    }
}

impl<D> Selector<D> {
    /// Draws `how_many` items without replacement.
    ///
    /// The first `7 * how_many` primes are skipped; each of the next `how_many` primes
    /// `p` removes and yields the item at `p % remaining`. The returned iterator is lazy:
    /// items leave the sequence only as they are pulled.
    ///
    /// # Errors
    /// - `InvalidCount` if `how_many` exceeds the remaining candidates.
    ///
    pub fn choose(&mut self, how_many: usize) -> Result<Choose<'_>> {
        if how_many > self.data.len() {
            return Err(err_new!(
                Kind::InvalidCount,
                &format!(
                    "cannot choose {how_many} out of {} remaining",
                    self.data.len()
                )
            ));
        }
        let skip = SKIP_FACTOR * how_many;
        Ok(Choose {
            data: &mut self.data,
            primes: primes(how_many + skip).skip(skip),
        })
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn candidates(&self) -> &[String] {
        &self.data
    }

    #[must_use]
    pub fn pool(&self) -> &Pool {
        &self.pool
    }
}

/// Lazy draw returned by [`Selector::choose`].
pub struct Choose<'a> {
    data: &'a mut Vec<String>,
    primes: Skip<Take<Sieve>>,
}

impl Iterator for Choose<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let p = self.primes.next()?;
        if self.data.is_empty() {
            return None;
        }
        let index = (p % self.data.len() as u64) as usize;
        trace!(prime = p, index, remaining = self.data.len(), "draw");
        Some(self.data.remove(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.primes.size_hint();
        (0, upper)
    }
}

/// Parses a requested count.
///
/// # Errors
/// - `InvalidCount` if `text` is not an integer or is negative.
///
pub fn parse_count(text: &str) -> Result<usize> {
    let count: i64 = text.trim().parse().map_err(|e: std::num::ParseIntError| {
        err_new!(Kind::InvalidCount, &format!("{text:?} is not an integer: {e}"))
    })?;
    usize::try_from(count)
        .map_err(|_| err_new!(Kind::InvalidCount, &format!("{count} must not be negative")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use sha2::Sha512;
    use std::collections::HashSet;

    fn items(names: &str) -> Vec<String> {
        names.chars().map(String::from).collect()
    }

    fn seeded(names: &str) -> Selector {
        Selector::new(items(names), "seed").unwrap()
    }

    #[test]
    fn construction_shuffles_once() {
        let selector = seeded("abcde");
        assert_eq!(selector.candidates(), items("cbdae").as_slice());
        assert_eq!(
            selector.pool().to_hex(),
            "19b25e5ae1df50f2834cff4cb52d23adbd3cc0449e58eb0ab3b64768098d002b"
        );
    }

    #[test]
    fn golden_draw_without_updates() {
        let mut selector = seeded("abcde");
        let chosen: Vec<String> = selector.choose(2).unwrap().collect();
        assert_eq!(chosen, items("db"));
        assert_eq!(selector.candidates(), items("cae").as_slice());
    }

    #[test]
    fn update_reorders_candidates() {
        let mut selector = seeded("abcde");
        selector.update("alpha").unwrap();
        assert_eq!(selector.candidates(), items("aecdb").as_slice());
        assert_eq!(
            selector.pool().to_hex(),
            "8d002b19b35e5be1df50f2834cff4cb52c20aca23dc0459959eb0bbcb647690e"
        );
    }

    #[rstest]
    #[case(1, 4, "efdcba")]
    #[case(0, 0, "abcdef")]
    #[case(0, 6, "becfad")]
    fn range_rotation(#[case] a: usize, #[case] b: usize, #[case] expected: &str) {
        let mut selector = seeded("abcdef");
        selector.data = items("abcdef");
        selector.rotate_range(a, b);
        assert_eq!(selector.candidates(), items(expected).as_slice());
    }

    #[test]
    fn update_trims_seed() {
        let mut plain = seeded("abcde");
        let mut padded = seeded("abcde");
        plain.update("alpha").unwrap();
        padded.update("  alpha \n").unwrap();
        assert_eq!(plain.candidates(), padded.candidates());
        assert_eq!(plain.pool(), padded.pool());
    }

    #[test]
    fn updates_then_draw() {
        let mut selector = seeded("abcde");
        selector.update("alpha").unwrap();
        selector.update("  beta\n").unwrap();
        assert_eq!(selector.candidates(), items("dbace").as_slice());
        let chosen: Vec<String> = selector.choose(3).unwrap().collect();
        assert_eq!(chosen, items("eca"));
        assert_eq!(selector.candidates(), items("db").as_slice());
    }

    #[test]
    fn ten_candidates_three_updates() {
        let mut selector = Selector::<Sha256>::new(
            (0..10).map(|i| i.to_string()).collect(),
            "seed",
        )
        .unwrap();
        for seed in ["one", "two", "three"] {
            selector.update(seed).unwrap();
        }
        let order: Vec<&str> = selector.candidates().iter().map(String::as_str).collect();
        assert_eq!(order, ["7", "8", "6", "1", "4", "9", "3", "2", "0", "5"]);
        let chosen: Vec<String> = selector.choose(4).unwrap().collect();
        assert_eq!(chosen, ["5", "9", "0", "3"]);
    }

    #[test]
    fn successive_draws_shrink() {
        let mut selector = seeded("abcdefghij");
        assert_eq!(selector.candidates(), items("efjichbdag").as_slice());
        assert_eq!(selector.choose(0).unwrap().count(), 0);
        assert_eq!(selector.choose(1).unwrap().collect::<Vec<_>>(), items("g"));
        assert_eq!(selector.choose(2).unwrap().collect::<Vec<_>>(), items("jb"));
        assert_eq!(selector.choose(3).unwrap().collect::<Vec<_>>(), items("iad"));
        assert_eq!(selector.remaining(), 4);
    }

    #[test]
    fn other_hash_sizes_the_pool() {
        let mut selector = Selector::<Sha512>::new(items("abcde"), "seed").unwrap();
        assert_eq!(selector.pool().len(), 64);
        assert_eq!(selector.candidates(), items("cbdae").as_slice());
        assert_eq!(selector.choose(2).unwrap().collect::<Vec<_>>(), items("db"));
    }

    #[test]
    fn identical_inputs_identical_draws() {
        let run = || {
            let mut selector = seeded("abcdefghijklmnopqrstuvwxyz");
            for seed in ["2024-01-01", "block 812345", "", "  mixed case "] {
                selector.update(seed).unwrap();
            }
            selector.choose(6).unwrap().collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[rstest]
    #[case(1)]
    #[case(5)]
    #[case(26)]
    fn draws_are_distinct(#[case] how_many: usize) {
        let mut selector = seeded("abcdefghijklmnopqrstuvwxyz");
        selector.update("distinct").unwrap();
        let chosen: Vec<String> = selector.choose(how_many).unwrap().collect();
        assert_eq!(chosen.len(), how_many);
        assert_eq!(chosen.iter().collect::<HashSet<_>>().len(), how_many);
        assert_eq!(selector.remaining(), 26 - how_many);
        assert!(chosen.iter().all(|c| !selector.candidates().contains(c)));
    }

    #[test]
    fn choose_is_lazy() {
        let mut selector = seeded("abcde");
        let mut draw = selector.choose(2).unwrap();
        assert_eq!(draw.next().as_deref(), Some("d"));
        drop(draw);
        assert_eq!(selector.remaining(), 4);
    }

    #[test]
    fn choosing_more_than_left_fails() {
        let mut selector = seeded("abc");
        let err = selector.choose(4).err().unwrap();
        assert_eq!(err.kind(), &Kind::InvalidCount);
        assert_eq!(selector.remaining(), 3);
    }

    #[test]
    fn empty_candidates() {
        let mut selector = Selector::<Sha256>::new(Vec::new(), "seed").unwrap();
        assert_eq!(selector.choose(0).unwrap().count(), 0);
        assert_eq!(selector.choose(1).err().unwrap().kind(), &Kind::InvalidCount);

        let before = selector.pool().clone();
        let err = selector.update("anything").unwrap_err();
        assert_eq!(err.kind(), &Kind::DegenerateSequence);
        assert_eq!(selector.pool(), &before);
    }

    #[test]
    fn single_candidate_survives_updates() {
        let mut selector = seeded("z");
        selector.update("one").unwrap();
        selector.update("two").unwrap();
        assert_eq!(selector.candidates(), items("z").as_slice());
        assert_eq!(selector.choose(1).unwrap().collect::<Vec<_>>(), items("z"));
    }

    #[test]
    fn updates_keep_membership() {
        let mut selector = seeded("abcdefghijklmnop");
        for seed in ["a", "b", "c", "d", "e", "f"] {
            selector.update(seed).unwrap();
            let mut sorted = selector.candidates().to_vec();
            sorted.sort();
            assert_eq!(sorted, items("abcdefghijklmnop"));
        }
    }

    #[test]
    fn raw_update_matches_text_update() {
        let mut text = seeded("abcdef");
        let mut raw = seeded("abcdef");
        text.update("héllo").unwrap();
        raw.update_raw("héllo".as_bytes()).unwrap();
        assert_eq!(text.candidates(), raw.candidates());

        let err = raw.update_raw(&[b'a', 0xc3]).unwrap_err();
        assert_eq!(err.kind(), &Kind::EncodingError);
    }

    #[test]
    fn byte_seed_equals_text_seed() {
        let text = Selector::<Sha256>::new(items("abc"), "seed").unwrap();
        let bytes = Selector::<Sha256>::new(items("abc"), b"seed".to_vec()).unwrap();
        assert_eq!(text.pool(), bytes.pool());
    }

    #[rstest]
    #[case("3", Some(3))]
    #[case(" 12 ", Some(12))]
    #[case("0", Some(0))]
    #[case("-1", None)]
    #[case("two", None)]
    #[case("1.5", None)]
    #[case("", None)]
    fn count_parsing(#[case] text: &str, #[case] expected: Option<usize>) {
        match (parse_count(text), expected) {
            (Ok(count), Some(want)) => assert_eq!(count, want),
            (Err(err), None) => assert_eq!(err.kind(), &Kind::InvalidCount),
            (got, want) => panic!("{text:?}: got {got:?}, want {want:?}"),
        }
    }
}
