use super::primes::primes_under;
use crate::{
    err_new,
    error::{Kind, Result},
    prelude::WINDOW_LEN,
};
use sha2::Digest;

/// Fixed-length byte buffer carrying every seed folded in so far.
///
/// The length is the digest size of the hash it was created with and never changes.
#[derive(Clone, PartialEq, Eq)]
pub struct Pool(Vec<u8>);

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Pool").field(&self.to_hex()).finish()
    }
}

impl Pool {
    /// Hashes `seed` with `D` and diffuses the digest into a new pool.
    ///
    /// # Errors
    /// - `D` produces a digest shorter than the update window.
    pub fn new<D: Digest>(seed: &[u8]) -> Result<Self> {
        Self::from_digest(D::digest(seed).to_vec())
    }

    /// Builds a pool from raw digest bytes.
    ///
    /// `digest[0]` bounds the primes applied: each prime `p` below it xors
    /// `p * (p + 1)` (truncated to a byte) into `pool[p % len]`, in increasing order,
    /// against the current value of that byte.
    ///
    /// # Errors
    /// - `digest` is shorter than the update window.
    pub fn from_digest(mut digest: Vec<u8>) -> Result<Self> {
        if digest.len() < WINDOW_LEN {
            return Err(err_new!(
                Kind::Other,
                &format!(
                    "digest of {} bytes is shorter than the {WINDOW_LEN} byte window",
                    digest.len()
                )
            ));
        }
        let len = digest.len() as u64;
        for p in primes_under(u64::from(digest[0])) {
            digest[(p % len) as usize] ^= (p * (p + 1)) as u8;
        }
        Ok(Self(digest))
    }

    /// Folds `content` into the pool.
    ///
    /// The pool is rotated right by 3, then each byte `v` of `content` xors
    /// `v ^ (v - 1)` into `pool[(v + 3) % len]`. `v - 1` wraps, so `v = 0` contributes `0xff`.
    pub fn mixin(&mut self, content: &[u8]) {
        self.0.rotate_right(3);
        let len = self.0.len();
        for &v in content {
            self.0[(usize::from(v) + 3) % len] ^= v ^ v.wrapping_sub(1);
        }
    }

    /// Reads the bytes at offsets 0, 2, ..., 14 as two little-endian `u32`s.
    #[must_use]
    pub fn window(&self) -> (u32, u32) {
        let picked: Vec<u8> = self.0[..WINDOW_LEN].iter().step_by(2).copied().collect();
        let a = u32::from_le_bytes([picked[0], picked[1], picked[2], picked[3]]);
        let b = u32::from_le_bytes([picked[4], picked[5], picked[6], picked[7]]);
        (a, b)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::{Sha224, Sha256, Sha384, Sha512};

    #[test]
    fn diffuses_seed_digest() {
        // sha256("seed") starts with 0x19, so primes below 25 are applied.
        let pool = Pool::new::<Sha256>(b"seed").unwrap();
        assert_eq!(
            pool.to_hex(),
            "19b25e5ae1df50f2834cff4cb52d23adbd3cc0449e58eb0ab3b64768098d002b"
        );
    }

    #[test]
    fn small_leading_byte_leaves_digest_alone() {
        let mut digest = vec![1_u8; 32];
        digest[5] = 0xaa;
        let pool = Pool::from_digest(digest.clone()).unwrap();
        assert_eq!(pool.as_bytes(), digest.as_slice());
    }

    #[test]
    fn xor_hits_current_byte() {
        // bound 4: p = 2 -> pool[2] ^= 6, p = 3 -> pool[3] ^= 12
        let mut digest = vec![0_u8; 16];
        digest[0] = 4;
        let pool = Pool::from_digest(digest).unwrap();
        assert_eq!(&pool.as_bytes()[..5], &[4, 0, 6, 12, 0]);
    }

    #[test]
    fn mixin_rotates_then_xors() {
        let mut pool = Pool::from_digest((0..16).collect()).unwrap();
        pool.mixin(&[]);
        assert_eq!(
            pool.as_bytes(),
            &[13, 14, 15, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]
        );

        let mut pool = Pool::from_digest(vec![0; 16]).unwrap();
        // v = 0 -> index 3, 0 ^ 0xff; v = 2 -> index 5, 2 ^ 1
        pool.mixin(&[0, 2]);
        assert_eq!(pool.as_bytes()[3], 0xff);
        assert_eq!(pool.as_bytes()[5], 3);

        // same index twice cancels out
        let mut pool = Pool::from_digest(vec![0; 16]).unwrap();
        pool.mixin(&[7, 7]);
        assert!(pool.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn window_is_little_endian_every_second_byte() {
        let digest: Vec<u8> = (0..16).collect();
        let pool = Pool::from_digest(digest).unwrap();
        assert_eq!(
            pool.window(),
            (u32::from_le_bytes([0, 2, 4, 6]), u32::from_le_bytes([8, 10, 12, 14]))
        );
    }

    #[test]
    fn length_never_changes() {
        for (mut pool, len) in [
            (Pool::new::<Sha224>(b"x").unwrap(), 28),
            (Pool::new::<Sha256>(b"x").unwrap(), 32),
            (Pool::new::<Sha384>(b"x").unwrap(), 48),
            (Pool::new::<Sha512>(b"x").unwrap(), 64),
        ] {
            assert_eq!(pool.len(), len);
            for round in 0..20_u8 {
                pool.mixin(&[round, 255, 0, round.wrapping_mul(31)]);
            }
            assert_eq!(pool.len(), len);
        }
    }

    #[test]
    fn short_digest_is_rejected() {
        let err = Pool::from_digest(vec![0; 8]).unwrap_err();
        assert_eq!(err.kind(), &Kind::Other);
    }
}
