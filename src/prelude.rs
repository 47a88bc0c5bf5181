use std::fmt::Debug;

/// Multiplier applied to the sequence length to bound the primes driving a shuffle.
pub const SHUFFLE_MULTIPLIER: usize = 5;

/// Rounds of xor folding applied to the pool window on every update.
pub const UPDATE_ROUNDS: usize = 10;

/// `choose(n)` skips the first `SKIP_FACTOR * n` primes.
pub const SKIP_FACTOR: usize = 7;

/// Leading pool bytes read by an update; every second byte is used.
pub const WINDOW_LEN: usize = 16;

pub fn debug_print<T: Debug>(s: T) {
    #[cfg(debug_assertions)]
    dbg!(s);
}
