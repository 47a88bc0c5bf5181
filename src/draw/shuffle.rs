use super::primes::primes_under;

/// Permutes `items` in place, driven only by its length and `multiplier`.
///
/// For every prime `p < len * multiplier`, in order, the element under a cursor
/// is swapped with `items[p % len]` and the cursor moves one step, wrapping at `len`.
/// Sequences of length 0 or 1 are left alone.
pub fn shuffle<T>(items: &mut [T], multiplier: usize) {
    let len = items.len();
    if len <= 1 {
        return;
    }
    let bound = (len as u64).saturating_mul(multiplier as u64);
    let mut i = 0;
    for p in primes_under(bound) {
        items.swap(i, (p % len as u64) as usize);
        i = (i + 1) % len;
    }
}
