use std::collections::HashMap;

const SMALL_PRIMES: [u64; 2] = [2, 3];

/// Incremental sieve over the 6k±1 wheel.
///
/// Only candidates of the form `6k + 1` and `6k + 5` are examined. Every prime found
/// registers its square as the first composite it witnesses; when a witnessed
/// composite comes up, each witness is moved on to its next odd multiple that is not
/// divisible by 3, so the map only ever holds values the wheel will visit.
///
/// Every `Sieve` owns its state. Two sieves never share or resume each other.
#[derive(Debug)]
pub struct Sieve {
    small: usize,
    candidate: u64,
    step: u64,
    composites: HashMap<u64, Vec<u64>>,
}

impl Default for Sieve {
    fn default() -> Self {
        Self::new()
    }
}

impl Sieve {
    #[must_use]
    pub fn new() -> Self {
        Self {
            small: 0,
            candidate: 5,
            step: 2,
            composites: HashMap::new(),
        }
    }

    fn advance(&mut self, composite: u64, witnesses: Vec<u64>) {
        for p in witnesses {
            let stride = 2 * p;
            let mut next = composite + stride;
            while next % 3 == 0 {
                next += stride;
            }
            self.composites.entry(next).or_default().push(p);
        }
    }
}

impl Iterator for Sieve {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if let Some(&p) = SMALL_PRIMES.get(self.small) {
            self.small += 1;
            return Some(p);
        }
        loop {
            let q = self.candidate;
            self.candidate += self.step;
            // 5, 7, 11, 13, 17, 19, ...
            self.step = 6 - self.step;
            match self.composites.remove(&q) {
                Some(witnesses) => self.advance(q, witnesses),
                None => {
                    if let Some(square) = q.checked_mul(q) {
                        self.composites.insert(square, vec![q]);
                    }
                    return Some(q);
                }
            }
        }
    }
}

/// The first `count` primes, starting at 2.
#[must_use]
pub fn primes(count: usize) -> std::iter::Take<Sieve> {
    Sieve::new().take(count)
}

/// All primes strictly below `bound`, in increasing order.
///
/// Stops at the first prime that reaches `bound`; nothing past it is computed.
pub fn primes_under(bound: u64) -> impl Iterator<Item = u64> {
    Sieve::new().take_while(move |&p| p < bound)
}
