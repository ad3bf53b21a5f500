//! Deterministic, string-seeded random numbers.
//!
//! The seed string is hashed to a 32-bit state with an xmur3-style avalanche
//! mix, which then drives a mulberry32-style counter generator. Both stages are
//! pure integer arithmetic on `u32`, so the stream is identical on every
//! platform and every run.

/// Trim a user-supplied seed, mapping the empty string to `"default"`.
pub fn normalize_seed(seed: &str) -> String {
    let trimmed = seed.trim();
    if trimmed.is_empty() {
        "default".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Hash a seed string to a well-mixed 32-bit state.
fn hash_seed(seed: &str) -> u32 {
    let len = seed.chars().count() as u32;
    let mut h: u32 = 1_779_033_703 ^ len;
    for c in seed.chars() {
        h = (h ^ c as u32).wrapping_mul(3_432_918_353);
        h = h.rotate_left(13);
    }
    h = (h ^ (h >> 16)).wrapping_mul(2_246_822_507);
    h = (h ^ (h >> 13)).wrapping_mul(3_266_489_909);
    h ^ (h >> 16)
}

/// A small, fast, reproducible pseudo-random generator.
///
/// Every call site owns its own instance; there is no shared state.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Create a generator from a seed string.
    pub fn new(seed: &str) -> Self {
        Self {
            state: hash_seed(seed),
        }
    }

    /// Next raw 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61)) ^ t;
        t ^ (t >> 14)
    }

    /// A float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// An integer in `lo..=hi`. Reversed bounds are swapped.
    pub fn int(&mut self, lo: i32, hi: i32) -> i32 {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        let span = i64::from(hi) - i64::from(lo) + 1;
        let offset = (self.next_f64() * span as f64).floor() as i64;
        (i64::from(lo) + offset.min(span - 1)) as i32
    }

    /// An index in `0..n`. Returns 0 when `n` is 0.
    pub fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        ((self.next_f64() * n as f64).floor() as usize).min(n - 1)
    }

    /// `true` with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// A uniformly chosen element, or `None` for an empty slice.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            items.get(self.below(items.len()))
        }
    }

    /// Fisher–Yates shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }
}
