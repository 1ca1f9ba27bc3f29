/// Deterministic SplitMix64 generator.
///
/// Every random draw in the crate goes through one of these so a seed fully determines the
/// choreography.
#[derive(Clone, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Create a generator from a seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform index in `0..n`. `n` must be non-zero.
    fn next_index(&mut self, n: usize) -> usize {
        ((self.next_f64_01() * n as f64) as usize).min(n - 1)
    }
}

/// Random number in a range, truncated to `places` decimals.
///
/// With `max = None` the range is `[-|min|, |min|]`. With `randomize_sign` the truncated value
/// has its sign flipped half of the time.
pub fn rand_in_range(
    rng: &mut Rng64,
    min: f64,
    max: Option<f64>,
    randomize_sign: bool,
    places: i32,
) -> f64 {
    let (min, max) = match max {
        Some(max) => (min, max),
        None => (-min.abs(), min.abs()),
    };

    let rando = rng.next_f64_01() * (max - min) + min;
    let power = 10f64.powi(places);
    let number = (rando * power).floor() / power;

    if randomize_sign && rng.next_f64_01() - 0.5 <= 0.0 {
        -number
    } else {
        number
    }
}

/// In-place Fisher-Yates shuffle.
pub fn shuffle<T>(rng: &mut Rng64, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i + 1);
        items.swap(i, j);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
