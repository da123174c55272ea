//! Deterministic RNG helpers.
//!
//! Small and dependency-free; **not** cryptographic. Exploratory search draws its random points
//! from here so that a seeded simulation replays identically.

pub trait DeterministicRng {
    fn next_u64(&mut self) -> u64;

    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    /// Uniform in `[0, 1)`.
    fn next_f32_unit(&mut self) -> f32 {
        // 24 bits of mantissa.
        let x = self.next_u32() >> 8;
        (x as f32) / ((1u32 << 24) as f32)
    }

    /// Uniform in `[-1, 1)`.
    fn next_f32_signed(&mut self) -> f32 {
        self.next_f32_unit() * 2.0 - 1.0
    }

    /// A point uniformly distributed inside the unit ball, via rejection sampling.
    fn next_in_unit_ball(&mut self) -> [f32; 3] {
        loop {
            let p = [
                self.next_f32_signed(),
                self.next_f32_signed(),
                self.next_f32_signed(),
            ];
            if p[0] * p[0] + p[1] * p[1] + p[2] * p[2] <= 1.0 {
                return p;
            }
        }
    }
}

/// SplitMix64: good seeding RNG and small deterministic generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl DeterministicRng for SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        mix64(self.state)
    }
}

pub fn mix64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}

/// Per-agent, per-tick stream seed. `stream` separates independent consumers on the same tick.
pub fn derive_seed(global_seed: u64, agent_id: u64, tick: u64, stream: u64) -> u64 {
    let x = global_seed
        ^ mix64(agent_id.wrapping_add(0x9E3779B97F4A7C15))
        ^ mix64(tick.rotate_left(17))
        ^ mix64(stream);
    mix64(x)
}
