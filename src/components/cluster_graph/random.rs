//! Deterministic randomness for reproducible demo graphs.
//!
//! The whole pipeline draws from one [`SeededRng`] so the same seed always
//! produces the same graph and the same cluster colors. SplitMix64 is small,
//! has no dependencies, and is more than good enough for demo data.

/// SplitMix64 generator seeded from an arbitrary string.
pub struct SeededRng {
	state: u64,
}

impl SeededRng {
	/// Create a generator from a string seed.
	///
	/// The seed is hashed with FNV-1a, so any two distinct strings give
	/// distinct streams with overwhelming probability.
	pub fn from_seed(seed: &str) -> Self {
		let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
		for byte in seed.bytes() {
			hash ^= u64::from(byte);
			hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
		}
		Self { state: hash }
	}

	fn next_u64(&mut self) -> u64 {
		self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
		let mut z = self.state;
		z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
		z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
		z ^ (z >> 31)
	}

	/// Uniform `f64` in `[0, 1)`.
	pub fn next_f64(&mut self) -> f64 {
		(self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
	}

	/// Uniform `u32` in `[0, bound)`. Returns 0 when `bound` is 0.
	pub fn next_below(&mut self, bound: u32) -> u32 {
		if bound == 0 {
			return 0;
		}
		(self.next_f64() * f64::from(bound)) as u32
	}
}
