const MICROS_PER_SECOND: u128 = 1_000_000;

/// The duration of one tick: `numerator / denominator` seconds.
///
/// IVF files written by this crate use `1 / fps`, so one tick is one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timebase {
	pub numerator: u32,
	pub denominator: u32,
}

impl Timebase {
	pub const fn new(numerator: u32, denominator: u32) -> Self {
		Self { numerator, denominator }
	}

	pub const fn from_fps(fps: u32) -> Self {
		Self::new(1, fps)
	}

	/// The nominal frame rate, not validated by the container.
	pub fn frame_rate(&self) -> f64 {
		self.denominator as f64 / self.numerator as f64
	}

	/// Convert a presentation time in microseconds to ticks, rounding to the nearest tick.
	///
	/// Returns [None] if the numerator is zero or the result overflows.
	pub fn ticks_from_micros(&self, micros: u64) -> Option<u64> {
		let n = micros as u128 * self.denominator as u128;
		let d = self.numerator as u128 * MICROS_PER_SECOND;
		div_round(n, d)
	}

	/// Convert ticks to a presentation time in microseconds, rounding to the nearest microsecond.
	///
	/// Returns [None] if the denominator is zero or the result overflows.
	pub fn micros_from_ticks(&self, ticks: u64) -> Option<u64> {
		let n = ticks as u128 * self.numerator as u128 * MICROS_PER_SECOND;
		div_round(n, self.denominator as u128)
	}
}

// Rounds half away from zero, like Math.round for non-negative values.
fn div_round(n: u128, d: u128) -> Option<u64> {
	if d == 0 {
		return None;
	}

	u64::try_from((n + d / 2) / d).ok()
}
