use std::fmt;

use ivf::{FourCC, Header, Ivf};

/// A summary of an IVF file for display.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Summary {
	pub header: Header,
	pub frame_rate: f64,

	/// The number of complete frames, which may be fewer than declared.
	pub frames: usize,

	/// Only known for VP8.
	pub keyframes: Option<usize>,

	/// The total size of all payloads.
	pub bytes: usize,

	/// The time between the earliest and latest timestamp.
	pub span_micros: Option<u64>,

	pub complete: bool,
}

impl Summary {
	pub fn new(ivf: &Ivf) -> Self {
		let header = ivf.header;

		let keyframes = (header.fourcc == FourCC::VP80).then(|| {
			ivf.frames
				.iter()
				.filter(|frame| ivf::vp8::is_keyframe(&frame.payload))
				.count()
		});

		let timestamps = ivf.frames.iter().map(|frame| frame.timestamp);
		let span_micros = match (timestamps.clone().min(), timestamps.max()) {
			(Some(min), Some(max)) => header.timebase.micros_from_ticks(max - min),
			_ => None,
		};

		Self {
			header,
			frame_rate: header.timebase.frame_rate(),
			frames: ivf.frames.len(),
			keyframes,
			bytes: ivf.frames.iter().map(|frame| frame.payload.len()).sum(),
			span_micros,
			complete: ivf.is_complete(),
		}
	}
}

impl fmt::Display for Summary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let header = &self.header;

		writeln!(f, "codec:      {}", header.fourcc)?;
		writeln!(f, "size:       {}x{}", header.width, header.height)?;
		writeln!(
			f,
			"timebase:   {}/{} ({:.3} fps)",
			header.timebase.numerator, header.timebase.denominator, self.frame_rate
		)?;
		writeln!(f, "version:    {}", header.version)?;
		writeln!(f, "header:     {} bytes", header.header_size)?;
		writeln!(f, "frames:     {} of {} declared", self.frames, header.frame_count)?;

		if let Some(keyframes) = self.keyframes {
			writeln!(f, "keyframes:  {keyframes}")?;
		}

		writeln!(f, "payload:    {} bytes", self.bytes)?;

		match self.span_micros {
			Some(micros) => write!(f, "span:       {:.3}s", micros as f64 / 1_000_000.0),
			None => write!(f, "span:       -"),
		}
	}
}

/// A single line per frame: index, size, ticks, microseconds and type.
pub fn frame_lines(ivf: &Ivf) -> impl Iterator<Item = String> + '_ {
	let header = ivf.header;
	let vp8 = header.fourcc == FourCC::VP80;

	ivf.frames.iter().enumerate().map(move |(index, frame)| {
		let micros = match header.timebase.micros_from_ticks(frame.timestamp) {
			Some(micros) => micros.to_string(),
			None => "-".to_string(),
		};

		let kind = match vp8.then(|| ivf::vp8::frame_type(&frame.payload)).flatten() {
			Some(ivf::vp8::FrameType::Key) => "key",
			Some(ivf::vp8::FrameType::Delta) => "delta",
			None => "-",
		};

		format!(
			"{index:>6} {size:>10} {ticks:>10} {micros:>12} {kind}",
			size = frame.payload.len(),
			ticks = frame.timestamp,
		)
	})
}
