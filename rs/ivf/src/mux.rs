use anyhow::Context;
use bytes::Bytes;

use crate::{Decoder, EncodedChunk, Encoder, FourCC, Header, Ivf, Observer, Writer, vp8};

/// Writes encoder output to an IVF file, converting microsecond timestamps to ticks.
pub struct Muxer {
	writer: Writer,
}

impl Muxer {
	pub fn new(writer: Writer) -> Self {
		Self { writer }
	}

	/// Add a single encoded frame.
	pub fn push(&mut self, chunk: EncodedChunk) -> anyhow::Result<()> {
		let timebase = self.writer.timebase();
		let ticks = timebase
			.ticks_from_micros(chunk.timestamp)
			.with_context(|| format!("timestamp {}µs out of range for {timebase:?}", chunk.timestamp))?;

		tracing::trace!(
			micros = chunk.timestamp,
			ticks,
			size = chunk.payload.len(),
			keyframe = chunk.keyframe,
			"muxing frame"
		);

		self.writer.add_frame(chunk.payload, ticks)?;

		Ok(())
	}

	/// Pull every frame from the encoder, returning the number of frames added.
	pub fn drain<E: Encoder + ?Sized>(&mut self, encoder: &mut E) -> anyhow::Result<usize> {
		let mut count = 0;

		while let Some(chunk) = encoder.next_chunk().context("failed to encode frame")? {
			self.push(chunk)?;
			count += 1;
		}

		tracing::debug!(count, total = self.writer.len(), "drained encoder");

		Ok(count)
	}

	pub fn writer(&self) -> &Writer {
		&self.writer
	}

	/// Produce the complete file.
	pub fn finish(self) -> Bytes {
		self.writer.finalize()
	}
}

/// Feeds the frames of a VP8 IVF file to a decoder.
pub struct Demuxer {
	ivf: Ivf,

	// Timestamps are relative to the first frame.
	first: u64,
}

impl Demuxer {
	/// Errors unless the file contains VP8, the only codec we can classify keyframes for.
	pub fn new(ivf: Ivf) -> anyhow::Result<Self> {
		let fourcc = ivf.header.fourcc;
		anyhow::ensure!(fourcc == FourCC::VP80, "unsupported codec: {fourcc}");

		let first = ivf.frames.first().map(|frame| frame.timestamp).unwrap_or(0);
		Ok(Self { ivf, first })
	}

	pub fn header(&self) -> &Header {
		&self.ivf.header
	}

	/// Return each frame as a decoder input, in file order.
	///
	/// A frame timestamped before the first frame is clamped to zero.
	pub fn chunks(&self) -> impl Iterator<Item = anyhow::Result<EncodedChunk>> + '_ {
		let timebase = self.ivf.header.timebase;

		self.ivf.frames.iter().map(move |frame| {
			let ticks = frame.timestamp.saturating_sub(self.first);
			let timestamp = timebase
				.micros_from_ticks(ticks)
				.with_context(|| format!("timestamp {ticks} out of range for {timebase:?}"))?;

			Ok(EncodedChunk {
				payload: frame.payload.clone(),
				timestamp,
				keyframe: vp8::is_keyframe(&frame.payload),
			})
		})
	}

	/// Decode every frame then flush the decoder, returning the number of frames decoded.
	pub fn run<D, O>(&self, decoder: &mut D, observer: &mut O) -> anyhow::Result<usize>
	where
		D: Decoder + ?Sized,
		O: Observer + ?Sized,
	{
		observer.header(&self.ivf.header);

		let mut count = 0;
		for (index, chunk) in self.chunks().enumerate() {
			let chunk = chunk?;
			observer.frame(index, &chunk);

			tracing::trace!(index, micros = chunk.timestamp, keyframe = chunk.keyframe, "decoding frame");
			decoder
				.decode(chunk)
				.with_context(|| format!("failed to decode frame {index}"))?;

			count += 1;
		}

		decoder.flush().context("failed to flush decoder")?;
		observer.finished(count);

		tracing::debug!(count, "demux finished");

		Ok(count)
	}
}
