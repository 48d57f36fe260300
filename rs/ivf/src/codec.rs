//! Interfaces for the encoders and decoders that produce and consume IVF payloads.
//!
//! The actual codec is provided by the caller, ex. a hardware encoder or a software decoder.
//! This crate only moves opaque payloads between them and the container.

use bytes::Bytes;

use crate::Header;

/// An encoded frame as produced by an encoder or consumed by a decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedChunk {
	pub payload: Bytes,

	/// The presentation timestamp in microseconds.
	pub timestamp: u64,

	/// Whether the frame can be decoded without any prior frames.
	pub keyframe: bool,
}

/// A source of encoded frames.
pub trait Encoder {
	/// Return the next encoded frame, or [None] once the encoder has been flushed.
	fn next_chunk(&mut self) -> anyhow::Result<Option<EncodedChunk>>;
}

/// A sink for encoded frames.
pub trait Decoder {
	/// Decode a single frame.
	fn decode(&mut self, chunk: EncodedChunk) -> anyhow::Result<()>;

	/// Flush any buffered frames.
	///
	/// Some codecs buffer frames internally. Call this at the end of playback.
	fn flush(&mut self) -> anyhow::Result<()> {
		Ok(())
	}
}

/// Notified as a file is demuxed, ex. to collect statistics or drive a progress display.
///
/// Every method defaults to doing nothing.
pub trait Observer {
	fn header(&mut self, _header: &Header) {}

	/// Called before each frame is handed to the decoder.
	fn frame(&mut self, _index: usize, _chunk: &EncodedChunk) {}

	/// Called after the decoder has been flushed.
	fn finished(&mut self, _count: usize) {}
}

impl Observer for () {}
