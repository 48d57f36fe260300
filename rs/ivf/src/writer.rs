use bytes::{BufMut, Bytes, BytesMut};

use crate::{
	Error, FRAME_HEADER_SIZE, FourCC, Frame, HEADER_SIZE, Header, Result, Timebase,
	coding::Encode,
};

/// The MIME type of an IVF file.
pub const CONTENT_TYPE: &str = "video/x-ivf";

/// Accumulates frames and produces a complete IVF file.
///
/// [Writer::finalize] doesn't consume the writer, so more frames can be added and the file finalized again.
/// Each call returns a new buffer; previously returned buffers are never modified.
#[derive(Debug, Clone)]
pub struct Writer {
	header: Header,
	frames: Vec<Frame>,

	// The sum of all payload sizes, used to size the output buffer.
	payload_size: usize,
}

impl Writer {
	/// Create a writer with a timebase of `1 / frames_per_second`.
	///
	/// The dimensions are written as-is; the fourcc must be exactly 4 ASCII bytes.
	pub fn new<F>(width: u16, height: u16, frames_per_second: u32, fourcc: F) -> Result<Self>
	where
		F: TryInto<FourCC>,
		Error: From<F::Error>,
	{
		Self::with_timebase(width, height, Timebase::from_fps(frames_per_second), fourcc)
	}

	pub fn with_timebase<F>(width: u16, height: u16, timebase: Timebase, fourcc: F) -> Result<Self>
	where
		F: TryInto<FourCC>,
		Error: From<F::Error>,
	{
		let fourcc = fourcc.try_into()?;

		Ok(Self {
			header: Header::new(fourcc, width, height, timebase),
			frames: Vec::new(),
			payload_size: 0,
		})
	}

	/// Append a frame with a timestamp in ticks.
	///
	/// Timestamps are written as provided, without checking the order.
	pub fn add_frame(&mut self, payload: impl Into<Bytes>, timestamp: u64) -> Result<()> {
		let payload = payload.into();

		if u32::try_from(payload.len()).is_err() || u32::try_from(self.frames.len() + 1).is_err() {
			return Err(Error::TooLarge);
		}

		self.payload_size += payload.len();
		self.frames.push(Frame { timestamp, payload });

		Ok(())
	}

	/// The header that will be written, including the current frame count.
	pub fn header(&self) -> Header {
		Header {
			// Checked by add_frame.
			frame_count: self.frames.len() as u32,
			..self.header
		}
	}

	pub fn timebase(&self) -> Timebase {
		self.header.timebase
	}

	pub fn frames(&self) -> &[Frame] {
		&self.frames
	}

	pub fn len(&self) -> usize {
		self.frames.len()
	}

	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}

	/// The exact size of the finalized file.
	pub fn encoded_len(&self) -> usize {
		HEADER_SIZE + self.frames.len() * FRAME_HEADER_SIZE + self.payload_size
	}

	/// Write the complete file to the given buffer.
	pub fn encode<W: BufMut>(&self, w: &mut W) {
		self.header().encode(w);

		for frame in &self.frames {
			frame.encode(w);
		}
	}

	/// The media type of the output of [Self::finalize].
	pub fn content_type(&self) -> &'static str {
		CONTENT_TYPE
	}

	/// Produce the complete file, tagged by [Self::content_type].
	pub fn finalize(&self) -> Bytes {
		let mut buf = BytesMut::with_capacity(self.encoded_len());
		self.encode(&mut buf);
		debug_assert_eq!(buf.len(), self.encoded_len());

		buf.freeze()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_file() {
		let writer = Writer::new(640, 360, 30, "VP80").unwrap();
		let buf = writer.finalize();

		#[rustfmt::skip]
		let expected: [u8; 32] = [
			b'D', b'K', b'I', b'F', 0, 0, 32, 0,
			b'V', b'P', b'8', b'0', 0x80, 0x02, 0x68, 0x01,
			30, 0, 0, 0, 1, 0, 0, 0,
			0, 0, 0, 0, 0, 0, 0, 0,
		];
		assert_eq!(&buf[..], &expected[..]);
	}

	#[test]
	fn test_invalid_fourcc() {
		assert!(matches!(Writer::new(1, 1, 1, "VP8"), Err(Error::InvalidFourCC)));
		assert!(matches!(Writer::new(1, 1, 1, &b"VP80X"[..]), Err(Error::InvalidFourCC)));
	}

	#[test]
	fn test_accepts_fourcc() {
		let writer = Writer::new(1, 1, 1, FourCC::AV01).unwrap();
		assert_eq!(writer.header().fourcc, FourCC::AV01);
	}

	#[test]
	fn test_frames_in_order() {
		let mut writer = Writer::new(320, 240, 25, "VP80").unwrap();
		writer.add_frame(&b"\x10first"[..], 5).unwrap();
		writer.add_frame(Bytes::new(), 3).unwrap();
		writer.add_frame(vec![0x11; 3], 4).unwrap();

		let buf = writer.finalize();
		assert_eq!(buf.len(), writer.encoded_len());
		assert_eq!(buf.len(), 32 + 12 + 6 + 12 + 12 + 3);

		// frame count
		assert_eq!(&buf[24..28], &[3, 0, 0, 0]);

		// first record
		assert_eq!(&buf[32..36], &[6, 0, 0, 0]);
		assert_eq!(&buf[36..44], &[5, 0, 0, 0, 0, 0, 0, 0]);
		assert_eq!(&buf[44..50], b"\x10first");

		// zero-length record
		assert_eq!(&buf[50..54], &[0, 0, 0, 0]);
		assert_eq!(&buf[54..62], &[3, 0, 0, 0, 0, 0, 0, 0]);

		// last record
		assert_eq!(&buf[62..66], &[3, 0, 0, 0]);
		assert_eq!(&buf[74..], &[0x11; 3]);
	}

	#[test]
	fn test_finalize_twice() {
		let mut writer = Writer::new(16, 16, 60, "VP80").unwrap();
		writer.add_frame(vec![1, 2, 3], 0).unwrap();

		let first = writer.finalize();
		let second = writer.finalize();
		assert_eq!(first, second);
		assert_eq!(writer.content_type(), "video/x-ivf");

		// Adding more frames doesn't touch the buffers already returned.
		writer.add_frame(vec![4], 1).unwrap();
		let third = writer.finalize();
		assert_eq!(first, second);
		assert_ne!(first, third);
		assert_eq!(third.len(), first.len() + 13);
	}
}
