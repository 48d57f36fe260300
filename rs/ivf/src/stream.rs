use std::io;

use bytes::{Buf, BufMut, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::{
	Error, FRAME_HEADER_SIZE, Frame, Header, Ivf, Reader, Result, SIGNATURE,
	coding::Decode,
	frame::FrameHeader,
	reader::decode_header,
};

// The initial read size when pulling from an async source.
const READ_SIZE: usize = 64 * 1024;

/// Parses an IVF file incrementally as bytes arrive.
///
/// Frames are returned as soon as their record is complete.
/// Created via [Reader::stream], which decides what [StreamReader::finish] does when the input ends early.
pub struct StreamReader {
	reader: Reader,
	buffer: BytesMut,
	header: Option<Header>,

	// Bytes of an extended header still to be discarded.
	skip: usize,

	// The number of frames returned so far.
	count: u32,
}

impl StreamReader {
	pub fn new(reader: Reader) -> Self {
		Self {
			reader,
			buffer: BytesMut::new(),
			header: None,
			skip: 0,
			count: 0,
		}
	}

	/// The file header, once at least 32 bytes have been received.
	pub fn header(&self) -> Option<&Header> {
		self.header.as_ref()
	}

	/// The number of frames returned so far.
	pub fn count(&self) -> u32 {
		self.count
	}

	/// Consume the input and return any frames that are now complete.
	pub fn decode<B: Buf>(&mut self, buf: &mut B) -> Result<Vec<Frame>> {
		self.buffer.put(buf);
		self.process()
	}

	fn process(&mut self) -> Result<Vec<Frame>> {
		let mut frames = Vec::new();

		let Some(header) = self.decode_header()? else {
			return Ok(frames);
		};

		let skip = self.skip.min(self.buffer.len());
		self.buffer.advance(skip);
		self.skip -= skip;

		if self.skip > 0 {
			return Ok(frames);
		}

		while self.count < header.frame_count {
			let Some(frame) = self.decode_frame() else { break };
			frames.push(frame);
			self.count += 1;
		}

		// Anything after the last declared frame is ignored.
		if self.count == header.frame_count {
			self.buffer.clear();
		}

		Ok(frames)
	}

	fn decode_header(&mut self) -> Result<Option<Header>> {
		if let Some(header) = self.header {
			return Ok(Some(header));
		}

		// Reject a bad signature without waiting for the full header.
		if self.buffer.len() >= SIGNATURE.len() && self.buffer[..SIGNATURE.len()] != SIGNATURE {
			let mut signature = [0u8; 4];
			signature.copy_from_slice(&self.buffer[..4]);
			return Err(Error::BadSignature(signature));
		}

		let mut cursor = io::Cursor::new(&self.buffer[..]);
		let header = match decode_header(&mut cursor) {
			Ok(header) => header,
			Err(Error::TruncatedHeader) => return Ok(None),
			Err(err) => return Err(err),
		};

		self.buffer.advance(cursor.position() as usize);
		self.skip = header.padding();
		self.header = Some(header);

		Ok(Some(header))
	}

	fn decode_frame(&mut self) -> Option<Frame> {
		// Frame headers can only fail when short.
		let header = FrameHeader::decode(&mut &self.buffer[..]).ok()?;

		let size = header.size as usize;
		if self.buffer.len() < FRAME_HEADER_SIZE + size {
			// The declared size is untrusted, so grow the buffer as bytes arrive.
			let remaining = FRAME_HEADER_SIZE + size - self.buffer.len();
			self.buffer.reserve(remaining.min(READ_SIZE));
			return None;
		}

		self.buffer.advance(FRAME_HEADER_SIZE);
		let payload = self.buffer.split_to(size).freeze();

		Some(Frame {
			timestamp: header.timestamp,
			payload,
		})
	}

	/// Signal the end of input, returning the number of frames read.
	///
	/// Errors if the header never arrived, or in strict mode if fewer frames than declared were read.
	pub fn finish(&self) -> Result<u32> {
		let header = self.header.ok_or(Error::TruncatedHeader)?;

		if self.count < header.frame_count && self.reader.is_strict() {
			return Err(Error::TruncatedFrame { index: self.count });
		}

		Ok(self.count)
	}

	/// Read an entire file from an async source, ex. stdin.
	pub async fn decode_from<T: AsyncRead + Unpin>(mut self, input: &mut T) -> Result<Ivf> {
		let mut frames = Vec::new();

		loop {
			self.buffer.reserve(READ_SIZE);
			if input.read_buf(&mut self.buffer).await? == 0 {
				break;
			}

			frames.extend(self.process()?);
		}

		self.finish()?;

		let header = self.header.ok_or(Error::TruncatedHeader)?;
		Ok(Ivf { header, frames })
	}
}
