use bytes::{Buf, BufMut, Bytes};

use crate::coding::{Decode, DecodeError, Encode};

/// The size of each frame record header in bytes.
pub const FRAME_HEADER_SIZE: usize = 12;

/// The 12 bytes preceding each frame payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
	/// The size of the payload that follows.
	pub size: u32,

	/// The presentation timestamp in timebase ticks.
	pub timestamp: u64,
}

// NOTE: We do not decode the payload here so a streaming reader can wait for it.
impl Decode for FrameHeader {
	fn decode<R: Buf>(r: &mut R) -> Result<Self, DecodeError> {
		if r.remaining() < FRAME_HEADER_SIZE {
			return Err(DecodeError::Short);
		}

		let size = r.get_u32_le();
		let timestamp = r.get_u64_le();

		Ok(Self { size, timestamp })
	}
}

impl Encode for FrameHeader {
	fn encode<W: BufMut>(&self, w: &mut W) {
		w.put_u32_le(self.size);
		w.put_u64_le(self.timestamp);
	}
}

/// A single encoded frame and its timestamp in ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
	pub timestamp: u64,
	pub payload: Bytes,
}

impl Frame {
	pub fn new(payload: impl Into<Bytes>, timestamp: u64) -> Self {
		Self {
			timestamp,
			payload: payload.into(),
		}
	}

	/// The number of bytes used by this record, including the header.
	pub fn encoded_len(&self) -> usize {
		FRAME_HEADER_SIZE + self.payload.len()
	}
}

// A `Bytes` source is split without copying the payload.
impl Decode for Frame {
	fn decode<R: Buf>(r: &mut R) -> Result<Self, DecodeError> {
		let header = FrameHeader::decode(r)?;
		let size = header.size as usize;
		if r.remaining() < size {
			return Err(DecodeError::Short);
		}

		Ok(Self {
			timestamp: header.timestamp,
			payload: r.copy_to_bytes(size),
		})
	}
}

// Payloads must be at most u32::MAX bytes; the writer checks this before encoding.
impl Encode for Frame {
	fn encode<W: BufMut>(&self, w: &mut W) {
		let header = FrameHeader {
			size: self.payload.len() as u32,
			timestamp: self.timestamp,
		};
		header.encode(w);
		w.put_slice(&self.payload);
	}
}
