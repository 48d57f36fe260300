use bytes::{Buf, BufMut};

use crate::{
	FourCC, Timebase,
	coding::{Decode, DecodeError, Encode},
};

/// The magic bytes at the start of every IVF file.
pub const SIGNATURE: [u8; 4] = *b"DKIF";

/// The size of the fixed header in bytes.
pub const HEADER_SIZE: usize = 32;

/// The IVF file header.
///
/// ```text
/// offset 0  : 4 bytes  "DKIF"
/// offset 4  : u16      version
/// offset 6  : u16      header size
/// offset 8  : 4 bytes  codec fourcc
/// offset 12 : u16      width
/// offset 14 : u16      height
/// offset 16 : u32      timebase denominator
/// offset 20 : u32      timebase numerator
/// offset 24 : u32      frame count
/// offset 28 : u32      reserved
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
	pub version: u16,

	/// The offset of the first frame record.
	///
	/// Always 32 when written by this crate, but other producers may declare a larger header.
	pub header_size: u16,

	pub fourcc: FourCC,
	pub width: u16,
	pub height: u16,
	pub timebase: Timebase,

	/// The number of frame records declared, which may not match the number present.
	pub frame_count: u32,
}

impl Header {
	pub fn new(fourcc: FourCC, width: u16, height: u16, timebase: Timebase) -> Self {
		Self {
			version: 0,
			header_size: HEADER_SIZE as u16,
			fourcc,
			width,
			height,
			timebase,
			frame_count: 0,
		}
	}

	/// The number of bytes between the fixed header and the first frame record.
	pub fn padding(&self) -> usize {
		(self.header_size as usize).saturating_sub(HEADER_SIZE)
	}
}

// NOTE: Only the fixed 32 bytes are decoded.
// The caller is expected to skip `padding()` bytes before the first frame.
impl Decode for Header {
	fn decode<R: Buf>(r: &mut R) -> Result<Self, DecodeError> {
		if r.remaining() < HEADER_SIZE {
			return Err(DecodeError::Short);
		}

		let mut signature = [0u8; 4];
		r.copy_to_slice(&mut signature);
		if signature != SIGNATURE {
			return Err(DecodeError::Signature(signature));
		}

		let version = r.get_u16_le();
		let header_size = r.get_u16_le();
		if (header_size as usize) < HEADER_SIZE {
			return Err(DecodeError::HeaderSize(header_size));
		}

		let mut fourcc = [0u8; 4];
		r.copy_to_slice(&mut fourcc);

		let width = r.get_u16_le();
		let height = r.get_u16_le();
		let denominator = r.get_u32_le();
		let numerator = r.get_u32_le();
		let frame_count = r.get_u32_le();
		let _reserved = r.get_u32_le();

		Ok(Self {
			version,
			header_size,
			fourcc: FourCC::from_raw(fourcc),
			width,
			height,
			timebase: Timebase::new(numerator, denominator),
			frame_count,
		})
	}
}

impl Encode for Header {
	fn encode<W: BufMut>(&self, w: &mut W) {
		w.put_slice(&SIGNATURE);
		w.put_u16_le(self.version);
		w.put_u16_le(self.header_size);
		w.put_slice(self.fourcc.as_bytes());
		w.put_u16_le(self.width);
		w.put_u16_le(self.height);
		w.put_u32_le(self.timebase.denominator);
		w.put_u32_le(self.timebase.numerator);
		w.put_u32_le(self.frame_count);
		w.put_u32_le(0);
		w.put_bytes(0, self.padding());
	}
}
