//! Fixed-size little-endian encoding of the IVF header and frame records.
use bytes::{Buf, BufMut};

/// An error while decoding a fixed-size structure.
///
/// [DecodeError::Short] is recoverable when streaming: wait for more bytes and try again.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
	#[error("short buffer")]
	Short,

	#[error("invalid signature: {0:?}")]
	Signature([u8; 4]),

	#[error("invalid header size: {0}")]
	HeaderSize(u16),
}

pub trait Decode: Sized {
	fn decode<R: Buf>(r: &mut R) -> Result<Self, DecodeError>;
}

pub trait Encode {
	fn encode<W: BufMut>(&self, w: &mut W);
}
