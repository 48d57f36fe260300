use std::sync::Arc;

/// A list of possible errors when reading or writing an IVF file.
#[derive(thiserror::Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
	/// Fewer than 32 bytes were available for the file header.
	#[error("truncated header")]
	TruncatedHeader,

	/// The file does not start with `DKIF`.
	#[error("bad signature: {0:?}")]
	BadSignature([u8; 4]),

	/// A codec tag was not exactly 4 ASCII bytes.
	#[error("invalid fourcc")]
	InvalidFourCC,

	/// The declared header size is smaller than the fixed header.
	#[error("invalid header size: {0}")]
	InvalidHeaderSize(u16),

	/// A declared frame record was cut short, only returned in strict mode.
	#[error("truncated frame: index={index}")]
	TruncatedFrame { index: u32 },

	/// A payload or frame count does not fit in 32 bits.
	#[error("too large")]
	TooLarge,

	#[error("io error: {0}")]
	Io(Arc<std::io::Error>),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(Arc::new(err))
	}
}

// Lets `FourCC` itself be passed wherever a fallible conversion is accepted.
impl From<std::convert::Infallible> for Error {
	fn from(err: std::convert::Infallible) -> Self {
		match err {}
	}
}

pub type Result<T> = std::result::Result<T, Error>;
