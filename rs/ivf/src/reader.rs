use bytes::{Buf, Bytes};

use crate::{
	Error, FRAME_HEADER_SIZE, Frame, Header, Result, StreamReader,
	coding::{Decode, DecodeError},
};

/// A parsed IVF file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ivf {
	pub header: Header,

	/// Every complete frame record, in file order.
	pub frames: Vec<Frame>,
}

impl Ivf {
	/// Returns true if every frame declared in the header was present.
	pub fn is_complete(&self) -> bool {
		self.frames.len() == self.header.frame_count as usize
	}
}

/// Parses IVF files.
///
/// By default the reader is permissive: if the buffer ends partway through a declared frame record,
/// parsing stops and the complete records read so far are returned. Use [Reader::strict] to error instead.
/// A partial payload is never returned either way.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reader {
	strict: bool,
}

impl Reader {
	pub fn new() -> Self {
		Self::default()
	}

	/// Fail with [Error::TruncatedFrame] instead of stopping early.
	pub fn strict(mut self, strict: bool) -> Self {
		self.strict = strict;
		self
	}

	pub fn is_strict(&self) -> bool {
		self.strict
	}

	/// Parse a complete file.
	///
	/// Frame payloads are slices of `buf`, so no payload is copied.
	pub fn parse(&self, buf: impl Into<Bytes>) -> Result<Ivf> {
		let data: Bytes = buf.into();

		let header = decode_header(&mut data.clone())?;

		// Honor the declared header size instead of assuming 32.
		let offset = (header.header_size as usize).min(data.len());
		let mut buf = data.slice(offset..);

		// Don't trust the declared count when preallocating.
		let capacity = (header.frame_count as usize).min(buf.remaining() / FRAME_HEADER_SIZE);
		let mut frames = Vec::with_capacity(capacity);

		for index in 0..header.frame_count {
			match Frame::decode(&mut buf) {
				Ok(frame) => frames.push(frame),
				Err(_) if self.strict => return Err(Error::TruncatedFrame { index }),
				Err(_) => break,
			}
		}

		Ok(Ivf { header, frames })
	}

	/// Create an incremental reader with the same truncation policy.
	pub fn stream(self) -> StreamReader {
		StreamReader::new(self)
	}
}

/// Parse a complete file with the default permissive [Reader].
pub fn parse(buf: impl Into<Bytes>) -> Result<Ivf> {
	Reader::new().parse(buf)
}

pub(crate) fn decode_header<B: Buf>(buf: &mut B) -> Result<Header> {
	Header::decode(buf).map_err(|err| match err {
		DecodeError::Short => Error::TruncatedHeader,
		DecodeError::Signature(signature) => Error::BadSignature(signature),
		DecodeError::HeaderSize(size) => Error::InvalidHeaderSize(size),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{FourCC, Timebase, Writer, coding::Encode, frame::FrameHeader};
	use bytes::{BufMut, BytesMut};

	fn sample() -> Writer {
		let mut writer = Writer::new(640, 360, 30, "VP80").unwrap();
		writer.add_frame(vec![0x10, 1, 2, 3], 0).unwrap();
		writer.add_frame(Vec::new(), 1).unwrap();
		writer.add_frame(vec![0x11; 100_000], 2).unwrap();
		writer.add_frame(vec![0x11, 9], 2).unwrap();
		writer.add_frame(vec![0x10], 1).unwrap();
		writer
	}

	#[test]
	fn test_round_trip() {
		let writer = sample();
		let ivf = parse(writer.finalize()).unwrap();

		assert_eq!(ivf.header.fourcc, FourCC::VP80);
		assert_eq!(ivf.header.width, 640);
		assert_eq!(ivf.header.height, 360);
		assert_eq!(ivf.header.timebase, Timebase::from_fps(30));
		assert_eq!(ivf.header.frame_count, 5);
		assert_eq!(ivf.header.version, 0);
		assert_eq!(ivf.header.header_size, 32);
		assert_eq!(ivf.frames, writer.frames());
		assert!(ivf.is_complete());
	}

	#[test]
	fn test_truncated_header() {
		let buf = sample().finalize();
		assert!(matches!(parse(buf.slice(..31)), Err(Error::TruncatedHeader)));
		assert!(matches!(parse(Bytes::new()), Err(Error::TruncatedHeader)));
	}

	#[test]
	fn test_bad_signature() {
		let mut buf = BytesMut::from(&sample().finalize()[..]);
		buf[..4].copy_from_slice(b"OggS");

		assert!(matches!(parse(buf.freeze()), Err(Error::BadSignature(sig)) if &sig == b"OggS"));
	}

	#[test]
	fn test_truncated_frame_permissive() {
		let buf = sample().finalize();

		// Drop the final byte of the last payload.
		let ivf = parse(buf.slice(..buf.len() - 1)).unwrap();
		assert_eq!(ivf.frames.len(), 4);
		assert!(!ivf.is_complete());
		assert_eq!(ivf.frames[3].payload, Bytes::from_static(&[0x11, 9]));

		// Cut inside the frame header of the last record.
		let ivf = parse(buf.slice(..buf.len() - 1 - 8)).unwrap();
		assert_eq!(ivf.frames.len(), 4);
	}

	#[test]
	fn test_truncated_frame_strict() {
		let buf = sample().finalize();
		let reader = Reader::new().strict(true);

		let err = reader.parse(buf.slice(..buf.len() - 1)).unwrap_err();
		assert!(matches!(err, Error::TruncatedFrame { index: 4 }));

		// Truncated in the middle of the large payload.
		let err = reader.parse(buf.slice(..1000)).unwrap_err();
		assert!(matches!(err, Error::TruncatedFrame { index: 2 }));

		assert!(reader.parse(buf).unwrap().is_complete());
	}

	#[test]
	fn test_extended_header() {
		let mut header = Header::new(FourCC::VP80, 2, 2, Timebase::from_fps(10));
		header.header_size = 40;
		header.frame_count = 1;

		let mut buf = BytesMut::new();
		header.encode(&mut buf);
		assert_eq!(buf.len(), 40);

		// Garbage padding would be misread as a frame header if we assumed 32.
		buf[32..40].copy_from_slice(&[0xff; 8]);
		FrameHeader { size: 2, timestamp: 9 }.encode(&mut buf);
		buf.put_slice(&[0x10, 0x20]);

		let ivf = Reader::new().strict(true).parse(buf.freeze()).unwrap();
		assert_eq!(ivf.header.header_size, 40);
		assert_eq!(ivf.frames, vec![Frame::new(vec![0x10, 0x20], 9)]);
	}

	#[test]
	fn test_header_size_past_end() {
		let mut header = Header::new(FourCC::VP80, 2, 2, Timebase::from_fps(10));
		header.header_size = 64;
		header.frame_count = 1;

		let mut buf = BytesMut::new();
		header.encode(&mut buf);
		let buf = buf.freeze().slice(..48);

		assert!(parse(buf.clone()).unwrap().frames.is_empty());
		assert!(matches!(
			Reader::new().strict(true).parse(buf),
			Err(Error::TruncatedFrame { index: 0 })
		));
	}

	#[test]
	fn test_frame_count_exceeds_data() {
		let mut header = Header::new(FourCC::VP80, 2, 2, Timebase::from_fps(10));
		header.frame_count = u32::MAX;

		let mut buf = BytesMut::new();
		header.encode(&mut buf);
		Frame::new(vec![0x10], 0).encode(&mut buf);

		let ivf = parse(buf.freeze()).unwrap();
		assert_eq!(ivf.frames.len(), 1);
	}

	#[test]
	fn test_trailing_bytes_ignored() {
		let mut buf = BytesMut::from(&sample().finalize()[..]);
		buf.put_slice(b"trailing junk");

		let ivf = Reader::new().strict(true).parse(buf.freeze()).unwrap();
		assert_eq!(ivf.frames.len(), 5);
	}

	#[test]
	fn test_payload_references_input() {
		let buf = sample().finalize();
		let ivf = parse(buf.clone()).unwrap();

		let offset = 32 + FRAME_HEADER_SIZE;
		assert_eq!(ivf.frames[0].payload.as_ptr(), buf[offset..].as_ptr());

		// The payload outlives the original handle.
		let payload = ivf.frames[0].payload.clone();
		drop(buf);
		drop(ivf);
		assert_eq!(payload, Bytes::from_static(&[0x10, 1, 2, 3]));
	}
}
