use anyhow::Context;
use bytes::Bytes;
use ivf::{Ivf, Timebase, Writer};

/// Rewrite a parsed file with a 32-byte header and only its complete frames.
///
/// If `fps` is given, timestamps are converted to a `1 / fps` timebase.
pub fn remux(ivf: &Ivf, fps: Option<u32>) -> anyhow::Result<Bytes> {
	let header = &ivf.header;
	let timebase = fps.map(Timebase::from_fps).unwrap_or(header.timebase);

	// The fourcc is copied as-is, even if it isn't ASCII.
	let mut writer = Writer::with_timebase(header.width, header.height, timebase, header.fourcc)?;

	for (index, frame) in ivf.frames.iter().enumerate() {
		let timestamp = if timebase == header.timebase {
			frame.timestamp
		} else {
			header
				.timebase
				.micros_from_ticks(frame.timestamp)
				.and_then(|micros| timebase.ticks_from_micros(micros))
				.with_context(|| format!("failed to retime frame {index}"))?
		};

		writer.add_frame(frame.payload.clone(), timestamp)?;
	}

	tracing::debug!(frames = writer.len(), ?timebase, "remuxed");

	Ok(writer.finalize())
}

#[cfg(test)]
mod tests {
	use super::*;
	use ivf::{FourCC, Header, coding::Encode};

	#[test]
	fn test_remux_normalizes_header() {
		let mut header = Header::new(FourCC::VP80, 32, 32, Timebase::from_fps(30));
		header.header_size = 44;
		header.frame_count = 3;

		let mut buf = bytes::BytesMut::new();
		header.encode(&mut buf);
		ivf::Frame::new(vec![0x10], 0).encode(&mut buf);
		ivf::Frame::new(vec![0x11], 1).encode(&mut buf);
		// Third frame is missing.

		let input = ivf::parse(buf.freeze()).unwrap();
		let output = ivf::parse(remux(&input, None).unwrap()).unwrap();

		assert_eq!(output.header.header_size, 32);
		assert_eq!(output.header.frame_count, 2);
		assert!(output.is_complete());
		assert_eq!(output.frames, input.frames);
	}

	#[test]
	fn test_remux_retime() {
		let mut writer = Writer::new(8, 8, 30, "VP80").unwrap();
		for tick in 0..4 {
			writer.add_frame(vec![0x11], tick * 15).unwrap();
		}

		let input = ivf::parse(writer.finalize()).unwrap();
		let output = ivf::parse(remux(&input, Some(1000)).unwrap()).unwrap();

		assert_eq!(output.header.timebase, Timebase::from_fps(1000));
		let ticks: Vec<u64> = output.frames.iter().map(|frame| frame.timestamp).collect();
		assert_eq!(ticks, vec![0, 500, 1000, 1500]);
	}
}
