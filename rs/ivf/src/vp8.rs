//! VP8 frame classification.
//!
//! The first bit of the VP8 frame tag (RFC 6386 section 9.1) is the frame type: 0 for a keyframe, 1 for an interframe.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
	/// Decodable without any prior frames.
	Key,
	Delta,
}

/// Classify a VP8 payload, returning [None] if it's empty.
pub fn frame_type(payload: &[u8]) -> Option<FrameType> {
	let tag = payload.first()?;
	match tag & 0x01 {
		0 => Some(FrameType::Key),
		_ => Some(FrameType::Delta),
	}
}

/// Returns true if the payload is a VP8 keyframe; an empty payload is never a keyframe.
pub fn is_keyframe(payload: &[u8]) -> bool {
	frame_type(payload) == Some(FrameType::Key)
}
