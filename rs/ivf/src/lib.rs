//! # ivf: a reader and writer for the IVF video container
//!
//! IVF wraps a sequence of timestamped encoded video frames (ex. VP8) with a small fixed header.
//! Every integer is little-endian and records are laid out back-to-back with no padding or checksums.
//!
//! ## Overview
//!
//! - [Writer]: Accumulate frames and [Writer::finalize] a byte-exact file.
//! - [Reader]: [parse] a complete file into a [Header] and ordered [Frame]s.
//! - [StreamReader]: Parse a file incrementally, ex. from stdin.
//! - [vp8]: Classify VP8 payloads as keyframes or delta frames.
//! - [Muxer] and [Demuxer]: Connect an [Encoder] or [Decoder] to the container, converting timestamps via [Timebase].
//!
//! Parsed payloads are [bytes::Bytes] slices of the input buffer, so parsing never copies a payload.
//!
//! ```
//! let mut writer = ivf::Writer::new(640, 360, 30, "VP80")?;
//! writer.add_frame(vec![0x10, 0x02, 0x00], 0)?;
//! let file = writer.finalize();
//!
//! let ivf = ivf::parse(file)?;
//! assert_eq!(ivf.header.width, 640);
//! assert!(ivf::vp8::is_keyframe(&ivf.frames[0].payload));
//! # Ok::<(), ivf::Error>(())
//! ```
mod codec;
mod error;
mod fourcc;
mod frame;
mod header;
mod mux;
mod reader;
mod stream;
mod timebase;
mod writer;

pub mod coding;
pub mod vp8;

pub use codec::*;
pub use error::*;
pub use fourcc::*;
pub use frame::*;
pub use header::*;
pub use mux::*;
pub use reader::*;
pub use stream::*;
pub use timebase::*;
pub use writer::*;
