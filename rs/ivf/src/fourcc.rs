use std::{fmt, str::FromStr};

use crate::{Error, Result};

/// A 4-byte codec identifier, ex. `VP80`.
///
/// Constructing one validates that it's 4 ASCII bytes.
/// A [FourCC] decoded from a file is kept as-is, since the container treats it as opaque.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCC([u8; 4]);

impl FourCC {
	pub const VP80: Self = Self(*b"VP80");
	pub const VP90: Self = Self(*b"VP90");
	pub const AV01: Self = Self(*b"AV01");

	pub const fn new(bytes: [u8; 4]) -> Result<Self> {
		// Iterators aren't allowed in const yet.
		let mut i = 0;
		while i < bytes.len() {
			if !bytes[i].is_ascii() {
				return Err(Error::InvalidFourCC);
			}
			i += 1;
		}

		Ok(Self(bytes))
	}

	/// Wrap the raw bytes read from a file without validation.
	pub(crate) const fn from_raw(bytes: [u8; 4]) -> Self {
		Self(bytes)
	}

	pub const fn as_bytes(&self) -> &[u8; 4] {
		&self.0
	}

	pub const fn into_bytes(self) -> [u8; 4] {
		self.0
	}
}

impl TryFrom<[u8; 4]> for FourCC {
	type Error = Error;

	fn try_from(bytes: [u8; 4]) -> Result<Self> {
		Self::new(bytes)
	}
}

impl TryFrom<&[u8]> for FourCC {
	type Error = Error;

	fn try_from(bytes: &[u8]) -> Result<Self> {
		let bytes: [u8; 4] = bytes.try_into().map_err(|_| Error::InvalidFourCC)?;
		Self::new(bytes)
	}
}

impl TryFrom<&str> for FourCC {
	type Error = Error;

	fn try_from(s: &str) -> Result<Self> {
		Self::try_from(s.as_bytes())
	}
}

impl FromStr for FourCC {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		Self::try_from(s)
	}
}

impl fmt::Display for FourCC {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0.escape_ascii())
	}
}

impl fmt::Debug for FourCC {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "FourCC({self})")
	}
}

#[cfg(feature = "serde")]
impl serde::Serialize for FourCC {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for FourCC {
	fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
		let s = String::deserialize(deserializer)?;
		s.parse().map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_fourcc_from_str() {
		let fourcc: FourCC = "VP80".parse().unwrap();
		assert_eq!(fourcc, FourCC::VP80);
		assert_eq!(fourcc.to_string(), "VP80");
	}

	#[test]
	fn test_fourcc_wrong_length() {
		assert!(matches!(FourCC::try_from("VP8"), Err(Error::InvalidFourCC)));
		assert!(matches!(FourCC::try_from("VP800"), Err(Error::InvalidFourCC)));
		assert!(matches!(FourCC::try_from(""), Err(Error::InvalidFourCC)));
	}

	#[test]
	fn test_fourcc_non_ascii() {
		assert!(matches!(FourCC::new([b'V', b'P', 0x80, b'0']), Err(Error::InvalidFourCC)));
		// A multi-byte character is 4 bytes long but not ASCII.
		assert!(matches!(FourCC::try_from("é£"), Err(Error::InvalidFourCC)));
	}

	#[test]
	fn test_fourcc_display_escapes_raw_bytes() {
		let fourcc = FourCC::from_raw([b'A', 0xff, b'B', 0]);
		assert_eq!(fourcc.to_string(), "A\\xffB\\x00");
	}
}
