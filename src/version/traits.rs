//! Capability set shared by every version representation

use std::fmt::Display;
use std::io::Write;
use std::str::FromStr;

use crate::version::error::VersionError;

/// Trait for version types with text and binary encodings
///
/// Implemented by [`Semver`](crate::Semver), [`Compact32`](crate::Compact32)
/// and [`Compact64`](crate::Compact64).
pub trait Version: Display + FromStr<Err = VersionError> + Sized {
    /// Parse a version from raw bytes, validating UTF-8 first
    fn parse_bytes(input: &[u8]) -> Result<Self, VersionError> {
        std::str::from_utf8(input)?.parse()
    }

    /// Text form as bytes
    fn to_text_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Encode into the little-endian binary layout
    fn encode_binary(&self) -> Result<Vec<u8>, VersionError>;

    /// Decode from the little-endian binary layout
    fn decode_binary(data: &[u8]) -> Result<Self, VersionError>;

    /// Write the text form to `w`, returning the number of bytes written
    fn write_to<W: Write>(&self, w: &mut W) -> Result<u64, VersionError> {
        let text = self.to_text_bytes();
        w.write_all(&text)?;
        Ok(text.len() as u64)
    }

    /// Write the binary form to `w`, returning the number of bytes written
    fn write_binary_to<W: Write>(&self, w: &mut W) -> Result<u64, VersionError> {
        let bin = self.encode_binary()?;
        w.write_all(&bin)?;
        Ok(bin.len() as u64)
    }
}
