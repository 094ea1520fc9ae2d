//! Semantic version with lenient parsing
//!
//! Text form: `[v]MAJOR.MINOR.PATCH[-PRERELEASE][+METADATA]`, optionally
//! surrounded by spaces. The parser is a single left-to-right scan and does
//! not validate pre-release or metadata identifiers (`1.2.3-alpha.01` is
//! accepted). Use the [`semver`] crate conversion for strict validation.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::config::SEMVER_FIXED_LEN;
use crate::version::binary::{Reader, write_prefixed};
use crate::version::error::VersionError;
use crate::version::traits::Version;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Semver {
    major: u32,
    minor: u32,
    patch: u32,
    pre_release: String,
    build_metadata: String,
}

/// Numeric component currently being scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Component {
    Major,
    Minor,
    Patch,
}

impl Semver {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            ..Self::default()
        }
    }

    /// Parse a version string.
    ///
    /// Leading spaces and `v` characters and trailing spaces are ignored.
    /// All three numeric components are required.
    ///
    /// Examples:
    /// - "1.2.3" -> 1.2.3
    /// - " v1.2.3-rc.1+build " -> 1.2.3, pre-release "rc.1", metadata "build"
    /// - "1.2" -> MalformedVersion
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        parse_semver(input).inspect_err(|e| debug!("Rejected semver {:?}: {}", input, e))
    }

    pub fn with_pre_release(mut self, pre_release: impl Into<String>) -> Self {
        self.pre_release = pre_release.into();
        self
    }

    pub fn with_build_metadata(mut self, build_metadata: impl Into<String>) -> Self {
        self.build_metadata = build_metadata.into();
        self
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn patch(&self) -> u32 {
        self.patch
    }

    /// Pre-release identifiers without the leading `-`, empty when absent
    pub fn pre_release(&self) -> &str {
        &self.pre_release
    }

    pub fn pre_release_bytes(&self) -> &[u8] {
        self.pre_release.as_bytes()
    }

    /// Build metadata without the leading `+`, empty when absent
    pub fn build_metadata(&self) -> &str {
        &self.build_metadata
    }

    pub fn build_metadata_bytes(&self) -> &[u8] {
        self.build_metadata.as_bytes()
    }

    pub fn set_major(&mut self, major: u32) {
        self.major = major;
    }

    pub fn set_minor(&mut self, minor: u32) {
        self.minor = minor;
    }

    pub fn set_patch(&mut self, patch: u32) {
        self.patch = patch;
    }

    pub fn set_pre_release(&mut self, pre_release: impl Into<String>) {
        self.pre_release = pre_release.into();
    }

    /// Replace the pre-release from raw bytes, which must be UTF-8
    pub fn set_pre_release_bytes(&mut self, pre_release: &[u8]) -> Result<(), VersionError> {
        self.pre_release = std::str::from_utf8(pre_release)?.to_owned();
        Ok(())
    }

    pub fn set_build_metadata(&mut self, build_metadata: impl Into<String>) {
        self.build_metadata = build_metadata.into();
    }

    /// Replace the build metadata from raw bytes, which must be UTF-8
    pub fn set_build_metadata_bytes(
        &mut self,
        build_metadata: &[u8],
    ) -> Result<(), VersionError> {
        self.build_metadata = std::str::from_utf8(build_metadata)?.to_owned();
        Ok(())
    }

    /// Whether the patch component appears in the text form
    fn shows_patch(&self) -> bool {
        self.patch > 0 || !self.pre_release.is_empty() || !self.build_metadata.is_empty()
    }
}

fn parse_semver(input: &str) -> Result<Semver, VersionError> {
    if input.is_empty() {
        return Err(VersionError::EmptyInput);
    }

    let text = input.trim_start_matches([' ', 'v']).trim_end_matches(' ');
    if !text.as_bytes().first().is_some_and(u8::is_ascii_digit) {
        return Err(malformed(input));
    }

    let mut version = Semver::default();
    let mut component = Component::Major;
    let mut offset = 0;
    let mut suffix = None;

    for (i, byte) in text.bytes().enumerate() {
        match byte {
            b'.' => {
                let value = parse_component(&text[offset..i])?;
                match component {
                    Component::Major => {
                        version.major = value;
                        component = Component::Minor;
                    }
                    Component::Minor => {
                        version.minor = value;
                        component = Component::Patch;
                    }
                    Component::Patch => return Err(malformed(input)),
                }
                offset = i + 1;
            }
            b'-' | b'+' => {
                if component != Component::Patch {
                    return Err(malformed(input));
                }
                version.patch = parse_component(&text[offset..i])?;
                suffix = Some((byte, &text[i + 1..]));
                break;
            }
            _ => {}
        }
    }

    match suffix {
        None if component == Component::Patch => {
            version.patch = parse_component(&text[offset..])?;
        }
        None => return Err(malformed(input)),
        Some((b'-', rest)) => match rest.split_once('+') {
            Some((pre_release, build_metadata)) => {
                version.pre_release = pre_release.to_owned();
                version.build_metadata = build_metadata.to_owned();
            }
            None => version.pre_release = rest.to_owned(),
        },
        Some((_, rest)) => version.build_metadata = rest.to_owned(),
    }

    Ok(version)
}

fn parse_component(token: &str) -> Result<u32, VersionError> {
    Ok(token.parse::<u32>()?)
}

fn malformed(input: &str) -> VersionError {
    VersionError::MalformedVersion(input.to_owned())
}

impl FromStr for Semver {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Writes `major.minor[.patch][-pre][+meta]`.
///
/// The patch component is omitted when it is zero and both suffixes are
/// empty, so `1.2.0` is written as `1.2` even though [`Semver::parse`]
/// rejects that form.
impl fmt::Display for Semver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if self.shows_patch() {
            write!(f, ".{}", self.patch)?;
        }
        if !self.pre_release.is_empty() {
            write!(f, "-{}", self.pre_release)?;
        }
        if !self.build_metadata.is_empty() {
            write!(f, "+{}", self.build_metadata)?;
        }
        Ok(())
    }
}

/// Binary layout, little-endian:
/// `u32 major | u32 minor | u32 patch | u32 len | pre-release | u32 len | metadata`
impl Version for Semver {
    fn encode_binary(&self) -> Result<Vec<u8>, VersionError> {
        let mut buf = Vec::with_capacity(
            SEMVER_FIXED_LEN + self.pre_release.len() + self.build_metadata.len(),
        );
        buf.extend_from_slice(&self.major.to_le_bytes());
        buf.extend_from_slice(&self.minor.to_le_bytes());
        buf.extend_from_slice(&self.patch.to_le_bytes());
        write_prefixed(&mut buf, self.pre_release.as_bytes())?;
        write_prefixed(&mut buf, self.build_metadata.as_bytes())?;
        Ok(buf)
    }

    fn decode_binary(data: &[u8]) -> Result<Self, VersionError> {
        let mut reader = Reader::new(data);
        let major = reader.read_u32()?;
        let minor = reader.read_u32()?;
        let patch = reader.read_u32()?;
        let pre_release = std::str::from_utf8(reader.read_prefixed()?)?.to_owned();
        let build_metadata = std::str::from_utf8(reader.read_prefixed()?)?.to_owned();

        if reader.remaining() > 0 {
            trace!("Ignoring {} trailing bytes after semver", reader.remaining());
        }

        Ok(Self {
            major,
            minor,
            patch,
            pre_release,
            build_metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.2.3", 1, 2, 3, "", "")]
    #[case("v1.2.3", 1, 2, 3, "", "")]
    #[case("     4.3.45    ", 4, 3, 45, "", "")]
    #[case(" vv 0.0.0", 0, 0, 0, "", "")]
    #[case("1.2.3-alpha.01", 1, 2, 3, "alpha.01", "")]
    #[case("1.2.3-alpha.-1", 1, 2, 3, "alpha.-1", "")]
    #[case("1.2.3+test.01", 1, 2, 3, "", "test.01")]
    #[case("1.2.0-x.Y.0+metadata", 1, 2, 0, "x.Y.0", "metadata")]
    #[case(
        "v1.2.0-x.Y.0+metadata-width-hypen",
        1,
        2,
        0,
        "x.Y.0",
        "metadata-width-hypen"
    )]
    #[case("1.2.3-rc1-with-hypen", 1, 2, 3, "rc1-with-hypen", "")]
    #[case("1.2.3-rc.1+build+extra", 1, 2, 3, "rc.1", "build+extra")]
    #[case("1.2.2147483648", 1, 2, 2_147_483_648, "", "")]
    #[case("1.2147483648.3", 1, 2_147_483_648, 3, "", "")]
    #[case("4294967295.3.0", u32::MAX, 3, 0, "", "")]
    fn parse_accepts_valid_input(
        #[case] input: &str,
        #[case] major: u32,
        #[case] minor: u32,
        #[case] patch: u32,
        #[case] pre_release: &str,
        #[case] build_metadata: &str,
    ) {
        let version = Semver::parse(input).unwrap();
        assert_eq!(version.major(), major);
        assert_eq!(version.minor(), minor);
        assert_eq!(version.patch(), patch);
        assert_eq!(version.pre_release(), pre_release);
        assert_eq!(version.build_metadata(), build_metadata);
    }

    #[rstest]
    #[case("1.0")]
    #[case("v1.0")]
    #[case("     v1.0")]
    #[case("1")]
    #[case("v1")]
    #[case("foo")]
    #[case("1.2-5")]
    #[case("v1.2-5")]
    #[case("1.2-beta.5")]
    #[case("1.2+build")]
    #[case("1-beta")]
    #[case("\n1.2")]
    #[case("\nv1.2.3")]
    #[case("1.2.3.4")]
    #[case("v1.2.3.4")]
    #[case("   ")]
    #[case("vvv")]
    fn parse_rejects_malformed_input(#[case] input: &str) {
        let err = Semver::parse(input).unwrap_err();
        assert!(
            matches!(err, VersionError::MalformedVersion(_)),
            "{input:?}: {err}"
        );
    }

    #[rstest]
    #[case("1.2.beta")]
    #[case("v1.2.beta")]
    #[case("1.2.")]
    #[case("1..3")]
    #[case("1.2.3x")]
    #[case("1.2.-rc")]
    #[case("1.2.4294967296")]
    #[case("4294967296.0.0")]
    fn parse_propagates_numeric_failures(#[case] input: &str) {
        let err = Semver::parse(input).unwrap_err();
        assert!(
            matches!(err, VersionError::InvalidNumber(_)),
            "{input:?}: {err}"
        );
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert!(matches!(
            Semver::parse("").unwrap_err(),
            VersionError::EmptyInput
        ));
    }

    #[test]
    fn parse_with_and_without_v_prefix_are_equal() {
        assert_eq!(
            Semver::parse("v1.2.3").unwrap(),
            Semver::parse("1.2.3").unwrap()
        );
    }

    #[test]
    fn parse_bytes_rejects_invalid_utf8() {
        let err = Semver::parse_bytes(b"1.2.3-\xff").unwrap_err();
        assert!(matches!(err, VersionError::InvalidUtf8(_)));
    }

    #[rstest]
    #[case(Semver::new(1, 2, 3), "1.2.3")]
    #[case(Semver::new(1, 2, 0), "1.2")]
    #[case(Semver::new(0, 0, 0), "0.0")]
    #[case(Semver::new(1, 2, 0).with_pre_release("rc.1"), "1.2.0-rc.1")]
    #[case(Semver::new(1, 2, 0).with_build_metadata("sha.5114f85"), "1.2.0+sha.5114f85")]
    #[case(
        Semver::new(3, 0, 7).with_pre_release("beta").with_build_metadata("exp"),
        "3.0.7-beta+exp"
    )]
    fn display_formats_expected(#[case] version: Semver, #[case] expected: &str) {
        assert_eq!(version.to_string(), expected);
    }

    #[rstest]
    #[case("1.2.3")]
    #[case("10.20.30")]
    #[case("1.2.3-alpha.01")]
    #[case("1.2.0-x.Y.0+metadata")]
    #[case("0.0.1+build")]
    fn display_inverts_parse_when_patch_is_shown(#[case] input: &str) {
        assert_eq!(Semver::parse(input).unwrap().to_string(), input);
    }

    #[test]
    fn display_omits_zero_patch_without_suffixes() {
        assert_eq!(Semver::parse("1.2.0").unwrap().to_string(), "1.2");
    }

    #[test]
    fn encode_binary_uses_little_endian_layout() {
        let version = Semver::new(1, 2, 3)
            .with_pre_release("rc")
            .with_build_metadata("b.1");
        let bin = version.encode_binary().unwrap();

        assert_eq!(bin.len(), SEMVER_FIXED_LEN + 2 + 3);
        assert_eq!(
            bin,
            [
                1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0, //
                2, 0, 0, 0, b'r', b'c', //
                3, 0, 0, 0, b'b', b'.', b'1',
            ]
        );
    }

    #[test]
    fn decode_binary_restores_every_field() {
        let version = Semver::new(7, 0, 12)
            .with_pre_release("alpha.1.x")
            .with_build_metadata("build.2024.10");
        let bin = version.encode_binary().unwrap();
        assert_eq!(Semver::decode_binary(&bin).unwrap(), version);
    }

    #[test]
    fn decode_binary_ignores_trailing_bytes() {
        let version = Semver::new(1, 0, 0);
        let mut bin = version.encode_binary().unwrap();
        bin.extend_from_slice(&[0xaa, 0xbb]);
        assert_eq!(Semver::decode_binary(&bin).unwrap(), version);
    }

    #[test]
    fn decode_binary_fails_on_every_truncation() {
        let bin = Semver::new(1, 2, 3)
            .with_pre_release("rc.1")
            .with_build_metadata("meta")
            .encode_binary()
            .unwrap();

        for len in 0..bin.len() {
            let err = Semver::decode_binary(&bin[..len]).unwrap_err();
            assert!(
                matches!(err, VersionError::TruncatedInput { .. }),
                "len {len}: {err}"
            );
        }
    }

    #[test]
    fn decode_binary_rejects_metadata_length_beyond_buffer() {
        let mut bin = Semver::new(1, 2, 3).encode_binary().unwrap();
        let meta_len_at = bin.len() - 4;
        bin[meta_len_at..].copy_from_slice(&10u32.to_le_bytes());
        bin.extend_from_slice(b"abc");

        let err = Semver::decode_binary(&bin).unwrap_err();
        assert!(matches!(
            err,
            VersionError::TruncatedInput {
                needed: 10,
                remaining: 3
            }
        ));
    }

    #[test]
    fn decode_binary_rejects_non_utf8_suffix() {
        let mut bin = Vec::new();
        for value in [1u32, 2, 3, 1] {
            bin.extend_from_slice(&value.to_le_bytes());
        }
        bin.push(0xff);
        bin.extend_from_slice(&0u32.to_le_bytes());

        let err = Semver::decode_binary(&bin).unwrap_err();
        assert!(matches!(err, VersionError::InvalidUtf8(_)));
    }

    #[test]
    fn setters_replace_fields() {
        let mut version = Semver::parse("1.2.3-rc+meta").unwrap();
        version.set_major(2);
        version.set_minor(0);
        version.set_patch(0);
        version.set_pre_release("");
        version.set_build_metadata_bytes(b"ci.42").unwrap();
        assert_eq!(version.to_string(), "2.0.0+ci.42");
        assert_eq!(version.build_metadata_bytes(), b"ci.42");
    }

    #[test]
    fn set_pre_release_bytes_rejects_invalid_utf8() {
        let mut version = Semver::new(1, 0, 0);
        assert!(version.set_pre_release_bytes(&[0xc3, 0x28]).is_err());
        assert_eq!(version.pre_release(), "");
    }

    #[test]
    fn write_to_returns_written_length() {
        let version = Semver::new(1, 2, 3).with_pre_release("rc.1");
        let mut sink = Vec::new();
        let written = version.write_to(&mut sink).unwrap();
        assert_eq!(sink, b"1.2.3-rc.1");
        assert_eq!(written, 10);
    }
}
