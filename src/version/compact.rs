//! Compact versions packed into a single machine word
//!
//! Four equal-width fields, most significant first:
//!
//! ```text
//! Compact32: | major:8  | minor:8  | patch:8  | revision:8  |
//! Compact64: | major:16 | minor:16 | patch:16 | revision:16 |
//! ```
//!
//! Both widths share one implementation, [`Compact`], parameterized by the
//! field type.
//!
//! # Truncation
//!
//! Parsed components wider than a field are truncated to the field width
//! rather than rejected: `"1.300"` parses as `1.44` for [`Compact32`].
//! Tokens are first read as `u32` for [`Compact32`] and `u64` for
//! [`Compact64`]; a token overflowing that integer is an
//! [`VersionError::InvalidNumber`].

use std::fmt;
use std::hash::Hash;
use std::num::ParseIntError;
use std::str::FromStr;

use tracing::debug;

use crate::config::{COMPACT_BINARY_LEN, COMPACT_FIELD_COUNT};
use crate::version::binary::Reader;
use crate::version::error::VersionError;
use crate::version::traits::Version;

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
}

/// Width of a single compact field
pub trait Field:
    Copy + Default + fmt::Debug + fmt::Display + Eq + Hash + Into<u64> + sealed::Sealed
{
    /// Word holding all four fields
    type Word: Copy + Default + fmt::Debug + Eq + Hash + Into<u64>;

    /// Integer a text token is read as before truncation
    type Token: FromStr<Err = ParseIntError> + Into<u64>;

    const BITS: u32;

    /// Keep the low `BITS` bits of `value`
    fn truncate(value: u64) -> Self;

    /// Keep the low bits of `raw` that fit in a word
    fn word_from_u64(raw: u64) -> Self::Word;
}

impl Field for u8 {
    type Word = u32;
    type Token = u32;
    const BITS: u32 = u8::BITS;

    fn truncate(value: u64) -> Self {
        value as u8
    }

    fn word_from_u64(raw: u64) -> Self::Word {
        raw as u32
    }
}

impl Field for u16 {
    type Word = u64;
    type Token = u64;
    const BITS: u32 = u16::BITS;

    fn truncate(value: u64) -> Self {
        value as u16
    }

    fn word_from_u64(raw: u64) -> Self::Word {
        raw
    }
}

/// Version packed into one word of four `F`-wide fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Compact<F: Field> {
    raw: F::Word,
}

/// Four 8-bit fields in a `u32`
pub type Compact32 = Compact<u8>;

/// Four 16-bit fields in a `u64`
pub type Compact64 = Compact<u16>;

/// Field position, counted from the most significant end
#[derive(Debug, Clone, Copy)]
enum Slot {
    Major = 0,
    Minor = 1,
    Patch = 2,
    Revision = 3,
}

impl<F: Field> Compact<F> {
    pub fn new(major: F, minor: F, patch: F, revision: F) -> Self {
        Self::default()
            .with_major(major)
            .with_minor(minor)
            .with_patch(patch)
            .with_revision(revision)
    }

    pub fn from_raw(raw: F::Word) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> F::Word {
        self.raw
    }

    /// Parse `MAJOR[.MINOR[.PATCH[.REVISION]]]`.
    ///
    /// Missing trailing fields are zero. Components are truncated to the
    /// field width.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        parse_compact(input)
            .inspect_err(|e| debug!("Rejected compact version {:?}: {}", input, e))
    }

    pub fn major(&self) -> F {
        self.get(Slot::Major)
    }

    pub fn minor(&self) -> F {
        self.get(Slot::Minor)
    }

    pub fn patch(&self) -> F {
        self.get(Slot::Patch)
    }

    pub fn revision(&self) -> F {
        self.get(Slot::Revision)
    }

    pub fn set_major(&mut self, value: F) {
        self.set(Slot::Major, value);
    }

    pub fn set_minor(&mut self, value: F) {
        self.set(Slot::Minor, value);
    }

    pub fn set_patch(&mut self, value: F) {
        self.set(Slot::Patch, value);
    }

    pub fn set_revision(&mut self, value: F) {
        self.set(Slot::Revision, value);
    }

    pub fn with_major(mut self, value: F) -> Self {
        self.set_major(value);
        self
    }

    pub fn with_minor(mut self, value: F) -> Self {
        self.set_minor(value);
        self
    }

    pub fn with_patch(mut self, value: F) -> Self {
        self.set_patch(value);
        self
    }

    pub fn with_revision(mut self, value: F) -> Self {
        self.set_revision(value);
        self
    }

    /// Zero every field
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn shift(slot: Slot) -> u32 {
        F::BITS * (COMPACT_FIELD_COUNT as u32 - 1 - slot as u32)
    }

    fn get(&self, slot: Slot) -> F {
        let raw: u64 = self.raw.into();
        F::truncate(raw >> Self::shift(slot))
    }

    fn set(&mut self, slot: Slot, value: F) {
        let shift = Self::shift(slot);
        let mask = ((1u64 << F::BITS) - 1) << shift;
        let raw: u64 = self.raw.into();
        let value: u64 = value.into();
        self.raw = F::word_from_u64((raw & !mask) | (value << shift));
    }
}

fn parse_compact<F: Field>(input: &str) -> Result<Compact<F>, VersionError> {
    if input.is_empty() {
        return Err(VersionError::EmptyInput);
    }

    let mut fields = [F::default(); COMPACT_FIELD_COUNT];
    for (i, token) in input.split('.').enumerate() {
        let Some(field) = fields.get_mut(i) else {
            return Err(VersionError::MalformedVersion(input.to_owned()));
        };
        // Integer from_str accepts a leading '+', components never carry a sign
        if token.starts_with('+') {
            return Err(VersionError::MalformedVersion(input.to_owned()));
        }
        *field = F::truncate(token.parse::<F::Token>()?.into());
    }

    let [major, minor, patch, revision] = fields;
    Ok(Compact::new(major, minor, patch, revision))
}

impl<F: Field> FromStr for Compact<F> {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Writes four fields when revision is set, three when only patch is set,
/// and `major.minor` otherwise.
impl<F: Field> fmt::Display for Compact<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let zero = F::default();
        let (major, minor, patch, revision) =
            (self.major(), self.minor(), self.patch(), self.revision());

        write!(f, "{major}.{minor}")?;
        if revision != zero {
            write!(f, ".{patch}.{revision}")
        } else if patch != zero {
            write!(f, ".{patch}")
        } else {
            Ok(())
        }
    }
}

/// Binary form is the word as a little-endian integer, zero-padded to
/// eight bytes for both widths.
impl<F: Field> Version for Compact<F> {
    fn encode_binary(&self) -> Result<Vec<u8>, VersionError> {
        let raw: u64 = self.raw.into();
        Ok(raw.to_le_bytes().to_vec())
    }

    fn decode_binary(data: &[u8]) -> Result<Self, VersionError> {
        let mut buf = [0u8; COMPACT_BINARY_LEN];
        buf.copy_from_slice(Reader::new(data).read_bytes(COMPACT_BINARY_LEN)?);
        Ok(Self::from_raw(F::word_from_u64(u64::from_le_bytes(buf))))
    }
}
