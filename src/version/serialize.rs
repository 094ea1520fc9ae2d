//! Serde support
//!
//! Human-readable formats (JSON, TOML) carry the text form. Other formats
//! carry the binary encoding as a byte string.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::version::compact::{Compact, Field};
use crate::version::semver::Semver;
use crate::version::traits::Version;

fn serialize_version<V: Version, S: Serializer>(
    version: &V,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    if serializer.is_human_readable() {
        serializer.collect_str(version)
    } else {
        let bin = version.encode_binary().map_err(serde::ser::Error::custom)?;
        serializer.serialize_bytes(&bin)
    }
}

fn deserialize_version<'de, V: Version, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<V, D::Error> {
    let visitor = VersionVisitor(PhantomData);
    if deserializer.is_human_readable() {
        deserializer.deserialize_str(visitor)
    } else {
        deserializer.deserialize_bytes(visitor)
    }
}

struct VersionVisitor<V>(PhantomData<V>);

impl<'de, V: Version> Visitor<'de> for VersionVisitor<V> {
    type Value = V;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a version string or its binary encoding")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<V, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<V, E> {
        V::decode_binary(v).map_err(E::custom)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<V, A::Error> {
        let mut bin = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(byte) = seq.next_element::<u8>()? {
            bin.push(byte);
        }
        self.visit_bytes(&bin)
    }
}

impl Serialize for Semver {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_version(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Semver {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_version(deserializer)
    }
}

impl<F: Field> Serialize for Compact<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_version(self, serializer)
    }
}

impl<'de, F: Field> Deserialize<'de> for Compact<F> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_version(deserializer)
    }
}
