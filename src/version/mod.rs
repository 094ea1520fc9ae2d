//! Version representations and their encodings
//!
//! # Architecture
//!
//! ```text
//!                 ┌─────────────┐
//!                 │   Version   │  text + binary capability set
//!                 │   (trait)   │
//!                 └─────────────┘
//!                   ▲         ▲
//!                   │         │
//!          ┌─────────────┐ ┌─────────────┐
//!          │   Semver    │ │ Compact<F>  │
//!          │ (x.y.z-p+m) │ │ (u32 / u64) │
//!          └─────────────┘ └─────────────┘
//!                   │         │
//!                   ▼         ▼
//!                 ┌─────────────┐
//!                 │   binary    │  bounds-checked LE reader
//!                 └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`traits`]: The [`Version`] trait shared by every representation
//! - [`semver`]: Lenient semantic version parser, formatter and codec
//! - [`compact`]: Four-field versions packed into `u32` or `u64`
//! - [`error`]: Error type for parsing and decoding
//! - `binary`: Sequential little-endian reader used by the decoders
//! - `serialize`: Serde support (text for human-readable formats, binary otherwise)
//! - `interop`: Conversions to and from [`::semver::Version`]

mod binary;
pub mod compact;
pub mod error;
mod interop;
pub mod semver;
mod serialize;
pub mod traits;

pub use compact::{Compact, Compact32, Compact64, Field};
pub use error::VersionError;
pub use semver::Semver;
pub use traits::Version;
