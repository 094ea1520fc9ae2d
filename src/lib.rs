//! Version identifiers with text and binary encodings.
//!
//! Three representations share one interface ([`version::Version`]):
//!
//! - [`Compact32`]: four 8-bit fields packed into a `u32`
//! - [`Compact64`]: four 16-bit fields packed into a `u64`
//! - [`Semver`]: `major.minor.patch` with optional pre-release and build metadata
//!
//! ```
//! use version_codec::{Semver, Version};
//!
//! let v: Semver = "v1.2.3-rc.1+build.7".parse().unwrap();
//! assert_eq!(v.pre_release(), "rc.1");
//!
//! let bin = v.encode_binary().unwrap();
//! assert_eq!(Semver::decode_binary(&bin).unwrap(), v);
//! ```

pub mod config;
pub mod version;

pub use version::compact::{Compact, Compact32, Compact64};
pub use version::error::VersionError;
pub use version::semver::Semver;
pub use version::traits::Version;
