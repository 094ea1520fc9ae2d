//! Conversions to and from [`semver::Version`]
//!
//! [`Semver`] parsing is lenient. Converting into [`semver::Version`] runs
//! the pre-release and build metadata through the strict SemVer 2.0.0 rules,
//! and gives access to precedence ordering.

use crate::version::error::VersionError;
use crate::version::semver::Semver;

impl TryFrom<&Semver> for semver::Version {
    type Error = VersionError;

    fn try_from(version: &Semver) -> Result<Self, Self::Error> {
        let pre = if version.pre_release().is_empty() {
            semver::Prerelease::EMPTY
        } else {
            semver::Prerelease::new(version.pre_release())?
        };
        let build = if version.build_metadata().is_empty() {
            semver::BuildMetadata::EMPTY
        } else {
            semver::BuildMetadata::new(version.build_metadata())?
        };

        Ok(semver::Version {
            major: version.major().into(),
            minor: version.minor().into(),
            patch: version.patch().into(),
            pre,
            build,
        })
    }
}

/// Fails with [`VersionError::ComponentOverflow`] when a component does not
/// fit in 32 bits.
impl TryFrom<&semver::Version> for Semver {
    type Error = VersionError;

    fn try_from(version: &semver::Version) -> Result<Self, Self::Error> {
        Ok(Semver::new(
            u32::try_from(version.major)?,
            u32::try_from(version.minor)?,
            u32::try_from(version.patch)?,
        )
        .with_pre_release(version.pre.as_str())
        .with_build_metadata(version.build.as_str()))
    }
}
