// =============================================================================
// Binary layout constants
// =============================================================================

/// Size of the binary slot reserved for every compact version (both widths)
pub const COMPACT_BINARY_LEN: usize = 8;

/// Number of packed fields in a compact version (major, minor, patch, revision)
pub const COMPACT_FIELD_COUNT: usize = 4;

/// Size of one little-endian `u32` header value (component or length prefix)
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Size of a semver binary encoding with empty pre-release and metadata:
/// three components plus two length prefixes
pub const SEMVER_FIXED_LEN: usize = 5 * LENGTH_PREFIX_LEN;
