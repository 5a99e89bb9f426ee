//! Codec constants and tuning parameters.

// ============================================================================
// Decoding policy
// ============================================================================

/// Strictness used by readers that are not configured explicitly.
///
/// Strict readers reject dictionaries whose keys are not in ascending
/// byte-wise order.
pub const DEFAULT_STRICT_DECODING: bool = true;

/// Maximum nesting of lists and dictionaries accepted by the decoder.
pub const MAX_DEPTH: usize = 64;

// ============================================================================
// Torrent files
// ============================================================================

/// Top-level key of the dictionary that is always decoded strictly when
/// reading a torrent file (compared ASCII case-insensitively).
pub const INFO_KEY: &str = "info";

// ============================================================================
// Wire markers
// ============================================================================

/// Opens a dictionary: `d<key><value>...e`.
pub const DICT_START: u8 = b'd';
/// Opens a list: `l<value>...e`.
pub const LIST_START: u8 = b'l';
/// Opens an integer: `i<digits>e`.
pub const INT_START: u8 = b'i';
/// Closes an integer, list or dictionary.
pub const END: u8 = b'e';
/// Separates a byte string's length prefix from its payload.
pub const LENGTH_SEPARATOR: u8 = b':';
/// Sign of a negative integer.
pub const MINUS: u8 = b'-';
