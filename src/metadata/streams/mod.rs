//! Metadata streams, ECMA-335 II.24.2.
//!
//! The metadata root lists up to eight named streams. Table rows live in the tables stream
//! (`#~`, or `#-` for images that were built for Edit and Continue); the heaps hold the strings,
//! blobs and GUIDs the rows point into. Every heap view here covers one contiguous segment; the
//! chaining of base and delta segments is done by [`crate::metadata::heaps`].

/// The header of a stream, indicates location + size + name
mod streamheader;
pub use streamheader::{StreamHeader, STREAM_NAMES};

/// The '#Strings' heap implementation
mod strings;
pub use strings::Strings;

/// The '#GUID' heap / array implementation
mod guid;
pub use guid::Guid;

/// The '#Blob' heap implementation
mod blob;
pub use blob::Blob;

/// The '#~' / '#-' header
mod tablesheader;
pub use tablesheader::TablesHeader;
