//! Versioned line-oriented text format for voxel containers.
//!
//! ```text
//! 1                                   version header
//! !{"offset":{..},"rotation":{..}}    starts a chunk
//! #1,{"color":{..}}                   palette entry: id, payload JSON
//! 0,0,0,1                             voxel: x, y, z, palette id
//! ```
//!
//! Older files are upgraded in memory on read; writes always use
//! [`FORMAT_VERSION`].

mod error;
pub mod reader;
pub mod upgrade;
pub mod writer;

pub use error::FormatError;
pub use reader::{parse_container, parse_version, read_container};
pub use writer::{serialize_container, write_container};

/// Newest format version this build reads and the one it writes.
pub const FORMAT_VERSION: u32 = 1;

/// Leading character of a chunk header line.
pub const CHUNK_MARKER: char = '!';

/// Leading character of a palette entry line.
pub const PALETTE_MARKER: char = '#';
