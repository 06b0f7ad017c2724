//! Loader for binary texture atlas map files (`TEXA` magic).
//!
//! A map file describes the named textures packed into one sprite sheet. It
//! is a 40-byte header followed by three sections: texture descriptors,
//! null-terminated names, and frame rectangles. Descriptors refer to names
//! and frames by byte offset into their sections.
//!
//! Two layers:
//! - **Layer 1** (`reader`): header and raw section I/O, no cross-references resolved
//! - **Layer 2** (`atlas`): offset resolution into an owned, immutable [`Atlas`]
//!
//! ```no_run
//! let atlas = texatlas::load("sprites.map")?;
//! if let Some(hero) = atlas.lookup("hero") {
//!     for frame in hero.frames() {
//!         println!("{}x{} at {}, {}", frame.width, frame.height, frame.x, frame.y);
//!     }
//! }
//! # Ok::<(), texatlas::Error>(())
//! ```

pub mod atlas;
pub mod cursor;
pub mod error;
pub mod header;
pub mod options;
pub mod reader;

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

pub use atlas::{Atlas, Frame, Texture};
pub use error::{Error, FormatError, Result, Section};
pub use header::{Header, SectionSpan};
pub use options::{LoadOptions, Validation};
pub use reader::{RawSections, TextureDescriptor};

/// Load a map file from disk with default (lenient) options.
pub fn load(path: impl AsRef<Path>) -> Result<Atlas> {
    load_with(path, &LoadOptions::default())
}

pub fn load_with(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Atlas> {
    let path = path.as_ref();
    log::debug!("loading atlas map {}", path.display());
    let file = File::open(path)?;
    from_reader_with(&mut BufReader::new(file), options)
}

/// Load from any seekable byte source. Section offsets are absolute from the
/// start of the source.
pub fn from_reader<R: Read + Seek>(source: &mut R) -> Result<Atlas> {
    from_reader_with(source, &LoadOptions::default())
}

pub fn from_reader_with<R: Read + Seek>(source: &mut R, options: &LoadOptions) -> Result<Atlas> {
    let raw = RawSections::read(source, options)?;
    Atlas::build(raw)
}

/// Load from an in-memory copy of the file.
pub fn from_bytes(data: &[u8]) -> Result<Atlas> {
    from_reader(&mut std::io::Cursor::new(data))
}
