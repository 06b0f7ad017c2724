use std::fmt;

use thiserror::Error;

/// A region of the map file, used to say where a read or offset failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    Textures,
    Strings,
    Frames,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Header => "header",
            Section::Textures => "texture section",
            Section::Strings => "string section",
            Section::Frames => "frame section",
        };
        f.write_str(name)
    }
}

/// Structural problems with the map file contents.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("invalid magic: expected {:#010x}, found {found:#010x}", crate::header::MAGIC)]
    BadMagic { found: u32 },

    #[error("{section} truncated at offset {offset:#x} (need {need} bytes, have {have})")]
    Truncated {
        section: Section,
        offset: u64,
        need: u64,
        have: u64,
    },

    #[error("texture {texture}: {need} byte(s) at offset {offset:#x} fall outside the {section} ({len} bytes)")]
    BadOffset {
        texture: usize,
        section: Section,
        offset: u64,
        need: u64,
        len: u64,
    },

    #[error("texture {texture}: name at offset {offset:#x} has no null terminator")]
    UnterminatedString { texture: usize, offset: u64 },

    #[error("texture {texture}: name at offset {offset:#x} is not valid UTF-8: {source}")]
    InvalidName {
        texture: usize,
        offset: u64,
        source: std::str::Utf8Error,
    },

    #[error("{section} length is {declared} bytes, expected {expected}")]
    SectionLength {
        section: Section,
        declared: u64,
        expected: u64,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Format(#[from] FormatError),
}

pub type Result<T> = std::result::Result<T, Error>;
