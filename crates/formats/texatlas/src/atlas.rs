use log::debug;

use crate::cursor::Cursor;
use crate::error::{FormatError, Result, Section};
use crate::header::FRAME_RECORD_LEN;
use crate::reader::{RawSections, TextureDescriptor};

/// One rectangular sub-region of a texture.
///
/// Geometry is reported exactly as stored; it is never checked against the
/// atlas dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A named sprite made of one or more frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    name: String,
    frames: Vec<Frame>,
}

impl Texture {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Frames in file order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }
}

/// A loaded texture atlas map.
///
/// Built in one pass from [`RawSections`]; every name and frame offset has
/// been resolved against its section, so nothing here refers back to the
/// file. The atlas owns all of its textures and is immutable once built.
/// Dropping it releases everything at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atlas {
    width: u32,
    height: u32,
    textures: Vec<Texture>,
}

impl Atlas {
    /// Resolve every descriptor in `raw` into a texture.
    ///
    /// Fails on the first offset that does not resolve; no partial atlas is
    /// produced.
    pub fn build(raw: RawSections) -> Result<Self> {
        let textures = raw
            .descriptors
            .iter()
            .enumerate()
            .map(|(index, desc)| resolve_texture(&raw, index, desc))
            .collect::<Result<Vec<_>>>()?;
        debug!("resolved {} texture(s)", textures.len());
        Ok(Self {
            width: raw.header.width,
            height: raw.header.height,
            textures,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn num_textures(&self) -> usize {
        self.textures.len()
    }

    /// Textures in file order.
    pub fn textures(&self) -> &[Texture] {
        &self.textures
    }

    pub fn texture(&self, index: usize) -> Option<&Texture> {
        self.textures.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Texture> {
        self.textures.iter()
    }

    /// Find a texture by exact (byte-for-byte) name.
    ///
    /// Scans in file order, so with duplicate names the first one wins.
    pub fn lookup(&self, name: &str) -> Option<&Texture> {
        self.textures.iter().find(|t| t.name == name)
    }
}

impl<'a> IntoIterator for &'a Atlas {
    type Item = &'a Texture;
    type IntoIter = std::slice::Iter<'a, Texture>;

    fn into_iter(self) -> Self::IntoIter {
        self.textures.iter()
    }
}

fn resolve_texture(raw: &RawSections, index: usize, desc: &TextureDescriptor) -> Result<Texture> {
    let name = resolve_name(&raw.strings, index, desc.name_offset)?;
    let frames = resolve_frames(&raw.frames, index, desc.frames_offset, desc.num_frames)?;
    Ok(Texture { name, frames })
}

fn resolve_name(strings: &[u8], texture: usize, offset: u32) -> Result<String> {
    let start = offset as usize;
    if start >= strings.len() {
        return Err(FormatError::BadOffset {
            texture,
            section: Section::Strings,
            offset: offset.into(),
            need: 1,
            len: strings.len() as u64,
        }
        .into());
    }
    let mut c = Cursor::new(strings, Section::Strings);
    c.seek(start);
    let bytes = c.read_cstr().ok_or(FormatError::UnterminatedString {
        texture,
        offset: offset.into(),
    })?;
    let name = std::str::from_utf8(bytes).map_err(|source| FormatError::InvalidName {
        texture,
        offset: offset.into(),
        source,
    })?;
    Ok(name.to_owned())
}

fn resolve_frames(frames: &[u8], texture: usize, offset: u32, count: u32) -> Result<Vec<Frame>> {
    // Both factors are u32, so the run length cannot overflow u64.
    let need = u64::from(count) * FRAME_RECORD_LEN;
    if u64::from(offset) + need > frames.len() as u64 {
        return Err(FormatError::BadOffset {
            texture,
            section: Section::Frames,
            offset: offset.into(),
            need,
            len: frames.len() as u64,
        }
        .into());
    }

    let mut c = Cursor::new(frames, Section::Frames);
    c.seek(offset as usize);
    let mut out = Vec::with_capacity(count as usize);
    for _ in 0..count {
        out.push(Frame {
            x: c.read_u32()?,
            y: c.read_u32()?,
            width: c.read_u32()?,
            height: c.read_u32()?,
        });
    }
    Ok(out)
}
