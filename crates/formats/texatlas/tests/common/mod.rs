//! Synthetic map file builder for integration tests.
//!
//! Lays sections out the way the atlas packer writes them: header, texture
//! descriptors, names, frames, back to back with no padding.

#![allow(dead_code)]

use texatlas::header::MAGIC;

/// Little-endian byte buffer writer.
#[derive(Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Patch a u32 at a specific position (for backpatching offsets).
    pub fn patch_u32(&mut self, pos: usize, v: u32) {
        self.buf[pos..pos + 4].copy_from_slice(&v.to_le_bytes());
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Header field positions, for tests that corrupt a single field.
pub mod field {
    pub const MAGIC: usize = 0;
    pub const NUM_TEXTURES: usize = 12;
    pub const TEX_LEN: usize = 20;
    pub const STR_OFFSET: usize = 24;
    pub const STR_LEN: usize = 28;
    pub const FRM_OFFSET: usize = 32;
    pub const FRM_LEN: usize = 36;
}

/// `(x, y, width, height)`
pub type Rect = (u32, u32, u32, u32);

pub struct MapBuilder {
    width: u32,
    height: u32,
    textures: Vec<(String, Vec<Rect>)>,
}

impl MapBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            textures: Vec::new(),
        }
    }

    pub fn texture(mut self, name: &str, frames: &[Rect]) -> Self {
        self.textures.push((name.to_owned(), frames.to_vec()));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut w = Writer::default();
        w.write_u32(MAGIC);
        w.write_u32(self.width);
        w.write_u32(self.height);
        w.write_u32(self.textures.len() as u32);
        // Section table, backpatched once each section is written.
        let table = w.position();
        for _ in 0..6 {
            w.write_u32(0);
        }

        let tex_offset = w.position();
        let mut str_offset = 0u32;
        let mut frm_offset = 0u32;
        for (name, frames) in &self.textures {
            w.write_u32(str_offset);
            w.write_u32(frames.len() as u32);
            w.write_u32(frm_offset);
            str_offset += name.len() as u32 + 1;
            frm_offset += frames.len() as u32 * 16;
        }
        let tex_len = w.position() - tex_offset;

        let strings_offset = w.position();
        for (name, _) in &self.textures {
            w.write_bytes(name.as_bytes());
            w.write_bytes(&[0]);
        }
        let strings_len = w.position() - strings_offset;

        let frames_offset = w.position();
        for (_, frames) in &self.textures {
            for &(x, y, width, height) in frames {
                w.write_u32(x);
                w.write_u32(y);
                w.write_u32(width);
                w.write_u32(height);
            }
        }
        let frames_len = w.position() - frames_offset;

        let spans = [
            tex_offset,
            tex_len,
            strings_offset,
            strings_len,
            frames_offset,
            frames_len,
        ];
        for (i, v) in spans.iter().enumerate() {
            w.patch_u32(table + i * 4, *v as u32);
        }
        w.into_bytes()
    }
}

/// Overwrite the u32 at `pos` in an already-built map.
pub fn set_u32(data: &mut [u8], pos: usize, v: u32) {
    data[pos..pos + 4].copy_from_slice(&v.to_le_bytes());
}

pub fn get_u32(data: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]])
}

/// The two-texture map used throughout: "a" with one frame, "b" with two.
pub fn two_textures() -> MapBuilder {
    MapBuilder::new(64, 64)
        .texture("a", &[(0, 0, 8, 8)])
        .texture("b", &[(8, 0, 8, 8), (16, 0, 8, 16)])
}
