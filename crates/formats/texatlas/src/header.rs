use crate::cursor::Cursor;
use crate::error::{FormatError, Result, Section};

/// `TEXA` read as a little-endian u32.
pub const MAGIC: u32 = 0x4158_4554;

/// Size of the packed header record.
pub const HEADER_LEN: usize = 40;

/// Size of one texture descriptor: name offset, frame count, frames offset.
pub const TEXTURE_RECORD_LEN: u64 = 12;

/// Size of one frame record: x, y, width, height.
pub const FRAME_RECORD_LEN: u64 = 16;

/// An `(offset, length)` pair locating a section in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionSpan {
    /// Absolute byte offset from the start of the file.
    pub offset: u32,
    /// Declared length in bytes.
    pub len: u32,
}

/// The fixed 40-byte header at the start of every map file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub width: u32,
    pub height: u32,
    pub num_textures: u32,
    pub textures: SectionSpan,
    pub strings: SectionSpan,
    pub frames: SectionSpan,
}

impl Header {
    /// Decode the header record. The magic is checked before anything else.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut c = Cursor::new(data, Section::Header);
        let magic = c.read_u32()?;
        if magic != MAGIC {
            return Err(FormatError::BadMagic { found: magic }.into());
        }
        let width = c.read_u32()?;
        let height = c.read_u32()?;
        let num_textures = c.read_u32()?;
        let textures = read_span(&mut c)?;
        let strings = read_span(&mut c)?;
        let frames = read_span(&mut c)?;
        Ok(Self {
            width,
            height,
            num_textures,
            textures,
            strings,
            frames,
        })
    }

    /// Bytes occupied by `num_textures` descriptor records.
    pub fn descriptor_bytes(&self) -> u64 {
        u64::from(self.num_textures) * TEXTURE_RECORD_LEN
    }

    /// Cross-check declared section lengths against the counts they must hold.
    ///
    /// Only used by strict loading; the lenient path never calls this.
    pub fn check_section_lengths(&self) -> Result<()> {
        let expected = self.descriptor_bytes();
        if u64::from(self.textures.len) != expected {
            return Err(FormatError::SectionLength {
                section: Section::Textures,
                declared: self.textures.len.into(),
                expected,
            }
            .into());
        }
        let frames_len = u64::from(self.frames.len);
        if frames_len % FRAME_RECORD_LEN != 0 {
            return Err(FormatError::SectionLength {
                section: Section::Frames,
                declared: frames_len,
                expected: frames_len - frames_len % FRAME_RECORD_LEN,
            }
            .into());
        }
        Ok(())
    }
}

fn read_span(c: &mut Cursor<'_>) -> Result<SectionSpan> {
    let offset = c.read_u32()?;
    let len = c.read_u32()?;
    Ok(SectionSpan { offset, len })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn header_bytes(fields: [u32; 10]) -> Vec<u8> {
        fields.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn magic_spells_texa() {
        assert_eq!(&MAGIC.to_le_bytes(), b"TEXA");
    }

    #[test]
    fn parse_fields_in_order() {
        let data = header_bytes([MAGIC, 64, 32, 2, 40, 24, 64, 4, 68, 48]);
        assert_eq!(data.len(), HEADER_LEN);
        let header = Header::parse(&data).unwrap();
        assert_eq!(header.width, 64);
        assert_eq!(header.height, 32);
        assert_eq!(header.num_textures, 2);
        assert_eq!(header.textures, SectionSpan { offset: 40, len: 24 });
        assert_eq!(header.strings, SectionSpan { offset: 64, len: 4 });
        assert_eq!(header.frames, SectionSpan { offset: 68, len: 48 });
    }

    #[test]
    fn bad_magic_rejected() {
        let data = header_bytes([0x1234_5678, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let err = Header::parse(&data).unwrap_err();
        assert!(matches!(
            err,
            Error::Format(FormatError::BadMagic { found: 0x1234_5678 })
        ));
    }

    #[test]
    fn bad_magic_wins_over_short_header() {
        let err = Header::parse(b"PNG\x89").unwrap_err();
        assert!(matches!(err, Error::Format(FormatError::BadMagic { .. })));
    }

    #[test]
    fn strict_lengths() {
        let ok = Header::parse(&header_bytes([MAGIC, 1, 1, 2, 40, 24, 64, 4, 68, 48])).unwrap();
        assert!(ok.check_section_lengths().is_ok());

        let bad_tex = Header::parse(&header_bytes([MAGIC, 1, 1, 2, 40, 20, 64, 4, 68, 48])).unwrap();
        assert!(matches!(
            bad_tex.check_section_lengths().unwrap_err(),
            Error::Format(FormatError::SectionLength {
                section: Section::Textures,
                declared: 20,
                expected: 24,
            })
        ));

        let bad_frm = Header::parse(&header_bytes([MAGIC, 1, 1, 2, 40, 24, 64, 4, 68, 50])).unwrap();
        assert!(matches!(
            bad_frm.check_section_lengths().unwrap_err(),
            Error::Format(FormatError::SectionLength {
                section: Section::Frames,
                ..
            })
        ));
    }

    #[test]
    fn descriptor_bytes_does_not_overflow() {
        let header = Header::parse(&header_bytes([MAGIC, 0, 0, u32::MAX, 0, 0, 0, 0, 0, 0])).unwrap();
        assert_eq!(header.descriptor_bytes(), u64::from(u32::MAX) * 12);
    }
}
