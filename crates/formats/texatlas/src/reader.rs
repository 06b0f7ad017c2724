use std::io::{self, Read, Seek, SeekFrom};

use log::{debug, trace};

use crate::cursor::Cursor;
use crate::error::{FormatError, Result, Section};
use crate::header::{Header, SectionSpan, HEADER_LEN};
use crate::options::{LoadOptions, Validation};

/// One texture descriptor record, still holding raw section-relative offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureDescriptor {
    /// Byte offset into the string section.
    pub name_offset: u32,
    pub num_frames: u32,
    /// Byte offset into the frame section.
    pub frames_offset: u32,
}

/// Everything read from a map file, before any offset is resolved.
///
/// The string and frame sections are kept verbatim; descriptors are decoded
/// but their offsets are unchecked.
#[derive(Debug, Clone)]
pub struct RawSections {
    pub header: Header,
    pub descriptors: Vec<TextureDescriptor>,
    pub strings: Vec<u8>,
    pub frames: Vec<u8>,
}

impl RawSections {
    /// Read the header and all three sections from `source`.
    ///
    /// Offsets in the header are absolute, so the source is rewound to its
    /// start first. The magic is checked before any section is touched.
    pub fn read<R: Read + Seek>(source: &mut R, options: &LoadOptions) -> Result<Self> {
        source.seek(SeekFrom::Start(0))?;
        let mut header_data = Vec::with_capacity(HEADER_LEN);
        read_available(source, HEADER_LEN as u64, &mut header_data)?;
        let header = Header::parse(&header_data)?;
        debug!(
            "atlas header: {}x{}, {} texture(s), textures {:?}, strings {:?}, frames {:?}",
            header.width,
            header.height,
            header.num_textures,
            header.textures,
            header.strings,
            header.frames
        );

        if options.validation == Validation::Strict {
            header.check_section_lengths()?;
        }

        // Descriptors are read by count; the declared section length is not consulted.
        let descriptor_span: (u64, u64) = (header.textures.offset.into(), header.descriptor_bytes());
        let descriptor_data = read_section(source, Section::Textures, descriptor_span)?;
        let descriptors = parse_descriptors(&descriptor_data, header.num_textures)?;

        let strings = read_section(source, Section::Strings, span_bounds(header.strings))?;
        let frames = read_section(source, Section::Frames, span_bounds(header.frames))?;

        Ok(Self {
            header,
            descriptors,
            strings,
            frames,
        })
    }
}

fn span_bounds(span: SectionSpan) -> (u64, u64) {
    (span.offset.into(), span.len.into())
}

/// Read exactly `len` bytes at `offset`.
///
/// The buffer grows with the data actually read, so a header declaring a huge
/// section over a short file fails as truncated instead of allocating up front.
fn read_section<R: Read + Seek>(
    source: &mut R,
    section: Section,
    (offset, len): (u64, u64),
) -> Result<Vec<u8>> {
    source.seek(SeekFrom::Start(offset))?;
    let mut buf = Vec::new();
    read_available(source, len, &mut buf)?;
    let have = buf.len() as u64;
    if have < len {
        return Err(FormatError::Truncated {
            section,
            offset,
            need: len,
            have,
        }
        .into());
    }
    trace!("read {section}: {len} bytes at {offset:#x}");
    Ok(buf)
}

/// Append up to `len` bytes from `source` to `buf`.
///
/// A source that signals its end with `UnexpectedEof` instead of a zero-length
/// read is treated as ended; callers compare `buf.len()` to decide truncation.
fn read_available<R: Read>(source: &mut R, len: u64, buf: &mut Vec<u8>) -> Result<()> {
    match source.by_ref().take(len).read_to_end(buf) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn parse_descriptors(data: &[u8], count: u32) -> Result<Vec<TextureDescriptor>> {
    let mut c = Cursor::new(data, Section::Textures);
    let mut descriptors = Vec::with_capacity(count as usize);
    for _ in 0..count {
        descriptors.push(TextureDescriptor {
            name_offset: c.read_u32()?,
            num_frames: c.read_u32()?,
            frames_offset: c.read_u32()?,
        });
    }
    Ok(descriptors)
}
