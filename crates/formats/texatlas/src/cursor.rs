use crate::error::{FormatError, Result, Section};

/// Read cursor over one in-memory section. All reads are little-endian.
///
/// Running past the end reports `Truncated` against the section the cursor
/// was created for.
#[derive(Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
    section: Section,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8], section: Section) -> Self {
        Self {
            data,
            pos: 0,
            section,
        }
    }

    /// Current byte position.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Remaining bytes from current position.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Seek to an absolute position within the section.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Read a slice of `n` bytes without copying.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.ensure(n)?;
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a null-terminated byte run, consuming the terminator.
    ///
    /// Returns `None` (and leaves the cursor untouched) if the section ends
    /// before a terminator is found.
    pub fn read_cstr(&mut self) -> Option<&'a [u8]> {
        let rest = self.data.get(self.pos..)?;
        let len = rest.iter().position(|&b| b == 0)?;
        self.pos += len + 1;
        Some(&rest[..len])
    }

    fn ensure(&self, n: usize) -> Result<()> {
        if n > self.remaining() {
            return Err(FormatError::Truncated {
                section: self.section,
                offset: self.pos as u64,
                need: n as u64,
                have: self.remaining() as u64,
            }
            .into());
        }
        Ok(())
    }
}
