use crate::{Error, Result};
use std::{
    borrow::Cow,
    io::{Seek, SeekFrom, Write},
};

/// x86 `nop`, used to fill out padded edits.
pub const NOP: u8 = 0x90;

/// A single in-place write at a fixed file offset. Edits never insert, so the
/// bytes around them keep their positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edit {
    Overwrite { offset: u64, bytes: &'static [u8] },
    /// `bytes` followed by `filler` up to `len` bytes in total.
    Padded { offset: u64, bytes: &'static [u8], len: usize, filler: u8 },
}

impl Edit {
    pub const fn overwrite(offset: u64, bytes: &'static [u8]) -> Self {
        Self::Overwrite { offset, bytes }
    }

    pub const fn nop_pad(offset: u64, bytes: &'static [u8], len: usize) -> Self {
        Self::Padded { offset, bytes, len, filler: NOP }
    }

    pub fn offset(&self) -> u64 {
        match *self {
            Self::Overwrite { offset, .. } | Self::Padded { offset, .. } => offset,
        }
    }

    /// Number of bytes this edit touches.
    pub fn span(&self) -> usize {
        match *self {
            Self::Overwrite { bytes, .. } => bytes.len(),
            Self::Padded { len, .. } => len,
        }
    }

    /// The exact bytes that end up at `offset()`.
    pub fn contents(&self) -> Result<Cow<'static, [u8]>> {
        match *self {
            Self::Overwrite { bytes, .. } => Ok(Cow::Borrowed(bytes)),
            Self::Padded { offset, bytes, len, filler } => {
                if bytes.len() > len {
                    return Err(Error::WriteOverflow { offset, len: bytes.len(), max: len })
                }
                if bytes.len() == len {
                    return Ok(Cow::Borrowed(bytes))
                }
                let mut buf = Vec::with_capacity(len);
                buf.extend_from_slice(bytes);
                buf.resize(len, filler);
                Ok(Cow::Owned(buf))
            },
        }
    }

    /// Rejects the edit if it can't be written without truncating the
    /// replacement or growing a file of `file_len` bytes.
    pub fn check(&self, file_len: u64) -> Result<()> {
        self.contents()?;
        let (offset, len) = (self.offset(), self.span());
        match offset.checked_add(len as u64) {
            Some(end) if end <= file_len => Ok(()),
            _ => Err(Error::OutOfBounds { offset, len, file_len }),
        }
    }

    pub(crate) fn write<W: Write + Seek + ?Sized>(&self, fp: &mut W) -> Result<()> {
        let data = self.contents()?;
        tracing::debug!("writing {} bytes at {:#x}", data.len(), self.offset());
        fp.seek(SeekFrom::Start(self.offset()))?;
        fp.write_all(&data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SENTINEL: u8 = 0xCC;

    fn buffer(len: usize) -> Cursor<Vec<u8>> {
        Cursor::new(vec![SENTINEL; len])
    }

    #[test]
    fn overwrite_is_local() {
        let mut fp = buffer(16);
        Edit::overwrite(4, &[1, 2, 3]).write(&mut fp).unwrap();
        let buf = fp.into_inner();
        assert_eq!(buf.len(), 16);
        assert_eq!(&buf[4..7], &[1, 2, 3]);
        assert!(buf[..4].iter().chain(&buf[7..]).all(|&b| b == SENTINEL));
    }

    #[test]
    fn padded_exact_length_has_no_filler() {
        let edit = Edit::nop_pad(0, &[0xB8, 0, 0, 0, 0], 5);
        assert_eq!(&*edit.contents().unwrap(), &[0xB8, 0, 0, 0, 0]);
    }

    #[test]
    fn padded_short_fills_remainder() {
        let mut fp = buffer(12);
        Edit::nop_pad(2, &[0xC3], 4).write(&mut fp).unwrap();
        let buf = fp.into_inner();
        assert_eq!(&buf[2..6], &[0xC3, NOP, NOP, NOP]);
        assert_eq!(buf[6], SENTINEL);
    }

    #[test]
    fn padded_custom_filler() {
        let edit = Edit::Padded { offset: 0, bytes: &[1], len: 3, filler: 0 };
        assert_eq!(&*edit.contents().unwrap(), &[1, 0, 0]);
    }

    #[test]
    fn padded_overflow_writes_nothing() {
        let mut fp = buffer(8);
        let edit = Edit::nop_pad(1, &[1, 2, 3], 2);
        match edit.write(&mut fp) {
            Err(Error::WriteOverflow { offset: 1, len: 3, max: 2 }) => (),
            other => panic!("expected overflow, got {:?}", other),
        }
        assert!(fp.into_inner().iter().all(|&b| b == SENTINEL));
    }

    #[test]
    fn check_rejects_past_end() {
        let edit = Edit::overwrite(6, &[0; 4]);
        assert!(matches!(edit.check(9), Err(Error::OutOfBounds { offset: 6, len: 4, file_len: 9 })));
        assert!(edit.check(10).is_ok());
        assert!(matches!(Edit::overwrite(u64::MAX, &[0]).check(u64::MAX), Err(Error::OutOfBounds { .. })));
    }

    #[test]
    fn check_reports_overflow_before_bounds() {
        let edit = Edit::nop_pad(100, &[1, 2], 1);
        assert!(matches!(edit.check(0), Err(Error::WriteOverflow { .. })));
    }
}
