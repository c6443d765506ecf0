//! Applies the fixed set of binary patches for the 2001-10-23 build of
//! BIONICLE: The Legend of Mata Nui to its executable.

mod catalog;
mod edit;
mod patch;
mod runner;
mod select;

pub use crate::{
    catalog::{patches, CATALOG},
    edit::{Edit, NOP},
    patch::{Patch, PatchSet},
    runner::Runner,
    select::Selection,
};

use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    IoError(std::io::Error),
    FileIoError(std::io::Error, PathBuf),
    ConflictingSelection,
    UnknownPatch(String),
    DuplicatePatch(&'static str),
    WriteOverflow { offset: u64, len: usize, max: usize },
    OutOfBounds { offset: u64, len: usize, file_len: u64 },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "io error: {}", e),
            Self::FileIoError(e, p) => write!(f, "io error in file {}: {}", p.to_string_lossy(), e),
            Self::ConflictingSelection => write!(f, "--enabled and --disabled cannot be used together"),
            Self::UnknownPatch(id) => write!(f, "unknown patch {}", id),
            Self::DuplicatePatch(id) => write!(f, "multiple patches named {}", id),
            Self::WriteOverflow { offset, len, max } => {
                write!(f, "longer than padded length at {:#x}: {} > {}", offset, len, max)
            },
            Self::OutOfBounds { offset, len, file_len } => {
                write!(f, "write of {} bytes at {:#x} goes past end of file ({:#x} bytes)", len, offset, file_len)
            },
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError(e) | Self::FileIoError(e, _) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl Error {
    /// Errors in how the patcher was invoked, as opposed to errors hit while writing.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::ConflictingSelection | Self::UnknownPatch(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
