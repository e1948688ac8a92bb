//! This module provides the top-level error type for this crate.

use crate::codec::CodecError;
use crate::parser::{SevenZParserError, SevenZParserErrorKind};

use nom::error::ErrorKind;
use thiserror::Error;

/// The top-level error type for this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A header structure could not be parsed.
    /// `offset` is relative to the start of the buffer being parsed
    /// (the signature header, or the plain or decoded trailer).
    #[error("parse error at byte {offset}: {kind} (in {context:?})")]
    Parse {
        offset: usize,
        kind: SevenZParserErrorKind,
        context: Option<&'static str>,
    },

    #[error("unsupported archive version {major}.{minor}")]
    UnsupportedVersion { major: u8, minor: u8 },

    #[error("CRC mismatch for {what}: stored {expected:#010x}, calculated {actual:#010x}")]
    CrcMismatch {
        what: &'static str,
        expected: u32,
        actual: u32,
    },

    #[error("size mismatch for {what}: expected {expected} bytes, found {found} bytes")]
    SizeMismatch {
        what: &'static str,
        expected: u64,
        found: u64,
    },

    /// The header is well-formed, but doesn't describe a usable archive.
    #[error("corrupt archive: {0}")]
    CorruptArchive(&'static str),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("no file named {0:?} in archive")]
    NoSuchFileName(String),

    #[error("no file with index {0} in archive")]
    NoSuchFile(usize),

    #[error("no folder with index {0} in archive")]
    NoSuchFolder(usize),

    /// The entry is a directory or deletion marker and has no contents.
    #[error("{0:?} is not a regular file")]
    NotAFile(String),
}

impl Error {
    /// Converts a parser error, locating it relative to `full`, the buffer handed to the parser.
    pub fn from_parse(full: &[u8], err: nom::Err<SevenZParserError<&[u8]>>) -> Error {
        return match err {
            nom::Err::Error(e) | nom::Err::Failure(e) => Error::Parse {
                offset: full.len().saturating_sub(e.input.len()),
                kind: e.kind,
                context: e.innermost_context(),
            },
            nom::Err::Incomplete(_) => Error::Parse {
                offset: full.len(),
                kind: SevenZParserErrorKind::Nom(ErrorKind::Eof),
                context: None,
            },
        };
    }
}
