//! This module contains the coder pipeline: it maps a folder's coders
//! (methods listed in 7zip's methods.txt) onto a raw liblzma filter chain
//! and drives it to compress or decompress pack streams.

mod compressor;
mod config;
mod decompressor;
mod method;
mod pipeline;

pub use compressor::*;
pub use config::*;
pub use decompressor::*;
pub use method::*;
pub use pipeline::*;

use thiserror::Error;

/// How much output space is added whenever the liblzma output buffer runs full.
const CHUNK_SIZE: usize = 64 * 1024;

/// The top-level codec error type.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The coder ID is known but cannot be expressed as a liblzma filter, or is unknown altogether.
    #[error("unsupported coder {id:02x?}")]
    UnsupportedCoder { id: Vec<u8> },
    #[error("malformed folder: {0}")]
    MalformedFolder(&'static str),
    #[error("invalid properties for coder {id:02x?}")]
    InvalidProperties { id: Vec<u8> },
    #[error("size mismatch: expected {expected} bytes, found {found} bytes")]
    SizeMismatch { expected: u64, found: u64 },
    #[error("liblzma error: {0}")]
    Lzma(#[from] liblzma::stream::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
