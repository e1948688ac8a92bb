#![forbid(unsafe_code)]
//! A crate for interacting with 7zip files.
//!
//! The header codec lives in [`parser`] (reading) and is mirrored by the
//! `write` methods on every header structure (writing).
//! [`codec`] turns a folder's coder graph into a raw LZMA filter chain,
//! [`read`] opens archives from any `Read + Seek` source and
//! [`write`] produces small solid archives.

#![allow(clippy::needless_return)]

pub mod codec;
pub mod parser;
pub mod read;
mod serialize;
pub mod write;

pub use codec::{CodecError, CompressionConfig, Compressor, Decompressor};
pub use parser::types::*;
pub use read::{Archive, Error, ReaderConfig};
pub use serialize::{write_bool_vector, write_sevenz_uint64};
pub use write::{write_archive, Entry, WriterConfig};
