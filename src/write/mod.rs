//! This module implements a small writer for solid 7zip archives.
//!
//! All regular files are compressed into a single folder, one substream per file.
//! The header is written either plain or, as 7-Zip does by default, packed into
//! its own LZMA stream and referenced by an encoded header.

mod config;
pub use config::*;

use crate::codec::Compressor;
use crate::parser::crc::sevenz_crc;
use crate::parser::interface::{system_time_to_filetime, FILE_ATTRIBUTE_DIRECTORY};
use crate::parser::types::*;
use crate::read::Error;
use crate::serialize::write_encoded_header;

use log::debug;
use std::io::{Seek, SeekFrom, Write};
use std::time::SystemTime;

/// Windows attribute bit set on regular files by most archivers.
pub const FILE_ATTRIBUTE_ARCHIVE: u32 = 0x20;

/// An entry to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Path inside the archive, `/` separated.
    pub name: String,
    /// `None` for directories.
    pub data: Option<Vec<u8>>,
    /// Defaults to the directory or archive bit.
    pub attributes: Option<u32>,
    pub mtime: Option<SystemTime>,
}

impl Entry {
    pub fn file<N: Into<String>, D: Into<Vec<u8>>>(name: N, data: D) -> Entry {
        return Entry {
            name: name.into(),
            data: Some(data.into()),
            attributes: None,
            mtime: None,
        };
    }

    pub fn directory<N: Into<String>>(name: N) -> Entry {
        return Entry {
            name: name.into(),
            data: None,
            attributes: None,
            mtime: None,
        };
    }

    /// Setter for the `attributes` field
    pub fn attributes(mut self, attributes: u32) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// Setter for the `mtime` field
    pub fn mtime(mut self, mtime: SystemTime) -> Self {
        self.mtime = Some(mtime);
        self
    }

    fn has_stream(&self) -> bool {
        return self.data.as_ref().map_or(false, |d| !d.is_empty());
    }

    fn default_attributes(&self) -> u32 {
        return match self.data {
            Some(_) => FILE_ATTRIBUTE_ARCHIVE,
            None => FILE_ATTRIBUTE_DIRECTORY,
        };
    }
}

/// Column-wise file properties for `entries`.
fn files_info(entries: &[Entry]) -> FilesInfo {
    let empty_streams: BoolVector = entries.iter().map(|e| !e.has_stream()).collect();
    let empty_files: BoolVector = entries
        .iter()
        .filter(|e| !e.has_stream())
        .map(|e| e.data.is_some())
        .collect();
    let mtime = DefinedVec::from_options(entries.iter().map(|e| e.mtime.map(system_time_to_filetime)));

    return FilesInfo {
        num_files: entries.len(),
        empty_streams: if empty_streams.any() {
            Some(empty_streams)
        } else {
            None
        },
        empty_files: if empty_files.any() {
            Some(empty_files)
        } else {
            None
        },
        anti: None,
        names: Some(entries.iter().map(|e| e.name.clone()).collect()),
        ctime: None,
        atime: None,
        mtime: if mtime.values.is_empty() { None } else { Some(mtime) },
        attributes: Some(DefinedVec::all(
            entries
                .iter()
                .map(|e| e.attributes.unwrap_or_else(|| e.default_attributes()))
                .collect(),
        )),
    };
}

/// Compresses `data` as a single stream, returning the packed bytes and the folder decoding them.
fn pack(data: &[Vec<u8>], config: &crate::codec::CompressionConfig) -> Result<(Vec<u8>, Folder), Error> {
    let mut compressor = Compressor::new(*config)?;
    let mut packed = Vec::new();
    for d in data {
        packed.extend(compressor.compress_from(d.as_slice())?);
    }
    packed.extend(compressor.flush()?);
    let unpack_size = compressor.total_in();
    return Ok((packed, compressor.folder(unpack_size)));
}

/// Write `entries` as a complete archive to `out`, starting at its current position 0.
///
/// Returns the signature header that was written.
pub fn write_archive<W: Write + Seek>(
    out: &mut W,
    entries: &[Entry],
    config: &WriterConfig,
) -> Result<SignatureHeader, Error> {
    out.seek(SeekFrom::Start(0))?;
    // Back-patched once the trailer position is known.
    out.write_all(&[0u8; SIGNATURE_HEADER_SIZE_BYTES])?;

    let contents: Vec<Vec<u8>> = entries
        .iter()
        .filter(|e| e.has_stream())
        .filter_map(|e| e.data.clone())
        .collect();

    let mut header = Header {
        files: Some(files_info(entries)),
        ..Header::default()
    };
    let mut pack_end: u64 = 0;
    if !contents.is_empty() {
        let (packed, folder) = pack(&contents, &config.compression)?;
        out.write_all(&packed)?;
        debug!(
            "write_archive: {} files packed into {} bytes",
            contents.len(),
            packed.len()
        );

        header.main_streams = Some(StreamsInfo {
            pack_info: Some(PackInfo {
                pack_pos: 0,
                sizes: vec![packed.len() as u64],
                digests: None,
            }),
            coders_info: Some(CodersInfo {
                folders: vec![folder],
            }),
            substreams_info: Some(SubStreamsInfo {
                num_unpack_streams_in_folders: vec![contents.len() as u64],
                unpack_sizes: contents.iter().map(|c| c.len() as u64).collect(),
                digests: Some(DefinedVec::all(contents.iter().map(|c| sevenz_crc(c)).collect())),
            }),
        });
        pack_end = packed.len() as u64;
    }

    let mut header_bytes = Vec::new();
    header.write(&mut header_bytes)?;

    let trailer = if config.encode_header {
        let (packed, mut folder) = pack(&[header_bytes.clone()], &config.header_compression)?;
        folder.unpack_crc = Some(sevenz_crc(&header_bytes));
        out.write_all(&packed)?;

        let streams = StreamsInfo {
            pack_info: Some(PackInfo {
                pack_pos: pack_end,
                sizes: vec![packed.len() as u64],
                digests: None,
            }),
            coders_info: Some(CodersInfo {
                folders: vec![folder],
            }),
            substreams_info: None,
        };
        debug!(
            "write_archive: header of {} bytes packed into {} bytes",
            header_bytes.len(),
            packed.len()
        );
        pack_end += packed.len() as u64;

        let mut trailer = Vec::new();
        write_encoded_header(&mut trailer, &streams)?;
        trailer
    } else {
        header_bytes
    };
    out.write_all(&trailer)?;

    let signature_header = SignatureHeader::new(StartHeader {
        next_header_offset: pack_end,
        next_header_size: trailer.len() as u64,
        next_header_crc: sevenz_crc(&trailer),
    });
    out.seek(SeekFrom::Start(0))?;
    signature_header.write(out)?;
    out.seek(SeekFrom::End(0))?;
    return Ok(signature_header);
}
