//! This module implements an interface for reading 7zip archives.
//!
//! [`Archive::open`] parses the headers once; contents are then decoded folder by folder
//! from any `Read + Seek` source. Folders are independent, so several threads may
//! each decode their own folders through their own cursor over the same archive.

mod config;
mod err;
mod simplistic;

pub use config::*;
pub use err::*;
pub use simplistic::*;

use crate::codec::Decompressor;
use crate::parser::crc::sevenz_crc;
use crate::parser::parsers;
use crate::parser::types::*;
use crate::parser::{FileEntry, HighLevelArchive, SubstreamInfo};

use either::{Left, Right};
use log::{debug, trace, warn};
use std::io::{Read, Seek, SeekFrom};

/// A folder's decoded output, along with the integrity verdicts for its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpackedFolder {
    pub index: usize,
    pub data: Vec<u8>,
    /// `None` if the folder has no CRC or verification is disabled.
    pub crc_ok: Option<bool>,
    pub substreams: Vec<SubstreamVerdict>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubstreamVerdict {
    pub info: SubstreamInfo,
    /// `None` if the substream has no CRC or verification is disabled.
    pub crc_ok: Option<bool>,
}

impl UnpackedFolder {
    /// The bytes of one of this folder's substreams.
    pub fn substream_data(&self, info: &SubstreamInfo) -> &[u8] {
        let start = (info.offset as usize).min(self.data.len());
        let end = (info.offset.saturating_add(info.size) as usize).min(self.data.len());
        return &self.data[start..end];
    }
}

/// An opened archive: its parsed headers, ready to decode contents on demand.
#[derive(Debug, Clone)]
pub struct Archive {
    signature_header: SignatureHeader,
    header: Header,
    layout: HighLevelArchive,
    config: ReaderConfig,
}

/// Reads exactly `len` bytes at `offset`.
fn read_at<R: Read + Seek>(
    source: &mut R,
    offset: u64,
    len: u64,
    what: &'static str,
) -> Result<Vec<u8>, Error> {
    source.seek(SeekFrom::Start(offset))?;
    let mut buf = Vec::new();
    source.by_ref().take(len).read_to_end(&mut buf)?;
    if buf.len() as u64 != len {
        return Err(Error::SizeMismatch {
            what,
            expected: len,
            found: buf.len() as u64,
        });
    }
    return Ok(buf);
}

fn check_crc(what: &'static str, expected: u32, data: &[u8]) -> Result<(), Error> {
    let actual = sevenz_crc(data);
    if actual != expected {
        return Err(Error::CrcMismatch {
            what,
            expected,
            actual,
        });
    }
    return Ok(());
}

/// Absolute offset and length of the pack streams feeding folder `folder`.
pub fn folder_pack_range(streams: &StreamsInfo, folder: usize) -> Option<(u64, u64)> {
    let pack_info = streams.pack_info.as_ref()?;
    let folders = streams.folders();
    if folder >= folders.len() {
        return None;
    }
    let first: usize = folders[..folder].iter().map(|f| f.packed_streams.len()).sum();
    let count = folders[folder].packed_streams.len();
    if first + count > pack_info.num_pack_streams() {
        return None;
    }
    let offset = pack_info
        .stream_offset(first)?
        .checked_add(SIGNATURE_HEADER_SIZE_BYTES as u64)?;
    let len = pack_info.sizes[first..first + count]
        .iter()
        .try_fold(0u64, |acc, &size| acc.checked_add(size))?;
    // The end of the range has to be addressable too.
    if offset.checked_add(len).is_none() {
        return None;
    }
    return Some((offset, len));
}

/// Decodes the real header bytes described by the streams info of an encoded header.
fn decode_encoded_header<R: Read + Seek>(source: &mut R, streams: &StreamsInfo) -> Result<Vec<u8>, Error> {
    let mut decoded = Vec::new();
    for (i, folder) in streams.folders().iter().enumerate() {
        let (offset, len) = match folder_pack_range(streams, i) {
            Some(range) => range,
            None => return Err(Error::CorruptArchive("encoded header without pack streams")),
        };
        let packed = read_at(source, offset, len, "packed header")?;
        let data = Decompressor::new(folder)?.decompress(&packed)?;
        if let Some(crc) = folder.unpack_crc {
            check_crc("decoded header", crc, &data)?;
        }
        decoded.extend(data);
    }
    if decoded.is_empty() {
        return Err(Error::CorruptArchive("encoded header has no folders"));
    }
    debug!("decode_encoded_header: {} bytes", decoded.len());
    return Ok(decoded);
}

impl Archive {
    /// Parse the headers of the archive in `source`.
    ///
    /// The start header and trailer CRCs are verified.
    /// An encoded header is decoded first, then parsed like a plain one.
    pub fn open<R: Read + Seek>(source: &mut R, config: ReaderConfig) -> Result<Archive, Error> {
        let sig_bytes = read_at(source, 0, SIGNATURE_HEADER_SIZE_BYTES as u64, "signature header")?;
        let (_, signature_header) =
            parsers::signature_header(&sig_bytes).map_err(|e| Error::from_parse(&sig_bytes, e))?;

        let version = signature_header.archive_version;
        if version.major != 0 {
            return Err(Error::UnsupportedVersion {
                major: version.major,
                minor: version.minor,
            });
        }
        let expected_crc = signature_header.expected_crc();
        if expected_crc != signature_header.start_header_crc {
            return Err(Error::CrcMismatch {
                what: "start header",
                expected: signature_header.start_header_crc,
                actual: expected_crc,
            });
        }

        let start_header = &signature_header.start_header;
        let trailer_position = match signature_header.next_header_position() {
            Some(pos) => pos,
            None => return Err(Error::CorruptArchive("trailer position out of range")),
        };
        debug!(
            "open: version {}.{}, trailer of {} bytes at {}",
            version.major,
            version.minor,
            start_header.next_header_size,
            trailer_position
        );
        if start_header.next_header_size == 0 {
            // Nothing has been archived.
            return Ok(Archive {
                signature_header,
                header: Header::default(),
                layout: HighLevelArchive::default(),
                config,
            });
        }

        let trailer = read_at(
            source,
            trailer_position,
            start_header.next_header_size,
            "trailer",
        )?;
        check_crc("trailer", start_header.next_header_crc, &trailer)?;

        let (_, raw_header) = parsers::raw_header(&trailer).map_err(|e| Error::from_parse(&trailer, e))?;
        let header = match raw_header {
            Left(header) => header,
            Right(streams) => {
                let decoded = decode_encoded_header(source, &streams)?;
                let (_, header) = parsers::header(&decoded).map_err(|e| Error::from_parse(&decoded, e))?;
                header
            }
        };

        let layout = HighLevelArchive::from_header(&header).map_err(Error::CorruptArchive)?;
        debug!(
            "open: {} files, {} folders, {} substreams",
            layout.files.len(),
            header.main_streams.as_ref().map_or(0, |s| s.folders().len()),
            layout.substreams.len()
        );

        return Ok(Archive {
            signature_header,
            header,
            layout,
            config,
        });
    }

    pub fn signature_header(&self) -> &SignatureHeader {
        return &self.signature_header;
    }

    pub fn header(&self) -> &Header {
        return &self.header;
    }

    pub fn config(&self) -> &ReaderConfig {
        return &self.config;
    }

    /// Every entry of the archive, in stored order.
    pub fn files(&self) -> &[FileEntry] {
        return &self.layout.files;
    }

    pub fn file_index_by_name(&self, name: &str) -> Option<usize> {
        return self.layout.file_index_by_name(name);
    }

    /// Every substream of the main streams with its resolved CRC.
    pub fn substreams(&self) -> &[SubstreamInfo] {
        return &self.layout.substreams;
    }

    fn main_folders(&self) -> &[Folder] {
        return match &self.header.main_streams {
            Some(streams) => streams.folders(),
            None => &[],
        };
    }

    pub fn folder_count(&self) -> usize {
        return self.main_folders().len();
    }

    /// Absolute offset and length of a folder's packed data,
    /// so each worker can read it through its own cursor.
    pub fn folder_pack_range(&self, folder: usize) -> Option<(u64, u64)> {
        return folder_pack_range(self.header.main_streams.as_ref()?, folder);
    }

    /// Decode a whole folder.
    ///
    /// CRC mismatches don't fail the call; they are reported in the result
    /// so the caller can decide which substreams to trust.
    pub fn unpack_folder<R: Read + Seek>(&self, source: &mut R, folder: usize) -> Result<UnpackedFolder, Error> {
        let folder_info = match self.main_folders().get(folder) {
            Some(f) => f,
            None => return Err(Error::NoSuchFolder(folder)),
        };
        let (offset, len) = match self.folder_pack_range(folder) {
            Some(range) => range,
            None => return Err(Error::CorruptArchive("folder without pack stream")),
        };
        trace!("unpack_folder: folder {} packed at {}+{}", folder, offset, len);

        let packed = read_at(source, offset, len, "pack stream")?;
        let data = Decompressor::new(folder_info)?.decompress(&packed)?;

        let verify = self.config.verify_crc;
        let crc_ok = match folder_info.unpack_crc {
            Some(expected) if verify => {
                let ok = sevenz_crc(&data) == expected;
                if !ok {
                    warn!("unpack_folder: CRC mismatch for folder {}", folder);
                }
                Some(ok)
            }
            _ => None,
        };

        let mut res = UnpackedFolder {
            index: folder,
            data,
            crc_ok,
            substreams: Vec::new(),
        };
        for info in self.layout.substreams.iter().filter(|s| s.folder == folder) {
            let crc_ok = match info.crc {
                Some(expected) if verify => {
                    let ok = sevenz_crc(res.substream_data(info)) == expected;
                    if !ok {
                        warn!(
                            "unpack_folder: CRC mismatch for substream at {} in folder {}",
                            info.offset, folder
                        );
                    }
                    Some(ok)
                }
                _ => None,
            };
            res.substreams.push(SubstreamVerdict { info: *info, crc_ok });
        }
        return Ok(res);
    }

    /// Extract the contents of file `index` into a vector.
    ///
    /// Decodes the file's whole folder. Fails on a CRC mismatch if verification is enabled.
    pub fn read_file<R: Read + Seek>(&self, source: &mut R, index: usize) -> Result<Vec<u8>, Error> {
        let file = match self.layout.files.get(index) {
            Some(f) => f,
            None => return Err(Error::NoSuchFile(index)),
        };
        if !file.has_stream {
            if file.is_directory() || file.is_anti {
                return Err(Error::NotAFile(file.name.clone()));
            }
            return Ok(Vec::new());
        }
        let info = match self.layout.substream_for_file(index) {
            Some(info) => *info,
            None => return Err(Error::CorruptArchive("file without substream")),
        };

        let folder = self.unpack_folder(source, info.folder)?;
        let data = folder.substream_data(&info);
        if data.len() as u64 != info.size {
            return Err(Error::SizeMismatch {
                what: "file",
                expected: info.size,
                found: data.len() as u64,
            });
        }
        if let (Some(expected), true) = (info.crc, self.config.verify_crc) {
            check_crc("file", expected, data)?;
        }
        return Ok(data.to_vec());
    }
}
