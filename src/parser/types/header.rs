use super::*;
use either::Either;

/// Header magic bytes
pub const MAGIC: [u8; 6] = [b'7', b'z', 0xBC, 0xAF, 0x27, 0x1C];

pub const START_HEADER_SIZE_BYTES: usize = 8 + 8 + 4;

/// Magic, version, start header CRC and the start header itself.
pub const SIGNATURE_HEADER_SIZE_BYTES: usize = 6 + 2 + 4 + START_HEADER_SIZE_BYTES;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartHeader {
    /// Relative to the end of the signature header.
    pub next_header_offset: u64,
    pub next_header_size: u64,
    pub next_header_crc: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveVersion {
    pub major: u8,
    pub minor: u8,
}

impl Default for ArchiveVersion {
    fn default() -> Self {
        return ArchiveVersion { major: 0, minor: 4 };
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    pub archive_version: ArchiveVersion,
    pub start_header_crc: u32,
    pub start_header: StartHeader,
}

impl SignatureHeader {
    /// Absolute position of the trailer in the archive, `None` if it is out of range.
    pub fn next_header_position(&self) -> Option<u64> {
        return (SIGNATURE_HEADER_SIZE_BYTES as u64).checked_add(self.start_header.next_header_offset);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    pub archive_properties: Option<ArchiveProperties>,
    pub additional_streams: Option<StreamsInfo>,
    pub main_streams: Option<StreamsInfo>,
    pub files: Option<FilesInfo>,
}

/// What the trailer holds before any decoding:
/// either a plain header, or the streams info describing where the packed real header lives.
pub type RawHeader = Either<Header, StreamsInfo>;
