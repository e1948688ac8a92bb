use super::*;

use crate::parser::crc::sevenz_crc;

impl Header {
    /// Writes a plain header, starting with its `Header` tag.
    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        write_property_id(out, PropertyID::Header)?;
        if let Some(props) = &self.archive_properties {
            write_property_id(out, PropertyID::ArchiveProperties)?;
            props.write(out)?;
        }
        if let Some(streams) = &self.additional_streams {
            write_property_id(out, PropertyID::AdditionalStreamsInfo)?;
            streams.write(out)?;
        }
        if let Some(streams) = &self.main_streams {
            write_property_id(out, PropertyID::MainStreamsInfo)?;
            streams.write(out)?;
        }
        if let Some(files) = &self.files {
            write_property_id(out, PropertyID::FilesInfo)?;
            files.write(out)?;
        }
        return write_property_id(out, PropertyID::End);
    }
}

/// Writes the trailer of an archive whose real header is packed as described by `streams`.
pub fn write_encoded_header<W: Write + ?Sized>(out: &mut W, streams: &StreamsInfo) -> io::Result<()> {
    write_property_id(out, PropertyID::EncodedHeader)?;
    return streams.write(out);
}

impl StartHeader {
    pub fn to_bytes(&self) -> [u8; START_HEADER_SIZE_BYTES] {
        let mut buf = [0u8; START_HEADER_SIZE_BYTES];
        buf[..8].copy_from_slice(&self.next_header_offset.to_le_bytes());
        buf[8..16].copy_from_slice(&self.next_header_size.to_le_bytes());
        buf[16..].copy_from_slice(&self.next_header_crc.to_le_bytes());
        return buf;
    }
}

impl SignatureHeader {
    pub fn new(start_header: StartHeader) -> SignatureHeader {
        let mut res = SignatureHeader {
            archive_version: ArchiveVersion::default(),
            start_header_crc: 0,
            start_header,
        };
        res.calc_crc();
        return res;
    }

    /// CRC of the start header as it would be written.
    pub fn expected_crc(&self) -> u32 {
        return sevenz_crc(&self.start_header.to_bytes());
    }

    /// Recomputes `start_header_crc` from the start header fields.
    /// Must be called after changing them, before writing.
    pub fn calc_crc(&mut self) {
        self.start_header_crc = self.expected_crc();
    }

    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&MAGIC)?;
        out.write_all(&[self.archive_version.major, self.archive_version.minor])?;
        out.write_all(&self.start_header_crc.to_le_bytes())?;
        return out.write_all(&self.start_header.to_bytes());
    }
}
