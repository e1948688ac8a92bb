use super::*;

impl PackInfo {
    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        write_sevenz_uint64(out, self.pack_pos)?;
        write_sevenz_uint64(out, self.sizes.len() as u64)?;
        write_property_id(out, PropertyID::Size)?;
        for &size in &self.sizes {
            write_sevenz_uint64(out, size)?;
        }
        if let Some(digests) = &self.digests {
            write_property_id(out, PropertyID::CRC)?;
            write_digests(out, digests)?;
        }
        return write_property_id(out, PropertyID::End);
    }
}

impl Coder {
    /// Fails with `InvalidInput` if the ID doesn't fit the 4-bit length field.
    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        if self.id.len() > 0b0000_1111 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "coder ID longer than 15 bytes",
            ));
        }
        let mut flags = self.id.len() as u8;
        if self.complex.is_some() {
            flags |= 0b0001_0000;
        }
        if self.attrs.is_some() {
            flags |= 0b0010_0000;
        }
        out.write_all(&[flags])?;
        out.write_all(&self.id)?;
        if let Some(complex) = &self.complex {
            write_sevenz_uint64(out, complex.num_in_streams)?;
            write_sevenz_uint64(out, complex.num_out_streams)?;
        }
        if let Some(attrs) = &self.attrs {
            write_sevenz_uint64(out, attrs.len() as u64)?;
            out.write_all(attrs)?;
        }
        return Ok(());
    }
}

impl Folder {
    /// Writes the coder graph. Unpack sizes and the CRC belong to `CodersInfo`.
    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        write_sevenz_uint64(out, self.coders.len() as u64)?;
        for coder in &self.coders {
            coder.write(out)?;
        }
        for bp in &self.bind_pairs {
            write_sevenz_uint64(out, bp.in_index)?;
            write_sevenz_uint64(out, bp.out_index)?;
        }
        // A single pack stream is implied.
        if self.packed_streams.len() > 1 {
            for &p in &self.packed_streams {
                write_sevenz_uint64(out, p)?;
            }
        }
        return Ok(());
    }
}

impl CodersInfo {
    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        write_property_id(out, PropertyID::Folder)?;
        write_sevenz_uint64(out, self.folders.len() as u64)?;
        // Not external.
        out.write_all(&[0])?;
        for folder in &self.folders {
            folder.write(out)?;
        }

        write_property_id(out, PropertyID::CodersUnPackSize)?;
        for folder in &self.folders {
            for &size in &folder.unpack_sizes {
                write_sevenz_uint64(out, size)?;
            }
        }

        if self.folders.iter().any(|f| f.unpack_crc.is_some()) {
            write_property_id(out, PropertyID::CRC)?;
            write_digests(out, &DefinedVec::from_options(self.folders.iter().map(|f| f.unpack_crc)))?;
        }
        return write_property_id(out, PropertyID::End);
    }
}

impl SubStreamsInfo {
    /// The folders are needed to know which sizes are implied.
    pub fn write<W: Write + ?Sized>(&self, out: &mut W, folders: &[Folder]) -> io::Result<()> {
        let counts = &self.num_unpack_streams_in_folders;
        if counts.iter().any(|&n| n != 1) {
            write_property_id(out, PropertyID::NumUnPackStream)?;
            for &n in counts {
                write_sevenz_uint64(out, n)?;
            }
        }

        if counts.iter().any(|&n| n > 1) {
            write_property_id(out, PropertyID::Size)?;
            let mut sizes = self.unpack_sizes.iter();
            for &n in counts.iter().take(folders.len()) {
                for (i, &size) in sizes.by_ref().take(n as usize).enumerate() {
                    // The last size of each folder is implied.
                    if (i as u64) + 1 < n {
                        write_sevenz_uint64(out, size)?;
                    }
                }
            }
        }

        if let Some(digests) = &self.digests {
            write_property_id(out, PropertyID::CRC)?;
            write_digests(out, digests)?;
        }
        return write_property_id(out, PropertyID::End);
    }
}

impl StreamsInfo {
    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        if let Some(pack_info) = &self.pack_info {
            write_property_id(out, PropertyID::PackInfo)?;
            pack_info.write(out)?;
        }
        if let Some(coders_info) = &self.coders_info {
            write_property_id(out, PropertyID::UnPackInfo)?;
            coders_info.write(out)?;
        }
        if let Some(substreams_info) = &self.substreams_info {
            write_property_id(out, PropertyID::SubStreamsInfo)?;
            substreams_info.write(out, self.folders())?;
        }
        return write_property_id(out, PropertyID::End);
    }
}
