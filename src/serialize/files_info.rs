use super::*;

use widestring::U16String;

fn write_property<W: Write + ?Sized>(out: &mut W, id: PropertyID, payload: &[u8]) -> io::Result<()> {
    write_property_id(out, id)?;
    write_sevenz_uint64(out, payload.len() as u64)?;
    return out.write_all(payload);
}

fn time_payload(times: &DefinedVec<u64>) -> io::Result<Vec<u8>> {
    let mut payload = Vec::with_capacity(2 + 8 * times.values.len());
    write_bool_vector_or_all_defined(&mut payload, &times.defined)?;
    // Not external.
    payload.push(0);
    for t in &times.values {
        payload.extend_from_slice(&t.to_le_bytes());
    }
    return Ok(payload);
}

impl FilesInfo {
    /// Writes every present column, each as a sized property.
    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        write_sevenz_uint64(out, self.num_files as u64)?;

        let bit_columns = [
            (PropertyID::EmptyStream, &self.empty_streams),
            (PropertyID::EmptyFile, &self.empty_files),
            (PropertyID::Anti, &self.anti),
        ];
        for (id, column) in bit_columns {
            if let Some(bits) = column {
                let mut payload = Vec::new();
                write_bool_vector(&mut payload, bits, false)?;
                write_property(out, id, &payload)?;
            }
        }

        if let Some(names) = &self.names {
            // Not external.
            let mut payload = vec![0u8];
            for name in names {
                for c in U16String::from_str(name).as_slice() {
                    payload.extend_from_slice(&c.to_le_bytes());
                }
                payload.extend_from_slice(&[0, 0]);
            }
            write_property(out, PropertyID::Name, &payload)?;
        }

        let time_columns = [
            (PropertyID::CTime, &self.ctime),
            (PropertyID::ATime, &self.atime),
            (PropertyID::MTime, &self.mtime),
        ];
        for (id, column) in time_columns {
            if let Some(times) = column {
                write_property(out, id, &time_payload(times)?)?;
            }
        }

        if let Some(attributes) = &self.attributes {
            let mut payload = Vec::new();
            write_bool_vector_or_all_defined(&mut payload, &attributes.defined)?;
            payload.push(0);
            for a in &attributes.values {
                payload.extend_from_slice(&a.to_le_bytes());
            }
            write_property(out, PropertyID::WinAttributes, &payload)?;
        }

        return write_property_id(out, PropertyID::End);
    }
}
