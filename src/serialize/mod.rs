//! Writing of the 7zip header structures.
//!
//! The structural inverse of `parser::parsers`: every `write` emits exactly what
//! the matching parser consumes. Section tags are written by the enclosing
//! structure, as the `*_body` parsers expect them to be consumed already.

mod files_info;
mod header;
mod streams_info;
#[cfg(test)]
mod test;

pub use header::write_encoded_header;

use crate::parser::types::*;

use bitvec::prelude::*;
use std::io::{self, Write};

/// Writes `value` in 7zip's packed integer format, using the shortest form.
pub fn write_sevenz_uint64<W: Write + ?Sized>(out: &mut W, value: u64) -> io::Result<()> {
    let num_extra = (0..8usize)
        .find(|&l| value < 1u64 << (7 * (l + 1)))
        .unwrap_or(8);

    let mut buf = [0u8; 9];
    let be = value.to_be_bytes();
    if num_extra == 8 {
        buf[0] = 0xff;
    } else {
        let leading_ones = (0xff00u16 >> num_extra) as u8;
        buf[0] = leading_ones | (value >> (8 * num_extra)) as u8;
    }
    buf[1..=num_extra].copy_from_slice(&be[8 - num_extra..]);
    return out.write_all(&buf[..=num_extra]);
}

/// Packs `bits` MSB-first, zero-padding the last byte.
/// With `include_marker`, a leading 0 byte announces the explicit vector.
pub fn write_bool_vector<W: Write + ?Sized>(
    out: &mut W,
    bits: &BitSlice<u8, Msb0>,
    include_marker: bool,
) -> io::Result<()> {
    if include_marker {
        out.write_all(&[0])?;
    }
    let mut packed = vec![0u8; (bits.len() + 7) / 8];
    for (i, bit) in bits.iter().by_vals().enumerate() {
        if bit {
            packed[i / 8] |= 0x80 >> (i % 8);
        }
    }
    return out.write_all(&packed);
}

/// Writes a single 1 byte if every bit is set, otherwise the marked explicit vector.
pub fn write_bool_vector_or_all_defined<W: Write + ?Sized>(
    out: &mut W,
    bits: &BitSlice<u8, Msb0>,
) -> io::Result<()> {
    if bits.all() {
        return out.write_all(&[1]);
    }
    return write_bool_vector(out, bits, true);
}

pub(crate) fn write_property_id<W: Write + ?Sized>(out: &mut W, id: PropertyID) -> io::Result<()> {
    return out.write_all(&[u8::from(id)]);
}

pub(crate) fn write_digests<W: Write + ?Sized>(out: &mut W, digests: &DefinedVec<u32>) -> io::Result<()> {
    write_bool_vector_or_all_defined(out, &digests.defined)?;
    for crc in &digests.values {
        out.write_all(&crc.to_le_bytes())?;
    }
    return Ok(());
}

impl ArchiveProperties {
    /// Writes the `(type, size, data)` list and its end marker.
    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        for (prop_type, data) in &self.property_data {
            out.write_all(&[*prop_type])?;
            write_sevenz_uint64(out, data.len() as u64)?;
            out.write_all(data)?;
        }
        return write_property_id(out, PropertyID::End);
    }
}
