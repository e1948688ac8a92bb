use super::*;

use bitvec::prelude::*;

fn malformed_bool_vector(input: &[u8], num_bits: usize) -> nom::Err<SevenZParserError<&[u8]>> {
    return SevenZParserError::error(
        input,
        SevenZParserErrorKind::MalformedBoolVector {
            expected_bits: num_bits,
            available_bytes: input.len(),
        },
    );
}

/// Extracts `num_bits` booleans, packed MSB-first, into a `BoolVector`.
/// The padding bits of the last byte are dropped.
pub fn bool_vector(input: &[u8], num_bits: usize) -> SevenZResult<BoolVector> {
    let num_bytes = match num_bits.checked_add(7) {
        Some(n) => n / 8,
        None => return Err(malformed_bool_vector(input, num_bits)),
    };
    if input.len() < num_bytes {
        return Err(malformed_bool_vector(input, num_bits));
    }
    let (raw, rest) = input.split_at(num_bytes);
    let bits: BoolVector = raw.view_bits::<Msb0>()[..num_bits].to_bitvec();
    return Ok((rest, bits));
}

/// A leading byte of 1 means every element is set and no vector follows;
/// 0 means an explicit `bool_vector` follows.
///
/// `value_size` is the number of bytes each defined element occupies after the vector.
/// An all-defined vector is only accepted if the input can hold that many values.
pub fn bool_vector_or_all_defined(input: &[u8], num_bits: usize, value_size: usize) -> SevenZResult<BoolVector> {
    let (input, all_defined) = context("all_defined", bool_byte)(input)?;
    if all_defined {
        match num_bits.checked_mul(value_size) {
            Some(n) if n <= input.len() => (),
            _ => return Err(malformed_bool_vector(input, num_bits)),
        }
        return Ok((input, BitVec::repeat(true, num_bits)));
    }
    return bool_vector(input, num_bits);
}
