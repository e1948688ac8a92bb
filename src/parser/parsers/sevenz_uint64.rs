use super::*;

/// 7zip uses a packed integer format to represent most u64 values.
///
/// The number of leading one bits of the first byte says how many extra bytes follow;
/// the bits after the terminating zero are the value's high bits,
/// and the extra bytes hold the low bits, most significant first.
pub fn sevenz_uint64(input: &[u8]) -> SevenZResult<u64> {
    let (first_byte, rest) = match input.split_first() {
        Some((&b, rest)) => (b, rest),
        None => {
            return Err(SevenZParserError::error(
                input,
                SevenZParserErrorKind::MalformedVarInt,
            ))
        }
    };
    let num_extra = first_byte.leading_ones() as usize;
    if rest.len() < num_extra {
        return Err(SevenZParserError::error(
            input,
            SevenZParserErrorKind::MalformedVarInt,
        ));
    }
    let (extra, rest) = rest.split_at(num_extra);
    let low = extra.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64);
    if num_extra == 8 {
        return Ok((rest, low));
    }
    let high = (first_byte as u64) & (0xff >> (num_extra + 1));
    return Ok((rest, (high << (8 * num_extra)) | low));
}

/// Like sevenz_uint64, but convert to usize and return an error if the conversion fails.
pub fn sevenz_uint64_as_usize(input: &[u8]) -> SevenZResult<usize> {
    let (rest, as_u64) = context("sevenz_uint64_as_usize as_u64", sevenz_uint64)(input)?;
    let as_usize = crate::to_usize_or_err!(input, as_u64);
    return Ok((rest, as_usize));
}
