//! Custom nom parsers for the 7z format

mod bit;
pub use bit::*;
mod sevenz_uint64;
pub use sevenz_uint64::*;
mod files_info;
pub use files_info::*;
mod coders_info;
pub use coders_info::*;
mod streams_info;
pub use streams_info::*;
mod header;
pub use header::*;

use super::err::*;
use super::types::*;

use core::convert::*;

use nom::bytes::complete::{tag, take};
use nom::combinator::{cut, opt};
use nom::error::{context, ErrorKind, ParseError};
use nom::multi::count;
use nom::number::complete::{le_u32, le_u64, u8};
use nom::sequence::preceded;
use nom::Parser;

/// Error type that all parsers return.
pub type SevenZResult<'a, T> = nom::IResult<&'a [u8], T, SevenZParserError<&'a [u8]>>;

pub fn archive_version(input: &[u8]) -> SevenZResult<ArchiveVersion> {
    let (input, major) = context("archive_version major", u8)(input)?;
    let (input, minor) = context("archive_version minor", u8)(input)?;
    return Ok((input, ArchiveVersion { major, minor }));
}

pub fn start_header(input: &[u8]) -> SevenZResult<StartHeader> {
    let (input, next_header_offset) = context("start_header next_header_offset", le_u64)(input)?;
    let (input, next_header_size) = context("start_header next_header_size", le_u64)(input)?;
    let (input, next_header_crc) = context("start_header next_header_crc", le_u32)(input)?;
    return Ok((
        input,
        StartHeader {
            next_header_offset,
            next_header_size,
            next_header_crc,
        },
    ));
}

/// Parses the fixed 32 byte archive prologue.
///
/// The stored CRCs are only exposed, not checked; see `SignatureHeader::calc_crc`.
pub fn signature_header(input: &[u8]) -> SevenZResult<SignatureHeader> {
    let (input, _) = context("signature_header magic bytes", tag(&MAGIC[..]))(input)?;
    let (input, archive_version) =
        context("signature_header archive_version", archive_version)(input)?;
    let (input, start_header_crc) = context("signature_header start_header_crc", le_u32)(input)?;
    let (input, start_header) = context("signature_header start_header", start_header)(input)?;

    return Ok((
        input,
        SignatureHeader {
            archive_version,
            start_header_crc,
            start_header,
        },
    ));
}

pub fn bool_byte(input: &[u8]) -> SevenZResult<bool> {
    let (rest, byte) = context("bool_byte byte", u8)(input)?;
    return match byte {
        0 => Ok((rest, false)),
        1 => Ok((rest, true)),
        _ => Err(SevenZParserError::failure(
            input,
            SevenZParserErrorKind::InvalidBooleanByte(byte),
        )),
    };
}

/// Reads the "external" byte that precedes some lists.
/// Lists stored in an additional data stream are rejected.
pub fn not_external(input: &[u8]) -> SevenZResult<()> {
    let (rest, external) = context("external", bool_byte)(input)?;
    if external {
        return Err(SevenZParserError::failure(
            input,
            SevenZParserErrorKind::ExternalDataUnsupported,
        ));
    }
    return Ok((rest, ()));
}

/// Matches exactly the given property ID.
pub fn tag_property_id(id: PropertyID) -> impl for<'a> Fn(&'a [u8]) -> SevenZResult<'a, PropertyID> {
    move |input: &[u8]| match input.split_first() {
        Some((&b, rest)) if b == id as u8 => Ok((rest, id)),
        _ => Err(nom::Err::Error(SevenZParserError::from_error_kind(
            input,
            ErrorKind::Tag,
        ))),
    }
}

/// Like `tag_property_id`, but anything else is fatal and reported as an unexpected tag.
pub fn require_property_id(
    id: PropertyID,
) -> impl for<'a> Fn(&'a [u8]) -> SevenZResult<'a, PropertyID> {
    move |input: &[u8]| match input.split_first() {
        Some((&b, rest)) if b == id as u8 => Ok((rest, id)),
        Some((&b, _)) => Err(SevenZParserError::failure(
            input,
            SevenZParserErrorKind::UnknownRequiredTag(b),
        )),
        None => Err(SevenZParserError::failure(
            input,
            SevenZParserErrorKind::Nom(ErrorKind::Eof),
        )),
    }
}

/// An optional section: if the next byte is `id`, `body` must parse what follows.
/// Errors inside the body are fatal, so they are not mistaken for an absent section.
pub fn section<'a, O, F>(
    id: PropertyID,
    body: F,
) -> impl FnMut(&'a [u8]) -> SevenZResult<'a, Option<O>>
where
    F: Parser<&'a [u8], O, SevenZParserError<&'a [u8]>>,
{
    opt(preceded(tag_property_id(id), cut(body)))
}

pub fn end(input: &[u8]) -> SevenZResult<PropertyID> {
    return require_property_id(PropertyID::End)(input);
}

/// Values for the elements set in `defined`, in order.
pub fn defined_values<'a, O, F>(
    defined: BoolVector,
    mut value: F,
) -> impl FnMut(&'a [u8]) -> SevenZResult<'a, DefinedVec<O>>
where
    F: Parser<&'a [u8], O, SevenZParserError<&'a [u8]>>,
{
    move |input: &'a [u8]| {
        let (input, values) = count(|x: &'a [u8]| value.parse(x), defined.count_ones())(input)?;
        return Ok((
            input,
            DefinedVec {
                defined: defined.clone(),
                values,
            },
        ));
    }
}

/// An "all defined" byte or bit vector, followed by one little-endian CRC per defined element.
pub fn digests(input: &[u8], num: usize) -> SevenZResult<DefinedVec<u32>> {
    let (input, defined) = context("digests defined", |x| bool_vector_or_all_defined(x, num, 4))(input)?;
    let (input, digests) = context("digests values", defined_values(defined, le_u32))(input)?;
    return Ok((input, digests));
}

/// Consumes a size-prefixed payload whose contents are not interpreted.
pub fn skip_sized(input: &[u8]) -> SevenZResult<&[u8]> {
    let (input, size) = context("skip_sized size", sevenz_uint64_as_usize)(input)?;
    return context("skip_sized data", take(size))(input);
}
