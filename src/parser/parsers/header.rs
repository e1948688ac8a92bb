use super::*;

use either::{Left, Right};

/// One `(type, data)` entry of the archive properties, or `None` at the end marker.
pub fn archive_property(input: &[u8]) -> SevenZResult<Option<(u8, &[u8])>> {
    let (input, prop_type) = context("archive_property prop_type", u8)(input)?;
    if prop_type == PropertyID::End as u8 {
        return Ok((input, None));
    }
    let (input, prop_data) = context("archive_property prop_data", skip_sized)(input)?;
    return Ok((input, Some((prop_type, prop_data))));
}

/// Body of an `ArchiveProperties` section, after its tag.
pub fn archive_properties_body(input: &[u8]) -> SevenZResult<ArchiveProperties> {
    let mut input = input;
    let mut props: Vec<(u8, Vec<u8>)> = vec![];
    loop {
        let (rest, prop) = archive_property(input)?;
        input = rest;
        match prop {
            Some((prop_type, prop_data)) => props.push((prop_type, Vec::from(prop_data))),
            None => {
                return Ok((
                    input,
                    ArchiveProperties {
                        property_data: props,
                    },
                ))
            }
        }
    }
}

pub fn archive_properties(input: &[u8]) -> SevenZResult<ArchiveProperties> {
    let (input, _) = context(
        "archive_properties PropertyID::ArchiveProperties",
        tag_property_id(PropertyID::ArchiveProperties),
    )(input)?;
    return cut(archive_properties_body)(input);
}

/// Body of a plain `Header`, after its tag.
pub fn header_body(input: &[u8]) -> SevenZResult<Header> {
    let (input, archive_properties) = context(
        "header archive_properties",
        section(PropertyID::ArchiveProperties, archive_properties_body),
    )(input)?;
    let (input, additional_streams) = context(
        "header additional_streams",
        section(PropertyID::AdditionalStreamsInfo, streams_info),
    )(input)?;
    let (input, main_streams) = context(
        "header main_streams",
        section(PropertyID::MainStreamsInfo, streams_info),
    )(input)?;
    let (input, files) = context(
        "header files_info",
        section(PropertyID::FilesInfo, files_info_body),
    )(input)?;
    let (input, _) = context("header PropertyID::End", end)(input)?;

    return Ok((
        input,
        Header {
            archive_properties,
            additional_streams,
            main_streams,
            files,
        },
    ));
}

pub fn header(input: &[u8]) -> SevenZResult<Header> {
    let (input, _) = context(
        "header PropertyID::Header",
        require_property_id(PropertyID::Header),
    )(input)?;
    return cut(header_body)(input);
}

/// The streams info that locates a packed header.
pub fn encoded_header(input: &[u8]) -> SevenZResult<StreamsInfo> {
    let (input, _) = context(
        "encoded_header PropertyID::EncodedHeader",
        require_property_id(PropertyID::EncodedHeader),
    )(input)?;
    return cut(streams_info)(input);
}

/// Dispatches on the trailer's first byte: a plain header, or the description of a packed one.
pub fn raw_header(input: &[u8]) -> SevenZResult<RawHeader> {
    return match input.first() {
        Some(&b) if b == PropertyID::Header as u8 => {
            let (input, hdr) = header(input)?;
            Ok((input, Left(hdr)))
        }
        Some(&b) if b == PropertyID::EncodedHeader as u8 => {
            let (input, streams) = encoded_header(input)?;
            Ok((input, Right(streams)))
        }
        Some(&b) => Err(SevenZParserError::failure(
            input,
            SevenZParserErrorKind::UnknownRequiredTag(b),
        )),
        None => Err(SevenZParserError::failure(
            input,
            SevenZParserErrorKind::Nom(ErrorKind::Eof),
        )),
    };
}
