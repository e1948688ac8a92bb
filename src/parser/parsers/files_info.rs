use super::*;

use log::trace;
use nom::multi::many_till;
use nom::number::complete::le_u16;
use widestring::U16Str;

fn malformed<'a>(input: &'a [u8], reason: &'static str) -> nom::Err<SevenZParserError<&'a [u8]>> {
    return SevenZParserError::failure(input, SevenZParserErrorKind::MalformedFilesInfo(reason));
}

/// Runs `parser` over a property's payload, which it must consume exactly.
fn whole_payload<'a, O, F>(payload: &'a [u8], mut parser: F, what: &'static str) -> Result<O, nom::Err<SevenZParserError<&'a [u8]>>>
where
    F: FnMut(&'a [u8]) -> SevenZResult<'a, O>,
{
    return match parser(payload) {
        Ok((rest, res)) if rest.is_empty() => Ok(res),
        Ok((rest, _)) => Err(malformed(rest, what)),
        Err(nom::Err::Error(e)) => Err(malformed(e.input, what)),
        Err(e) => Err(e),
    };
}

fn time(input: &[u8], num_files: usize) -> SevenZResult<DefinedVec<u64>> {
    let (input, defined) = context("time defined", |x| bool_vector_or_all_defined(x, num_files, 8))(input)?;
    let (input, _) = context("time external", not_external)(input)?;
    return context("time values", defined_values(defined, le_u64))(input);
}

fn attributes(input: &[u8], num_files: usize) -> SevenZResult<DefinedVec<u32>> {
    let (input, defined) = context("attrs defined", |x| bool_vector_or_all_defined(x, num_files, 4))(input)?;
    let (input, _) = context("attrs external", not_external)(input)?;
    return context("attrs values", defined_values(defined, le_u32))(input);
}

/// Parse a null-terminated string made of Windows-style UTF-16LE codepoints.
fn wchar_str(input: &[u8]) -> SevenZResult<String> {
    let (rest, (data, _)) = context("wchar_str data", many_till(le_u16, tag(&[0u8, 0][..])))(input)?;
    return match U16Str::from_slice(&data).to_string() {
        Ok(s) => Ok((rest, s)),
        Err(_) => Err(SevenZParserError::failure(
            input,
            SevenZParserErrorKind::ConversionFailure(SevenZConversionError::ToString),
        )),
    };
}

fn names(input: &[u8], num_files: usize) -> SevenZResult<Vec<String>> {
    let (mut input, _) = context("names external", not_external)(input)?;
    let mut names = Vec::with_capacity(num_files.min(input.len() / 2));
    while !input.is_empty() {
        let (rest, name) = context("names name", wchar_str)(input)?;
        names.push(name);
        input = rest;
    }
    if names.len() != num_files {
        return Err(malformed(input, "number of names does not match number of files"));
    }
    return Ok((input, names));
}

/// Body of a `FilesInfo` section, after its tag.
///
/// Each property is a column covering all files (or all empty-stream files) at once.
/// Unknown properties are skipped using their declared size.
pub fn files_info_body(input: &[u8]) -> SevenZResult<FilesInfo> {
    let (mut input, num_files) = context("files_info num_files", sevenz_uint64_as_usize)(input)?;
    let mut info = FilesInfo {
        num_files,
        ..FilesInfo::default()
    };

    loop {
        let (rest, prop) = context("files_info property type", u8)(input)?;
        if prop == PropertyID::End as u8 {
            input = rest;
            break;
        }
        let (rest, payload) = context("files_info property payload", skip_sized)(rest)?;
        input = rest;

        let num_empty_streams = info.num_empty_streams();
        match PropertyID::try_from(prop) {
            Ok(PropertyID::EmptyStream) => {
                info.empty_streams = Some(whole_payload(
                    payload,
                    |x| bool_vector(x, num_files),
                    "empty stream vector length",
                )?);
            }
            Ok(PropertyID::EmptyFile) => {
                info.empty_files = Some(whole_payload(
                    payload,
                    |x| bool_vector(x, num_empty_streams),
                    "empty file vector length",
                )?);
            }
            Ok(PropertyID::Anti) => {
                info.anti = Some(whole_payload(
                    payload,
                    |x| bool_vector(x, num_empty_streams),
                    "anti vector length",
                )?);
            }
            Ok(PropertyID::Name) => {
                info.names = Some(whole_payload(payload, |x| names(x, num_files), "names length")?);
            }
            Ok(PropertyID::CTime) => {
                info.ctime = Some(whole_payload(payload, |x| time(x, num_files), "ctime length")?);
            }
            Ok(PropertyID::ATime) => {
                info.atime = Some(whole_payload(payload, |x| time(x, num_files), "atime length")?);
            }
            Ok(PropertyID::MTime) => {
                info.mtime = Some(whole_payload(payload, |x| time(x, num_files), "mtime length")?);
            }
            Ok(PropertyID::WinAttributes) => {
                info.attributes = Some(whole_payload(
                    payload,
                    |x| attributes(x, num_files),
                    "attributes length",
                )?);
            }
            // Dummies pad the header for alignment.
            Ok(PropertyID::Dummy) => (),
            _ => trace!("files_info: skipping property {:#04x} ({} bytes)", prop, payload.len()),
        }
    }

    return Ok((input, info));
}

pub fn files_info(input: &[u8]) -> SevenZResult<FilesInfo> {
    let (input, _) = context(
        "files_info PropertyID::FilesInfo",
        tag_property_id(PropertyID::FilesInfo),
    )(input)?;
    return cut(files_info_body)(input);
}
