use super::*;

/// Body of a `PackInfo` section, after its tag.
pub fn pack_info_body(input: &[u8]) -> SevenZResult<PackInfo> {
    let (input, pack_pos) = context("pack_info pack_pos", sevenz_uint64)(input)?;
    let (input, num_pack_streams) =
        context("pack_info num_pack_streams", sevenz_uint64_as_usize)(input)?;

    let (input, _) = context(
        "pack_info PropertyID::Size",
        require_property_id(PropertyID::Size),
    )(input)?;
    let (input, sizes) = context(
        "pack_info sizes",
        cut(count(sevenz_uint64, num_pack_streams)),
    )(input)?;
    let (input, digests) = context(
        "pack_info crcs",
        section(PropertyID::CRC, |x| digests(x, num_pack_streams)),
    )(input)?;

    let (input, _) = context("pack_info PropertyID::End", end)(input)?;
    return Ok((
        input,
        PackInfo {
            pack_pos,
            sizes,
            digests,
        },
    ));
}

pub fn pack_info(input: &[u8]) -> SevenZResult<PackInfo> {
    let (input, _) = context(
        "pack_info PropertyID::PackInfo",
        tag_property_id(PropertyID::PackInfo),
    )(input)?;
    return cut(pack_info_body)(input);
}

/// Body of a `SubStreamsInfo` section, after its tag.
/// Needs the folders it subdivides, since sizes and CRCs are stored relative to them.
pub fn substreams_info_body<'a>(input: &'a [u8], folders: &[Folder]) -> SevenZResult<'a, SubStreamsInfo> {
    let start = input;
    let num_folders = folders.len();

    let (input, num_unpack_streams_in_folders) = context(
        "substreams_info num_unpack_streams_in_folders",
        section(PropertyID::NumUnPackStream, count(sevenz_uint64, num_folders)),
    )(input)?;
    let num_unpack_streams_in_folders =
        num_unpack_streams_in_folders.unwrap_or_else(|| vec![1; num_folders]);

    let (input, has_sizes) = context(
        "substreams_info PropertyID::Size",
        opt(tag_property_id(PropertyID::Size)),
    )(input)?;
    let mut input = input;
    let mut unpack_sizes = Vec::new();
    for (folder, &num) in folders.iter().zip(&num_unpack_streams_in_folders) {
        if num == 0 {
            continue;
        }
        if num > 1 && has_sizes.is_none() {
            return Err(SevenZParserError::failure(
                start,
                SevenZParserErrorKind::MalformedFolder("substream sizes missing"),
            ));
        }
        let mut sum: u64 = 0;
        for _ in 1..num {
            let (rest, size) = context("substreams_info unpack_size", cut(sevenz_uint64))(input)?;
            input = rest;
            sum = match sum.checked_add(size) {
                Some(s) => s,
                None => {
                    return Err(SevenZParserError::failure(
                        start,
                        SevenZParserErrorKind::MalformedFolder("substream sizes overflow"),
                    ))
                }
            };
            unpack_sizes.push(size);
        }
        let folder_size = folder.unpack_size();
        if sum > folder_size {
            return Err(SevenZParserError::failure(
                start,
                SevenZParserErrorKind::MalformedFolder("substream sizes exceed folder size"),
            ));
        }
        unpack_sizes.push(folder_size - sum);
    }

    let num_unknown_crcs: u64 = folders
        .iter()
        .zip(&num_unpack_streams_in_folders)
        .filter(|&(f, &n)| !folder_crc_covers_substream(f, n))
        .map(|(_, &n)| n)
        .sum();
    let num_unknown_crcs = crate::to_usize_or_err!(input, num_unknown_crcs);
    let (input, digests) = context(
        "substreams_info unknown_crcs",
        section(PropertyID::CRC, |x| digests(x, num_unknown_crcs)),
    )(input)?;

    let (input, _) = context("substreams_info PropertyID::End", end)(input)?;

    return Ok((
        input,
        SubStreamsInfo {
            num_unpack_streams_in_folders,
            unpack_sizes,
            digests,
        },
    ));
}

/// Read a Streams Info structure, up to and including its `End` marker.
/// The leading `MainStreamsInfo`/`AdditionalStreamsInfo`/`EncodedHeader` tag must already be consumed.
pub fn streams_info(input: &[u8]) -> SevenZResult<StreamsInfo> {
    let (input, pack_info_data) = context(
        "streams_info pack_info",
        section(PropertyID::PackInfo, pack_info_body),
    )(input)?;
    let (input, coders_info_data) = context(
        "streams_info coders_info",
        section(PropertyID::UnPackInfo, coders_info_body),
    )(input)?;

    let folders: &[Folder] = match &coders_info_data {
        Some(ci) => &ci.folders,
        None => &[],
    };
    let (input, substreams_info_data) = context(
        "streams_info substreams_info",
        section(PropertyID::SubStreamsInfo, |x| substreams_info_body(x, folders)),
    )(input)?;
    let (input, _) = context("streams_info PropertyID::End", end)(input)?;

    return Ok((
        input,
        StreamsInfo {
            pack_info: pack_info_data,
            coders_info: coders_info_data,
            substreams_info: substreams_info_data,
        },
    ));
}
