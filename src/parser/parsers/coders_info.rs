use super::*;

use log::trace;

/// 7-Zip itself never builds folders anywhere near this large.
const MAX_CODERS_PER_FOLDER: usize = 64;
const MAX_STREAMS_PER_CODER: u64 = 64;

fn malformed<'a, T>(input: &'a [u8], reason: &'static str) -> SevenZResult<'a, T> {
    return Err(SevenZParserError::failure(
        input,
        SevenZParserErrorKind::MalformedFolder(reason),
    ));
}

pub fn coder(input: &[u8]) -> SevenZResult<Coder> {
    fn id_len(props: u8) -> usize {
        (props & 0b0000_1111) as usize
    }
    fn is_complex(props: u8) -> bool {
        (props & 0b0001_0000) > 0
    }
    fn has_attrs(props: u8) -> bool {
        (props & 0b0010_0000) > 0
    }
    fn has_alternatives(props: u8) -> bool {
        (props & 0b1000_0000) > 0
    }

    let start = input;
    let (input, props) = context("coder properties", u8)(input)?;
    if has_alternatives(props) {
        return malformed(start, "alternative coder methods are not supported");
    }
    let (input, id) = context("coder ID", take(id_len(props)))(input)?;
    let id = Vec::from(id);

    let (input, complex) = if is_complex(props) {
        let (input, num_in_streams) = context("coder num_in_streams", sevenz_uint64)(input)?;
        let (input, num_out_streams) = context("coder num_out_streams", sevenz_uint64)(input)?;
        if num_in_streams > MAX_STREAMS_PER_CODER || num_out_streams > MAX_STREAMS_PER_CODER {
            return malformed(start, "too many streams for one coder");
        }
        (
            input,
            Some(CoderComplex {
                num_in_streams,
                num_out_streams,
            }),
        )
    } else {
        (input, None)
    };

    let (input, attrs) = if has_attrs(props) {
        let (input, len) = context("coder attributes length", sevenz_uint64_as_usize)(input)?;
        let (input, attrs) = context("coder attributes", take(len))(input)?;
        (input, Some(Vec::from(attrs)))
    } else {
        (input, None)
    };

    return Ok((input, Coder { complex, attrs, id }));
}

pub fn bind_pair(input: &[u8]) -> SevenZResult<BindPair> {
    let (input, in_index) = context("bind_pair in_index", sevenz_uint64)(input)?;
    let (input, out_index) = context("bind_pair out_index", sevenz_uint64)(input)?;
    return Ok((
        input,
        BindPair {
            in_index,
            out_index,
        },
    ));
}

/// Reads a folder's coder graph.
///
/// The unpack sizes and CRC are stored after all folders, so they're left empty here
/// and filled in by `coders_info`.
pub fn folder(input: &[u8]) -> SevenZResult<Folder> {
    let start = input;
    let (input, num_coders) = context("folder num_coders", sevenz_uint64_as_usize)(input)?;
    if num_coders == 0 || num_coders > MAX_CODERS_PER_FOLDER {
        return malformed(start, "coder count out of range");
    }
    let (input, coders) = context("folder coders", count(coder, num_coders))(input)?;

    let num_out_streams_total: u64 = coders.iter().map(Coder::num_out_streams).sum();
    let num_in_streams_total: u64 = coders.iter().map(Coder::num_in_streams).sum();
    if num_out_streams_total == 0 {
        return malformed(start, "folder has no output stream");
    }

    let num_bind_pairs = crate::to_usize_or_err!(input, num_out_streams_total - 1);
    let (input, bind_pairs) =
        context("folder bind_pairs", count(bind_pair, num_bind_pairs))(input)?;

    for (i, bp) in bind_pairs.iter().enumerate() {
        if bp.in_index >= num_in_streams_total || bp.out_index >= num_out_streams_total {
            return malformed(start, "bind pair index out of range");
        }
        if bind_pairs[..i]
            .iter()
            .any(|other| other.in_index == bp.in_index || other.out_index == bp.out_index)
        {
            return malformed(start, "stream bound twice");
        }
    }

    if num_in_streams_total < num_bind_pairs as u64 {
        return malformed(start, "more bind pairs than input streams");
    }
    let num_packed_streams = crate::to_usize_or_err!(input, num_in_streams_total - num_bind_pairs as u64);

    let (input, packed_streams) = if num_packed_streams == 1 {
        // A single pack-bound input is implied: it's the one input without a bind pair.
        match (0..num_in_streams_total).find(|&i| !bind_pairs.iter().any(|bp| bp.in_index == i)) {
            Some(i) => (input, vec![i]),
            None => return malformed(start, "no unbound input stream"),
        }
    } else {
        context(
            "folder packed_streams",
            count(sevenz_uint64, num_packed_streams),
        )(input)?
    };

    for &p in &packed_streams {
        if p >= num_in_streams_total || bind_pairs.iter().any(|bp| bp.in_index == p) {
            return malformed(start, "pack stream bound to an invalid input");
        }
    }

    let folder = Folder {
        coders,
        bind_pairs,
        packed_streams,
        unpack_sizes: Vec::new(),
        unpack_crc: None,
    };
    if let Err(reason) = folder.terminal_output() {
        return malformed(start, reason);
    }
    trace!(
        "folder: {} coders, {} bind pairs, {} pack streams",
        folder.coders.len(),
        folder.bind_pairs.len(),
        folder.packed_streams.len()
    );

    return Ok((input, folder));
}

/// Body of an `UnPackInfo` section, after its tag.
pub fn coders_info_body(input: &[u8]) -> SevenZResult<CodersInfo> {
    let (input, _) = context(
        "coders_info PropertyID::Folder",
        require_property_id(PropertyID::Folder),
    )(input)?;
    let (input, num_folders) = context("coders_info num_folders", sevenz_uint64_as_usize)(input)?;
    let (input, _) = context("coders_info external", not_external)(input)?;
    let (input, mut folders) = context("coders_info folders", count(folder, num_folders))(input)?;

    let (mut input, _) = context(
        "coders_info PropertyID::CodersUnPackSize",
        require_property_id(PropertyID::CodersUnPackSize),
    )(input)?;
    for folder in folders.iter_mut() {
        let num_out_streams = crate::to_usize_or_err!(input, folder.total_out_streams());
        let (rest, sizes) = context(
            "coders_info streams_unpack_sizes",
            count(sevenz_uint64, num_out_streams),
        )(input)?;
        folder.unpack_sizes = sizes;
        input = rest;
    }

    let (input, folders_unpack_digests) = context(
        "coders_info unpack_digests",
        section(PropertyID::CRC, |x| digests(x, num_folders)),
    )(input)?;
    if let Some(digests) = folders_unpack_digests {
        for (folder, crc) in folders.iter_mut().zip(digests.iter()) {
            folder.unpack_crc = crc;
        }
    }

    let (input, _) = context("coders_info PropertyID::End", end)(input)?;

    return Ok((input, CodersInfo { folders }));
}

pub fn coders_info(input: &[u8]) -> SevenZResult<CodersInfo> {
    let (input, _) = context(
        "coders_info PropertyID::UnPackInfo",
        tag_property_id(PropertyID::UnPackInfo),
    )(input)?;
    return cut(coders_info_body)(input);
}
