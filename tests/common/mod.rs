#![allow(dead_code)]

use sevenz::codec::{CompressionConfig, Compressor};
use sevenz::parser::crc::sevenz_crc;
use sevenz::*;

use std::io::Cursor;

pub const README: &[u8] = b"This archive was written for the integration tests.\n";

pub fn sample_entries() -> Vec<Entry> {
    let mut big = Vec::new();
    for i in 0..5000u32 {
        big.extend_from_slice(format!("{:08} the quick brown fox\n", i % 311).as_bytes());
    }
    return vec![
        Entry::directory("docs"),
        Entry::file("docs/readme.txt", README),
        Entry::file("docs/empty.txt", Vec::new()),
        Entry::file("data/big.txt", big),
        Entry::file("data/small.bin", vec![0u8, 1, 2, 3, 255]),
    ];
}

pub fn write_to_vec(entries: &[Entry], config: &WriterConfig) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    write_archive(&mut out, entries, config).unwrap();
    return out.into_inner();
}

/// An archive with one folder per group, each compressed separately.
/// Every file has contents, so the header needs no empty stream column.
pub fn multi_folder_archive(groups: &[Vec<(&str, Vec<u8>)>]) -> Vec<u8> {
    let mut packed_all = Vec::new();
    let mut sizes = Vec::new();
    let mut folders = Vec::new();
    let mut counts = Vec::new();
    let mut unpack_sizes = Vec::new();
    let mut crcs = Vec::new();
    let mut names = Vec::new();

    for group in groups {
        let mut compressor = Compressor::new(CompressionConfig::default()).unwrap();
        let mut packed = Vec::new();
        for (name, data) in group {
            packed.extend(compressor.compress(data).unwrap());
            unpack_sizes.push(data.len() as u64);
            crcs.push(sevenz_crc(data));
            names.push(name.to_string());
        }
        packed.extend(compressor.flush().unwrap());
        folders.push(compressor.folder(compressor.total_in()));
        counts.push(group.len() as u64);
        sizes.push(packed.len() as u64);
        packed_all.extend(packed);
    }

    let header = Header {
        main_streams: Some(StreamsInfo {
            pack_info: Some(PackInfo {
                pack_pos: 0,
                sizes,
                digests: None,
            }),
            coders_info: Some(CodersInfo { folders }),
            substreams_info: Some(SubStreamsInfo {
                num_unpack_streams_in_folders: counts,
                unpack_sizes,
                digests: Some(DefinedVec::all(crcs)),
            }),
        }),
        files: Some(FilesInfo {
            num_files: names.len(),
            names: Some(names),
            ..FilesInfo::default()
        }),
        ..Header::default()
    };
    return assemble(&header, packed_all);
}

/// An archive holding `header` as a plain trailer and no packed data.
pub fn plain_archive(header: &Header) -> Vec<u8> {
    return assemble(header, Vec::new());
}

fn assemble(header: &Header, packed: Vec<u8>) -> Vec<u8> {
    let mut trailer = Vec::new();
    header.write(&mut trailer).unwrap();

    let signature = SignatureHeader::new(StartHeader {
        next_header_offset: packed.len() as u64,
        next_header_size: trailer.len() as u64,
        next_header_crc: sevenz_crc(&trailer),
    });
    let mut archive = Vec::new();
    signature.write(&mut archive).unwrap();
    archive.extend(packed);
    archive.extend(trailer);
    return archive;
}
