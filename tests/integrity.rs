mod common;

use common::*;
use either::{Left, Right};
use sevenz::parser::parsers;
use sevenz::*;

use std::io::Cursor;

fn open(bytes: &[u8]) -> Result<Archive, Error> {
    return Archive::open(&mut Cursor::new(bytes), ReaderConfig::default());
}

fn trailer_range(bytes: &[u8]) -> std::ops::Range<usize> {
    let (_, sig) = parsers::signature_header(bytes).unwrap();
    let start = sig.next_header_position().unwrap() as usize;
    return start..start + sig.start_header.next_header_size as usize;
}

#[test]
fn flipped_trailer_bits_are_detected() {
    for config in [WriterConfig::default(), WriterConfig::default().encode_header(false)] {
        let bytes = write_to_vec(&sample_entries(), &config);
        for pos in trailer_range(&bytes) {
            for bit in [0x01u8, 0x10, 0x80] {
                let mut tampered = bytes.clone();
                tampered[pos] ^= bit;
                match open(&tampered) {
                    Err(Error::CrcMismatch { what, .. }) => assert_eq!(what, "trailer"),
                    other => panic!("byte {} bit {:#x}: expected CrcMismatch, got {:?}", pos, bit, other),
                }
            }
        }
    }
}

#[test]
fn flipped_start_header_is_detected() {
    let bytes = write_to_vec(&sample_entries(), &WriterConfig::default());
    for pos in 12..32 {
        let mut tampered = bytes.clone();
        tampered[pos] ^= 0x04;
        assert!(matches!(
            open(&tampered),
            Err(Error::CrcMismatch {
                what: "start header",
                ..
            })
        ));
    }
}

#[test]
fn packed_header_corruption_is_detected() {
    // The trailer CRC only covers the encoded header, not the packed header it points to.
    let bytes = write_to_vec(&sample_entries(), &WriterConfig::default());
    let streams = match parsers::raw_header(&bytes[trailer_range(&bytes)]).unwrap().1 {
        Right(streams) => streams,
        Left(_) => panic!("expected an encoded header"),
    };
    let pack_pos = streams.pack_info.unwrap().pack_pos as usize;

    // An LZMA stream always starts with a zero byte.
    let mut tampered = bytes.clone();
    tampered[32 + pack_pos] ^= 0xff;
    assert!(matches!(open(&tampered), Err(Error::Codec(_))));
}

#[test]
fn content_corruption_is_reported_per_substream() {
    let bytes = write_to_vec(
        &[Entry::file("a", vec![b'a'; 1000]), Entry::file("b", vec![b'b'; 1000])],
        &WriterConfig::default()
            .encode_header(false)
            .compression(sevenz::codec::CompressionConfig::default().method(sevenz::codec::EntropyMethod::Lzma)),
    );
    let mut source = Cursor::new(bytes);
    let archive = Archive::open(&mut source, ReaderConfig::default()).unwrap();

    // Rewrite the stored CRC of the second file instead of the packed data,
    // which keeps the stream decodable.
    let mut header = archive.header().clone();
    let ssi = header
        .main_streams
        .as_mut()
        .and_then(|s| s.substreams_info.as_mut())
        .unwrap();
    let digests = ssi.digests.as_mut().unwrap();
    digests.values[1] ^= 1;

    let mut trailer = Vec::new();
    header.write(&mut trailer).unwrap();
    let mut bytes = source.into_inner();
    let range = trailer_range(&bytes);
    bytes.truncate(range.start);
    bytes.extend(&trailer);
    let mut sig = archive.signature_header().clone();
    sig.start_header.next_header_crc = sevenz::parser::crc::sevenz_crc(&trailer);
    sig.calc_crc();
    let mut sig_bytes = Vec::new();
    sig.write(&mut sig_bytes).unwrap();
    bytes[..32].copy_from_slice(&sig_bytes);

    let mut source = Cursor::new(bytes);
    let archive = Archive::open(&mut source, ReaderConfig::default()).unwrap();
    let folder = archive.unpack_folder(&mut source, 0).unwrap();
    let verdicts: Vec<Option<bool>> = folder.substreams.iter().map(|s| s.crc_ok).collect();
    assert_eq!(verdicts, vec![Some(true), Some(false)]);

    assert_eq!(archive.read_file(&mut source, 0).unwrap(), vec![b'a'; 1000]);
    assert!(matches!(
        archive.read_file(&mut source, 1),
        Err(Error::CrcMismatch { what: "file", .. })
    ));

    let lenient = Archive::open(&mut source, ReaderConfig::default().verify_crc(false)).unwrap();
    assert_eq!(lenient.read_file(&mut source, 1).unwrap(), vec![b'b'; 1000]);
}

#[test]
fn not_an_archive() {
    let mut bytes = write_to_vec(&sample_entries(), &WriterConfig::default());
    bytes[0] = b'8';
    match open(&bytes) {
        Err(Error::Parse { offset, .. }) => assert_eq!(offset, 0),
        other => panic!("expected a parse error, got {:?}", other),
    }
    assert!(matches!(open(&bytes[..20]), Err(Error::SizeMismatch { .. })));
}

#[test]
fn unsupported_version() {
    let mut bytes = write_to_vec(&sample_entries(), &WriterConfig::default());
    bytes[6] = 1;
    assert!(matches!(
        open(&bytes),
        Err(Error::UnsupportedVersion { major: 1, minor: 4 })
    ));
}

#[test]
fn trailer_position_out_of_range() {
    let mut bytes = write_to_vec(&sample_entries(), &WriterConfig::default());
    let (_, mut sig) = parsers::signature_header(&bytes).unwrap();
    sig.start_header.next_header_offset = u64::MAX - 4;
    // A consistent start header CRC doesn't make the offset usable.
    sig.calc_crc();
    let mut sig_bytes = Vec::new();
    sig.write(&mut sig_bytes).unwrap();
    bytes[..32].copy_from_slice(&sig_bytes);

    assert!(matches!(open(&bytes), Err(Error::CorruptArchive(_))));
}

#[test]
fn pack_position_out_of_range() {
    let bytes = write_to_vec(&sample_entries(), &WriterConfig::default().encode_header(false));
    let mut header = open(&bytes).unwrap().header().clone();
    let streams = header.main_streams.as_mut().unwrap();
    streams.pack_info.as_mut().unwrap().pack_pos = u64::MAX - 4;
    assert_eq!(sevenz::read::folder_pack_range(streams, 0), None);

    let tampered = plain_archive(&header);
    let mut source = Cursor::new(&tampered);
    let archive = Archive::open(&mut source, ReaderConfig::default()).unwrap();
    assert_eq!(archive.folder_pack_range(0), None);
    assert!(matches!(
        archive.read_file(&mut source, 1),
        Err(Error::CorruptArchive(_))
    ));
}

#[test]
fn more_files_than_substreams() {
    let header = Header {
        files: Some(FilesInfo {
            num_files: usize::MAX,
            ..FilesInfo::default()
        }),
        ..Header::default()
    };
    assert!(matches!(
        open(&plain_archive(&header)),
        Err(Error::CorruptArchive(_))
    ));
}
