use super::*;
use crate::parser::parsers;
use crate::parser::parsers::test::*;

use either::*;

fn to_vec<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> Vec<u8> {
    let mut buf = Vec::new();
    f(&mut buf).unwrap();
    return buf;
}

#[test]
fn sevenz_uint64() {
    let test_cases: &[(u64, &[u8])] = &[
        (0, &[0x00]),
        (1, &[0x01]),
        (127, &[0x7f]),
        (128, &[0x80, 0x80]),
        (65535, &[0xc0, 0xff, 0xff]),
        (0x7f_ffff, &[0xe0, 0x7f, 0xff, 0xff]),
        (0xffff_ffff, &[0xf0, 0xff, 0xff, 0xff, 0xff]),
        (0x7f_1234_567f, &[0xf8, 0x7f, 0x12, 0x34, 0x56, 0x7f]),
        (
            0x0012_3456_7890_abcd,
            &[0xfe, 0x12, 0x34, 0x56, 0x78, 0x90, 0xab, 0xcd],
        ),
        (
            0xcf12_3456_7890_abcd,
            &[0xff, 0xcf, 0x12, 0x34, 0x56, 0x78, 0x90, 0xab, 0xcd],
        ),
    ];
    for &(value, expected) in test_cases {
        assert_eq!(to_vec(|b| write_sevenz_uint64(b, value)), expected, "encoding {:#x}", value);
    }
}

#[test]
fn sevenz_uint64_boundaries() {
    // Every power of two and its neighbours survive a round trip in minimal form.
    for shift in 0..64 {
        let base = 1u64 << shift;
        for value in [base - 1, base, base | (base >> 1)] {
            let encoded = to_vec(|b| write_sevenz_uint64(b, value));
            let (rest, decoded) = parsers::sevenz_uint64(&encoded).unwrap();
            assert!(rest.is_empty());
            assert_eq!(decoded, value);

            let bits = 64 - value.leading_zeros() as usize;
            let minimal_len = (1..=9).find(|&len| len == 9 || bits <= 7 * len).unwrap();
            assert_eq!(encoded.len(), minimal_len, "length of {:#x}", value);
        }
    }
}

#[test]
fn bool_vector() {
    let bits = bitvec![u8, Msb0; 1, 0, 1, 1, 0, 1, 0, 0, 1];
    assert_eq!(to_vec(|b| write_bool_vector(b, &bits, false)), vec![0xb4, 0x80]);
    assert_eq!(
        to_vec(|b| write_bool_vector(b, &bits, true)),
        vec![0x00, 0xb4, 0x80]
    );
    assert_eq!(to_vec(|b| write_bool_vector(b, &bits[..0], false)), Vec::<u8>::new());
}

#[test]
fn bool_vector_or_all_defined() {
    let all = bitvec![u8, Msb0; 1; 12];
    assert_eq!(to_vec(|b| write_bool_vector_or_all_defined(b, &all)), vec![0x01]);

    let some = bitvec![u8, Msb0; 0, 1, 1];
    let encoded = to_vec(|b| write_bool_vector_or_all_defined(b, &some));
    assert_eq!(encoded, vec![0x00, 0x60]);
    let (_, decoded) = parsers::bool_vector_or_all_defined(&encoded, 3, 4).unwrap();
    assert_eq!(decoded, some);
}

#[test]
fn pack_info() {
    let pack_info = PackInfo {
        pack_pos: 0x0234_5678,
        sizes: vec![0x1234, 0x3456, 0x5678],
        digests: None,
    };
    assert_eq!(
        to_vec(|b| pack_info.write(b)),
        vec![0xe2, 0x34, 0x56, 0x78, 0x03, 0x09, 0x92, 0x34, 0xb4, 0x56, 0xc0, 0x56, 0x78, 0x00]
    );
}

#[test]
fn archive_properties() {
    let props = ArchiveProperties {
        property_data: vec![(0x07, vec![0x23]), (0x42, vec![])],
    };
    let mut encoded = vec![u8::from(PropertyID::ArchiveProperties)];
    props.write(&mut encoded).unwrap();
    assert_eq!(encoded, vec![0x02, 0x07, 0x01, 0x23, 0x42, 0x00, 0x00]);

    let (_, decoded) = parsers::archive_properties(&encoded).unwrap();
    assert_eq!(decoded, props);
}

#[test]
fn header_is_reproduced() {
    let (_, header) = parsers::header(THREE_FILE_HEADER).unwrap();
    assert_eq!(to_vec(|b| header.write(b)), THREE_FILE_HEADER);
}

#[test]
fn files_info_is_reproduced() {
    let (rest, files) = parsers::files_info(FOUR_FILE_FILES_INFO).unwrap();
    let mut encoded = vec![u8::from(PropertyID::FilesInfo)];
    files.write(&mut encoded).unwrap();
    assert_eq!(encoded, &FOUR_FILE_FILES_INFO[..FOUR_FILE_FILES_INFO.len() - rest.len()]);
}

#[test]
fn anti_files_info_is_reproduced() {
    let (_, files) = parsers::files_info(ANTI_FILES_INFO).unwrap();
    let mut encoded = vec![u8::from(PropertyID::FilesInfo)];
    files.write(&mut encoded).unwrap();
    assert_eq!(encoded, ANTI_FILES_INFO);
}

#[test]
fn encoded_header_is_reproduced() {
    let streams = match parsers::raw_header(ENCODED_HEADER).unwrap().1 {
        Right(s) => s,
        Left(_) => panic!("expected an encoded header"),
    };
    assert_eq!(to_vec(|b| write_encoded_header(b, &streams)), ENCODED_HEADER);
}

#[test]
fn folder_with_several_pack_streams() {
    // A BCJ2-like coder with four inputs, three of them fed from pack streams.
    let folder = Folder {
        coders: vec![
            Coder {
                complex: Some(CoderComplex {
                    num_in_streams: 4,
                    num_out_streams: 1,
                }),
                attrs: None,
                id: vec![0x03, 0x03, 0x01, 0x1b],
            },
            Coder::simple(vec![0x21], Some(vec![0x18])),
        ],
        bind_pairs: vec![BindPair {
            in_index: 0,
            out_index: 1,
        }],
        packed_streams: vec![1, 2, 3, 4],
        unpack_sizes: vec![],
        unpack_crc: None,
    };
    let encoded = to_vec(|b| folder.write(b));
    let (rest, decoded) = parsers::folder(&encoded).unwrap();
    assert!(rest.is_empty());
    assert_eq!(decoded, folder);
}

#[test]
fn coder_id_length_limit() {
    let longest = Coder::simple(vec![0xaa; 15], None);
    let encoded = to_vec(|b| longest.write(b));
    assert_eq!(encoded[0], 0x0f);
    assert_eq!(encoded.len(), 16);

    let too_long = Coder::simple(vec![0xaa; 16], None);
    let mut buf = Vec::new();
    let err = too_long.write(&mut buf).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    assert!(buf.is_empty());
}

#[test]
fn substreams_with_empty_folder() {
    let folder = |size| Folder {
        coders: vec![Coder::simple(vec![0x00], None)],
        bind_pairs: vec![],
        packed_streams: vec![0],
        unpack_sizes: vec![size],
        unpack_crc: None,
    };
    let folders = vec![folder(10), folder(0), folder(7)];
    let ssi = SubStreamsInfo {
        num_unpack_streams_in_folders: vec![3, 0, 1],
        unpack_sizes: vec![2, 3, 5, 7],
        digests: Some(DefinedVec::from_options(vec![Some(1), None, Some(3), Some(4)])),
    };
    let encoded = to_vec(|b| ssi.write(b, &folders));
    assert_eq!(
        encoded,
        vec![
            0x0d, 0x03, 0x00, 0x01, 0x09, 0x02, 0x03, 0x0a, 0x00, 0xb0, 1, 0, 0, 0, 3, 0, 0, 0,
            4, 0, 0, 0, 0x00
        ]
    );
    let (rest, decoded) = parsers::substreams_info_body(&encoded, &folders).unwrap();
    assert!(rest.is_empty());
    assert_eq!(decoded, ssi);
}

#[test]
fn signature_header() {
    let (_, parsed) = parsers::signature_header(SIGNATURE_HEADER).unwrap();
    assert_eq!(parsed.expected_crc(), parsed.start_header_crc);
    assert_eq!(to_vec(|b| parsed.write(b)), SIGNATURE_HEADER);

    let mut changed = parsed.clone();
    changed.start_header.next_header_size += 1;
    assert_ne!(changed.expected_crc(), changed.start_header_crc);
    changed.calc_crc();
    assert_eq!(changed.expected_crc(), changed.start_header_crc);
}
