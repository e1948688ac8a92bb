mod common;

use common::*;
use sevenz::codec::{BcjArch, CompressionConfig, EntropyMethod};
use sevenz::parser::parsers;
use sevenz::*;

use std::io::Cursor;
use std::time::{Duration, UNIX_EPOCH};

fn open(bytes: &[u8]) -> Archive {
    return Archive::open(&mut Cursor::new(bytes), ReaderConfig::default()).unwrap();
}

#[test]
fn plain_and_encoded_headers_agree() {
    let entries = sample_entries();
    let plain = write_to_vec(&entries, &WriterConfig::default().encode_header(false));
    let encoded = write_to_vec(&entries, &WriterConfig::default());

    let trailer_tag = |bytes: &[u8]| {
        let (_, sig) = parsers::signature_header(bytes).unwrap();
        bytes[sig.next_header_position().unwrap() as usize]
    };
    assert_eq!(trailer_tag(&plain), PropertyID::Header as u8);
    assert_eq!(trailer_tag(&encoded), PropertyID::EncodedHeader as u8);

    let plain = open(&plain);
    let encoded = open(&encoded);
    assert_eq!(plain.header(), encoded.header());
    assert_eq!(plain.files(), encoded.files());
}

#[test]
fn files_are_projected() {
    let mtime = UNIX_EPOCH + Duration::from_secs(1_234_567_890);
    let mut entries = sample_entries();
    entries[1] = entries[1].clone().mtime(mtime).attributes(0x20 | 0x8000 | (0o100600 << 16));
    let archive = open(&write_to_vec(&entries, &WriterConfig::default()));

    let files = archive.files();
    assert_eq!(files.len(), 5);
    let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["docs", "docs/readme.txt", "docs/empty.txt", "data/big.txt", "data/small.bin"]
    );

    assert!(files[0].is_directory());
    assert_eq!(files[0].attributes, Some(0x10));
    assert!(!files[2].is_directory());
    assert!(files[2].is_empty_file);
    assert!(!files[2].has_stream);

    assert_eq!(files[1].mtime_system(), Some(mtime));
    assert_eq!(files[1].unix_mode(), Some(0o100600));
    assert_eq!(files[3].mtime, None);

    assert_eq!(files[1].stream_index, Some(0));
    assert_eq!(files[3].stream_index, Some(1));
    assert_eq!(files[4].stream_index, Some(2));
    assert_eq!(archive.substreams().len(), 3);
}

#[test]
fn contents_survive() {
    let entries = sample_entries();
    let configs = [
        WriterConfig::default(),
        WriterConfig::default().encode_header(false),
        WriterConfig::default().compression(CompressionConfig::default().method(EntropyMethod::Lzma)),
        WriterConfig::default()
            .compression(CompressionConfig::default().bcj(BcjArch::X86))
            .header_compression(CompressionConfig::default()),
    ];
    for config in configs {
        let bytes = write_to_vec(&entries, &config);
        let mut source = Cursor::new(&bytes);
        let archive = Archive::open(&mut source, ReaderConfig::default()).unwrap();
        assert_eq!(archive.folder_count(), 1);

        for (i, entry) in entries.iter().enumerate() {
            match &entry.data {
                Some(data) => assert_eq!(&archive.read_file(&mut source, i).unwrap(), data),
                None => assert!(archive.read_file(&mut source, i).is_err()),
            }
        }
    }
}

#[test]
fn unpack_folder_reports_verdicts() {
    let bytes = write_to_vec(&sample_entries(), &WriterConfig::default());
    let mut source = Cursor::new(&bytes);
    let archive = Archive::open(&mut source, ReaderConfig::default()).unwrap();

    let folder = archive.unpack_folder(&mut source, 0).unwrap();
    assert_eq!(folder.substreams.len(), 3);
    assert!(folder.substreams.iter().all(|s| s.crc_ok == Some(true)));
    assert_eq!(folder.substream_data(&folder.substreams[0].info), README);

    let unchecked = Archive::open(&mut source, ReaderConfig::default().verify_crc(false)).unwrap();
    let folder = unchecked.unpack_folder(&mut source, 0).unwrap();
    assert!(folder.substreams.iter().all(|s| s.crc_ok.is_none()));

    assert!(matches!(
        archive.unpack_folder(&mut source, 1),
        Err(Error::NoSuchFolder(1))
    ));
}

#[test]
fn archive_without_streams() {
    let entries = vec![Entry::directory("a"), Entry::file("a/b", Vec::new())];
    let bytes = write_to_vec(&entries, &WriterConfig::default());
    let mut source = Cursor::new(&bytes);
    let archive = Archive::open(&mut source, ReaderConfig::default()).unwrap();
    assert_eq!(archive.folder_count(), 0);
    assert!(archive.header().main_streams.is_none());
    assert_eq!(archive.read_file(&mut source, 1).unwrap(), Vec::<u8>::new());
}

#[test]
fn signature_header_is_consistent() {
    let bytes = write_to_vec(&sample_entries(), &WriterConfig::default());
    let archive = open(&bytes);
    let sig = archive.signature_header();
    assert_eq!(sig.archive_version, ArchiveVersion { major: 0, minor: 4 });
    assert_eq!(sig.start_header_crc, sig.expected_crc());
    assert_eq!(
        sig.next_header_position().unwrap() + sig.start_header.next_header_size,
        bytes.len() as u64
    );
}

#[test]
fn anti_items_have_no_contents() {
    let header = Header {
        files: Some(FilesInfo {
            num_files: 2,
            empty_streams: Some(BoolVector::repeat(true, 2)),
            empty_files: Some(BoolVector::repeat(true, 2)),
            anti: Some([false, true].iter().copied().collect()),
            names: Some(vec!["keep.txt".to_string(), "gone.txt".to_string()]),
            ..FilesInfo::default()
        }),
        ..Header::default()
    };
    let bytes = plain_archive(&header);
    let mut source = Cursor::new(&bytes);
    let archive = Archive::open(&mut source, ReaderConfig::default()).unwrap();
    assert!(!archive.files()[0].is_anti);
    assert!(archive.files()[1].is_anti);
    assert_eq!(archive.read_file(&mut source, 0).unwrap(), Vec::<u8>::new());
    assert!(matches!(
        archive.read_file(&mut source, 1),
        Err(Error::NotAFile(name)) if name == "gone.txt"
    ));
}
