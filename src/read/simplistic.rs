//! This module provides a "simplistic" API for reading archives.
//!
//! It trades off precise control for ease of use.

use super::*;

use std::io::Cursor;

/// Extract the file with the given `name` into a data buffer.
///
/// This involves parsing the entire archive and decoding the file's whole folder,
/// so it's not very efficient.
pub fn extract_file(name: &str, archive_data: &[u8]) -> Result<Vec<u8>, Error> {
    let mut source = Cursor::new(archive_data);
    let archive = Archive::open(&mut source, ReaderConfig::default())?;
    let index = match archive.file_index_by_name(name) {
        Some(i) => i,
        None => return Err(Error::NoSuchFileName(String::from(name))),
    };
    return archive.read_file(&mut source, index);
}
