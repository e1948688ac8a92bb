use super::*;

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Windows attribute bit marking a directory.
pub const FILE_ATTRIBUTE_DIRECTORY: u32 = 0x10;
/// Set by p7zip and friends when the high 16 bits of the attributes hold a unix mode.
pub const FILE_ATTRIBUTE_UNIX_EXTENSION: u32 = 0x8000;

/// 100ns intervals between 1601-01-01 (FILETIME epoch) and 1970-01-01.
const FILETIME_UNIX_EPOCH_DIFF: u64 = 116_444_736_000_000_000;

/// Convert a Windows FILETIME into a `SystemTime`.
pub fn filetime_to_system_time(filetime: u64) -> Option<SystemTime> {
    if filetime >= FILETIME_UNIX_EPOCH_DIFF {
        let since_unix = filetime - FILETIME_UNIX_EPOCH_DIFF;
        return UNIX_EPOCH.checked_add(Duration::from_nanos(since_unix).saturating_mul(100));
    }
    let before_unix = FILETIME_UNIX_EPOCH_DIFF - filetime;
    return UNIX_EPOCH.checked_sub(Duration::from_nanos(before_unix).saturating_mul(100));
}

/// Convert a `SystemTime` into a Windows FILETIME, saturating at the representable range.
pub fn system_time_to_filetime(time: SystemTime) -> u64 {
    return match time.duration_since(UNIX_EPOCH) {
        Ok(d) => {
            let intervals = u64::try_from(d.as_nanos() / 100).unwrap_or(u64::MAX);
            FILETIME_UNIX_EPOCH_DIFF.saturating_add(intervals)
        }
        Err(e) => {
            let intervals = u64::try_from(e.duration().as_nanos() / 100).unwrap_or(u64::MAX);
            FILETIME_UNIX_EPOCH_DIFF.saturating_sub(intervals)
        }
    };
}

/// More-or-less like `FilesInfo`, but for a single file and more high-level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub has_stream: bool,
    /// Zero-byte file, as opposed to a directory. Only meaningful without a stream.
    pub is_empty_file: bool,
    /// Deletion marker of an update archive.
    pub is_anti: bool,
    pub attributes: Option<u32>,
    pub ctime: Option<u64>,
    pub atime: Option<u64>,
    pub mtime: Option<u64>,
    /// Which substream holds the contents, if the file has a stream.
    pub stream_index: Option<usize>,
}

impl FileEntry {
    /// Builds the view of file `index` from the columnar files info.
    pub fn from_files_info(fi: &FilesInfo, index: usize) -> FileEntry {
        let name = fi
            .names
            .as_ref()
            .and_then(|n| n.get(index))
            .cloned()
            .unwrap_or_default();
        let column = |c: &Option<DefinedVec<u64>>| c.as_ref().and_then(|c| c.get(index));

        return FileEntry {
            name,
            has_stream: fi.has_stream(index),
            is_empty_file: fi.is_empty_file(index),
            is_anti: fi.is_anti(index),
            attributes: fi.attributes.as_ref().and_then(|a| a.get(index)),
            ctime: column(&fi.ctime),
            atime: column(&fi.atime),
            mtime: column(&fi.mtime),
            stream_index: fi.stream_index(index),
        };
    }

    pub fn is_directory(&self) -> bool {
        if self.has_stream {
            return false;
        }
        if self.is_empty_file {
            return false;
        }
        return true;
    }

    /// The unix mode stored in the upper attribute bits, if any.
    pub fn unix_mode(&self) -> Option<u32> {
        let attrs = self.attributes?;
        if attrs & FILE_ATTRIBUTE_UNIX_EXTENSION == 0 {
            return None;
        }
        return Some(attrs >> 16);
    }

    pub fn ctime_system(&self) -> Option<SystemTime> {
        return self.ctime.and_then(filetime_to_system_time);
    }

    pub fn atime_system(&self) -> Option<SystemTime> {
        return self.atime.and_then(filetime_to_system_time);
    }

    pub fn mtime_system(&self) -> Option<SystemTime> {
        return self.mtime.and_then(filetime_to_system_time);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use bitvec::prelude::*;

    #[test]
    fn filetime_conversion() {
        assert_eq!(
            filetime_to_system_time(FILETIME_UNIX_EPOCH_DIFF),
            Some(UNIX_EPOCH)
        );
        let t = UNIX_EPOCH + Duration::from_secs(1_600_000_000);
        assert_eq!(system_time_to_filetime(t), 132_444_736_000_000_000);
        assert_eq!(filetime_to_system_time(system_time_to_filetime(t)), Some(t));
    }

    #[test]
    fn directory_and_unix_mode() {
        let mut fi = FilesInfo {
            num_files: 3,
            empty_streams: Some(bitvec![u8, Msb0; 1, 1, 0]),
            empty_files: Some(bitvec![u8, Msb0; 0, 1]),
            ..FilesInfo::default()
        };
        fi.attributes = Some(DefinedVec::all(vec![
            FILE_ATTRIBUTE_DIRECTORY,
            0x20,
            0x20 | FILE_ATTRIBUTE_UNIX_EXTENSION | (0o100644 << 16),
        ]));

        let dir = FileEntry::from_files_info(&fi, 0);
        let empty = FileEntry::from_files_info(&fi, 1);
        let regular = FileEntry::from_files_info(&fi, 2);
        assert!(dir.is_directory());
        assert!(!empty.is_directory());
        assert!(!regular.is_directory());
        assert_eq!(regular.stream_index, Some(0));
        assert_eq!(regular.unix_mode(), Some(0o100644));
        assert_eq!(dir.unix_mode(), None);
    }
}
