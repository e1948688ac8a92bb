use super::*;

/// Per-file properties, stored column by column as in the archive.
///
/// Every column is optional; a missing column means "not recorded" for all files.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilesInfo {
    pub num_files: usize,
    /// One bit per file, set for files without packed data.
    pub empty_streams: Option<BoolVector>,
    /// One bit per empty-stream file, set for zero-byte files (as opposed to directories).
    pub empty_files: Option<BoolVector>,
    /// One bit per empty-stream file, set for deletion markers.
    pub anti: Option<BoolVector>,
    pub names: Option<Vec<String>>,
    pub ctime: Option<DefinedVec<u64>>,
    pub atime: Option<DefinedVec<u64>>,
    pub mtime: Option<DefinedVec<u64>>,
    pub attributes: Option<DefinedVec<u32>>,
}

impl FilesInfo {
    pub fn num_empty_streams(&self) -> usize {
        return self
            .empty_streams
            .as_ref()
            .map(|b| b.count_ones())
            .unwrap_or(0);
    }

    pub fn has_stream(&self, index: usize) -> bool {
        return match &self.empty_streams {
            Some(bits) => !bits.get(index).map(|b| *b).unwrap_or(false),
            None => true,
        };
    }

    /// Position of file `index` among the empty-stream files, if it is one.
    pub fn empty_stream_index(&self, index: usize) -> Option<usize> {
        let bits = self.empty_streams.as_ref()?;
        if !bits.get(index).map(|b| *b).unwrap_or(false) {
            return None;
        }
        return Some(bits[..index].count_ones());
    }

    /// Position of file `index` among the stream-bearing files, if it is one.
    pub fn stream_index(&self, index: usize) -> Option<usize> {
        if index >= self.num_files || !self.has_stream(index) {
            return None;
        }
        return Some(match &self.empty_streams {
            Some(bits) => bits[..index].count_zeros(),
            None => index,
        });
    }

    pub fn is_empty_file(&self, index: usize) -> bool {
        return Self::empty_subset_flag(&self.empty_files, self.empty_stream_index(index));
    }

    pub fn is_anti(&self, index: usize) -> bool {
        return Self::empty_subset_flag(&self.anti, self.empty_stream_index(index));
    }

    fn empty_subset_flag(bits: &Option<BoolVector>, subset_index: Option<usize>) -> bool {
        return match (bits, subset_index) {
            (Some(bits), Some(i)) => bits.get(i).map(|b| *b).unwrap_or(false),
            _ => false,
        };
    }
}
