use super::*;

/// An abstraction over the low-level 7zip format header.
///
/// Joins the file list with the substreams holding each file's contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighLevelArchive {
    pub files: Vec<FileEntry>,
    /// Substreams of the main streams, in file order.
    pub substreams: Vec<SubstreamInfo>,
}

impl HighLevelArchive {
    /// Fails if more files claim contents than there are substreams to hold them.
    pub fn from_header(hdr: &Header) -> Result<HighLevelArchive, &'static str> {
        let substreams = match &hdr.main_streams {
            Some(si) => get_substreams_info(si),
            None => Vec::new(),
        };
        let files = match &hdr.files {
            Some(fi) => {
                // Before allocating one entry per declared file.
                if fi.num_files.saturating_sub(fi.num_empty_streams()) > substreams.len() {
                    return Err("more files with contents than substreams");
                }
                (0..fi.num_files)
                    .map(|i| FileEntry::from_files_info(fi, i))
                    .collect()
            }
            None => Vec::new(),
        };
        return Ok(HighLevelArchive { files, substreams });
    }

    /// The substream holding the contents of file `index`.
    pub fn substream_for_file(&self, index: usize) -> Option<&SubstreamInfo> {
        let stream_index = self.files.get(index)?.stream_index?;
        return self.substreams.get(stream_index);
    }

    pub fn file_index_by_name(&self, name: &str) -> Option<usize> {
        return self.files.iter().position(|f| f.name == name);
    }
}
