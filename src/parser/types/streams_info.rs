use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubStreamsInfo {
    /// Number of substreams in each folder.
    pub num_unpack_streams_in_folders: Vec<u64>,
    /// Size of every substream, folder by folder.
    /// The last size of each folder is implied on the wire, but stored here.
    pub unpack_sizes: Vec<u64>,
    /// CRCs of the substreams not already covered by a folder CRC, in stream order.
    pub digests: Option<DefinedVec<u32>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StreamsInfo {
    pub pack_info: Option<PackInfo>,
    pub coders_info: Option<CodersInfo>,
    pub substreams_info: Option<SubStreamsInfo>,
}

impl StreamsInfo {
    pub fn folders(&self) -> &[Folder] {
        return match &self.coders_info {
            Some(ci) => &ci.folders,
            None => &[],
        };
    }
}

/// Whether the CRC of a folder's only substream is the folder CRC itself,
/// in which case it is not repeated in the substreams info.
pub fn folder_crc_covers_substream(folder: &Folder, num_substreams: u64) -> bool {
    return num_substreams == 1 && folder.unpack_crc.is_some();
}
