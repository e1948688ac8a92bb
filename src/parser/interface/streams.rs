use super::*;

/// Where one substream (the contents of one file) lives inside the decoded folders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubstreamInfo {
    pub folder: usize,
    /// Offset inside the folder's decoded output.
    pub offset: u64,
    pub size: u64,
    pub crc: Option<u32>,
}

/// Lists every substream of the given streams info, in file order.
///
/// Without a `SubStreamsInfo` section every folder holds exactly one substream.
/// Substream CRCs fall back to the folder CRC when the folder has a single substream.
pub fn get_substreams_info(si: &StreamsInfo) -> Vec<SubstreamInfo> {
    let folders = si.folders();
    let mut res = Vec::new();

    let (counts, sizes, digests): (Vec<u64>, Vec<u64>, Vec<Option<u32>>) = match &si.substreams_info {
        Some(ssi) => (
            ssi.num_unpack_streams_in_folders.clone(),
            ssi.unpack_sizes.clone(),
            ssi.digests.as_ref().map(|d| d.iter().collect()).unwrap_or_default(),
        ),
        None => (
            vec![1; folders.len()],
            folders.iter().map(Folder::unpack_size).collect(),
            Vec::new(),
        ),
    };

    let mut digests = digests.into_iter();
    let mut sizes = sizes.into_iter();
    for (folder_index, (folder, &num)) in folders.iter().zip(&counts).enumerate() {
        let mut offset = 0;
        for _ in 0..num {
            let size = sizes.next().unwrap_or(0);
            let crc = if folder_crc_covers_substream(folder, num) {
                folder.unpack_crc
            } else {
                digests.next().flatten()
            };
            res.push(SubstreamInfo {
                folder: folder_index,
                offset,
                size,
                crc,
            });
            offset += size;
        }
    }
    return res;
}
