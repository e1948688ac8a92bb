#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoderComplex {
    pub num_in_streams: u64,
    pub num_out_streams: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coder {
    /// Present if the coder was stored with explicit stream counts.
    pub complex: Option<CoderComplex>,
    /// Coder-specific properties, e.g. the LZMA dictionary size.
    pub attrs: Option<Vec<u8>>,
    /// Method ID, 1 to 15 bytes (in practice at most 4).
    pub id: Vec<u8>,
}

impl Coder {
    /// A coder with one input and one output stream.
    pub fn simple(id: Vec<u8>, attrs: Option<Vec<u8>>) -> Coder {
        return Coder {
            complex: None,
            attrs,
            id,
        };
    }

    pub fn num_in_streams(&self) -> u64 {
        return self.complex.map(|c| c.num_in_streams).unwrap_or(1);
    }

    pub fn num_out_streams(&self) -> u64 {
        return self.complex.map(|c| c.num_out_streams).unwrap_or(1);
    }
}

/// Wires output stream `out_index` of one coder to input stream `in_index` of another.
/// Both indices count streams across all coders of the folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindPair {
    pub in_index: u64,
    pub out_index: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub coders: Vec<Coder>,
    pub bind_pairs: Vec<BindPair>,
    /// Input stream indices fed directly from pack streams, in pack stream order.
    pub packed_streams: Vec<u64>,
    /// One size per coder output stream.
    pub unpack_sizes: Vec<u64>,
    pub unpack_crc: Option<u32>,
}

impl Folder {
    pub fn total_in_streams(&self) -> u64 {
        return self.coders.iter().map(Coder::num_in_streams).sum();
    }

    pub fn total_out_streams(&self) -> u64 {
        return self.coders.iter().map(Coder::num_out_streams).sum();
    }

    pub fn find_bind_pair_for_in_stream(&self, in_index: u64) -> Option<&BindPair> {
        return self.bind_pairs.iter().find(|bp| bp.in_index == in_index);
    }

    pub fn find_bind_pair_for_out_stream(&self, out_index: u64) -> Option<&BindPair> {
        return self.bind_pairs.iter().find(|bp| bp.out_index == out_index);
    }

    /// Position of `in_index` among the folder's pack-bound inputs.
    pub fn find_packed_stream_index(&self, in_index: u64) -> Option<usize> {
        return self.packed_streams.iter().position(|&i| i == in_index);
    }

    /// `(first input index, first output index)` of every coder.
    pub fn coder_stream_offsets(&self) -> Vec<(u64, u64)> {
        let mut offsets = Vec::with_capacity(self.coders.len());
        let (mut ins, mut outs) = (0, 0);
        for coder in &self.coders {
            offsets.push((ins, outs));
            ins += coder.num_in_streams();
            outs += coder.num_out_streams();
        }
        return offsets;
    }

    /// Index of the coder owning output stream `out_index`.
    pub fn coder_for_out_stream(&self, out_index: u64) -> Option<usize> {
        return self
            .coder_stream_offsets()
            .iter()
            .zip(&self.coders)
            .position(|(&(_, first), c)| out_index >= first && out_index < first + c.num_out_streams());
    }

    /// The single output stream not consumed by any bind pair: the folder's decoded output.
    pub fn terminal_output(&self) -> Result<u64, &'static str> {
        let mut unbound = (0..self.total_out_streams())
            .filter(|&o| self.find_bind_pair_for_out_stream(o).is_none());
        let first = match unbound.next() {
            Some(o) => o,
            None => return Err("no unbound output stream"),
        };
        if unbound.next().is_some() {
            return Err("more than one unbound output stream");
        }
        return Ok(first);
    }

    /// Size of the folder's decoded output.
    pub fn unpack_size(&self) -> u64 {
        return match self.terminal_output() {
            Ok(o) => self.unpack_sizes.get(o as usize).copied().unwrap_or(0),
            Err(_) => 0,
        };
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodersInfo {
    pub folders: Vec<Folder>,
}
