use super::*;

use crate::parser::types::{BindPair, Coder, Folder};

use log::trace;
use std::io::Read;
use liblzma::stream::{Action, Filters, Status, Stream};

/// Incrementally compresses one pack stream.
///
/// Feed data with `compress`, then call `flush` once to terminate the stream.
/// `folder` describes the result for the archive header.
pub struct Compressor {
    config: CompressionConfig,
    stream: Stream,
}

impl std::fmt::Debug for Compressor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compressor")
            .field("config", &self.config)
            .field("total_in", &self.stream.total_in())
            .field("total_out", &self.stream.total_out())
            .finish()
    }
}

impl Compressor {
    pub fn new(config: CompressionConfig) -> Result<Compressor, CodecError> {
        let steps = config.steps();
        validate_steps(&steps)?;
        let stream = Stream::new_raw_encoder(&build_filters(&steps, config.preset)?)?;
        return Ok(Compressor { config, stream });
    }

    pub fn config(&self) -> &CompressionConfig {
        return &self.config;
    }

    /// Compress a chunk, returning whatever output liblzma produced so far.
    pub fn compress(&mut self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut output = Vec::with_capacity(data.len() / 2 + 64);
        let mut input = data;
        while !input.is_empty() {
            if output.len() == output.capacity() {
                output.reserve(CHUNK_SIZE);
            }
            let in_before = self.stream.total_in();
            self.stream.process_vec(input, &mut output, Action::Run)?;
            input = &input[(self.stream.total_in() - in_before) as usize..];
        }
        trace!("compress: {} -> {} bytes", data.len(), output.len());
        return Ok(output);
    }

    /// Compress everything `reader` yields, in chunks.
    pub fn compress_from<R: Read>(&mut self, mut reader: R) -> Result<Vec<u8>, CodecError> {
        let mut output = Vec::new();
        let mut buf = vec![0u8; CHUNK_SIZE];
        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            output.extend(self.compress(&buf[..n])?);
        }
        return Ok(output);
    }

    /// Terminate the stream and return the remaining output.
    pub fn flush(&mut self) -> Result<Vec<u8>, CodecError> {
        let mut output = Vec::with_capacity(CHUNK_SIZE);
        loop {
            if output.len() == output.capacity() {
                output.reserve(CHUNK_SIZE);
            }
            let status = self.stream.process_vec(&[], &mut output, Action::Finish)?;
            if matches!(status, Status::StreamEnd) {
                break;
            }
        }
        trace!("flush: {} bytes", output.len());
        return Ok(output);
    }

    /// Bytes fed in so far.
    pub fn total_in(&self) -> u64 {
        return self.stream.total_in();
    }

    /// A fresh liblzma filter chain equal to the one this compressor runs.
    pub fn filters(&self) -> Result<Filters, CodecError> {
        return build_filters(&self.config.steps(), self.config.preset);
    }

    /// The coders describing the filter chain, outermost first.
    pub fn coders(&self) -> Vec<Coder> {
        return self.config.steps().iter().map(FilterStep::coder).collect();
    }

    /// The folder decoding this compressor's output into `unpack_size` bytes.
    ///
    /// Coder `i` reads the output of coder `i + 1`; the last coder reads the pack stream.
    /// None of the filters change the data size, so every output has the plain size.
    pub fn folder(&self, unpack_size: u64) -> Folder {
        let coders = self.coders();
        let n = coders.len() as u64;
        let bind_pairs = (1..n)
            .map(|i| BindPair {
                in_index: i - 1,
                out_index: i,
            })
            .collect();
        return Folder {
            coders,
            bind_pairs,
            packed_streams: vec![n - 1],
            unpack_sizes: vec![unpack_size; n as usize],
            unpack_crc: None,
        };
    }
}
