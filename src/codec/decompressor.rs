use super::*;

use crate::parser::types::Folder;

use log::trace;
use liblzma::stream::{Action, Status, Stream};

/// Decodes the pack stream of one folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decompressor {
    steps: Vec<FilterStep>,
    unpack_size: u64,
}

impl Decompressor {
    /// Build a decompressor from a folder's coder graph and declared output size.
    pub fn new(folder: &Folder) -> Result<Decompressor, CodecError> {
        return Ok(Decompressor {
            steps: folder_steps(folder)?,
            unpack_size: folder.unpack_size(),
        });
    }

    /// Build a decompressor for data produced with `config`.
    pub fn from_config(config: &CompressionConfig, unpack_size: u64) -> Decompressor {
        return Decompressor {
            steps: config.steps(),
            unpack_size,
        };
    }

    pub fn steps(&self) -> &[FilterStep] {
        return &self.steps;
    }

    pub fn unpack_size(&self) -> u64 {
        return self.unpack_size;
    }

    /// Decompress a whole pack stream.
    ///
    /// Fails with `SizeMismatch` unless exactly the declared number of bytes comes out.
    pub fn decompress(&self, packed: &[u8]) -> Result<Vec<u8>, CodecError> {
        let expected = self.unpack_size;
        if self.steps.is_empty() {
            if packed.len() as u64 != expected {
                return Err(CodecError::SizeMismatch {
                    expected,
                    found: packed.len() as u64,
                });
            }
            return Ok(packed.to_vec());
        }

        let mut stream = Stream::new_raw_decoder(&build_filters(&self.steps, DEFAULT_PRESET)?)?;
        let capacity = usize::try_from(expected).unwrap_or(usize::MAX).min(CHUNK_SIZE);
        let mut output = Vec::with_capacity(capacity);
        let mut input = packed;
        loop {
            if output.len() == output.capacity() {
                output.reserve(CHUNK_SIZE);
            }
            let (in_before, out_before) = (stream.total_in(), stream.total_out());
            let action = if input.is_empty() {
                Action::Finish
            } else {
                Action::Run
            };
            let status = stream.process_vec(input, &mut output, action)?;
            let consumed = (stream.total_in() - in_before) as usize;
            input = &input[consumed..];

            if matches!(status, Status::StreamEnd) || output.len() as u64 >= expected {
                break;
            }
            if consumed == 0 && stream.total_out() == out_before {
                // Input exhausted or truncated.
                break;
            }
        }

        trace!(
            "decompress: {} -> {} bytes ({} expected)",
            packed.len(),
            output.len(),
            expected
        );
        if output.len() as u64 != expected {
            return Err(CodecError::SizeMismatch {
                expected,
                found: output.len() as u64,
            });
        }
        return Ok(output);
    }
}
