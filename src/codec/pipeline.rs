use super::*;

use crate::parser::types::{Coder, Folder};

use log::trace;
use liblzma::stream::{Filters, LzmaOptions};

/// One stage of a linear liblzma filter chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStep {
    Bcj(BcjArch),
    Lzma(LzmaProperties),
    Lzma2 { dict_size: u32 },
}

impl FilterStep {
    /// The filter for a single coder, or `None` for `Copy`, which needs no stage.
    pub fn from_coder(coder: &Coder) -> Result<Option<FilterStep>, CodecError> {
        let method = Method::try_from(coder)?;
        let attrs = coder.attrs.as_deref().unwrap_or(&[]);
        let invalid = || CodecError::InvalidProperties {
            id: coder.id.clone(),
        };
        return match method {
            Method::Copy => Ok(None),
            Method::Bcj(arch) => Ok(Some(FilterStep::Bcj(arch))),
            Method::Lzma => match LzmaProperties::decode(attrs) {
                Some(props) => Ok(Some(FilterStep::Lzma(props))),
                None => Err(invalid()),
            },
            Method::Lzma2 => match attrs.first().and_then(|&p| lzma2_dict_size(p)) {
                Some(dict_size) => Ok(Some(FilterStep::Lzma2 { dict_size })),
                None => Err(invalid()),
            },
            _ => Err(CodecError::UnsupportedCoder {
                id: coder.id.clone(),
            }),
        };
    }

    /// The coder describing this stage in a folder.
    pub fn coder(&self) -> Coder {
        return match self {
            FilterStep::Bcj(arch) => Coder::simple(arch.id().to_vec(), None),
            FilterStep::Lzma(props) => Coder::simple(Method::Lzma.id().to_vec(), Some(props.encode())),
            FilterStep::Lzma2 { dict_size } => Coder::simple(
                Method::Lzma2.id().to_vec(),
                Some(vec![lzma2_dict_prop(*dict_size)]),
            ),
        };
    }

    fn is_entropy_coder(&self) -> bool {
        return !matches!(self, FilterStep::Bcj(_));
    }
}

/// Walks a folder from its decoded output back to its pack stream.
///
/// Returns coder indices outermost first: the coder producing the folder's output,
/// then the coder feeding it, down to the one reading the pack stream.
/// Only linear chains of single-input, single-output coders can be walked.
pub fn resolve_chain(folder: &Folder) -> Result<Vec<usize>, CodecError> {
    if folder.coders.is_empty() {
        return Err(CodecError::MalformedFolder("folder has no coders"));
    }
    if folder.packed_streams.len() != 1 {
        return Err(CodecError::MalformedFolder("only single pack stream folders can be decoded"));
    }
    let offsets = folder.coder_stream_offsets();

    let mut out_index = folder.terminal_output().map_err(CodecError::MalformedFolder)?;
    let mut chain = Vec::with_capacity(folder.coders.len());
    loop {
        let coder_index = match folder.coder_for_out_stream(out_index) {
            Some(i) => i,
            None => return Err(CodecError::MalformedFolder("output stream without coder")),
        };
        if chain.contains(&coder_index) {
            return Err(CodecError::MalformedFolder("coder graph has a cycle"));
        }
        chain.push(coder_index);

        let in_index = offsets[coder_index].0;
        match folder.find_bind_pair_for_in_stream(in_index) {
            Some(bp) => out_index = bp.out_index,
            None => {
                if folder.find_packed_stream_index(in_index).is_none() {
                    return Err(CodecError::MalformedFolder("input stream without source"));
                }
                break;
            }
        }
    }

    if chain.len() != folder.coders.len() {
        return Err(CodecError::MalformedFolder("coder not reachable from folder output"));
    }
    return Ok(chain);
}

/// The filter chain decoding `folder`, in liblzma order.
pub fn folder_steps(folder: &Folder) -> Result<Vec<FilterStep>, CodecError> {
    for coder in &folder.coders {
        // Report unknown methods before complaining about their stream layout.
        Method::try_from(coder)?;
        if coder.num_in_streams() != 1 || coder.num_out_streams() != 1 {
            return Err(CodecError::MalformedFolder("coder with multiple streams"));
        }
    }

    let mut steps = Vec::new();
    for coder_index in resolve_chain(folder)? {
        if let Some(step) = FilterStep::from_coder(&folder.coders[coder_index])? {
            steps.push(step);
        }
    }
    validate_steps(&steps)?;
    trace!("folder_steps: {:?}", steps);
    return Ok(steps);
}

/// liblzma wants at most one entropy coder, and it has to come last.
pub fn validate_steps(steps: &[FilterStep]) -> Result<(), CodecError> {
    let entropy = steps.iter().filter(|s| s.is_entropy_coder()).count();
    if steps.is_empty() {
        return Ok(());
    }
    if entropy != 1 || !steps[steps.len() - 1].is_entropy_coder() {
        return Err(CodecError::MalformedFolder("entropy coder must be innermost"));
    }
    return Ok(());
}

/// Builds the liblzma filter chain for `steps`.
pub fn build_filters(steps: &[FilterStep], preset: u32) -> Result<Filters, CodecError> {
    let mut filters = Filters::new();
    for step in steps {
        match step {
            FilterStep::Bcj(BcjArch::X86) => filters.x86(),
            FilterStep::Bcj(BcjArch::PowerPc) => filters.powerpc(),
            FilterStep::Bcj(BcjArch::Ia64) => filters.ia64(),
            FilterStep::Bcj(BcjArch::Arm) => filters.arm(),
            FilterStep::Bcj(BcjArch::ArmThumb) => filters.arm_thumb(),
            FilterStep::Bcj(BcjArch::Sparc) => filters.sparc(),
            FilterStep::Lzma(props) => {
                let mut opts = LzmaOptions::new_preset(preset)?;
                opts.dict_size(props.dict_size)
                    .literal_context_bits(props.lc)
                    .literal_position_bits(props.lp)
                    .position_bits(props.pb);
                filters.lzma1(&opts)
            }
            FilterStep::Lzma2 { dict_size } => {
                let mut opts = LzmaOptions::new_preset(preset)?;
                opts.dict_size(*dict_size);
                filters.lzma2(&opts)
            }
        };
    }
    return Ok(filters);
}
