use super::*;

/// 16 MiB, what 7-Zip uses at its default level.
pub const DEFAULT_DICT_SIZE: u32 = 1 << 24;
pub const DEFAULT_PRESET: u32 = 6;

/// The entropy coder at the end of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyMethod {
    Lzma,
    Lzma2,
}

/// Allows for the customization of how pack streams are compressed.
///```
/// use sevenz::codec::{BcjArch, CompressionConfig, EntropyMethod};
///
/// let config = CompressionConfig::default()
///     .method(EntropyMethod::Lzma)
///     .bcj(BcjArch::X86)
///     .dict_size(1 << 20);
///```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionConfig {
    pub method: EntropyMethod,
    pub dict_size: u32,
    /// Optional branch converter applied before the entropy coder.
    pub bcj: Option<BcjArch>,
    /// liblzma preset (0-9) providing everything but the dictionary size.
    pub preset: u32,
}

impl Default for CompressionConfig {
    fn default() -> CompressionConfig {
        CompressionConfig {
            method: EntropyMethod::Lzma2,
            dict_size: DEFAULT_DICT_SIZE,
            bcj: None,
            preset: DEFAULT_PRESET,
        }
    }
}

impl CompressionConfig {
    /// Setter for the `method` field
    pub fn method(mut self, method: EntropyMethod) -> Self {
        self.method = method;
        self
    }

    /// Setter for the `dict_size` field
    pub fn dict_size(mut self, dict_size: u32) -> Self {
        self.dict_size = dict_size;
        self
    }

    /// Setter for the `bcj` field
    pub fn bcj(mut self, arch: BcjArch) -> Self {
        self.bcj = Some(arch);
        self
    }

    /// Setter for the `preset` field
    pub fn preset(mut self, preset: u32) -> Self {
        self.preset = preset;
        self
    }

    /// The filter chain this config describes, branch converter first.
    pub fn steps(&self) -> Vec<FilterStep> {
        let mut steps = Vec::with_capacity(2);
        if let Some(arch) = self.bcj {
            steps.push(FilterStep::Bcj(arch));
        }
        steps.push(match self.method {
            EntropyMethod::Lzma => FilterStep::Lzma(LzmaProperties {
                dict_size: self.dict_size,
                ..LzmaProperties::default()
            }),
            EntropyMethod::Lzma2 => FilterStep::Lzma2 {
                dict_size: self.dict_size,
            },
        });
        return steps;
    }
}
